//! Demonstration of per-region mesh output
//!
//! Prints buffer statistics and optionally writes the whole map as a
//! Wavefront OBJ file: `cargo run --example mesh_demo -- map.obj`

use std::fs::File;
use std::io::{BufWriter, Write};

use rust_territory_map::*;

fn write_obj(map: &TerritoryMap, path: &str) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let mut offset = 1u32;
    for region in map.land_regions().filter(|r| !r.mesh.is_empty()) {
        writeln!(out, "o region_{}", region.id)?;
        for (v, c) in region.world_vertices().zip(&region.mesh.colors) {
            writeln!(out, "v {} {} {} {} {} {}", v.x, v.y, v.z, c[0], c[1], c[2])?;
        }
        for n in &region.mesh.normals {
            writeln!(out, "vn {} {} {}", n[0], n[1], n[2])?;
        }
        for tri in region.mesh.indices.chunks(3) {
            let (a, b, c) = (tri[0] + offset, tri[1] + offset, tri[2] + offset);
            writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
        }
        offset += region.mesh.vertex_count() as u32;
    }
    out.flush()
}

fn main() -> Result<()> {
    println!("Generating map...");

    let mask = MaskImage::from_fn(64, 64, |x, y| {
        let d = (x as f32 - 32.0).hypot(y as f32 - 32.0);
        if d < 26.0 {
            [200, 180, 60, 255]
        } else {
            [0, 0, 0, 255]
        }
    });
    let config = MapGenConfigBuilder::new()
        .grid_resolution(64)?
        .region_height_range(0.0, 40.0)?
        .cell_height_range(-2.0, 2.0)?
        .height_difference_threshold(1.5)?
        .continent(
            ContinentDefinition::new("Aurum", [0.78, 0.7, 0.24, 1.0]).with_target_region_count(10),
        )
        .build()?;

    let mut generator = MapGenerator::new(config).with_mask(mask);
    let map = generator.generate(42)?;
    println!("Generated {} regions", map.region_count());

    let vertices: usize = map.regions().iter().map(|r| r.mesh.vertex_count()).sum();
    let triangles: usize = map.regions().iter().map(|r| r.mesh.triangle_count()).sum();
    let sides: usize = map.regions().iter().map(|r| r.side_face_count).sum();
    let cells: usize = map.regions().iter().map(|r| r.cell_count).sum();

    println!("\nMesh statistics:");
    println!("  Cells (top faces): {}", cells);
    println!("  Side faces: {}", sides);
    println!("  Vertices: {}", vertices);
    println!("  Triangles: {}", triangles);

    let mem = vertices * (12 + 12 + 16) + triangles * 12;
    println!("  Memory: {} bytes ({:.2} MB)", mem, mem as f32 / 1024.0 / 1024.0);

    println!("\nPer region:");
    for region in map.regions() {
        println!(
            "  #{:<2} {:<18} cells={:<4} sides={:<4} tris={:<5} color=({:.2}, {:.2}, {:.2})",
            region.id,
            region.name,
            region.cell_count,
            region.side_face_count,
            region.mesh.triangle_count(),
            region.region_color[0],
            region.region_color[1],
            region.region_color[2],
        );
    }

    if let Some(path) = std::env::args().nth(1) {
        match write_obj(map, &path) {
            Ok(()) => println!("\nWrote {}", path),
            Err(err) => eprintln!("\nFailed to write {}: {}", path, err),
        }
    }

    Ok(())
}
