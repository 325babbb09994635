//! Example: Generate a territory map
//!
//! Usage: `cargo run --example generate_map -- [MASK.png] [SEED]`
//!
//! Without a mask path a synthetic three-continent mask is used. Set
//! `RUST_LOG=debug` to see per-stage logging.

use rust_territory_map::*;

/// Three continents on a white background
fn synthetic_mask() -> MaskImage {
    MaskImage::from_fn(256, 160, |x, y| {
        let (fx, fy) = (x as f32 / 256.0, y as f32 / 160.0);
        let blob = |cx: f32, cy: f32, r: f32| (fx - cx).powi(2) + (fy - cy).powi(2) < r * r;
        if blob(0.25, 0.35, 0.2) {
            [230, 40, 40, 255]
        } else if blob(0.7, 0.3, 0.18) {
            [40, 200, 60, 255]
        } else if blob(0.55, 0.75, 0.17) {
            [50, 80, 230, 255]
        } else {
            [255, 255, 255, 255]
        }
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let mask = match args.next() {
        Some(path) => MaskImage::open(&path)?,
        None => synthetic_mask(),
    };
    let seed: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    println!("Territory Map Generation Example");
    println!("================================\n");

    let config = MapGenConfigBuilder::new()
        .grid_resolution(120)?
        .continent(
            ContinentDefinition::new("Rubra", [0.9, 0.16, 0.16, 1.0]).with_target_region_count(8),
        )
        .continent(
            ContinentDefinition::new("Viridis", [0.16, 0.78, 0.24, 1.0])
                .with_target_region_count(6)
                .with_name_pool(["Greenhold", "Mossfen", "Oakreach", "Fernvale"]),
        )
        .continent(
            ContinentDefinition::new("Caerula", [0.2, 0.31, 0.9, 1.0]).with_target_region_count(5),
        )
        .build()?;

    println!("Configuration:");
    println!("  Seed: {}", seed);
    println!("  Mask: {}x{}", mask.width(), mask.height());
    println!("  Grid resolution: {}", config.grid_resolution);
    println!("  Partition: {}", config.partition_strategy.name());
    println!("  Requested regions: {}", config.total_target_regions());
    println!();

    let mut generator = MapGenerator::new(config).with_mask(mask);
    let start = std::time::Instant::now();
    let map = generator.generate(seed)?;
    println!("Generated {} regions in {:?}\n", map.region_count(), start.elapsed());

    let (size_x, size_y) = map.grid_size();
    println!("Grid: {}x{}", size_x, size_y);
    for (index, continent) in map.config().continents.iter().enumerate() {
        println!("\n{} ({} regions):", continent.name, map.regions_in_continent(index).count());
        for region in map.regions_in_continent(index) {
            println!(
                "  #{:<3} {:<22} cells={:<5} neighbors={:?}",
                region.id, region.name, region.cell_count, region.neighbor_ids
            );
        }
    }

    if let Some(first) = map.get_region(0) {
        let nearby = map.find_regions_within_hops(first.id, 2);
        println!("\nRegions within 2 hops of {}: {:?}", first.name, nearby);
    }

    println!("\nGeneration complete!");
    Ok(())
}
