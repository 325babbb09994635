//! Mesh generation for territory regions
//!
//! Each region gets its own engine-agnostic vertex buffer, expressed relative
//! to the region's center point so it can be placed without an extra
//! transform. Cells become flat-topped prisms: one top quad per land cell plus
//! a vertical side quad wherever the cell meets the grid edge, another region,
//! or a height step.

mod colors;

pub use colors::{color_distance, color_distance_squared, from_rgba8, rgb, tint, RegionColor};

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::grid::{Grid, GridLayout};

/// Engine-agnostic mesh data output
///
/// Contains raw vertex data suitable for any rendering engine:
/// - Bevy: Convert to `Mesh` with attributes
/// - Godot: Convert to `ArrayMesh`
/// - wgpu: Use directly as vertex buffers
///
/// Faces never share vertices, so every quad adds exactly four vertices and
/// two triangles.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions, local to the owning region's center
    pub positions: Vec<[f32; 3]>,
    /// Flat face normals
    pub normals: Vec<[f32; 3]>,
    /// Vertex colors (RGBA)
    pub colors: Vec<[f32; 4]>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of quads (top and side faces) in the mesh
    pub fn quad_count(&self) -> usize {
        self.positions.len() / 4
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append an upward-facing quad
    ///
    /// `corners` are top-left, top-right, bottom-right, bottom-left in grid
    /// orientation; the resulting triangles are `(0, 2, 1)` and `(0, 3, 2)`.
    pub fn add_top_face(&mut self, corners: [Vec3; 4], color: RegionColor) {
        self.push_quad(corners, Vec3::Z, color, [0, 2, 1, 0, 3, 2]);
    }

    /// Append a vertical quad dropping from the edge `v1 → v2` to `ground_z`
    ///
    /// Vertices are `v1`, `v1` grounded, `v2`, `v2` grounded; the triangles are
    /// `(0, 2, 1)` and `(2, 3, 1)`.
    pub fn add_side_face(
        &mut self,
        v1: Vec3,
        v2: Vec3,
        ground_z: f32,
        normal: Vec3,
        color: RegionColor,
    ) {
        let v1_ground = Vec3::new(v1.x, v1.y, ground_z);
        let v2_ground = Vec3::new(v2.x, v2.y, ground_z);
        self.push_quad([v1, v1_ground, v2, v2_ground], normal, color, [0, 2, 1, 2, 3, 1]);
    }

    fn push_quad(
        &mut self,
        vertices: [Vec3; 4],
        normal: Vec3,
        color: RegionColor,
        order: [u32; 6],
    ) {
        let base_idx = self.positions.len() as u32;
        for vertex in vertices {
            self.positions.push(vertex.to_array());
            self.normals.push(normal.to_array());
            self.colors.push(color);
        }
        self.indices.extend(order.iter().map(|i| base_idx + i));
    }
}

/// Geometry emitted for one region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionMesh {
    /// Vertex buffers in region-local space
    pub mesh: MeshData,
    /// Land cells covered by top faces
    pub cell_count: usize,
    /// Side quads emitted at region, height or grid boundaries
    pub side_face_count: usize,
}

/// Build one mesh per region from a partitioned grid
///
/// `centers[r]` is the local origin of region `r` and `colors[r]` its tint.
/// Cells whose region has no entry are skipped. A side face is emitted toward
/// a cardinal neighbor when the neighbor is off the grid, belongs to another
/// region (ocean included), or differs in height by more than
/// `height_threshold`. Side faces drop to world `z = 0`.
pub fn build_region_meshes(
    grid: &Grid,
    layout: &GridLayout,
    centers: &[Vec3],
    colors: &[RegionColor],
    height_threshold: f32,
) -> Vec<RegionMesh> {
    let region_count = centers.len().min(colors.len());
    let mut meshes = vec![RegionMesh::default(); region_count];
    let half = layout.cell_size() * 0.5;

    for y in 0..grid.size_y() {
        for x in 0..grid.size_x() {
            let (ix, iy) = (x as isize, y as isize);
            let Some(cell) = grid.get(ix, iy) else {
                continue;
            };
            let Some(region) = cell.region.filter(|&r| r < region_count) else {
                continue;
            };
            let center = centers[region];
            let color = colors[region];

            let world = layout.cell_center(x, y);
            let base = Vec3::new(world.x - center.x, world.y - center.y, -center.z);
            let h = cell.height;
            let tl = base + Vec3::new(-half.x, -half.y, h);
            let tr = base + Vec3::new(half.x, -half.y, h);
            let bl = base + Vec3::new(-half.x, half.y, h);
            let br = base + Vec3::new(half.x, half.y, h);

            let out = &mut meshes[region];
            out.mesh.add_top_face([tl, tr, br, bl], color);
            out.cell_count += 1;

            let ground_z = -center.z;
            let sides = [
                ((1, 0), tr, br, Vec3::X),
                ((-1, 0), bl, tl, Vec3::NEG_X),
                ((0, -1), tl, tr, Vec3::NEG_Y),
                ((0, 1), br, bl, Vec3::Y),
            ];
            for ((dx, dy), v1, v2, normal) in sides {
                let exposed = match grid.get(ix + dx, iy + dy) {
                    None => true,
                    Some(neighbor) => {
                        neighbor.region != cell.region
                            || (neighbor.height - h).abs() > height_threshold
                    }
                };
                if exposed {
                    out.mesh.add_side_face(v1, v2, ground_z, normal, color);
                    out.side_face_count += 1;
                }
            }
        }
    }

    meshes
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const RED: RegionColor = [1.0, 0.0, 0.0, 1.0];

    fn single_region_grid(size_x: usize, size_y: usize, height: f32) -> Grid {
        let mut grid = Grid::new(size_x, size_y);
        for cell in grid.cells_mut() {
            cell.continent = Some(0);
            cell.region = Some(0);
            cell.height = height;
        }
        grid
    }

    #[test]
    fn test_top_face_winding() {
        let mut mesh = MeshData::default();
        mesh.add_top_face([Vec3::ZERO, Vec3::X, Vec3::X + Vec3::Y, Vec3::Y], RED);

        assert_eq!(mesh.indices, vec![0, 2, 1, 0, 3, 2]);
        assert!(mesh.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
        assert_eq!(mesh.quad_count(), 1);
    }

    #[test]
    fn test_side_face_layout() {
        let mut mesh = MeshData::default();
        mesh.add_top_face([Vec3::ZERO; 4], RED);
        mesh.add_side_face(Vec3::new(1.0, 0.0, 5.0), Vec3::new(1.0, 1.0, 5.0), -2.0, Vec3::X, RED);

        assert_eq!(&mesh.indices[6..], &[4, 6, 5, 6, 7, 5]);
        assert_eq!(mesh.positions[5], [1.0, 0.0, -2.0]);
        assert_eq!(mesh.positions[7], [1.0, 1.0, -2.0]);
        assert_eq!(mesh.normals[4], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_uniform_block_emits_only_perimeter() {
        let grid = single_region_grid(3, 2, 1.0);
        let layout = GridLayout::new(Vec2::new(3.0, 2.0), 3, 2);
        let meshes = build_region_meshes(&grid, &layout, &[Vec3::ZERO], &[RED], 0.01);

        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].cell_count, 6);
        // Perimeter of a 3x2 block is 10 unit edges
        assert_eq!(meshes[0].side_face_count, 10);
        assert_eq!(meshes[0].mesh.quad_count(), 16);
        assert_eq!(meshes[0].mesh.triangle_count(), 32);
    }

    #[test]
    fn test_height_step_exposes_inner_edge() {
        let mut grid = single_region_grid(2, 1, 0.0);
        grid.cells_mut()[1].height = 1.0;
        let layout = GridLayout::new(Vec2::new(2.0, 1.0), 2, 1);
        let meshes = build_region_meshes(&grid, &layout, &[Vec3::ZERO], &[RED], 0.5);

        // 6 outer edges plus the shared edge seen from both cells
        assert_eq!(meshes[0].side_face_count, 8);
    }

    #[test]
    fn test_small_height_difference_is_culled() {
        let mut grid = single_region_grid(2, 1, 0.0);
        grid.cells_mut()[1].height = 0.005;
        let layout = GridLayout::new(Vec2::new(2.0, 1.0), 2, 1);
        let meshes = build_region_meshes(&grid, &layout, &[Vec3::ZERO], &[RED], 0.01);

        assert_eq!(meshes[0].side_face_count, 6);
    }

    #[test]
    fn test_region_boundary_faces_on_both_sides() {
        let mut grid = single_region_grid(2, 1, 0.0);
        grid.cells_mut()[1].region = Some(1);
        let layout = GridLayout::new(Vec2::new(2.0, 1.0), 2, 1);
        let meshes = build_region_meshes(
            &grid,
            &layout,
            &[Vec3::ZERO, Vec3::ZERO],
            &[RED, RED],
            0.01,
        );

        assert_eq!(meshes[0].side_face_count, 4);
        assert_eq!(meshes[1].side_face_count, 4);
    }

    #[test]
    fn test_positions_are_region_local_and_grounded() {
        let grid = single_region_grid(1, 1, 12.0);
        let layout = GridLayout::new(Vec2::new(1.0, 1.0), 1, 1);
        let center = Vec3::new(-1.0, -1.0, 10.0);
        let meshes = build_region_meshes(&grid, &layout, &[center], &[RED], 0.01);
        let mesh = &meshes[0].mesh;

        // Cell spans world [-1, 1]; local x/y are shifted by +1
        assert_eq!(mesh.positions[0], [0.0, 0.0, 2.0]);
        assert_eq!(mesh.positions[2], [2.0, 2.0, 2.0]);
        // Ground vertices sit at world z = 0
        let lowest = mesh
            .positions
            .iter()
            .map(|p| p[2])
            .fold(f32::MAX, f32::min);
        assert_eq!(lowest, -10.0);
    }

    #[test]
    fn test_ocean_cells_produce_nothing() {
        let grid = Grid::new(3, 3);
        let layout = GridLayout::new(Vec2::new(3.0, 3.0), 3, 3);
        let meshes = build_region_meshes(&grid, &layout, &[Vec3::ZERO], &[RED], 0.01);
        assert!(meshes[0].mesh.is_empty());
    }
}
