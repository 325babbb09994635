//! Generated territory records
//!
//! Represents one region of the finished map with its identity, placement,
//! colors, geometry and adjacency.

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::mesh::{MeshData, RegionColor};

/// A single generated territory
///
/// Each record carries:
/// - A unique ID that equals the id of the seed it grew from
/// - The owning continent and a display name drawn from its pool
/// - A center point used as the local origin of the mesh
/// - Vertex buffers ready for any rendering engine
/// - Neighbor connectivity for movement and attack rules
///
/// # Design Notes
///
/// Records are regenerated from `(config, mask, seed)` rather than stored:
/// the same triple always yields identical records, so peers only exchange
/// the seed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRecord {
    /// Unique identifier for this region (0 to region_count-1)
    pub id: usize,

    /// Display name, unique within the continent until its pool runs out
    pub name: String,

    /// Index of the owning continent in the configuration
    pub continent_id: usize,

    /// Ocean placeholder without renderable geometry
    ///
    /// Generated regions are always land; consumers should still skip
    /// records with this flag set.
    pub is_ocean: bool,

    /// World-space pivot of the region
    ///
    /// The seed cell's minimum corner at the region's base height. Mesh
    /// positions are relative to this point.
    pub center: Vec3,

    /// Untinted continent color
    pub debug_color: RegionColor,

    /// Continent color scaled by this region's brightness factor
    pub region_color: RegionColor,

    /// Region-local geometry
    pub mesh: MeshData,

    /// IDs of regions sharing at least one cell edge, sorted ascending
    pub neighbor_ids: Vec<usize>,

    /// Number of grid cells owned by this region
    pub cell_count: usize,

    /// Number of side quads in the mesh
    pub side_face_count: usize,
}

impl RegionRecord {
    /// Get the number of neighboring regions
    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbor_ids.len()
    }

    /// Check if this region borders another region
    #[inline]
    pub fn is_neighbor_of(&self, other_region_id: usize) -> bool {
        self.neighbor_ids.binary_search(&other_region_id).is_ok()
    }

    /// Check if the region owns any cells
    ///
    /// A region can end up empty when two seeds land on the same cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cell_count == 0
    }

    /// Mesh vertex positions as vectors
    pub fn vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.mesh.positions.iter().map(|&p| Vec3::from_array(p))
    }

    /// Mesh vertex positions translated to world space
    pub fn world_vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices().map(move |v| v + self.center)
    }

    /// Calculate the straight-line distance between two region centers
    #[inline]
    pub fn distance_to(&self, other: &RegionRecord) -> f32 {
        self.center.distance(other.center)
    }
}
