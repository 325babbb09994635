//! Spatial indexing for fast position-to-region lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;
#[cfg(feature = "spatial-index")]
use glam::Vec3;

/// Wrapper around KD-tree for nearest-region queries
///
/// Indexes region centers and maps the nearest one back to its region ID.
/// Used for picking and placement when a position is not on the grid or the
/// cell under it is ocean.
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: Option<ImmutableKdTree<f32, usize, 3, 32>>,
    region_ids: Vec<usize>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build spatial index from `(region_id, center)` pairs
    ///
    /// # Example
    ///
    /// ```
    /// use rust_territory_map::*;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let index = SpatialIndex::new(&[
    ///     (3, Vec3::new(1.0, 0.0, 0.0)),
    ///     (7, Vec3::new(0.0, 1.0, 0.0)),
    /// ]);
    ///
    /// assert_eq!(index.find_nearest(Vec3::new(0.9, 0.1, 0.0)), Some(3));
    /// # }
    /// ```
    pub fn new(centers: &[(usize, Vec3)]) -> Self {
        let points: Vec<[f32; 3]> = centers.iter().map(|(_, c)| c.to_array()).collect();

        Self {
            tree: (!points.is_empty()).then(|| ImmutableKdTree::new_from_slice(&points)),
            region_ids: centers.iter().map(|(id, _)| *id).collect(),
        }
    }

    /// Number of indexed regions
    #[inline]
    pub fn len(&self) -> usize {
        self.region_ids.len()
    }

    /// Check if the index holds no regions
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.region_ids.is_empty()
    }

    /// Find the region whose center is nearest to a position
    ///
    /// Returns `None` when the index is empty.
    pub fn find_nearest(&self, position: Vec3) -> Option<usize> {
        let tree = self.tree.as_ref()?;
        let result = tree.nearest_one::<SquaredEuclidean>(&position.to_array());
        self.region_ids.get(result.item as usize).copied()
    }
}

#[cfg(test)]
#[cfg(feature = "spatial-index")]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let index = SpatialIndex::new(&[
            (0, Vec3::new(100.0, 0.0, 0.0)),
            (1, Vec3::new(0.0, 100.0, 0.0)),
            (2, Vec3::new(-100.0, 0.0, 10.0)),
            (3, Vec3::new(0.0, -100.0, 0.0)),
        ]);

        assert_eq!(index.len(), 4);
        assert_eq!(index.find_nearest(Vec3::new(90.0, 10.0, 0.0)), Some(0));
        assert_eq!(index.find_nearest(Vec3::new(0.0, 95.0, 0.0)), Some(1));
        assert_eq!(index.find_nearest(Vec3::new(-80.0, 0.0, 0.0)), Some(2));
        assert_eq!(index.find_nearest(Vec3::new(5.0, -70.0, 0.0)), Some(3));
    }

    #[test]
    fn test_spatial_index_maps_sparse_ids() {
        let index = SpatialIndex::new(&[(12, Vec3::ZERO), (40, Vec3::new(10.0, 10.0, 0.0))]);

        assert_eq!(index.find_nearest(Vec3::ZERO), Some(12));
        assert_eq!(index.find_nearest(Vec3::new(9.0, 9.0, 0.0)), Some(40));
    }

    #[test]
    fn test_spatial_index_empty() {
        let index = SpatialIndex::new(&[]);
        assert!(index.is_empty());
        assert_eq!(index.find_nearest(Vec3::ZERO), None);
    }
}
