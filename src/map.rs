//! TerritoryMap: the published result of a generation run

use std::collections::HashSet;

use glam::Vec2;
#[cfg(feature = "spatial-index")]
use glam::Vec3;

use crate::config::MapGenConfig;
use crate::error::{MapGenError, Result};
use crate::grid::GridLayout;
use crate::region::RegionRecord;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A complete territory map
///
/// Holds every region record in id order together with the per-cell region
/// assignment it was built from, so positions can be mapped back to regions.
/// A map is only ever produced by a finished run; partial results are never
/// published.
///
/// # Examples
///
/// ```
/// use rust_territory_map::*;
///
/// // Left half background, right half one green continent
/// let mask = MaskImage::from_fn(16, 16, |x, _| {
///     if x < 8 {
///         [255, 255, 255, 255]
///     } else {
///         [0, 255, 0, 255]
///     }
/// });
/// let config = MapGenConfigBuilder::new()
///     .grid_resolution(32)
///     .unwrap()
///     .continent(
///         ContinentDefinition::new("Verde", [0.0, 1.0, 0.0, 1.0]).with_target_region_count(3),
///     )
///     .build()
///     .unwrap();
///
/// let mut generator = MapGenerator::new(config).with_mask(mask);
/// let map = generator.generate(42).unwrap();
///
/// assert_eq!(map.region_count(), 3);
/// if let Some(region) = map.get_region(0) {
///     println!("{} borders {} regions", region.name, region.neighbor_count());
/// }
/// ```
#[derive(Clone)]
pub struct TerritoryMap {
    /// Seed the map was generated from
    seed: u32,

    /// Configuration used to generate this map
    config: MapGenConfig,

    /// Grid geometry in world space
    layout: GridLayout,

    /// Grid dimensions `(x, y)`
    grid_size: (usize, usize),

    /// Region id of every cell, row-major
    assignment: Vec<Option<usize>>,

    /// All regions (indexed by region ID)
    regions: Vec<RegionRecord>,

    /// Spatial index over land region centers (optional, requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl std::fmt::Debug for TerritoryMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerritoryMap")
            .field("seed", &self.seed)
            .field("grid_size", &self.grid_size)
            .field("regions", &self.regions.len())
            .finish()
    }
}

impl TerritoryMap {
    pub(crate) fn new(
        seed: u32,
        config: MapGenConfig,
        layout: GridLayout,
        grid_size: (usize, usize),
        assignment: Vec<Option<usize>>,
        regions: Vec<RegionRecord>,
    ) -> Self {
        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let centers: Vec<(usize, Vec3)> = regions
                .iter()
                .filter(|r| !r.is_ocean && !r.is_empty())
                .map(|r| (r.id, r.center))
                .collect();
            SpatialIndex::new(&centers)
        };

        Self {
            seed,
            config,
            layout,
            grid_size,
            assignment,
            regions,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        }
    }

    /// Get the seed this map was generated from
    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Get the configuration used to generate this map
    #[inline]
    pub fn config(&self) -> &MapGenConfig {
        &self.config
    }

    /// Get the world-space grid layout
    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Get the grid dimensions `(x, y)`
    #[inline]
    pub fn grid_size(&self) -> (usize, usize) {
        self.grid_size
    }

    /// Get the number of regions on this map
    #[inline]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Get a region by ID
    ///
    /// Returns `None` if the region ID is out of bounds.
    #[inline]
    pub fn get_region(&self, id: usize) -> Option<&RegionRecord> {
        self.regions.get(id)
    }

    /// Get a region by ID, failing with `RegionNotFound`
    pub fn region(&self, id: usize) -> Result<&RegionRecord> {
        self.regions.get(id).ok_or(MapGenError::RegionNotFound(id))
    }

    /// Get all regions as a slice, in id order
    #[inline]
    pub fn regions(&self) -> &[RegionRecord] {
        &self.regions
    }

    /// Iterate over regions that are not ocean placeholders
    pub fn land_regions(&self) -> impl Iterator<Item = &RegionRecord> + '_ {
        self.regions.iter().filter(|r| !r.is_ocean)
    }

    /// Iterate over the regions of one continent
    pub fn regions_in_continent(
        &self,
        continent_id: usize,
    ) -> impl Iterator<Item = &RegionRecord> + '_ {
        self.regions
            .iter()
            .filter(move |r| r.continent_id == continent_id)
    }

    /// Get neighbor IDs for a region
    ///
    /// Returns an empty slice if the region ID is invalid.
    pub fn get_neighbors(&self, region_id: usize) -> &[usize] {
        self.regions
            .get(region_id)
            .map(|r| r.neighbor_ids.as_slice())
            .unwrap_or(&[])
    }

    /// Find regions within a given hop count from a starting region (BFS)
    ///
    /// Returns sorted region IDs including the start. Empty if `start_id` is
    /// invalid.
    ///
    /// ```
    /// # use rust_territory_map::*;
    /// # let mask = MaskImage::from_fn(8, 8, |x, _| {
    /// #     if x < 2 { [255; 4] } else { [255, 0, 0, 255] }
    /// # });
    /// # let config = MapGenConfigBuilder::new()
    /// #     .grid_resolution(16).unwrap()
    /// #     .continent(
    /// #         ContinentDefinition::new("Red", [1.0, 0.0, 0.0, 1.0]).with_target_region_count(4),
    /// #     )
    /// #     .build().unwrap();
    /// # let mut generator = MapGenerator::new(config).with_mask(mask);
    /// # let map = generator.generate(7).unwrap();
    /// let reachable = map.find_regions_within_hops(0, 2);
    /// assert!(reachable.contains(&0));
    /// ```
    pub fn find_regions_within_hops(&self, start_id: usize, hops: usize) -> Vec<usize> {
        if start_id >= self.regions.len() {
            return vec![];
        }

        let mut visited = HashSet::new();
        let mut current = vec![start_id];
        visited.insert(start_id);

        for _ in 0..hops {
            let mut next = Vec::new();
            for &region_id in &current {
                for &neighbor in self.get_neighbors(region_id) {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            current = next;
        }

        let mut found: Vec<usize> = visited.into_iter().collect();
        found.sort_unstable();
        found
    }

    /// Region id of every grid cell, row-major
    #[inline]
    pub fn region_assignment(&self) -> &[Option<usize>] {
        &self.assignment
    }

    /// Region owning a grid cell, `None` for ocean or out of bounds
    pub fn region_at_cell(&self, x: usize, y: usize) -> Option<usize> {
        let (size_x, size_y) = self.grid_size;
        if x >= size_x || y >= size_y {
            return None;
        }
        self.assignment.get(y * size_x + x).copied().flatten()
    }

    /// Region under a world-space position on the playing field
    pub fn region_at_position(&self, position: Vec2) -> Option<usize> {
        let (x, y) = self.layout.cell_at(position)?;
        self.region_at_cell(x, y)
    }

    /// Find the land region whose center is nearest to a position
    /// (requires spatial-index feature)
    ///
    /// Unlike [`TerritoryMap::region_at_position`] this always answers when
    /// the map has at least one non-empty land region, even over ocean.
    #[cfg(feature = "spatial-index")]
    pub fn nearest_region(&self, position: Vec3) -> Option<usize> {
        self.spatial_index.find_nearest(position)
    }
}
