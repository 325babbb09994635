//! Map Generation Configuration and Builder
//!
//! This module provides configuration types for deterministic territory map generation.

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MapGenError, Result};
use crate::mesh::RegionColor;

/// Names every continent starts with when no pool is configured explicitly
pub const DEFAULT_NAME_POOL: [&str; 10] = [
    "Northern Plains",
    "Southern Coast",
    "Eastern Border",
    "Western Highlands",
    "Central Valley",
    "Mountain Pass",
    "Forest Region",
    "Coastal Bay",
    "River Delta",
    "Desert Frontier",
];

/// Algorithm used to assign land cells to their nearest seed
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartitionStrategy {
    /// Jump Flood propagation, O(N log N); one pass per scheduler tick
    #[default]
    JumpFlood,
    /// Exhaustive nearest-seed scan, O(N·M); runs in a single tick
    BruteForce,
}

impl PartitionStrategy {
    /// Get a human-readable name for this strategy
    pub fn name(self) -> &'static str {
        match self {
            PartitionStrategy::JumpFlood => "Jump Flood",
            PartitionStrategy::BruteForce => "Brute Force",
        }
    }
}

/// A continent as authored in the mask: its key color, how many regions to
/// carve out of it and the names those regions may take
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct ContinentDefinition {
    /// Display name, also used for generated region names
    pub name: String,
    /// Key color of this continent in the mask (linear RGBA, 0-1)
    pub color: RegionColor,
    /// Number of regions requested for this continent
    pub target_region_count: usize,
    /// Squared RGB distance below which a mask sample matches `color`
    pub color_tolerance: f32,
    /// Display names drawn for this continent's regions
    pub name_pool: Vec<String>,
}

impl ContinentDefinition {
    /// Create a continent with the default region count, tolerance and name pool
    pub fn new(name: impl Into<String>, color: RegionColor) -> Self {
        Self {
            name: name.into(),
            color,
            ..Default::default()
        }
    }

    /// Set the requested region count
    pub fn with_target_region_count(mut self, count: usize) -> Self {
        self.target_region_count = count;
        self
    }

    /// Set the color acceptance threshold (squared RGB distance)
    pub fn with_color_tolerance(mut self, tolerance: f32) -> Self {
        self.color_tolerance = tolerance;
        self
    }

    /// Replace the name pool
    pub fn with_name_pool<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.name_pool = names.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for ContinentDefinition {
    fn default() -> Self {
        Self {
            name: "Continent".to_string(),
            color: [1.0, 0.0, 0.0, 1.0],
            target_region_count: 10,
            color_tolerance: 0.15,
            name_pool: DEFAULT_NAME_POOL.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Configuration for deterministic territory map generation
///
/// Together with the mask image and a 32-bit seed this fully determines the
/// generated map, so peers only need to exchange the seed to build identical
/// geometry locally.
///
/// `Default` yields a configuration without continents; starting a run with it
/// fails with [`MapGenError::MissingContinents`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct MapGenConfig {
    /// Half-extents of the playing field; the field spans `[-x, x] × [-y, y]`
    pub map_size: Vec2,

    /// Number of grid cells along the shorter axis of the playing field
    pub grid_resolution: usize,

    /// Color treated as ocean in the mask
    pub ocean_color: RegionColor,

    /// Range of the random base elevation given to each region
    pub region_height_range: (f32, f32),

    /// Range of the random per-cell elevation jitter
    pub cell_height_range: (f32, f32),

    /// Range of the brightness factor applied to the continent color per region
    pub brightness_range: (f32, f32),

    /// Height difference between same-region cells above which a side face is emitted
    pub height_difference_threshold: f32,

    /// Voronoi partition algorithm
    pub partition_strategy: PartitionStrategy,

    /// Regions handed to observers per tick while spawning visuals
    pub spawn_batch_size: usize,

    /// Allow `"<Continent> Territory <id>"` names for continents with an empty pool
    pub generated_name_fallback: bool,

    /// Derive `map_size.y` from the mask's aspect ratio before generating
    pub auto_adjust_aspect: bool,

    /// Continents in declaration order (the order is part of determinism)
    pub continents: Vec<ContinentDefinition>,
}

impl MapGenConfig {
    /// Check every invariant a run relies on
    ///
    /// # Errors
    ///
    /// Returns `MissingContinents` when no continent is configured,
    /// `EmptyNamePool` for a continent without names while the fallback is
    /// disabled, and `InvalidConfig` for any out-of-range value.
    pub fn validate(&self) -> Result<()> {
        if self.continents.is_empty() {
            return Err(MapGenError::MissingContinents);
        }
        if self.grid_resolution == 0 {
            return Err(MapGenError::InvalidConfig(
                "grid resolution must be >= 1".to_string(),
            ));
        }
        if !(self.map_size.x > 0.0 && self.map_size.y > 0.0) {
            return Err(MapGenError::InvalidConfig(format!(
                "map size must be positive (got {}, {})",
                self.map_size.x, self.map_size.y
            )));
        }
        if self.height_difference_threshold < 0.0 {
            return Err(MapGenError::InvalidConfig(format!(
                "height difference threshold must be >= 0 (got {})",
                self.height_difference_threshold
            )));
        }
        if self.spawn_batch_size == 0 {
            return Err(MapGenError::InvalidConfig(
                "spawn batch size must be >= 1".to_string(),
            ));
        }
        check_range("region height range", self.region_height_range)?;
        check_range("cell height range", self.cell_height_range)?;
        check_range("brightness range", self.brightness_range)?;

        for continent in &self.continents {
            if continent.color_tolerance < 0.0 {
                return Err(MapGenError::InvalidConfig(format!(
                    "continent '{}' color tolerance must be >= 0 (got {})",
                    continent.name, continent.color_tolerance
                )));
            }
            if continent.name_pool.is_empty() && !self.generated_name_fallback {
                return Err(MapGenError::EmptyNamePool {
                    continent: continent.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Playing-field half-extents after aspect-ratio correction for a mask of
    /// the given pixel size
    pub fn effective_map_size(&self, mask_width: u32, mask_height: u32) -> Vec2 {
        if !self.auto_adjust_aspect || mask_width == 0 || mask_height == 0 {
            return self.map_size;
        }
        let aspect = mask_height as f32 / mask_width as f32;
        Vec2::new(self.map_size.x, self.map_size.x * aspect)
    }

    /// Grid dimensions `(x, y)` for a playing field of the given half-extents
    ///
    /// The resolution applies to the shorter axis; the other axis follows the
    /// field's aspect ratio.
    pub fn grid_dimensions(&self, map_size: Vec2) -> (usize, usize) {
        let res = self.grid_resolution.max(1);
        if map_size.x <= map_size.y {
            let y = (res as f32 * map_size.y / map_size.x).round() as usize;
            (res, y.max(1))
        } else {
            let x = (res as f32 * map_size.x / map_size.y).round() as usize;
            (x.max(1), res)
        }
    }

    /// Total number of regions requested across all continents
    pub fn total_target_regions(&self) -> usize {
        self.continents.iter().map(|c| c.target_region_count).sum()
    }

    /// Parse a configuration from TOML text
    ///
    /// Missing keys take their default values. The result is not validated;
    /// call [`MapGenConfig::validate`] or let the generator do it.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Serialize this configuration as TOML
    #[cfg(feature = "serde")]
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

fn check_range(label: &str, (min, max): (f32, f32)) -> Result<()> {
    if min > max || !min.is_finite() || !max.is_finite() {
        return Err(MapGenError::InvalidConfig(format!(
            "{} must be finite with min <= max (got {}..{})",
            label, min, max
        )));
    }
    Ok(())
}

impl Default for MapGenConfig {
    fn default() -> Self {
        Self {
            map_size: Vec2::new(2000.0, 2000.0),
            grid_resolution: 200,
            continents: Vec::new(),
            ocean_color: [1.0, 1.0, 1.0, 1.0],
            region_height_range: (0.0, 50.0),
            cell_height_range: (-5.0, 5.0),
            brightness_range: (0.6, 0.9),
            height_difference_threshold: 0.01,
            partition_strategy: PartitionStrategy::JumpFlood,
            spawn_batch_size: 10,
            generated_name_fallback: true,
            auto_adjust_aspect: true,
        }
    }
}

/// Builder for creating MapGenConfig with validation
///
/// # Example
///
/// ```rust
/// use rust_territory_map::*;
///
/// let config = MapGenConfigBuilder::new()
///     .grid_resolution(64)
///     .unwrap()
///     .continent(
///         ContinentDefinition::new("Azuria", [0.0, 0.0, 1.0, 1.0]).with_target_region_count(4),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(config.total_target_regions(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapGenConfigBuilder {
    config: MapGenConfig,
}

impl MapGenConfigBuilder {
    /// Create a new builder with default values and no continents
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the playing-field half-extents
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either extent is not positive
    pub fn map_size(mut self, half_width: f32, half_height: f32) -> Result<Self> {
        if !(half_width > 0.0 && half_height > 0.0) {
            return Err(MapGenError::InvalidConfig(format!(
                "map size must be positive (got {}, {})",
                half_width, half_height
            )));
        }
        self.config.map_size = Vec2::new(half_width, half_height);
        Ok(self)
    }

    /// Set the grid resolution along the shorter field axis
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the resolution is zero
    pub fn grid_resolution(mut self, resolution: usize) -> Result<Self> {
        if resolution == 0 {
            return Err(MapGenError::InvalidConfig(
                "grid resolution must be >= 1".to_string(),
            ));
        }
        self.config.grid_resolution = resolution;
        Ok(self)
    }

    /// Append a continent definition
    pub fn continent(mut self, continent: ContinentDefinition) -> Self {
        self.config.continents.push(continent);
        self
    }

    /// Replace all continent definitions
    pub fn continents(mut self, continents: Vec<ContinentDefinition>) -> Self {
        self.config.continents = continents;
        self
    }

    /// Set the explicit ocean color
    pub fn ocean_color(mut self, color: RegionColor) -> Self {
        self.config.ocean_color = color;
        self
    }

    /// Set the base elevation range of regions
    pub fn region_height_range(mut self, min: f32, max: f32) -> Result<Self> {
        check_range("region height range", (min, max))?;
        self.config.region_height_range = (min, max);
        Ok(self)
    }

    /// Set the per-cell elevation jitter range
    pub fn cell_height_range(mut self, min: f32, max: f32) -> Result<Self> {
        check_range("cell height range", (min, max))?;
        self.config.cell_height_range = (min, max);
        Ok(self)
    }

    /// Set the per-region brightness factor range
    pub fn brightness_range(mut self, min: f32, max: f32) -> Result<Self> {
        check_range("brightness range", (min, max))?;
        self.config.brightness_range = (min, max);
        Ok(self)
    }

    /// Set the height difference above which same-region cells get a side face
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the threshold is negative
    pub fn height_difference_threshold(mut self, threshold: f32) -> Result<Self> {
        if threshold < 0.0 {
            return Err(MapGenError::InvalidConfig(format!(
                "height difference threshold must be >= 0 (got {})",
                threshold
            )));
        }
        self.config.height_difference_threshold = threshold;
        Ok(self)
    }

    /// Select the Voronoi partition algorithm
    pub fn partition_strategy(mut self, strategy: PartitionStrategy) -> Self {
        self.config.partition_strategy = strategy;
        self
    }

    /// Set how many regions are published per spawning tick
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the batch size is zero
    pub fn spawn_batch_size(mut self, batch: usize) -> Result<Self> {
        if batch == 0 {
            return Err(MapGenError::InvalidConfig(
                "spawn batch size must be >= 1".to_string(),
            ));
        }
        self.config.spawn_batch_size = batch;
        Ok(self)
    }

    /// Allow or forbid generated names for continents without a name pool
    pub fn generated_name_fallback(mut self, enabled: bool) -> Self {
        self.config.generated_name_fallback = enabled;
        self
    }

    /// Enable or disable deriving the field height from the mask aspect ratio
    pub fn auto_adjust_aspect(mut self, enabled: bool) -> Self {
        self.config.auto_adjust_aspect = enabled;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<MapGenConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
