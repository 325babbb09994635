//! Deterministic territory map generation
//!
//! A standalone library that turns a color-coded mask image into a map of
//! territories: every continent painted in the mask is split into regions by
//! a grid-based Voronoi partition, and each region gets a name, a tint and an
//! extruded mesh ready for any game engine (Bevy, Godot, etc.).
//!
//! The same mask, configuration and 32-bit seed always produce the same map,
//! so networked peers only need to share the seed.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rust_territory_map::*;
//!
//! let mask = MaskImage::open("continents.png").unwrap();
//! let config = MapGenConfigBuilder::new()
//!     .grid_resolution(200).unwrap()
//!     .continent(
//!         ContinentDefinition::new("Europa", [0.0, 0.0, 1.0, 1.0]).with_target_region_count(7),
//!     )
//!     .continent(
//!         ContinentDefinition::new("Africa", [1.0, 1.0, 0.0, 1.0]).with_target_region_count(6),
//!     )
//!     .build().unwrap();
//!
//! let mut generator = MapGenerator::new(config).with_mask(mask);
//! let map = generator.generate(42).unwrap();
//!
//! for region in map.land_regions() {
//!     println!("{} ({} triangles)", region.name, region.mesh.triangle_count());
//! }
//! ```
//!
//! For frame-bounded work, call [`MapGenerator::start`] once and then
//! [`MapGenerator::tick`] every frame until [`MapGenerator::is_complete`].
//!
//! # Features
//!
//! - `spatial-index` (default): Enables nearest-region lookups using a KD-tree
//! - `serde`: Enables serialization for configuration and region records, and TOML config files

// Modules
pub mod error;
pub mod config;
pub mod mask;
pub mod grid;
pub mod generation;
pub mod mesh;
pub mod naming;
pub mod region;
pub mod map;
pub mod scheduler;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{MapGenError, Result};
pub use config::{ContinentDefinition, MapGenConfig, MapGenConfigBuilder, PartitionStrategy};
pub use mask::{MaskImage, MaskSampler};
pub use grid::{Cell, Grid, GridLayout};
pub use generation::{JumpFlood, Seed, SeedIndex};
pub use mesh::{build_region_meshes, MeshData, RegionColor, RegionMesh};
pub use naming::NameAssigner;
pub use region::RegionRecord;
pub use map::TerritoryMap;
pub use scheduler::{GenerationObserver, GenerationState, MapGenerator, NoopObserver};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam vectors for convenience
pub use glam::{Vec2, Vec3};
