//! Generation scheduling
//!
//! A [`MapGenerator`] runs the pipeline either in one call ([`MapGenerator::generate`])
//! or as a state machine advanced by [`MapGenerator::tick`], one bounded unit
//! of work per call. Both paths execute the same steps in the same order, so
//! they consume the random stream identically and produce identical maps.
//!
//! ```text
//! Idle → Initializing → PopulatingGrid → GeneratingSeeds → VoronoiPass
//!      → BuildingGeometry → SpawningVisuals → Complete
//! ```
//!
//! `VoronoiPass` takes one tick per Jump-Flood pass and `SpawningVisuals` one
//! tick per batch of regions; every other state takes a single tick.

use std::fmt;
use std::time::Instant;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{MapGenConfig, PartitionStrategy};
use crate::error::{MapGenError, Result};
use crate::generation::{
    assign_regions, brute_force_partition, generate_seeds, rand_range, region_adjacency,
    JumpFlood, Seed,
};
use crate::grid::{Grid, GridLayout};
use crate::map::TerritoryMap;
use crate::mask::{MaskImage, MaskSampler};
use crate::mesh::{build_region_meshes, tint, RegionColor};
use crate::naming::NameAssigner;
use crate::region::RegionRecord;

/// Progress reached when each stage finishes
const PROGRESS_INITIALIZED: f32 = 0.1;
const PROGRESS_GRID: f32 = 0.3;
const PROGRESS_SEEDS: f32 = 0.4;
const PROGRESS_VORONOI: f32 = 0.6;
const PROGRESS_GEOMETRY: f32 = 0.8;

/// Stage of a generation run
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenerationState {
    /// No run is active
    #[default]
    Idle,
    /// Sizing and allocating the grid
    Initializing,
    /// Classifying cells against the mask
    PopulatingGrid,
    /// Placing region seeds
    GeneratingSeeds,
    /// Assigning cells to their nearest seed
    VoronoiPass,
    /// Building names, colors, meshes and adjacency
    BuildingGeometry,
    /// Handing finished regions to the observer in batches
    SpawningVisuals,
    /// The map is published
    Complete,
}

impl GenerationState {
    /// Whether a run is in flight (neither idle nor complete)
    pub fn is_running(self) -> bool {
        !matches!(self, GenerationState::Idle | GenerationState::Complete)
    }

    /// Human-readable stage name
    pub fn name(self) -> &'static str {
        match self {
            GenerationState::Idle => "Idle",
            GenerationState::Initializing => "Initializing",
            GenerationState::PopulatingGrid => "Populating Grid",
            GenerationState::GeneratingSeeds => "Generating Seeds",
            GenerationState::VoronoiPass => "Voronoi Pass",
            GenerationState::BuildingGeometry => "Building Geometry",
            GenerationState::SpawningVisuals => "Spawning Visuals",
            GenerationState::Complete => "Complete",
        }
    }
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receives notifications while a run advances
///
/// Every method has an empty default, so implementors only override what
/// they need.
pub trait GenerationObserver {
    /// Called after every tick that did work
    fn on_progress(&mut self, _state: GenerationState, _progress: f32, _status: &str) {}

    /// Called for each region while spawning visuals, in id order
    fn on_region_spawned(&mut self, _region: &RegionRecord) {}

    /// Called once when the map is published
    fn on_complete(&mut self, _map: &TerritoryMap) {}
}

/// Observer that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {}

/// Everything owned by one in-flight run
///
/// Dropped as a whole on cancellation; nothing in here outlives the run
/// except what is moved into the published map.
struct GenerationRun {
    seed: u32,
    config: MapGenConfig,
    rng: ChaCha8Rng,
    started: Instant,
    layout: GridLayout,
    grid: Grid,
    seeds: Vec<Seed>,
    jump_flood: Option<JumpFlood>,
    voronoi_started: Option<Instant>,
    regions: Vec<RegionRecord>,
    spawned: usize,
}

impl GenerationRun {
    fn new(seed: u32, config: MapGenConfig) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed as u64),
            started: Instant::now(),
            layout: GridLayout::new(config.map_size, 0, 0),
            config,
            grid: Grid::new(0, 0),
            seeds: Vec::new(),
            jump_flood: None,
            voronoi_started: None,
            regions: Vec::new(),
            spawned: 0,
        }
    }

    fn initialize(&mut self, mask: &MaskImage) {
        let map_size: Vec2 = self.config.effective_map_size(mask.width(), mask.height());
        if map_size != self.config.map_size {
            tracing::debug!(map_size_y = map_size.y, "map size adjusted to mask aspect ratio");
        }
        let (size_x, size_y) = self.config.grid_dimensions(map_size);
        self.layout = GridLayout::new(map_size, size_x, size_y);
        self.grid = Grid::new(size_x, size_y);
        tracing::info!(size_x, size_y, seed = self.seed, "grid initialized");
    }

    fn populate_grid(&mut self, mask: &MaskImage) {
        let sampler = MaskSampler::new(mask, self.config.ocean_color, &self.config.continents);
        let counts = self.grid.populate(&sampler, self.config.continents.len());
        for (continent, count) in self.config.continents.iter().zip(&counts) {
            tracing::debug!(continent = %continent.name, cells = *count, "continent classified");
        }
        tracing::info!(land_cells = self.grid.land_cell_count(), "continents assigned");
    }

    fn generate_seeds(&mut self) {
        self.seeds = generate_seeds(
            &mut self.grid,
            &self.config.continents,
            self.config.region_height_range,
            &mut self.rng,
        );
        if self.seeds.is_empty() {
            tracing::warn!("no continent matched the mask; the map will have no regions");
        }
        tracing::info!(seeds = self.seeds.len(), "seeds generated");
    }

    /// Run one unit of partition work; returns `true` once every cell is assigned
    fn voronoi_step(&mut self) -> bool {
        self.voronoi_started.get_or_insert_with(Instant::now);
        let done = match self.config.partition_strategy {
            PartitionStrategy::JumpFlood => {
                let jump_flood = self
                    .jump_flood
                    .get_or_insert_with(|| JumpFlood::new(&mut self.grid, &self.seeds));
                jump_flood.step(&mut self.grid, &self.seeds);
                jump_flood.is_done()
            }
            PartitionStrategy::BruteForce => {
                brute_force_partition(&mut self.grid, &self.seeds);
                true
            }
        };

        if done {
            let assigned = assign_regions(
                &mut self.grid,
                &self.seeds,
                self.config.cell_height_range,
                &mut self.rng,
            );
            let elapsed_ms = self
                .voronoi_started
                .map(|t| t.elapsed().as_secs_f64() * 1000.0)
                .unwrap_or_default();
            tracing::info!(
                strategy = self.config.partition_strategy.name(),
                assigned,
                elapsed_ms,
                "voronoi partition complete"
            );
        }
        done
    }

    fn voronoi_progress(&self) -> f32 {
        let fraction = self.jump_flood.map(|j| j.progress()).unwrap_or(0.0);
        PROGRESS_SEEDS + (PROGRESS_VORONOI - PROGRESS_SEEDS) * fraction
    }

    fn build_geometry(&mut self) {
        let mut names = NameAssigner::new(self.config.continents.len());
        let mut centers = Vec::with_capacity(self.seeds.len());
        let mut colors: Vec<RegionColor> = Vec::with_capacity(self.seeds.len());
        let mut records = Vec::with_capacity(self.seeds.len());

        // Brightness then name, per region in id order
        for seed in &self.seeds {
            let continent = &self.config.continents[seed.continent];
            let brightness = rand_range(&mut self.rng, self.config.brightness_range);
            let region_color = tint(continent.color, brightness);
            let name = names.assign(seed.continent, continent, seed.id, &mut self.rng);
            let center = self
                .layout
                .region_center(seed.x, seed.y, seed.base_height);

            centers.push(center);
            colors.push(region_color);
            records.push(RegionRecord {
                id: seed.id,
                name,
                continent_id: seed.continent,
                is_ocean: false,
                center,
                debug_color: continent.color,
                region_color,
                mesh: Default::default(),
                neighbor_ids: Vec::new(),
                cell_count: 0,
                side_face_count: 0,
            });
        }

        let meshes = build_region_meshes(
            &self.grid,
            &self.layout,
            &centers,
            &colors,
            self.config.height_difference_threshold,
        );
        let adjacency = region_adjacency(&self.grid, records.len());

        for ((record, built), neighbors) in records.iter_mut().zip(meshes).zip(adjacency) {
            record.mesh = built.mesh;
            record.cell_count = built.cell_count;
            record.side_face_count = built.side_face_count;
            record.neighbor_ids = neighbors;
            if record.cell_count == 0 {
                tracing::debug!(region = record.id, "region lost every cell to a shared seed");
            }
        }

        let vertices: usize = records.iter().map(|r| r.mesh.vertex_count()).sum();
        tracing::info!(regions = records.len(), vertices, "geometry built");
        self.regions = records;
    }

    fn spawn_progress(&self) -> f32 {
        if self.regions.is_empty() {
            return 1.0;
        }
        let spawned = self.spawned as f32 / self.regions.len() as f32;
        PROGRESS_GEOMETRY + (1.0 - PROGRESS_GEOMETRY) * spawned
    }

    fn into_map(self) -> TerritoryMap {
        let size = (self.grid.size_x(), self.grid.size_y());
        let assignment = self.grid.region_assignment();
        TerritoryMap::new(self.seed, self.config, self.layout, size, assignment, self.regions)
    }
}

/// Drives map generation for one configuration and mask
///
/// # Example
///
/// ```
/// use rust_territory_map::*;
///
/// let mask = MaskImage::from_fn(8, 8, |x, y| {
///     if x >= 2 && y >= 2 {
///         [0, 0, 255, 255]
///     } else {
///         [0, 0, 0, 255]
///     }
/// });
/// let config = MapGenConfigBuilder::new()
///     .grid_resolution(16)
///     .unwrap()
///     .continent(
///         ContinentDefinition::new("Azure", [0.0, 0.0, 1.0, 1.0]).with_target_region_count(2),
///     )
///     .build()
///     .unwrap();
///
/// let mut generator = MapGenerator::new(config).with_mask(mask);
/// generator.start(42).unwrap();
/// while !generator.is_complete() {
///     generator.tick();
///     println!("{:.0}% {}", generator.progress() * 100.0, generator.status());
/// }
/// assert_eq!(generator.map().map(|m| m.region_count()), Some(2));
/// ```
pub struct MapGenerator {
    config: MapGenConfig,
    mask: Option<MaskImage>,
    state: GenerationState,
    progress: f32,
    status: String,
    run: Option<GenerationRun>,
    map: Option<TerritoryMap>,
}

impl MapGenerator {
    /// Create an idle generator; a mask must be set before starting
    pub fn new(config: MapGenConfig) -> Self {
        Self {
            config,
            mask: None,
            state: GenerationState::Idle,
            progress: 0.0,
            status: String::new(),
            run: None,
            map: None,
        }
    }

    /// Set the mask (builder style)
    pub fn with_mask(mut self, mask: MaskImage) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Replace the mask used by the next run
    ///
    /// # Errors
    ///
    /// Returns `GenerationInProgress` while a run is active.
    pub fn set_mask(&mut self, mask: MaskImage) -> Result<()> {
        self.ensure_not_running()?;
        self.mask = Some(mask);
        Ok(())
    }

    /// Replace the configuration used by the next run
    ///
    /// # Errors
    ///
    /// Returns `GenerationInProgress` while a run is active.
    pub fn set_config(&mut self, config: MapGenConfig) -> Result<()> {
        self.ensure_not_running()?;
        self.config = config;
        Ok(())
    }

    /// Get the configuration
    #[inline]
    pub fn config(&self) -> &MapGenConfig {
        &self.config
    }

    /// Get the mask, if one is set
    #[inline]
    pub fn mask(&self) -> Option<&MaskImage> {
        self.mask.as_ref()
    }

    /// Current stage
    #[inline]
    pub fn state(&self) -> GenerationState {
        self.state
    }

    /// Progress of the current run in `[0, 1]`, never decreasing within a run
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Human-readable description of the last step
    #[inline]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether a run is in flight
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Whether the last run finished and its map is available
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state == GenerationState::Complete
    }

    /// The published map of the last completed run
    #[inline]
    pub fn map(&self) -> Option<&TerritoryMap> {
        self.map.as_ref()
    }

    /// Take ownership of the published map, returning to `Idle`
    pub fn take_map(&mut self) -> Option<TerritoryMap> {
        if self.is_running() {
            return None;
        }
        let map = self.map.take();
        if map.is_some() {
            self.state = GenerationState::Idle;
        }
        map
    }

    /// Begin an incremental run with the given seed
    ///
    /// All inputs are checked before anything changes: on error the generator
    /// keeps its previous state and map.
    ///
    /// # Errors
    ///
    /// Returns `GenerationInProgress` if a run is active, `MissingMask` if no
    /// mask is set, `InvalidMask` for an empty mask, or any configuration
    /// error from [`MapGenConfig::validate`].
    pub fn start(&mut self, seed: u32) -> Result<()> {
        if self.is_running() {
            tracing::warn!(state = %self.state, "generation already in progress; cancel first");
            return Err(MapGenError::GenerationInProgress);
        }
        if let Err(err) = self.check_inputs() {
            tracing::error!(error = %err, "generation aborted before start");
            return Err(err);
        }

        tracing::info!(
            seed,
            strategy = self.config.partition_strategy.name(),
            "starting map generation"
        );
        self.map = None;
        self.run = Some(GenerationRun::new(seed, self.config.clone()));
        self.state = GenerationState::Initializing;
        self.progress = 0.0;
        self.status = "Initializing...".to_string();
        Ok(())
    }

    fn check_inputs(&self) -> Result<()> {
        let mask = self.mask.as_ref().ok_or(MapGenError::MissingMask)?;
        if mask.is_empty() {
            return Err(MapGenError::InvalidMask("mask has no pixels".to_string()));
        }
        self.config.validate()
    }

    fn ensure_not_running(&self) -> Result<()> {
        if self.is_running() {
            return Err(MapGenError::GenerationInProgress);
        }
        Ok(())
    }

    /// Advance the current run by one unit of work
    ///
    /// Does nothing when idle or complete.
    pub fn tick(&mut self) -> GenerationState {
        self.tick_with(&mut NoopObserver)
    }

    /// Advance the current run by one unit of work, notifying `observer`
    pub fn tick_with(&mut self, observer: &mut dyn GenerationObserver) -> GenerationState {
        if !self.state.is_running() {
            return self.state;
        }
        let (Some(run), Some(mask)) = (self.run.as_mut(), self.mask.as_ref()) else {
            tracing::error!(state = %self.state, "run lost its inputs; returning to idle");
            self.reset("Aborted");
            return self.state;
        };

        let (next, progress, status) = match self.state {
            GenerationState::Initializing => {
                run.initialize(mask);
                (
                    GenerationState::PopulatingGrid,
                    PROGRESS_INITIALIZED,
                    "Grid initialized".to_string(),
                )
            }
            GenerationState::PopulatingGrid => {
                run.populate_grid(mask);
                (
                    GenerationState::GeneratingSeeds,
                    PROGRESS_GRID,
                    "Continents assigned".to_string(),
                )
            }
            GenerationState::GeneratingSeeds => {
                run.generate_seeds();
                (
                    GenerationState::VoronoiPass,
                    PROGRESS_SEEDS,
                    format!("Seeds generated: {} territories", run.seeds.len()),
                )
            }
            GenerationState::VoronoiPass => {
                if run.voronoi_step() {
                    (
                        GenerationState::BuildingGeometry,
                        PROGRESS_VORONOI,
                        "Voronoi complete, building geometry...".to_string(),
                    )
                } else {
                    let jump = run.jump_flood.map(|j| j.current_jump()).unwrap_or(0);
                    (
                        GenerationState::VoronoiPass,
                        run.voronoi_progress(),
                        format!("Voronoi iteration (jump: {})", jump),
                    )
                }
            }
            GenerationState::BuildingGeometry => {
                run.build_geometry();
                (
                    GenerationState::SpawningVisuals,
                    PROGRESS_GEOMETRY,
                    "Geometry built, spawning territories...".to_string(),
                )
            }
            GenerationState::SpawningVisuals => {
                let batch = run.config.spawn_batch_size.max(1);
                let end = (run.spawned + batch).min(run.regions.len());
                for region in &run.regions[run.spawned..end] {
                    observer.on_region_spawned(region);
                }
                run.spawned = end;
                let next = if end >= run.regions.len() {
                    GenerationState::Complete
                } else {
                    GenerationState::SpawningVisuals
                };
                (
                    next,
                    run.spawn_progress(),
                    format!("Spawning: {}/{}", end, run.regions.len()),
                )
            }
            GenerationState::Idle | GenerationState::Complete => return self.state,
        };

        self.state = next;
        self.progress = self.progress.max(progress);
        self.status = status;

        if next == GenerationState::Complete {
            self.finish(observer);
        } else {
            observer.on_progress(self.state, self.progress, &self.status);
        }
        self.state
    }

    fn finish(&mut self, observer: &mut dyn GenerationObserver) {
        let Some(run) = self.run.take() else {
            self.reset("Aborted");
            return;
        };
        let elapsed_ms = run.started.elapsed().as_secs_f64() * 1000.0;
        let map = run.into_map();
        tracing::info!(
            seed = map.seed(),
            regions = map.region_count(),
            elapsed_ms,
            "map generation complete"
        );

        self.progress = 1.0;
        self.status = "Complete!".to_string();
        observer.on_progress(self.state, self.progress, &self.status);
        observer.on_complete(&map);
        self.map = Some(map);
    }

    /// Abandon the active run
    ///
    /// Discards the grid, seeds and any built regions and returns to `Idle`.
    /// Returns `false` when there was nothing to cancel.
    pub fn cancel(&mut self) -> bool {
        self.cancel_with(&mut NoopObserver)
    }

    /// Abandon the active run, reporting the return to `Idle` to `observer`
    pub fn cancel_with(&mut self, observer: &mut dyn GenerationObserver) -> bool {
        if !self.is_running() {
            return false;
        }
        tracing::warn!(state = %self.state, progress = self.progress, "generation cancelled");
        self.reset("Cancelled");
        observer.on_progress(self.state, self.progress, &self.status);
        true
    }

    /// Drop the published map and any active run
    pub fn clear(&mut self) {
        self.map = None;
        self.reset("");
    }

    fn reset(&mut self, status: &str) {
        self.run = None;
        self.state = GenerationState::Idle;
        self.progress = 0.0;
        self.status = status.to_string();
    }

    /// Run a whole generation in one call
    ///
    /// # Errors
    ///
    /// Fails like [`MapGenerator::start`]; the generator is left unchanged in
    /// that case.
    pub fn generate(&mut self, seed: u32) -> Result<&TerritoryMap> {
        self.generate_with(seed, &mut NoopObserver)
    }

    /// Run a whole generation in one call, notifying `observer`
    pub fn generate_with(
        &mut self,
        seed: u32,
        observer: &mut dyn GenerationObserver,
    ) -> Result<&TerritoryMap> {
        self.start(seed)?;
        while self.is_running() {
            self.tick_with(observer);
        }
        self.map.as_ref().ok_or(MapGenError::Aborted)
    }
}

impl fmt::Debug for MapGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapGenerator")
            .field("state", &self.state)
            .field("progress", &self.progress)
            .field("status", &self.status)
            .field("has_mask", &self.mask.is_some())
            .field("has_map", &self.map.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContinentDefinition, MapGenConfigBuilder};

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const RED: [u8; 4] = [255, 0, 0, 255];

    fn right_half_mask() -> MaskImage {
        MaskImage::from_fn(16, 16, |x, _| if x < 8 { WHITE } else { RED })
    }

    fn config(strategy: PartitionStrategy) -> MapGenConfig {
        MapGenConfigBuilder::new()
            .grid_resolution(16)
            .unwrap()
            .partition_strategy(strategy)
            .spawn_batch_size(2)
            .unwrap()
            .continent(
                ContinentDefinition::new("Ruby", [1.0, 0.0, 0.0, 1.0]).with_target_region_count(5),
            )
            .build()
            .unwrap()
    }

    fn generator(strategy: PartitionStrategy) -> MapGenerator {
        MapGenerator::new(config(strategy)).with_mask(right_half_mask())
    }

    fn jump_flood_generator() -> MapGenerator {
        generator(PartitionStrategy::JumpFlood)
    }

    #[derive(Default)]
    struct Recorder {
        progress: Vec<(GenerationState, f32)>,
        statuses: Vec<String>,
        spawned: Vec<usize>,
        completed: usize,
    }

    impl GenerationObserver for Recorder {
        fn on_progress(&mut self, state: GenerationState, progress: f32, status: &str) {
            self.progress.push((state, progress));
            self.statuses.push(status.to_string());
        }
        fn on_region_spawned(&mut self, region: &RegionRecord) {
            self.spawned.push(region.id);
        }
        fn on_complete(&mut self, _map: &TerritoryMap) {
            self.completed += 1;
        }
    }

    #[test]
    fn test_state_sequence_and_progress() {
        let mut generator = jump_flood_generator();
        generator.start(42).unwrap();
        assert_eq!(generator.state(), GenerationState::Initializing);

        let mut recorder = Recorder::default();
        let mut guard = 0;
        while generator.is_running() {
            generator.tick_with(&mut recorder);
            guard += 1;
            assert!(guard < 100);
        }

        let states: Vec<GenerationState> = recorder.progress.iter().map(|(s, _)| *s).collect();
        assert_eq!(states[0], GenerationState::PopulatingGrid);
        assert_eq!(states[1], GenerationState::GeneratingSeeds);
        assert_eq!(states[2], GenerationState::VoronoiPass);
        assert_eq!(*states.last().unwrap(), GenerationState::Complete);
        assert!(states.contains(&GenerationState::BuildingGeometry));
        assert!(states.contains(&GenerationState::SpawningVisuals));

        let values: Vec<f32> = recorder.progress.iter().map(|(_, p)| *p).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*values.last().unwrap(), 1.0);

        assert_eq!(recorder.spawned, vec![0, 1, 2, 3, 4]);
        assert_eq!(recorder.completed, 1);
        assert!(generator.is_complete());
        assert_eq!(generator.progress(), 1.0);
    }

    #[test]
    fn test_jump_flood_takes_one_tick_per_pass() {
        let mut generator = jump_flood_generator();
        generator.start(1).unwrap();
        for _ in 0..3 {
            generator.tick();
        }
        assert_eq!(generator.state(), GenerationState::VoronoiPass);

        // 16x16 grid: passes at 8, 4, 2, 1
        let mut passes = 0;
        while generator.state() == GenerationState::VoronoiPass {
            generator.tick();
            passes += 1;
        }
        assert_eq!(passes, 4);
        assert_eq!(generator.state(), GenerationState::BuildingGeometry);
    }

    #[test]
    fn test_brute_force_takes_one_tick() {
        let mut generator = generator(PartitionStrategy::BruteForce);
        generator.start(1).unwrap();
        for _ in 0..3 {
            generator.tick();
        }
        generator.tick();
        assert_eq!(generator.state(), GenerationState::BuildingGeometry);
    }

    #[test]
    fn test_start_rejected_while_running() {
        let mut generator = jump_flood_generator();
        generator.start(1).unwrap();
        generator.tick();
        assert!(matches!(generator.start(2), Err(MapGenError::GenerationInProgress)));
        assert!(matches!(
            generator.set_mask(right_half_mask()),
            Err(MapGenError::GenerationInProgress)
        ));
        assert_eq!(generator.state(), GenerationState::PopulatingGrid);
    }

    #[test]
    fn test_cancel_discards_run() {
        let mut generator = jump_flood_generator();
        generator.start(1).unwrap();
        for _ in 0..4 {
            generator.tick();
        }
        assert!(generator.cancel());
        assert_eq!(generator.state(), GenerationState::Idle);
        assert_eq!(generator.progress(), 0.0);
        assert!(generator.map().is_none());
        assert!(!generator.cancel());

        // Ticking while idle is a no-op
        assert_eq!(generator.tick(), GenerationState::Idle);
    }

    #[test]
    fn test_cancel_notifies_observer() {
        let mut generator = jump_flood_generator();
        generator.start(1).unwrap();
        generator.tick();

        let mut recorder = Recorder::default();
        assert!(generator.cancel_with(&mut recorder));
        assert_eq!(recorder.progress, vec![(GenerationState::Idle, 0.0)]);
        assert_eq!(recorder.statuses, vec!["Cancelled".to_string()]);
        assert_eq!(generator.status(), "Cancelled");

        // Nothing to cancel, nothing reported
        assert!(!generator.cancel_with(&mut recorder));
        assert_eq!(recorder.progress.len(), 1);
    }

    #[test]
    fn test_spawn_batches_follow_run_config() {
        let mut generator = jump_flood_generator();
        generator.start(1).unwrap();
        assert!(matches!(
            generator.set_config(MapGenConfig::default()),
            Err(MapGenError::GenerationInProgress)
        ));

        while generator.state() != GenerationState::SpawningVisuals {
            generator.tick();
        }
        // Five regions in batches of two
        let mut batches = 0;
        while generator.state() == GenerationState::SpawningVisuals {
            generator.tick();
            batches += 1;
        }
        assert_eq!(batches, 3);
        assert!(generator.is_complete());
    }

    #[test]
    fn test_missing_mask_keeps_idle() {
        let mut generator = MapGenerator::new(config(PartitionStrategy::JumpFlood));
        assert!(matches!(generator.start(1), Err(MapGenError::MissingMask)));
        assert_eq!(generator.state(), GenerationState::Idle);
    }

    #[test]
    fn test_missing_continents_keeps_idle() {
        let mut generator = MapGenerator::new(MapGenConfig::default()).with_mask(right_half_mask());
        assert!(matches!(generator.start(1), Err(MapGenError::MissingContinents)));
        assert_eq!(generator.state(), GenerationState::Idle);
    }

    #[test]
    fn test_failed_start_keeps_previous_map() {
        let mut generator = jump_flood_generator();
        generator.generate(5).unwrap();

        generator.set_config(MapGenConfig::default()).unwrap();
        assert!(generator.start(6).is_err());
        assert!(generator.is_complete());
        assert_eq!(generator.map().map(|m| m.seed()), Some(5));
    }

    #[test]
    fn test_restart_after_complete() {
        let mut generator = jump_flood_generator();
        generator.generate(5).unwrap();
        generator.start(6).unwrap();
        assert!(generator.map().is_none());
        assert_eq!(generator.progress(), 0.0);
    }

    #[test]
    fn test_clear_and_take_map() {
        let mut generator = jump_flood_generator();
        generator.generate(5).unwrap();
        let map = generator.take_map().unwrap();
        assert_eq!(map.region_count(), 5);
        assert_eq!(generator.state(), GenerationState::Idle);

        generator.generate(5).unwrap();
        generator.clear();
        assert!(generator.map().is_none());
        assert_eq!(generator.state(), GenerationState::Idle);
    }

    #[test]
    fn test_no_matching_continent_completes_empty() {
        let mask = MaskImage::from_fn(4, 4, |_, _| WHITE);
        let mut generator = MapGenerator::new(config(PartitionStrategy::JumpFlood)).with_mask(mask);
        let map = generator.generate(3).unwrap();
        assert_eq!(map.region_count(), 0);
    }
}
