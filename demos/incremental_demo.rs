//! Example: Tick-driven generation
//!
//! Simulates a frame loop that advances the generator one step per frame and
//! reports progress through an observer.

use rust_territory_map::*;

struct ConsoleObserver {
    frame: usize,
    spawned: usize,
}

impl GenerationObserver for ConsoleObserver {
    fn on_progress(&mut self, state: GenerationState, progress: f32, status: &str) {
        println!(
            "[frame {:>3}] {:>5.1}% {:<18} {}",
            self.frame,
            progress * 100.0,
            state.name(),
            status
        );
    }

    fn on_region_spawned(&mut self, _region: &RegionRecord) {
        self.spawned += 1;
    }

    fn on_complete(&mut self, map: &TerritoryMap) {
        println!(
            "Map for seed {} ready: {} regions, {} spawned",
            map.seed(),
            map.region_count(),
            self.spawned
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Two rectangular continents separated by a channel
    let mask = MaskImage::from_fn(128, 128, |x, y| match (x, y) {
        (8..=58, 8..=119) => [255, 160, 0, 255],
        (70..=119, 8..=119) => [120, 0, 200, 255],
        _ => [255, 255, 255, 255],
    });

    let config = MapGenConfigBuilder::new()
        .grid_resolution(128)?
        .spawn_batch_size(3)?
        .continent(
            ContinentDefinition::new("Aurantia", [1.0, 0.63, 0.0, 1.0]).with_target_region_count(9),
        )
        .continent(
            ContinentDefinition::new("Purpura", [0.47, 0.0, 0.78, 1.0]).with_target_region_count(7),
        )
        .build()?;

    let mut generator = MapGenerator::new(config).with_mask(mask);
    let mut observer = ConsoleObserver { frame: 0, spawned: 0 };

    generator.start(2024)?;
    while generator.is_running() {
        observer.frame += 1;
        generator.tick_with(&mut observer);
    }

    // Restart and cancel midway to show that nothing is published
    generator.start(7)?;
    for _ in 0..4 {
        generator.tick();
    }
    println!("\nCancelling at {} ({:.0}%)", generator.state(), generator.progress() * 100.0);
    generator.cancel();
    println!(
        "State after cancel: {}, map published: {}",
        generator.state(),
        generator.map().is_some()
    );

    Ok(())
}
