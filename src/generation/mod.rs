//! Region partitioning of a classified grid
//!
//! Seeds are scattered over each continent, every land cell is assigned to its
//! nearest same-continent seed, and the resulting regions are connected into
//! an adjacency graph.

mod adjacency;
mod brute_force;
mod jump_flood;
mod seeds;

pub use adjacency::region_adjacency;
pub use brute_force::brute_force_partition;
pub use jump_flood::{initial_jump, JumpFlood};
pub use seeds::{generate_seeds, Seed, SeedIndex};

use rand::Rng;

use crate::grid::Grid;

/// Uniform float in `[min, max)`, always consuming exactly one draw
///
/// A degenerate range (`min == max`) returns `min` but still advances the
/// generator so that the draw sequence does not depend on configured ranges.
#[inline]
pub fn rand_range<R: Rng + ?Sized>(rng: &mut R, (min, max): (f32, f32)) -> f32 {
    let t: f32 = rng.gen();
    min + t * (max - min)
}

/// Turn partition results into region ids and cell heights
///
/// Every land cell with a closest seed takes that seed's id as its region and
/// `base_height + jitter` as its height. Jitter is drawn in row-major order,
/// one draw per assigned cell. Returns the number of assigned cells.
pub fn assign_regions<R: Rng + ?Sized>(
    grid: &mut Grid,
    seeds: &[Seed],
    jitter_range: (f32, f32),
    rng: &mut R,
) -> usize {
    let mut assigned = 0;
    for cell in grid.cells_mut() {
        if !cell.is_land() {
            continue;
        }
        let Some(seed) = cell.closest_seed.and_then(|s| seeds.get(s.0)) else {
            continue;
        };
        cell.region = Some(seed.id);
        cell.height = seed.base_height + rand_range(rng, jitter_range);
        assigned += 1;
    }
    assigned
}
