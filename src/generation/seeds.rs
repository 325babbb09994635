//! Region seed placement
//!
//! Each continent receives up to its requested number of seeds, drawn
//! uniformly from the continent's cells. Draws are made with replacement, so
//! small continents may receive several seeds on the same cell, which is
//! logged as a warning.

use rand::Rng;

use crate::config::ContinentDefinition;
use crate::generation::rand_range;
use crate::grid::Grid;

/// Stable index of a seed in the run's append-only seed list
///
/// Cells refer to their closest seed through this index instead of a
/// reference, so the seed list can grow while cells point into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeedIndex(pub usize);

/// The originating cell of a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed {
    /// Globally unique id; doubles as the region id and the seed's index
    pub id: usize,
    /// Continent the seed was placed on
    pub continent: usize,
    /// Grid column
    pub x: usize,
    /// Grid row
    pub y: usize,
    /// Base elevation of the region grown from this seed
    pub base_height: f32,
}

impl Seed {
    /// Squared grid distance from this seed to a cell
    #[inline]
    pub fn distance_squared(&self, x: usize, y: usize) -> i64 {
        let dx = self.x as i64 - x as i64;
        let dy = self.y as i64 - y as i64;
        dx * dx + dy * dy
    }
}

/// Place seeds for every continent in declaration order
///
/// Per seed, one index draw then one height draw are taken from `rng`.
/// Continents without any cell are skipped with a warning. Each seed cell is
/// given the seed's id as its initial region.
pub fn generate_seeds<R: Rng + ?Sized>(
    grid: &mut Grid,
    continents: &[ContinentDefinition],
    height_range: (f32, f32),
    rng: &mut R,
) -> Vec<Seed> {
    let mut seeds: Vec<Seed> = Vec::new();

    for (continent, definition) in continents.iter().enumerate() {
        let valid = grid.continent_cells(continent);
        if valid.is_empty() {
            if definition.target_region_count > 0 {
                tracing::warn!(
                    continent = %definition.name,
                    requested = definition.target_region_count,
                    "continent has no land cells in the mask; it contributes no regions"
                );
            }
            continue;
        }
        if valid.len() < definition.target_region_count {
            tracing::warn!(
                continent = %definition.name,
                cells = valid.len(),
                requested = definition.target_region_count,
                "continent has fewer cells than requested regions; seeds will share cells"
            );
        }

        for _ in 0..definition.target_region_count {
            let cell_index = valid[rng.gen_range(0..valid.len())];
            let (x, y) = grid.coords(cell_index);
            let base_height = rand_range(rng, height_range);

            let seed = Seed {
                id: seeds.len(),
                continent,
                x,
                y,
                base_height,
            };
            grid.cells_mut()[cell_index].region = Some(seed.id);
            seeds.push(seed);
        }

        tracing::debug!(
            continent = %definition.name,
            cells = valid.len(),
            seeds = definition.target_region_count,
            "continent seeded"
        );
    }

    seeds
}
