//! Jump-Flood nearest-seed propagation
//!
//! Every land cell converges toward its nearest same-continent seed by
//! sampling neighbors at geometrically shrinking offsets. Passes update the
//! grid in place, so a cell may already see improvements made earlier in the
//! same pass. The work is split into passes so an incremental driver can run
//! one pass per tick. Land cells still unreached after the last pass are
//! resolved by an exhaustive scan.

use crate::generation::{Seed, SeedIndex};
use crate::grid::Grid;

/// First sampling offset for a grid of the given size
///
/// Half of the longest dimension rounded up to a power of two, which lets
/// the first pass reach across the whole grid. Zero for a 1x1 grid.
pub fn initial_jump(size_x: usize, size_y: usize) -> usize {
    size_x.max(size_y).next_power_of_two() / 2
}

/// Pass-by-pass Jump-Flood state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpFlood {
    jump: usize,
    initial_jump: usize,
}

impl JumpFlood {
    /// Point every seed cell at its own seed and prepare the first pass
    ///
    /// When several seeds share a cell the last one wins.
    pub fn new(grid: &mut Grid, seeds: &[Seed]) -> Self {
        for cell in grid.cells_mut() {
            cell.closest_seed = None;
        }
        for (index, seed) in seeds.iter().enumerate() {
            if let Some(cell) = grid.get_mut(seed.x as isize, seed.y as isize) {
                cell.closest_seed = Some(SeedIndex(index));
            }
        }

        let initial_jump = initial_jump(grid.size_x(), grid.size_y());
        Self {
            jump: initial_jump,
            initial_jump,
        }
    }

    /// Offset the next pass will sample at; zero once finished
    #[inline]
    pub fn current_jump(&self) -> usize {
        self.jump
    }

    /// Whether all passes have run
    #[inline]
    pub fn is_done(&self) -> bool {
        self.jump < 1
    }

    /// Fraction of passes completed, in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.initial_jump == 0 {
            return 1.0;
        }
        1.0 - self.jump as f32 / self.initial_jump as f32
    }

    /// Run a single pass at the current offset, then halve it
    ///
    /// Returns `false` without touching the grid once finished.
    pub fn step(&mut self, grid: &mut Grid, seeds: &[Seed]) -> bool {
        if self.is_done() {
            return false;
        }

        let jump = self.jump as isize;
        let mut updated = 0usize;

        for y in 0..grid.size_y() {
            for x in 0..grid.size_x() {
                let index = y * grid.size_x() + x;
                let cell = grid.cells()[index];
                let Some(continent) = cell.continent else {
                    continue;
                };

                let mut best = cell.closest_seed;
                let mut best_dist = best
                    .and_then(|s| seeds.get(s.0))
                    .map(|s| s.distance_squared(x, y))
                    .unwrap_or(i64::MAX);

                for dy in -1..=1isize {
                    for dx in -1..=1isize {
                        let nx = x as isize + dx * jump;
                        let ny = y as isize + dy * jump;
                        let Some(candidate) = grid.get(nx, ny).and_then(|n| n.closest_seed)
                        else {
                            continue;
                        };
                        let Some(seed) = seeds.get(candidate.0) else {
                            continue;
                        };
                        if seed.continent != continent {
                            continue;
                        }
                        let dist = seed.distance_squared(x, y);
                        if dist < best_dist {
                            best_dist = dist;
                            best = Some(candidate);
                        }
                    }
                }

                if best != cell.closest_seed {
                    grid.cells_mut()[index].closest_seed = best;
                    updated += 1;
                }
            }
        }

        tracing::debug!(jump = self.jump, updated, "jump flood pass");
        self.jump /= 2;
        if self.is_done() {
            fill_unreached(grid, seeds);
        }
        true
    }

    /// Run every remaining pass
    pub fn run(&mut self, grid: &mut Grid, seeds: &[Seed]) {
        while self.step(grid, seeds) {}
    }
}

/// Assign land cells that no pass reached
///
/// A fragment of a continent can sit where every sampling offset misses it.
/// Such cells get their nearest same-continent seed by exhaustive scan, with
/// ties going to the earlier seed. Cells of unseeded continents stay empty.
fn fill_unreached(grid: &mut Grid, seeds: &[Seed]) {
    let size_x = grid.size_x();
    let mut filled = 0usize;

    for (index, cell) in grid.cells_mut().iter_mut().enumerate() {
        if cell.closest_seed.is_some() {
            continue;
        }
        let Some(continent) = cell.continent else {
            continue;
        };
        let (x, y) = (index % size_x, index / size_x);

        let nearest = seeds
            .iter()
            .enumerate()
            .filter(|(_, seed)| seed.continent == continent)
            .min_by_key(|&(i, seed)| (seed.distance_squared(x, y), i));
        if let Some((i, _)) = nearest {
            cell.closest_seed = Some(SeedIndex(i));
            filled += 1;
        }
    }

    if filled > 0 {
        tracing::debug!(filled, "assigned cells missed by jump flood");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::brute_force_partition;

    fn land_grid(size_x: usize, size_y: usize) -> Grid {
        let mut grid = Grid::new(size_x, size_y);
        for cell in grid.cells_mut() {
            cell.continent = Some(0);
        }
        grid
    }

    fn seed(id: usize, continent: usize, x: usize, y: usize) -> Seed {
        Seed {
            id,
            continent,
            x,
            y,
            base_height: 0.0,
        }
    }

    #[test]
    fn test_initial_jump() {
        assert_eq!(initial_jump(1, 1), 0);
        assert_eq!(initial_jump(4, 4), 2);
        assert_eq!(initial_jump(200, 100), 128);
        assert_eq!(initial_jump(256, 3), 128);
    }

    #[test]
    fn test_progress_runs_from_zero_to_one() {
        let mut grid = land_grid(16, 16);
        let seeds = vec![seed(0, 0, 3, 3)];
        let mut jfa = JumpFlood::new(&mut grid, &seeds);

        assert_eq!(jfa.current_jump(), 8);
        assert_eq!(jfa.progress(), 0.0);

        let mut last = 0.0;
        let mut passes = 0;
        while jfa.step(&mut grid, &seeds) {
            assert!(jfa.progress() >= last);
            last = jfa.progress();
            passes += 1;
        }
        assert_eq!(passes, 4);
        assert!(jfa.is_done());
        assert_eq!(jfa.progress(), 1.0);
        assert!(!jfa.step(&mut grid, &seeds));
    }

    #[test]
    fn test_single_seed_floods_entire_continent() {
        let mut grid = land_grid(13, 7);
        let seeds = vec![seed(0, 0, 12, 6)];
        JumpFlood::new(&mut grid, &seeds).run(&mut grid, &seeds);

        assert!(grid.cells().iter().all(|c| c.closest_seed == Some(SeedIndex(0))));
    }

    #[test]
    fn test_seeds_never_cross_continents() {
        // Left half continent 0, right half continent 1
        let mut grid = Grid::new(8, 8);
        for (i, cell) in grid.cells_mut().iter_mut().enumerate() {
            cell.continent = Some(if i % 8 < 4 { 0 } else { 1 });
        }
        let seeds = vec![seed(0, 0, 0, 0), seed(1, 1, 7, 7)];
        JumpFlood::new(&mut grid, &seeds).run(&mut grid, &seeds);

        for (i, cell) in grid.cells().iter().enumerate() {
            let expected = if i % 8 < 4 { 0 } else { 1 };
            assert_eq!(cell.closest_seed, Some(SeedIndex(expected)));
        }
    }

    #[test]
    fn test_ocean_cells_stay_unassigned() {
        let mut grid = land_grid(4, 4);
        grid.get_mut(1, 1).unwrap().continent = None;
        let seeds = vec![seed(0, 0, 0, 0)];
        JumpFlood::new(&mut grid, &seeds).run(&mut grid, &seeds);

        assert_eq!(grid.get(1, 1).unwrap().closest_seed, None);
        assert_eq!(grid.get(3, 3).unwrap().closest_seed, Some(SeedIndex(0)));
    }

    #[test]
    fn test_matches_brute_force_on_well_separated_seeds() {
        let seeds = vec![seed(0, 0, 2, 2), seed(1, 0, 29, 3), seed(2, 0, 15, 28)];

        let mut jfa_grid = land_grid(32, 32);
        JumpFlood::new(&mut jfa_grid, &seeds).run(&mut jfa_grid, &seeds);

        let mut bf_grid = land_grid(32, 32);
        brute_force_partition(&mut bf_grid, &seeds);

        // Tie cells may legitimately differ; the seed cells and far corners must not
        let agree = jfa_grid
            .cells()
            .iter()
            .zip(bf_grid.cells())
            .filter(|(a, b)| a.closest_seed == b.closest_seed)
            .count();
        assert!(agree as f32 / jfa_grid.len() as f32 > 0.9);
        for s in &seeds {
            assert_eq!(
                jfa_grid.get(s.x as isize, s.y as isize).unwrap().closest_seed,
                Some(SeedIndex(s.id))
            );
        }
    }

    #[test]
    fn test_last_seed_on_shared_cell_wins() {
        let mut grid = land_grid(2, 2);
        let seeds = vec![seed(0, 0, 1, 1), seed(1, 0, 1, 1)];
        JumpFlood::new(&mut grid, &seeds).run(&mut grid, &seeds);

        assert!(grid.cells().iter().all(|c| c.closest_seed == Some(SeedIndex(1))));
    }

    #[test]
    fn test_island_missed_by_every_offset_is_filled() {
        // Offsets 4, 2 and 1 from x = 3 never land on the seed at x = 0
        let mut grid = Grid::new(8, 1);
        grid.cells_mut()[0].continent = Some(0);
        grid.cells_mut()[3].continent = Some(0);
        let seeds = vec![seed(0, 0, 0, 0)];
        JumpFlood::new(&mut grid, &seeds).run(&mut grid, &seeds);

        let mut bf_grid = grid.clone();
        brute_force_partition(&mut bf_grid, &seeds);

        assert_eq!(grid.cells()[3].closest_seed, Some(SeedIndex(0)));
        assert_eq!(grid.cells()[3].closest_seed, bf_grid.cells()[3].closest_seed);
    }

    #[test]
    fn test_unseeded_continent_is_not_filled() {
        let mut grid = Grid::new(8, 1);
        grid.cells_mut()[0].continent = Some(0);
        grid.cells_mut()[5].continent = Some(1);
        let seeds = vec![seed(0, 0, 0, 0)];
        JumpFlood::new(&mut grid, &seeds).run(&mut grid, &seeds);

        assert_eq!(grid.cells()[5].closest_seed, None);
    }
}
