//! Exhaustive nearest-seed partition
//!
//! Compares every land cell against every seed of its continent. Slower than
//! Jump-Flood on large grids but exact, which makes it the reference for
//! small grids and tests.

use crate::generation::{Seed, SeedIndex};
use crate::grid::Grid;

/// Point every land cell at its nearest same-continent seed
///
/// Ties go to the seed that appears first in `seeds`. Land cells of a
/// continent without seeds are left without a closest seed.
pub fn brute_force_partition(grid: &mut Grid, seeds: &[Seed]) {
    let continent_count = seeds.iter().map(|s| s.continent + 1).max().unwrap_or(0);
    let mut by_continent: Vec<Vec<usize>> = vec![Vec::new(); continent_count];
    for (index, seed) in seeds.iter().enumerate() {
        by_continent[seed.continent].push(index);
    }

    let size_x = grid.size_x();
    for (index, cell) in grid.cells_mut().iter_mut().enumerate() {
        cell.closest_seed = None;
        let Some(candidates) = cell.continent.and_then(|c| by_continent.get(c)) else {
            continue;
        };
        let (x, y) = (index % size_x, index / size_x);

        let mut best_dist = i64::MAX;
        for &candidate in candidates {
            let dist = seeds[candidate].distance_squared(x, y);
            if dist < best_dist {
                best_dist = dist;
                cell.closest_seed = Some(SeedIndex(candidate));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_nearest_seed_assignment() {
        let mut grid = Grid::new(5, 1);
        for cell in grid.cells_mut() {
            cell.continent = Some(0);
        }
        let seeds = vec![seed(0, 0, 0, 0), seed(1, 0, 4, 0)];
        brute_force_partition(&mut grid, &seeds);

        let assigned: Vec<_> = grid.cells().iter().map(|c| c.closest_seed).collect();
        assert_eq!(
            assigned,
            vec![
                Some(SeedIndex(0)),
                Some(SeedIndex(0)),
                // Equidistant: first seed wins
                Some(SeedIndex(0)),
                Some(SeedIndex(1)),
                Some(SeedIndex(1)),
            ]
        );
    }

    #[test]
    fn test_only_same_continent_seeds_considered() {
        let mut grid = Grid::new(3, 1);
        grid.cells_mut()[0].continent = Some(0);
        grid.cells_mut()[1].continent = Some(1);
        grid.cells_mut()[2].continent = Some(1);

        // The continent 0 seed is closer to cell 1 but belongs elsewhere
        let seeds = vec![seed(0, 0, 0, 0), seed(1, 1, 2, 0)];
        brute_force_partition(&mut grid, &seeds);

        assert_eq!(grid.cells()[0].closest_seed, Some(SeedIndex(0)));
        assert_eq!(grid.cells()[1].closest_seed, Some(SeedIndex(1)));
    }

    #[test]
    fn test_unseeded_continent_and_ocean_stay_empty() {
        let mut grid = Grid::new(3, 1);
        grid.cells_mut()[0].continent = Some(0);
        grid.cells_mut()[2].continent = Some(5);

        brute_force_partition(&mut grid, &[seed(0, 0, 0, 0)]);

        assert_eq!(grid.cells()[0].closest_seed, Some(SeedIndex(0)));
        assert_eq!(grid.cells()[1].closest_seed, None);
        assert_eq!(grid.cells()[2].closest_seed, None);
    }
}
