//! Region adjacency from the partitioned grid

use std::collections::BTreeSet;

use crate::grid::{Grid, CARDINALS};

/// Sorted neighbor lists for regions `0..region_count`
///
/// Two regions are neighbors when any of their cells share an edge. The
/// relation is symmetric and ignores continent boundaries, so regions on
/// touching continents border each other.
pub fn region_adjacency(grid: &Grid, region_count: usize) -> Vec<Vec<usize>> {
    let mut neighbors: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); region_count];

    for y in 0..grid.size_y() {
        for x in 0..grid.size_x() {
            let Some(region) = grid.get(x as isize, y as isize).and_then(|c| c.region) else {
                continue;
            };
            if region >= region_count {
                continue;
            }
            // Right and down cover every shared edge exactly once
            for &(dx, dy) in CARDINALS.iter().filter(|(dx, dy)| *dx > 0 || *dy > 0) {
                let Some(other) = grid
                    .get(x as isize + dx, y as isize + dy)
                    .and_then(|c| c.region)
                else {
                    continue;
                };
                if other != region && other < region_count {
                    neighbors[region].insert(other);
                    neighbors[other].insert(region);
                }
            }
        }
    }

    neighbors
        .into_iter()
        .map(|set| set.into_iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(size_x: usize, regions: &[Option<usize>]) -> Grid {
        let mut grid = Grid::new(size_x, regions.len() / size_x);
        for (cell, &region) in grid.cells_mut().iter_mut().zip(regions) {
            cell.region = region;
            cell.continent = region.map(|_| 0);
        }
        grid
    }

    #[test]
    fn test_adjacency_is_symmetric_and_sorted() {
        #[rustfmt::skip]
        let grid = grid_from(3, &[
            Some(0), Some(1), Some(1),
            Some(2), Some(2), Some(1),
            None,    Some(3), Some(3),
        ]);
        let adjacency = region_adjacency(&grid, 4);

        assert_eq!(adjacency[0], vec![1, 2]);
        assert_eq!(adjacency[1], vec![0, 2, 3]);
        assert_eq!(adjacency[2], vec![0, 1, 3]);
        assert_eq!(adjacency[3], vec![1, 2]);
    }

    #[test]
    fn test_ocean_separates_regions() {
        let grid = grid_from(3, &[Some(0), None, Some(1)]);
        let adjacency = region_adjacency(&grid, 2);
        assert!(adjacency[0].is_empty());
        assert!(adjacency[1].is_empty());
    }

    #[test]
    fn test_diagonal_contact_is_not_adjacency() {
        #[rustfmt::skip]
        let grid = grid_from(2, &[
            Some(0), None,
            None,    Some(1),
        ]);
        let adjacency = region_adjacency(&grid, 2);
        assert!(adjacency[0].is_empty());
    }

    #[test]
    fn test_empty_region_has_no_neighbors() {
        let grid = grid_from(2, &[Some(0), Some(2)]);
        let adjacency = region_adjacency(&grid, 3);
        assert_eq!(adjacency[0], vec![2]);
        assert!(adjacency[1].is_empty());
        assert_eq!(adjacency[2], vec![0]);
    }
}
