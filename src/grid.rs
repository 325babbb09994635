//! Dense cell grid covering the playing field
//!
//! The grid is owned by a single generation run. Cells are stored row-major
//! (`y * size_x + x`) and every coordinate lookup is bounds-checked: positions
//! outside the grid yield `None` instead of wrapping or clamping.

use glam::{Vec2, Vec3};

use crate::generation::SeedIndex;
use crate::mask::MaskSampler;

/// One discretized unit of the playing field
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cell {
    /// Continent this cell was classified into (`None` = ocean)
    pub continent: Option<usize>,
    /// Region (seed id) this cell belongs to once partitioned
    pub region: Option<usize>,
    /// Elevation of the cell's top face
    pub height: f32,
    /// Nearest seed found so far, valid only while partitioning
    pub closest_seed: Option<SeedIndex>,
}

impl Cell {
    /// Check if this cell was classified as land
    #[inline]
    pub fn is_land(&self) -> bool {
        self.continent.is_some()
    }
}

/// Cardinal grid directions with their unit offsets
pub const CARDINALS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];

/// Row-major 2D array of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size_x: usize,
    size_y: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of ocean cells
    pub fn new(size_x: usize, size_y: usize) -> Self {
        Self {
            size_x,
            size_y,
            cells: vec![Cell::default(); size_x * size_y],
        }
    }

    /// Number of columns
    #[inline]
    pub fn size_x(&self) -> usize {
        self.size_x
    }

    /// Number of rows
    #[inline]
    pub fn size_y(&self) -> usize {
        self.size_y
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the grid has no cells
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of a coordinate, `None` outside the grid
    #[inline]
    pub fn index_of(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.size_x || y >= self.size_y {
            return None;
        }
        Some(y * self.size_x + x)
    }

    /// Coordinate of a flat index
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.size_x, index / self.size_x)
    }

    /// Cell at a coordinate, `None` outside the grid
    #[inline]
    pub fn get(&self, x: isize, y: isize) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Mutable cell at a coordinate, `None` outside the grid
    #[inline]
    pub fn get_mut(&mut self, x: isize, y: isize) -> Option<&mut Cell> {
        self.index_of(x, y).map(move |i| &mut self.cells[i])
    }

    /// All cells in row-major order
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All cells in row-major order, mutably
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Classify every cell against the mask
    ///
    /// Cell `(x, y)` samples the mask at `(x / size_x, y / size_y)`.
    /// Returns the number of cells assigned to each of `continent_count`
    /// continents.
    pub fn populate(&mut self, sampler: &MaskSampler<'_>, continent_count: usize) -> Vec<usize> {
        let mut counts = vec![0; continent_count];
        for y in 0..self.size_y {
            for x in 0..self.size_x {
                let u = x as f32 / self.size_x as f32;
                let v = y as f32 / self.size_y as f32;
                let continent = sampler
                    .classify_uv(u, v)
                    .filter(|&c| c < continent_count);
                if let Some(c) = continent {
                    counts[c] += 1;
                }
                self.cells[y * self.size_x + x].continent = continent;
            }
        }
        counts
    }

    /// Flat indices of every cell classified into `continent`, ascending
    pub fn continent_cells(&self, continent: usize) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.continent == Some(continent))
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of land cells
    pub fn land_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_land()).count()
    }

    /// Region assignment of every cell in row-major order
    pub fn region_assignment(&self) -> Vec<Option<usize>> {
        self.cells.iter().map(|c| c.region).collect()
    }

    /// The 4-neighborhood of a cell; out-of-bounds neighbors are `None`
    pub fn cardinal_neighbors(&self, x: usize, y: usize) -> [Option<&Cell>; 4] {
        let (x, y) = (x as isize, y as isize);
        CARDINALS.map(|(dx, dy)| self.get(x + dx, y + dy))
    }
}

/// Mapping between grid coordinates and the world-space playing field
///
/// The field spans `[-half.x, half.x] × [-half.y, half.y]` with grid row 0 at
/// `-half.y`. Cells are uniform rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    half_extents: Vec2,
    size_x: usize,
    size_y: usize,
    cell_size: Vec2,
}

impl GridLayout {
    /// Layout of a `size_x × size_y` grid over a field with the given half-extents
    pub fn new(half_extents: Vec2, size_x: usize, size_y: usize) -> Self {
        let cell_size = Vec2::new(
            2.0 * half_extents.x / size_x.max(1) as f32,
            2.0 * half_extents.y / size_y.max(1) as f32,
        );
        Self {
            half_extents,
            size_x,
            size_y,
            cell_size,
        }
    }

    /// Half-extents of the playing field
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// World size of one cell
    #[inline]
    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// World position of a cell's center
    pub fn cell_center(&self, x: usize, y: usize) -> Vec2 {
        Vec2::new(
            x as f32 * self.cell_size.x - self.half_extents.x + self.cell_size.x * 0.5,
            y as f32 * self.cell_size.y - self.half_extents.y + self.cell_size.y * 0.5,
        )
    }

    /// Pivot of the region grown from a seed at `(x, y)`
    ///
    /// This is the seed cell's minimum corner lifted to the region's base
    /// height. Region vertex buffers are expressed relative to it.
    pub fn region_center(&self, x: usize, y: usize, base_height: f32) -> Vec3 {
        let u = x as f32 / self.size_x.max(1) as f32;
        let v = y as f32 / self.size_y.max(1) as f32;
        Vec3::new(
            u * 2.0 * self.half_extents.x - self.half_extents.x,
            v * 2.0 * self.half_extents.y - self.half_extents.y,
            base_height,
        )
    }

    /// Grid coordinate containing a world position, `None` off the field
    pub fn cell_at(&self, position: Vec2) -> Option<(usize, usize)> {
        let fx = ((position.x + self.half_extents.x) / self.cell_size.x).floor();
        let fy = ((position.y + self.half_extents.y) / self.cell_size.y).floor();
        if !fx.is_finite() || !fy.is_finite() || fx < 0.0 || fy < 0.0 {
            return None;
        }
        let (x, y) = (fx as usize, fy as usize);
        (x < self.size_x && y < self.size_y).then_some((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContinentDefinition;
    use crate::mask::MaskImage;

    #[test]
    fn test_lookups_fail_closed() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.len(), 6);
        assert!(grid.get(0, 0).is_some());
        assert!(grid.get(2, 1).is_some());
        assert!(grid.get(3, 0).is_none());
        assert!(grid.get(0, 2).is_none());
        assert!(grid.get(-1, 0).is_none());
        assert!(grid.get(0, -1).is_none());
    }

    #[test]
    fn test_index_and_coords() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.index_of(1, 2), Some(9));
        assert_eq!(grid.coords(9), (1, 2));
        assert_eq!(grid.index_of(4, 0), None);
    }

    #[test]
    fn test_cardinal_neighbors_at_corner() {
        let grid = Grid::new(2, 2);
        let [right, left, up, down] = grid.cardinal_neighbors(0, 0);
        assert!(right.is_some());
        assert!(left.is_none());
        assert!(up.is_none());
        assert!(down.is_some());
    }

    #[test]
    fn test_populate_counts() {
        // Left half white, right half red
        let mask = MaskImage::from_fn(4, 4, |x, _| {
            if x < 2 {
                [255, 255, 255, 255]
            } else {
                [255, 0, 0, 255]
            }
        });
        let continents = vec![ContinentDefinition::new("Red", [1.0, 0.0, 0.0, 1.0])];
        let sampler = MaskSampler::new(&mask, [1.0, 1.0, 1.0, 1.0], &continents);

        let mut grid = Grid::new(4, 4);
        let counts = grid.populate(&sampler, continents.len());

        assert_eq!(counts, vec![8]);
        assert_eq!(grid.land_cell_count(), 8);
        assert_eq!(grid.continent_cells(0), vec![2, 3, 6, 7, 10, 11, 14, 15]);
        assert!(grid.get(0, 0).map(|c| !c.is_land()).unwrap_or(false));
    }

    #[test]
    fn test_layout_cell_centers() {
        let layout = GridLayout::new(Vec2::new(2.0, 2.0), 4, 4);
        assert_eq!(layout.cell_size(), Vec2::new(1.0, 1.0));
        assert_eq!(layout.cell_center(0, 0), Vec2::new(-1.5, -1.5));
        assert_eq!(layout.cell_center(3, 3), Vec2::new(1.5, 1.5));
    }

    #[test]
    fn test_layout_region_center_is_seed_corner() {
        let layout = GridLayout::new(Vec2::new(100.0, 50.0), 10, 5);
        assert_eq!(
            layout.region_center(5, 0, 7.0),
            Vec3::new(0.0, -50.0, 7.0)
        );
    }

    #[test]
    fn test_layout_cell_at() {
        let layout = GridLayout::new(Vec2::new(2.0, 2.0), 4, 4);
        assert_eq!(layout.cell_at(Vec2::new(-1.9, -1.9)), Some((0, 0)));
        assert_eq!(layout.cell_at(Vec2::new(0.5, -0.5)), Some((2, 1)));
        assert_eq!(layout.cell_at(Vec2::new(2.5, 0.0)), None);
        assert_eq!(layout.cell_at(Vec2::new(0.0, -2.1)), None);
    }
}
