//! Double-buffered toroidal grid.

use rivals_core::{validate_dimensions, CellState, GridConfig, Position, Result, MOORE_OFFSETS};
use std::ops::Range;

/// A 2D toroidal grid holding the current and next generation.
///
/// Both buffers are `width * height` cells long, row-major. They are allocated
/// once and swap roles every generation.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    current: Vec<CellState>,
    next: Vec<CellState>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        validate_dimensions(width, height)?;
        let size = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            current: vec![CellState::DEAD; size],
            next: vec![CellState::DEAD; size],
        })
    }

    pub fn from_config(config: &GridConfig) -> Result<Self> {
        Self::new(config.width, config.height)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells in each buffer
    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Buffer offset for any coordinate, wrapping both axes.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> usize {
        let x = x.rem_euclid(self.width);
        let y = y.rem_euclid(self.height);
        y as usize * self.width as usize + x as usize
    }

    /// Get position from index
    pub fn position_of(&self, index: usize) -> Position {
        let x = (index % self.width as usize) as i32;
        let y = (index / self.width as usize) as i32;
        Position::new(x, y)
    }

    /// Get current state at position (with toroidal wrapping)
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> CellState {
        self.current[self.index(x, y)]
    }

    /// Set current state at position
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, state: CellState) {
        let index = self.index(x, y);
        self.current[index] = state;
    }

    /// State in the next buffer, as last written by the engine
    pub fn next_get(&self, x: i32, y: i32) -> CellState {
        self.next[self.index(x, y)]
    }

    /// Current generation, row-major
    pub fn cells(&self) -> &[CellState] {
        &self.current
    }

    /// Next generation, row-major
    pub fn next_cells(&self) -> &[CellState] {
        &self.next
    }

    pub(crate) fn next_mut(&mut self) -> &mut [CellState] {
        &mut self.next
    }

    /// Promote the next buffer to current. The old current becomes scratch.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Kill every current cell
    pub fn clear(&mut self) {
        self.current.fill(CellState::DEAD);
    }

    /// The eight Moore neighbors, each wrapped, in [`MOORE_OFFSETS`] order.
    pub fn neighbors(&self, x: i32, y: i32) -> [Position; 8] {
        let center = Position::new(x, y).wrap(self.width, self.height);
        MOORE_OFFSETS.map(|(dx, dy)| center.add(dx, dy).wrap(self.width, self.height))
    }

    /// Buffer offsets of the eight Moore neighbors.
    ///
    /// The center is wrapped before the offsets are applied, so any `i32`
    /// coordinate is valid.
    #[inline]
    pub fn neighbor_indices(&self, x: i32, y: i32) -> [usize; 8] {
        let x = x.rem_euclid(self.width);
        let y = y.rem_euclid(self.height);
        MOORE_OFFSETS.map(|(dx, dy)| self.index(x + dx, y + dy))
    }

    /// Tally current-buffer neighbors per species into `counts`.
    ///
    /// `counts[i]` receives the number of neighbors in species `i`; states with
    /// no slot in `counts` are ignored.
    pub fn count_neighbors(&self, x: i32, y: i32, counts: &mut [u8]) {
        counts.fill(0);
        for idx in self.neighbor_indices(x, y) {
            if let Some(species) = self.current[idx].species_index() {
                if let Some(slot) = counts.get_mut(species) {
                    *slot += 1;
                }
            }
        }
    }

    /// Reassign every current cell within `radius` of the center.
    ///
    /// Distance is euclidean, measured the short way round the torus. Each
    /// affected cell is visited once in row-major order of the region and gets
    /// the value of one `draw()` call. Returns the number of cells visited.
    pub fn seed_region<F>(&mut self, center_x: i32, center_y: i32, radius: i32, mut draw: F) -> usize
    where
        F: FnMut() -> CellState,
    {
        if radius < 0 {
            return 0;
        }

        let center = Position::new(center_x, center_y).wrap(self.width, self.height);
        let limit = radius as i64 * radius as i64;
        let mut visited = 0;

        for y in region_axis(center.y, radius, self.height) {
            for x in region_axis(center.x, radius, self.width) {
                let pos = Position::new(x, y).wrap(self.width, self.height);
                if pos.wrapped_distance_squared(&center, self.width, self.height) <= limit {
                    let index = self.index(pos.x, pos.y);
                    self.current[index] = draw();
                    visited += 1;
                }
            }
        }

        visited
    }

    /// Iterator over all current states with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.current
            .iter()
            .enumerate()
            .map(move |(i, &state)| (self.position_of(i), state))
    }
}

/// Unwrapped coordinates along one axis covering a region, each wrapped cell once.
fn region_axis(center: i32, radius: i32, dim: i32) -> Range<i32> {
    if radius as i64 * 2 + 1 >= dim as i64 {
        0..dim
    } else {
        (center - radius)..(center + radius + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 8).unwrap();
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 8);
        assert_eq!(grid.len(), 80);
        assert_eq!(grid.next_cells().len(), 80);
        assert!(grid.cells().iter().all(|c| c.is_dead()));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Grid::new(0, 10).is_err());
        assert!(Grid::new(10, 0).is_err());
        assert!(Grid::new(-3, 5).is_err());
    }

    #[test]
    fn test_toroidal_wrapping() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.set(9, 9, CellState::RED);

        // (-1, -1) wraps to (9, 9)
        assert_eq!(grid.get(-1, -1), CellState::RED);
        assert_eq!(grid.index(-1, -1), 99);

        // (10, 10) wraps to (0, 0)
        assert_eq!(grid.index(10, 10), 0);
        assert_eq!(grid.index(-21, 35), grid.index(9, 5));
    }

    #[test]
    fn test_set_then_get() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set(7, -2, CellState::BLUE);
        assert_eq!(grid.get(2, 3), CellState::BLUE);
        assert_eq!(grid.position_of(grid.index(2, 3)), Position::new(2, 3));
    }

    #[test]
    fn test_neighbors() {
        let grid = Grid::new(10, 10).unwrap();
        let neighbors = grid.neighbors(0, 0);

        // Should have 8 neighbors, all wrapped into range
        assert_eq!(neighbors.len(), 8);
        assert_eq!(neighbors[0], Position::new(9, 9));
        assert_eq!(neighbors[7], Position::new(1, 1));
        assert!(neighbors
            .iter()
            .all(|p| (0..10).contains(&p.x) && (0..10).contains(&p.y)));
    }

    #[test]
    fn test_count_neighbors() {
        let mut grid = Grid::new(6, 6).unwrap();
        grid.set(-1, -1, CellState::WHITE);
        grid.set(0, 1, CellState::WHITE);
        grid.set(1, 0, CellState::BLUE);
        // Center cell itself is not counted
        grid.set(0, 0, CellState::BLUE);

        let mut counts = [0u8; 3];
        grid.count_neighbors(0, 0, &mut counts);
        assert_eq!(counts, [2, 0, 1]);
    }

    #[test]
    fn test_neighbors_extreme_coords() {
        let mut grid = Grid::new(7, 5).unwrap();
        let (x, y) = (i32::MAX, i32::MIN);
        let wrapped = Position::new(x, y).wrap(7, 5);

        grid.set(x, y, CellState::RED);
        grid.set(wrapped.x + 1, wrapped.y, CellState::BLUE);
        grid.set(wrapped.x - 1, wrapped.y - 1, CellState::WHITE);

        let mut counts = [0u8; 3];
        grid.count_neighbors(x, y, &mut counts);
        assert_eq!(counts, [1, 0, 1]);

        assert_eq!(grid.neighbor_indices(x, y), grid.neighbor_indices(wrapped.x, wrapped.y));
        assert_eq!(grid.neighbors(x, y), grid.neighbors(wrapped.x, wrapped.y));
        assert_eq!(grid.neighbors(i32::MIN, i32::MAX).len(), 8);
    }

    #[test]
    fn test_swap_and_clear() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 1, CellState::WHITE);
        grid.swap();
        assert_eq!(grid.get(1, 1), CellState::DEAD);
        assert_eq!(grid.next_get(1, 1), CellState::WHITE);

        grid.swap();
        assert_eq!(grid.get(1, 1), CellState::WHITE);
        grid.clear();
        assert!(grid.cells().iter().all(|c| c.is_dead()));
    }

    #[test]
    fn test_seed_region_scope() {
        let mut grid = Grid::new(20, 20).unwrap();
        let visited = grid.seed_region(0, 0, 2, || CellState::RED);

        // 13 lattice points with x^2 + y^2 <= 4
        assert_eq!(visited, 13);
        for (pos, state) in grid.iter() {
            let d2 = pos.wrapped_distance_squared(&Position::new(0, 0), 20, 20);
            assert_eq!(state == CellState::RED, d2 <= 4, "at {:?}", pos);
        }
        assert_eq!(grid.get(-2, 0), CellState::RED);
        assert_eq!(grid.get(-1, -1), CellState::RED);
        assert_eq!(grid.get(-2, -1), CellState::DEAD);
    }

    #[test]
    fn test_seed_region_radius_zero_and_negative() {
        let mut grid = Grid::new(5, 5).unwrap();
        assert_eq!(grid.seed_region(2, 2, -1, || CellState::WHITE), 0);
        assert!(grid.cells().iter().all(|c| c.is_dead()));

        assert_eq!(grid.seed_region(2, 2, 0, || CellState::WHITE), 1);
        assert_eq!(grid.get(2, 2), CellState::WHITE);
    }

    #[test]
    fn test_seed_region_larger_than_grid() {
        let mut grid = Grid::new(4, 3).unwrap();
        let mut draws = 0;
        let visited = grid.seed_region(1, 1, 50, || {
            draws += 1;
            CellState::BLUE
        });

        // Every cell exactly once
        assert_eq!(visited, 12);
        assert_eq!(draws, 12);
        assert!(grid.cells().iter().all(|&c| c == CellState::BLUE));
    }

    #[test]
    fn test_seed_region_leaves_next_untouched() {
        let mut grid = Grid::new(8, 8).unwrap();
        grid.seed_region(4, 4, 3, || CellState::WHITE);
        assert!(grid.next_cells().iter().all(|c| c.is_dead()));
    }

    proptest! {
        #[test]
        fn prop_index_wraps(
            width in 1i32..64,
            height in 1i32..64,
            x in -1_000i32..1_000,
            y in -1_000i32..1_000,
            k in -50i32..50,
        ) {
            let grid = Grid::new(width, height).unwrap();
            let index = grid.index(x, y);
            prop_assert!(index < grid.len());
            prop_assert_eq!(index, grid.index(x + k * width, y + k * height));
        }

        #[test]
        fn prop_neighbors_total(
            width in 1i32..64,
            height in 1i32..64,
            x in any::<i32>(),
            y in any::<i32>(),
        ) {
            let grid = Grid::new(width, height).unwrap();
            let center = Position::new(x, y).wrap(width, height);
            prop_assert_eq!(
                grid.neighbor_indices(x, y),
                grid.neighbor_indices(center.x, center.y)
            );
        }
    }
}
