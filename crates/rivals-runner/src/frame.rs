//! Stand-ins for the display and pointer input.

use rand::Rng;
use rivals_core::CellState;
use rivals_world::Grid;

/// One character per cell, one line per row.
pub fn render_ascii(grid: &Grid) -> String {
    let width = grid.width() as usize;
    let mut out = String::with_capacity(grid.len() + grid.height() as usize);

    for row in grid.cells().chunks(width) {
        out.extend(row.iter().map(|&cell| glyph(cell)));
        out.push('\n');
    }

    out
}

fn glyph(cell: CellState) -> char {
    match cell {
        CellState::DEAD => '.',
        CellState::WHITE => 'W',
        CellState::RED => 'R',
        CellState::BLUE => 'B',
        CellState(n) => char::from_digit(n as u32 % 10, 10).unwrap_or('?'),
    }
}

/// A random "click" position on the grid
pub fn spawn_point<R: Rng>(rng: &mut R, width: i32, height: i32) -> (i32, i32) {
    (rng.gen_range(0..width), rng.gen_range(0..height))
}
