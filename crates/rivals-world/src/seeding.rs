//! Random population of the current buffer.

use crate::grid::Grid;
use crate::random::UniformSource;
use rivals_core::{CellState, ProbabilityTable};
use tracing::debug;

/// One categorical draw from the table
pub fn random_state<R: UniformSource + ?Sized>(table: &ProbabilityTable, rng: &mut R) -> CellState {
    table.draw(rng.next_unit())
}

/// Fill every current cell, row-major, with a fresh draw.
pub fn initialize<R: UniformSource + ?Sized>(grid: &mut Grid, table: &ProbabilityTable, rng: &mut R) {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            grid.set(x, y, random_state(table, rng));
        }
    }
    debug!(
        width = grid.width(),
        height = grid.height(),
        species = table.species_count(),
        "Grid initialized"
    );
}

/// Redraw every current cell within `radius` of the center.
///
/// Returns the number of cells reseeded.
pub fn seed_region<R: UniformSource + ?Sized>(
    grid: &mut Grid,
    center_x: i32,
    center_y: i32,
    radius: i32,
    table: &ProbabilityTable,
    rng: &mut R,
) -> usize {
    let seeded = grid.seed_region(center_x, center_y, radius, || random_state(table, rng));
    debug!(center_x, center_y, radius, seeded, "Region seeded");
    seeded
}
