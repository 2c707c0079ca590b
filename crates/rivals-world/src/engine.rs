//! Two-pass state transition: survival and birth, then retaliation.

use crate::grid::Grid;
use crate::random::UniformSource;
use rand_chacha::ChaCha8Rng;
use rivals_core::{BirthStats, CellState, Error, Result};
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fixed-capacity list of retaliation candidates for one birth.
#[derive(Debug, Default)]
struct VictimList {
    slots: [usize; 8],
    len: usize,
}

impl VictimList {
    fn push(&mut self, index: usize) {
        self.slots[self.len] = index;
        self.len += 1;
    }

    fn as_slice(&self) -> &[usize] {
        &self.slots[..self.len]
    }
}

/// Computes the next generation of a [`Grid`].
///
/// Pass 1 writes a provisional state for every cell from the current buffer
/// alone. Pass 2 copies it into the grid's next buffer, then every birth
/// kills one random opposing neighbor there. The engine never swaps buffers.
pub struct TransitionEngine<R = ChaCha8Rng> {
    species_count: usize,
    rng: R,
    provisional: Vec<CellState>,
}

impl<R: UniformSource> TransitionEngine<R> {
    pub fn new(species_count: usize, rng: R) -> Result<Self> {
        if species_count == 0 || species_count > CellState::MAX_SPECIES {
            return Err(Error::InvalidConfig(format!(
                "species count must be between 1 and {}, got {}",
                CellState::MAX_SPECIES,
                species_count
            )));
        }

        Ok(Self {
            species_count,
            rng,
            provisional: Vec::new(),
        })
    }

    pub fn species_count(&self) -> usize {
        self.species_count
    }

    /// Random source, shared with seeding so one stream drives a run
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Pass 1 output of the last step
    pub fn provisional(&self) -> &[CellState] {
        &self.provisional
    }

    /// Compute the next generation into the grid's next buffer.
    pub fn step(&mut self, grid: &mut Grid) -> BirthStats {
        if self.provisional.len() != grid.len() {
            self.provisional.resize(grid.len(), CellState::DEAD);
        }

        let contested = self.survival_pass(grid);
        let mut stats = self.retaliation_pass(grid);
        stats.contested = contested;

        trace!(
            births = stats.births,
            contested = stats.contested,
            retaliations = stats.retaliations,
            victims = stats.victims,
            "Transition computed"
        );

        stats
    }

    /// Pass 1. Returns the number of births voided by contention.
    fn survival_pass(&mut self, grid: &Grid) -> u64 {
        let width = grid.width() as usize;
        let species_count = self.species_count;

        #[cfg(feature = "parallel")]
        let contested = self
            .provisional
            .par_chunks_mut(width)
            .enumerate()
            .map(|(y, row)| provisional_row(grid, species_count, y as i32, row))
            .sum();

        #[cfg(not(feature = "parallel"))]
        let contested = self
            .provisional
            .chunks_mut(width)
            .enumerate()
            .map(|(y, row)| provisional_row(grid, species_count, y as i32, row))
            .sum();

        contested
    }

    /// Pass 2. Reads the current buffer and the provisional buffer only.
    fn retaliation_pass(&mut self, grid: &mut Grid) -> BirthStats {
        let mut stats = BirthStats::default();
        grid.next_mut().copy_from_slice(&self.provisional);

        for index in 0..self.provisional.len() {
            let born = self.provisional[index];
            if !(grid.cells()[index].is_dead() && born.is_alive()) {
                continue;
            }
            stats.births += 1;

            let pos = grid.position_of(index);
            let mut victims = VictimList::default();
            for neighbor in grid.neighbor_indices(pos.x, pos.y) {
                let state = grid.cells()[neighbor];
                if state.is_alive() && state != born {
                    victims.push(neighbor);
                }
            }

            if victims.len == 0 {
                continue;
            }

            let victim = victims.as_slice()[self.rng.pick(victims.len)];
            stats.retaliations += 1;

            let next = grid.next_mut();
            if next[victim].is_alive() {
                next[victim] = CellState::DEAD;
                stats.victims += 1;
            }
        }

        stats
    }
}

/// Pass 1 for one row. Returns the number of contested births in the row.
fn provisional_row(grid: &Grid, species_count: usize, y: i32, row: &mut [CellState]) -> u64 {
    let mut counts = [0u8; CellState::MAX_SPECIES];
    let counts = &mut counts[..species_count];
    let mut contested = 0;

    for (x, slot) in row.iter_mut().enumerate() {
        let x = x as i32;
        grid.count_neighbors(x, y, counts);

        *slot = match grid.get(x, y).species_index() {
            None => {
                let mut candidate = None;
                let mut candidates = 0;
                for (species, &count) in counts.iter().enumerate() {
                    if count == 3 {
                        candidate = Some(species);
                        candidates += 1;
                    }
                }
                match (candidates, candidate) {
                    (1, Some(species)) => CellState::species(species),
                    (0, _) => CellState::DEAD,
                    _ => {
                        contested += 1;
                        CellState::DEAD
                    }
                }
            }
            Some(species) => {
                let same = counts.get(species).copied().unwrap_or(0);
                if (2..=3).contains(&same) {
                    CellState::species(species)
                } else {
                    CellState::DEAD
                }
            }
        };
    }

    contested
}
