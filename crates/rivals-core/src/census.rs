//! Population and interaction statistics.

use crate::CellState;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Population of every state in one generation's buffer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    /// Generation this snapshot was taken at
    pub generation: u64,
    /// Number of dead cells
    pub dead: u64,
    /// Live cells per species, indexed by zero-based species index
    pub species: Vec<u64>,
}

impl Census {
    /// Tally a cell buffer.
    ///
    /// States beyond `species_count` are not expected; they are counted as dead
    /// rather than indexing out of range.
    pub fn from_cells(generation: u64, cells: &[CellState], species_count: usize) -> Self {
        let mut census = Self {
            generation,
            dead: 0,
            species: vec![0; species_count],
        };

        for cell in cells {
            match cell.species_index() {
                Some(idx) if idx < species_count => census.species[idx] += 1,
                _ => census.dead += 1,
            }
        }

        census
    }

    pub fn total(&self) -> u64 {
        self.dead + self.alive()
    }

    pub fn alive(&self) -> u64 {
        self.species.iter().sum()
    }

    pub fn count(&self, state: CellState) -> u64 {
        match state.species_index() {
            None => self.dead,
            Some(idx) => self.species.get(idx).copied().unwrap_or(0),
        }
    }

    /// Most populous species; the lower index wins ties.
    pub fn dominant(&self) -> Option<CellState> {
        let mut best: Option<(usize, u64)> = None;
        for (idx, &count) in self.species.iter().enumerate() {
            if count == 0 {
                continue;
            }
            match best {
                Some((_, best_count)) if best_count >= count => {}
                _ => best = Some((idx, count)),
            }
        }
        best.map(|(idx, _)| CellState::species(idx))
    }

    pub fn is_extinct(&self) -> bool {
        self.alive() == 0
    }
}

/// Counters gathered while computing one generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthStats {
    /// Dead cells that became a species
    pub births: u64,
    /// Dead cells where two or more species had exactly three neighbors
    pub contested: u64,
    /// Births that found at least one opposing neighbor to strike
    pub retaliations: u64,
    /// Distinct cells forced dead by retaliation
    pub victims: u64,
}

impl AddAssign for BirthStats {
    fn add_assign(&mut self, other: Self) {
        self.births += other.births;
        self.contested += other.contested;
        self.retaliations += other.retaliations;
        self.victims += other.victims;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_census_from_cells() {
        let cells = [
            CellState::DEAD,
            CellState::WHITE,
            CellState::RED,
            CellState::RED,
            CellState::BLUE,
            CellState::DEAD,
        ];
        let census = Census::from_cells(7, &cells, 3);

        assert_eq!(census.generation, 7);
        assert_eq!(census.dead, 2);
        assert_eq!(census.species, vec![1, 2, 1]);
        assert_eq!(census.total(), 6);
        assert_eq!(census.alive(), 4);
        assert_eq!(census.count(CellState::RED), 2);
        assert_eq!(census.dominant(), Some(CellState::RED));
    }

    #[test]
    fn test_dominant_tie_and_extinction() {
        let census = Census::from_cells(0, &[CellState::BLUE, CellState::WHITE], 3);
        assert_eq!(census.dominant(), Some(CellState::WHITE));

        let empty = Census::from_cells(0, &[CellState::DEAD; 4], 3);
        assert!(empty.is_extinct());
        assert_eq!(empty.dominant(), None);
    }

    #[test]
    fn test_birth_stats_accumulate() {
        let mut total = BirthStats::default();
        total += BirthStats {
            births: 3,
            contested: 1,
            retaliations: 2,
            victims: 2,
        };
        total += BirthStats {
            births: 1,
            ..Default::default()
        };

        assert_eq!(total.births, 4);
        assert_eq!(total.contested, 1);
        assert_eq!(total.victims, 2);
    }
}
