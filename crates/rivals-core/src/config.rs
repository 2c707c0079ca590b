//! Configuration types for the automaton.

use crate::{CellState, Error, Result};
use serde::{Deserialize, Serialize};

/// Slack allowed on the probability sum for accumulated float error.
const SUM_TOLERANCE: f64 = 1e-9;

/// Per-species spawn probabilities, validated on construction.
///
/// Entry `i` is the chance a freshly drawn cell becomes species `i`; the
/// remainder up to 1.0 is the chance it is `Dead`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ProbabilityTable(Vec<f64>);

impl ProbabilityTable {
    pub fn new(probabilities: Vec<f64>) -> Result<Self> {
        if probabilities.is_empty() {
            return Err(Error::InvalidProbabilities(
                "at least one species is required".to_string(),
            ));
        }

        if probabilities.len() > CellState::MAX_SPECIES {
            return Err(Error::InvalidProbabilities(format!(
                "{} species exceeds the maximum of {}",
                probabilities.len(),
                CellState::MAX_SPECIES
            )));
        }

        for (idx, p) in probabilities.iter().enumerate() {
            if !p.is_finite() || *p < 0.0 {
                return Err(Error::InvalidProbabilities(format!(
                    "species {} has invalid probability {}",
                    idx, p
                )));
            }
        }

        let sum: f64 = probabilities.iter().sum();
        if sum > 1.0 + SUM_TOLERANCE {
            return Err(Error::InvalidProbabilities(format!(
                "probabilities sum to {}, which exceeds 1.0",
                sum
            )));
        }

        Ok(Self(probabilities))
    }

    /// Number of active species described by this table
    pub fn species_count(&self) -> usize {
        self.0.len()
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.0
    }

    /// Probability that a draw lands on `Dead`
    pub fn dead_probability(&self) -> f64 {
        (1.0 - self.0.iter().sum::<f64>()).max(0.0)
    }

    /// Categorical draw for a uniform sample `u` in `[0, 1)`.
    ///
    /// Walks the species in order; the first whose cumulative probability
    /// exceeds `u` wins, otherwise the cell is `Dead`.
    pub fn draw(&self, u: f64) -> CellState {
        let mut cumulative = 0.0;
        for (idx, p) in self.0.iter().enumerate() {
            cumulative += p;
            if u < cumulative {
                return CellState::species(idx);
            }
        }
        CellState::DEAD
    }
}

impl TryFrom<Vec<f64>> for ProbabilityTable {
    type Error = Error;

    fn try_from(value: Vec<f64>) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ProbabilityTable> for Vec<f64> {
    fn from(table: ProbabilityTable) -> Self {
        table.0
    }
}

impl Default for ProbabilityTable {
    fn default() -> Self {
        Self(vec![0.1, 0.1, 0.1])
    }
}

/// Grid dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Width of the grid in cells
    pub width: i32,
    /// Height of the grid in cells
    pub height: i32,
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 150,
        }
    }
}

/// Reject grids that are empty or too large to index with `i32` coordinates.
pub fn validate_dimensions(width: i32, height: i32) -> Result<()> {
    if width <= 0 || height <= 0 {
        return Err(Error::InvalidDimensions(format!(
            "grid must be at least 1x1, got {}x{}",
            width, height
        )));
    }

    if width as i64 * height as i64 > i32::MAX as i64 {
        return Err(Error::InvalidDimensions(format!(
            "grid {}x{} has too many cells",
            width, height
        )));
    }

    Ok(())
}

/// Interactive region spawning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Radius in cells of a spawned region
    pub radius: i32,
}

impl SpawnConfig {
    pub fn validate(&self) -> Result<()> {
        if self.radius < 0 {
            return Err(Error::InvalidConfig(format!(
                "spawn radius must not be negative, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self { radius: 10 }
    }
}

/// Everything needed to build a simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Grid configuration
    pub grid: GridConfig,
    /// Spawn configuration
    pub spawn: SpawnConfig,
    /// Species probabilities used for initial population and spawning
    pub probabilities: ProbabilityTable,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.spawn.validate()?;
        Ok(())
    }

    pub fn species_count(&self) -> usize {
        self.probabilities.species_count()
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            grid: GridConfig::default(),
            spawn: SpawnConfig::default(),
            probabilities: ProbabilityTable::default(),
        }
    }
}

/// Headless frame loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Time between generations (milliseconds)
    pub tick_interval_ms: u64,
    /// Stop after this many generations
    pub max_generations: Option<u64>,
    /// Generations between census log lines
    pub census_interval: u64,
    /// Generations between automatic region spawns
    pub spawn_interval: Option<u64>,
    /// Print an ASCII frame with each census
    pub render_ascii: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 50,
            max_generations: None,
            census_interval: 100,
            spawn_interval: Some(250),
            render_ascii: false,
        }
    }
}
