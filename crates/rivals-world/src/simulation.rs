//! Simulation driver bundling a grid, its engine, and the generation counter.

use crate::engine::TransitionEngine;
use crate::grid::Grid;
use crate::random::seeded;
use crate::seeding;
use rand_chacha::ChaCha8Rng;
use rivals_core::{
    BirthStats, CellState, Census, ProbabilityTable, Result, SimulationConfig, SpawnConfig,
};
use tracing::{debug, event, info, instrument, Level};

pub struct Simulation {
    grid: Grid,
    engine: TransitionEngine<ChaCha8Rng>,
    probabilities: ProbabilityTable,
    spawn_radius: i32,
    generation: u64,
    // Running interaction totals for metrics
    totals: BirthStats,
}

impl Simulation {
    /// Build and randomly populate a grid from configuration.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let grid = Grid::from_config(&config.grid)?;
        let engine = TransitionEngine::new(config.species_count(), seeded(config.seed))?;

        let mut sim = Self {
            grid,
            engine,
            probabilities: config.probabilities,
            spawn_radius: config.spawn.radius,
            generation: 0,
            totals: BirthStats::default(),
        };
        seeding::initialize(&mut sim.grid, &sim.probabilities, sim.engine.rng_mut());

        info!(
            width = sim.grid.width(),
            height = sim.grid.height(),
            species = sim.probabilities.species_count(),
            seed = config.seed,
            "Simulation created"
        );

        Ok(sim)
    }

    /// Wrap an already populated grid. The grid is not reseeded.
    pub fn from_grid(grid: Grid, probabilities: ProbabilityTable, seed: u64) -> Result<Self> {
        let engine = TransitionEngine::new(probabilities.species_count(), seeded(seed))?;
        Ok(Self {
            grid,
            engine,
            probabilities,
            spawn_radius: SpawnConfig::default().radius,
            generation: 0,
            totals: BirthStats::default(),
        })
    }

    /// Compute one generation and promote it to current.
    pub fn advance(&mut self) -> BirthStats {
        let stats = self.engine.step(&mut self.grid);
        self.grid.swap();
        self.generation += 1;
        self.totals += stats;
        stats
    }

    /// Advance `generations` times, returning the summed stats.
    #[instrument(skip(self), fields(start = self.generation))]
    pub fn run(&mut self, generations: u64) -> BirthStats {
        let mut stats = BirthStats::default();
        for _ in 0..generations {
            stats += self.advance();

            if self.generation % 1000 == 0 {
                info!(
                    "Generation {}: {} cells alive",
                    self.generation,
                    self.census().alive()
                );
            }
        }
        stats
    }

    /// Reseed a disc of the configured spawn radius around a point.
    pub fn spawn_at(&mut self, x: i32, y: i32) -> usize {
        self.spawn_with_radius(x, y, self.spawn_radius)
    }

    pub fn spawn_with_radius(&mut self, x: i32, y: i32, radius: i32) -> usize {
        seeding::seed_region(
            &mut self.grid,
            x,
            y,
            radius,
            &self.probabilities,
            self.engine.rng_mut(),
        )
    }

    /// Repopulate the whole grid and restart the generation counter.
    pub fn reset(&mut self) {
        seeding::initialize(&mut self.grid, &self.probabilities, self.engine.rng_mut());
        self.generation = 0;
        self.totals = BirthStats::default();
        debug!("Simulation reset");
    }

    pub fn read_cell(&self, x: i32, y: i32) -> CellState {
        self.grid.get(x, y)
    }

    pub fn cells(&self) -> &[CellState] {
        self.grid.cells()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn spawn_radius(&self) -> i32 {
        self.spawn_radius
    }

    /// Change the radius used by [`Simulation::spawn_at`]. Negative radii are rejected.
    pub fn set_spawn_radius(&mut self, radius: i32) -> Result<()> {
        SpawnConfig { radius }.validate()?;
        self.spawn_radius = radius;
        Ok(())
    }

    pub fn probabilities(&self) -> &ProbabilityTable {
        &self.probabilities
    }

    /// Interaction totals since creation or the last reset
    pub fn totals(&self) -> BirthStats {
        self.totals
    }

    pub fn census(&self) -> Census {
        Census::from_cells(
            self.generation,
            self.grid.cells(),
            self.probabilities.species_count(),
        )
    }

    /// Log a population snapshot
    pub fn emit_census(&self) -> Census {
        let census = self.census();

        info!(
            event = "population_census",
            generation = census.generation,
            alive = census.alive(),
            dead = census.dead,
            species = ?census.species,
            dominant = ?census.dominant(),
            births_total = self.totals.births,
            contested_total = self.totals.contested,
            retaliations_total = self.totals.retaliations,
            victims_total = self.totals.victims,
            "Population census snapshot"
        );

        for (idx, &count) in census.species.iter().enumerate() {
            event!(
                Level::INFO,
                gauge_name = "species_population",
                species = %CellState::species(idx),
                gauge_value = count,
                generation = census.generation,
                "Species population gauge"
            );
        }

        census
    }
}
