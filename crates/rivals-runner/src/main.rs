//! Headless frame loop driving a Rivals simulation.

mod frame;
mod telemetry;

use anyhow::{Context, Result};
use rivals_core::{RunnerConfig, SimulationConfig};
use rivals_world::{seeded, Simulation};
use std::str::FromStr;
use tokio::signal;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    // Load configuration
    let mut sim_config = SimulationConfig::default();
    let mut runner_config = RunnerConfig::default();
    apply_env_overrides(&mut sim_config, &mut runner_config)?;

    info!("Starting Rivals runner");
    info!(
        "Grid {}x{}, {} species, seed {}",
        sim_config.grid.width,
        sim_config.grid.height,
        sim_config.species_count(),
        sim_config.seed
    );

    let seed = sim_config.seed;
    let mut sim = Simulation::new(sim_config)?;

    tokio::select! {
        result = run_frame_loop(&mut sim, &runner_config, seed) => {
            result?;
        }
        _ = shutdown_signal() => {}
    }

    let census = sim.emit_census();
    info!(
        event = "run_summary",
        generations = sim.generation(),
        alive = census.alive(),
        dominant = ?census.dominant(),
        "Run complete"
    );

    Ok(())
}

/// Step the simulation once per tick until the generation cap or extinction.
async fn run_frame_loop(sim: &mut Simulation, config: &RunnerConfig, seed: u64) -> Result<()> {
    let mut ticker = interval(Duration::from_millis(config.tick_interval_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // Separate stream for simulated clicks so spawning does not perturb retaliation draws
    let mut clicks = seeded(seed.wrapping_add(1));

    loop {
        ticker.tick().await;

        if let Some(max) = config.max_generations {
            if sim.generation() >= max {
                info!("Reached generation cap {}", max);
                return Ok(());
            }
        }

        let stats = sim.advance();
        let generation = sim.generation();
        debug!(
            generation,
            births = stats.births,
            retaliations = stats.retaliations,
            "Generation advanced"
        );

        if let Some(every) = config.spawn_interval {
            if every > 0 && generation % every == 0 {
                let grid = sim.grid();
                let (x, y) = frame::spawn_point(&mut clicks, grid.width(), grid.height());
                let seeded_cells = sim.spawn_at(x, y);
                debug!(x, y, seeded_cells, "Spawned region");
            }
        }

        if config.census_interval > 0 && generation % config.census_interval == 0 {
            let census = sim.emit_census();
            if config.render_ascii {
                println!("{}", frame::render_ascii(sim.grid()));
            }
            if census.is_extinct() {
                warn!(generation, "All species extinct");
                return Ok(());
            }
        }
    }
}

fn apply_env_overrides(sim: &mut SimulationConfig, runner: &mut RunnerConfig) -> Result<()> {
    if let Some(seed) = env_value::<u64>("RIVALS_SEED")? {
        sim.seed = seed;
    }
    if let Some(generations) = env_value::<u64>("RIVALS_GENERATIONS")? {
        runner.max_generations = Some(generations);
    }
    if let Some(tick_ms) = env_value::<u64>("RIVALS_TICK_MS")? {
        runner.tick_interval_ms = tick_ms;
    }
    if let Some(ascii) = env_value::<bool>("RIVALS_ASCII")? {
        runner.render_ascii = ascii;
    }
    sim.validate()?;
    Ok(())
}

fn env_value<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        Err(_) => Ok(None),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
