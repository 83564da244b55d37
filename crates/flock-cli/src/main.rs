use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use flock_core::{Swarm, SwarmConfig, Vec2};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::fs;
use std::path::PathBuf;

/// Headless flocking simulation driver: run a swarm for a fixed number of
/// ticks and emit a JSON run summary. Logging is controlled via RUST_LOG.
#[derive(Parser, Debug)]
#[command(name = "flock")]
struct Args {
    /// Number of agents to spawn.
    #[arg(long, default_value_t = 150)]
    agents: usize,

    /// Number of predators to spawn at random positions.
    #[arg(long, default_value_t = 0)]
    predators: usize,

    /// Ticks to simulate.
    #[arg(long, default_value_t = 1000)]
    ticks: usize,

    /// Metric sampling cadence, in ticks.
    #[arg(long, default_value_t = 10)]
    sample_every: usize,

    /// Seed for spawn randomness.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value_t = 800.0)]
    arena_width: f64,

    #[arg(long, default_value_t = 600.0)]
    arena_height: f64,

    /// Compute desired headings on a rayon pool.
    #[arg(long)]
    parallel: bool,

    /// Write the run summary to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = SwarmConfig {
        agent_count: args.agents,
        seed: args.seed,
        arena_width: args.arena_width,
        arena_height: args.arena_height,
        parallel: args.parallel,
        ..SwarmConfig::default()
    };
    let mut swarm = Swarm::try_new(config).context("invalid swarm configuration")?;

    // Predator placement draws from its own stream so changing the predator
    // count never disturbs agent spawns.
    let mut rng = ChaCha12Rng::seed_from_u64(args.seed.wrapping_add(1));
    for _ in 0..args.predators {
        let position = Vec2::new(
            rng.random::<f64>() * args.arena_width,
            rng.random::<f64>() * args.arena_height,
        );
        swarm.add_predator(position);
    }

    log::info!(
        "running {} ticks: {} agents, {} predators, {}x{} arena",
        args.ticks,
        args.agents,
        args.predators,
        args.arena_width,
        args.arena_height
    );
    let summary = swarm
        .try_run_experiment(args.ticks, args.sample_every)
        .context("experiment failed")?;
    log::info!(
        "done: {} agents alive, {} eaten",
        summary.final_agent_count,
        summary.total_eaten
    );

    let json = serde_json::to_string_pretty(&summary).context("serializing run summary")?;
    match args.out {
        Some(path) => fs::write(&path, json)
            .with_context(|| format!("writing summary to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
