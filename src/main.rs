use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::GameConfig;
use grid_snake::modes::{
    Controller, GreedyController, RandomController, RolloutConfig, RolloutMode, TracingObserver,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Drive the Snake RL environment with a built-in controller")]
struct Cli {
    /// Controller choosing the actions
    #[arg(long, default_value = "greedy")]
    controller: ControllerKind,

    /// JSON file with the environment configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the grid (overrides the config file)
    #[arg(long)]
    grid_size: Option<usize>,

    /// Ticks per second when pacing (overrides the config file)
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Number of episodes to run
    #[arg(long, default_value = "10")]
    episodes: usize,

    /// Truncate episodes after this many steps
    #[arg(long)]
    max_steps: Option<usize>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Space ticks at the configured tick rate instead of running flat out
    #[arg(long)]
    paced: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, ValueEnum)]
enum ControllerKind {
    /// Uniformly random actions
    Random,
    /// Move towards the food, avoiding immediate danger
    Greedy,
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn game_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(grid_size) = cli.grid_size {
        config.grid_size = grid_size;
    }
    if let Some(tick_rate) = cli.tick_rate {
        config.tick_rate = tick_rate;
    }

    config.validate().context("Invalid command line configuration")?;
    Ok(config)
}

async fn run<C: Controller>(
    config: GameConfig,
    rollout: RolloutConfig,
    controller: C,
    paced: bool,
) -> Result<()> {
    let mut mode = RolloutMode::new(config, rollout, controller)?;
    mode.add_observer(Box::new(TracingObserver));

    if paced {
        mode.run_paced().await?;
    } else {
        mode.run()?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = game_config(&cli)?;
    let rollout = RolloutConfig {
        episodes: cli.episodes,
        max_steps: cli.max_steps,
        seed: cli.seed,
        ..Default::default()
    };

    // Dispatch to the selected controller
    match cli.controller {
        ControllerKind::Random => {
            let seed = cli.seed.unwrap_or_else(rand::random);
            run(config, rollout, RandomController::new(seed), cli.paced).await
        }
        ControllerKind::Greedy => run(config, rollout, GreedyController, cli.paced).await,
    }
}
