use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::{GameConfig, Simulation};
use grid_snake::modes::HumanMode;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a fixed grid that speeds up as it eats")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Arena side length
    #[arg(long)]
    arena_size: Option<i32>,

    /// Cell side length
    #[arg(long)]
    cell_size: Option<i32>,

    /// Starting tick interval in milliseconds
    #[arg(long)]
    speed: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(arena_size) = self.arena_size {
            config.arena_size = arena_size;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(speed) = self.speed {
            config.initial_interval_ms = speed;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the UI, so logs go to a file
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(level, Config::default(), log_file).context("Failed to initialize logger")?;

    let config = cli.game_config()?;
    info!("Starting grid_snake with {:?}", config);

    match cli.seed {
        Some(seed) => {
            let simulation = Simulation::with_rng(config, StdRng::seed_from_u64(seed))?;
            HumanMode::with_simulation(simulation).run().await?;
        }
        None => {
            HumanMode::new(config)?.run().await?;
        }
    }

    Ok(())
}
