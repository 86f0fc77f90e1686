use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Classic snake on a bounded grid")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Cells of growth per fruit eaten
    #[arg(long)]
    growth_rate: Option<u32>,

    /// Fruits on the board when a game starts
    #[arg(long)]
    fruits: Option<usize>,

    /// Game loop period in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for fruit placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(growth_rate) = self.growth_rate {
            config.growth_rate = growth_rate;
        }
        if let Some(fruits) = self.fruits {
            config.initial_fruits = fruits;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_millis = tick_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

/// The terminal belongs to the TUI, so logs only go to a file when asked for
fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = cli.game_config()?;

    let mut human_mode = HumanMode::new(config, cli.seed)?;
    human_mode.run().await?;

    Ok(())
}
