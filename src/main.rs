use anyhow::{Context, Result};
use clap::Parser;
use robo_snake::audio::{Silent, TerminalBell};
use robo_snake::game::{GameConfig, HighScoreStore, Sound};
use robo_snake::modes::{HumanMode, SessionOptions};
use robo_snake::store::JsonHighScoreStore;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "robo_snake")]
#[command(version, about = "Snake game with an autonomous robot snake")]
struct Cli {
    /// JSON file with game settings; command line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Size the grid to the terminal and follow resizes
    #[arg(long)]
    fit: bool,

    /// Starting speed in ticks per second
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for goal placement and robot steering
    #[arg(long)]
    seed: Option<u64>,

    /// Where the high score is kept
    #[arg(long, default_value = "robo_snake_high_score.json")]
    high_score_file: PathBuf,

    /// Disable the terminal bell
    #[arg(long)]
    no_sound: bool,

    /// Use tap wording in on-screen messages and treat mouse clicks as taps
    #[arg(long)]
    touch: bool,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("robo_snake=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    if let Some(fps) = cli.fps {
        config.default_fps = fps;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config.validate().context("Invalid game configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Create game configuration from the config file and CLI arguments
    let config = build_config(&cli)?;
    tracing::info!(?config, "starting robo_snake");

    let store = JsonHighScoreStore::new(&cli.high_score_file);
    tracing::debug!(path = %store.path().display(), "high score file");
    let store: Box<dyn HighScoreStore> = Box::new(store);
    let sound: Box<dyn Sound> = if cli.no_sound {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::new())
    };
    let options = SessionOptions {
        fit_terminal: cli.fit,
        touch: cli.touch,
    };

    let mut human_mode = HumanMode::new(config, store, sound, options);
    human_mode.run().await?;

    Ok(())
}
