//! Kingdom
//!
//! Runs one kingdom session from the command line.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use kingdom_cli::{resolve_config, run_session, EventLogger, SessionError, SessionOptions};
use kingdom_core::{DataFiles, EconomyMode, Game};

/// Command line arguments for a session
#[derive(Parser, Debug)]
#[command(name = "kingdom")]
#[command(about = "A tick-based kingdom building simulation")]
struct Args {
    /// Configuration file (kingdom.toml when present, otherwise built-in defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the resource and creatable data files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 10)]
    ticks: u64,

    /// Seed for map generation and inventory fill
    #[arg(long)]
    seed: Option<u64>,

    /// Economy mode: advisory or consume
    #[arg(long)]
    mode: Option<EconomyMode>,

    /// Start with a random stock of every resource
    #[arg(long)]
    fill: bool,

    /// Draw the world map at the end of the session
    #[arg(long)]
    map: bool,

    /// Append every event to this JSONL file
    #[arg(long)]
    event_log: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), SessionError> {
    let mut config = resolve_config(args.config.as_deref())?;
    if let Some(dir) = args.data_dir {
        config.data.dir = dir;
    }
    if let Some(seed) = args.seed {
        config.map.seed = seed;
    }
    if let Some(mode) = args.mode {
        config.economy.mode = mode;
    }

    let data = DataFiles::from_config(&config);
    let options = SessionOptions {
        ticks: args.ticks,
        fill: args.fill,
        fill_seed: config.map.seed,
        show_map: args.map,
    };
    let mut logger = match args.event_log {
        Some(path) => EventLogger::new(path)?,
        None => EventLogger::null(),
    };

    tracing::info!(
        "Starting '{}' ({:?} economy, {} ticks)",
        config.game.name,
        config.economy.mode,
        options.ticks
    );
    let mut game = Game::from_config(config);
    let stdout = std::io::stdout();
    run_session(&mut game, &data, &options, &mut logger, &mut stdout.lock())?;
    tracing::info!("Session finished with {} events", logger.event_count());
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kingdom=info")),
        )
        .init();

    if let Err(e) = run(Args::parse()) {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
