//! Hexfront - Headless Match Runner
//!
//! Runs an all-AI match and prints a summary or the full JSON output.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use hexfront::core::config::{load_config, GameConfig};
use hexfront::core::error::Result;
use hexfront::game::run_match;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Headless Match Runner - AI vs AI on a generated hex map
#[derive(Parser, Debug)]
#[command(name = "hexfront")]
#[command(about = "Run an all-AI hex strategy match and report the result")]
struct Args {
    /// Configuration file (TOML); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Map seed, overrides the config
    #[arg(long)]
    seed: Option<u64>,

    /// Map radius in hexes, overrides the config
    #[arg(long)]
    radius: Option<u32>,

    /// Turn limit, overrides the config
    #[arg(long)]
    turns: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log every unit decision
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "hexfront=debug" } else { "hexfront=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.map.seed = seed;
    }
    if let Some(radius) = args.radius {
        config.map.radius = radius;
    }
    if let Some(turns) = args.turns {
        config.match_rules.max_turns = turns;
    }

    let output = run_match(&config)?;

    match args.format {
        OutputFormat::Json => println!("{}", output.to_json()?),
        OutputFormat::Text => println!("{}", output.summary()),
    }
    Ok(())
}
