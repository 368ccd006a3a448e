#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs headless Snake Battle matches.

mod session;
mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use snake_battle_core::PlayerId;
use tracing::info;

use crate::session::Session;

/// Headless Snake Battle driven by the greedy autopilot.
#[derive(Debug, Parser)]
#[command(name = "snake-battle", version)]
struct Args {
    /// Seed for food, power-up and monster placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum number of ticks a single round may last.
    #[arg(long, default_value_t = 5_000)]
    ticks: u64,
    /// Number of rounds to play, resetting after each game over.
    #[arg(long, default_value_t = 1)]
    rounds: u32,
    /// TOML file overriding the reference ruleset.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Paces ticks at the configured tick rate instead of running flat out.
    #[arg(long)]
    realtime: bool,
    /// Output format of the log stream.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Compact,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init(),
    }
}

/// Entry point for the Snake Battle command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    let config = settings::load(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, rounds = args.rounds, "starting session");

    let mut session = Session::new(config, seed, args.realtime)?;
    println!("{}", session.welcome_banner());

    for summary in session.play(args.rounds, args.ticks) {
        println!("{summary}");
    }

    let scores = session.scores();
    for player in PlayerId::ALL {
        println!("player {}: {}", player.number(), scores[player.index()]);
    }
    Ok(())
}
