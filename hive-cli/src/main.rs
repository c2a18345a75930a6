//! Hive CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the turn relay
//! - replay: Apply a JSON turn log to a fresh board and print the result
//! - play: Play a seeded random game and write its turn log

mod play;
mod replay;
mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hive")]
#[command(about = "Hive rules engine and turn relay")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the turn relay
    Serve(server::ServerArgs),
    /// Replay a turn log
    Replay(replay::ReplayArgs),
    /// Play a random game
    Play(play::PlayArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args),
        Commands::Replay(args) => replay::run(args),
        Commands::Play(args) => play::run(args),
    }
}
