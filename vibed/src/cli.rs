//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vibed")]
#[command(about = "Vibe AI backend server")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Check the health of a running server
    Health(HealthArgs),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind, overriding the configuration
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,

    /// OpenAI model, overriding the configuration
    #[arg(short, long)]
    pub model: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct HealthArgs {
    /// Base URL of the server (defaults to the configured bind address)
    #[arg(short, long)]
    pub endpoint: Option<String>,
}
