//! Vibe AI backend server

use clap::Parser;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;

use cli::*;
use config::VibeConfig;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // Initialize logging; RUST_LOG takes precedence over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(args.verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load configuration
    let config = match VibeConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    let result = match args.command {
        Commands::Serve(serve_args) => {
            let config = config.with_overrides(&serve_args);
            info!("Starting vibed on {}", config.server.bind_address);
            commands::serve::handle_serve_command(config).await
        }
        Commands::Health(health_args) => {
            let endpoint = health_args
                .endpoint
                .unwrap_or_else(|| config.local_endpoint());
            commands::health::handle_health_command(&endpoint).await
        }
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

/// Filter directive for the number of `-v` flags
fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
