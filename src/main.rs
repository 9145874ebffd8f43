//! MarketLens - terminal analytics dashboard
//!
//! Runs the simulated snapshot feed through the scoring, filter, sort and
//! alert pipeline and prints the dashboard after every command.
//!
//! # Usage
//! ```sh
//! SIMULATION_SEED=7 cargo run -- --paused
//! ```
//! Type `help` at the prompt for the command list.

use anyhow::{Context, Result};
use clap::Parser;
use marketlens::application::commands::{UserCommand, parse_command};
use marketlens::application::system::{Application, SystemHandle};
use marketlens::config::Config;
use marketlens::domain::errors::CommandError;
use marketlens::interfaces::console::{ConsoleRenderer, HELP};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{Level, error, info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal analytics dashboard over a simulated stock feed")]
struct Cli {
    /// Seed every random source for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Start with auto-refresh disabled
    #[arg(long)]
    paused: bool,

    /// Directory for JSON exports
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Disable ANSI colors in the dashboard and logs
    #[arg(long)]
    plain: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(!cli.plain)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("MarketLens {} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(seed) = cli.seed {
        config.simulation_seed = Some(seed);
    }
    if cli.paused {
        config.auto_refresh = false;
    }
    if let Some(dir) = cli.export_dir {
        config.export_dir = dir;
    }
    info!(
        "Configuration loaded: Market={}, Refresh={:?}, Alert threshold={}, Export dir={:?}",
        config.market, config.refresh_interval, config.alert_threshold, config.export_dir
    );

    let app = Application::build(config)?;
    let handle = app.start();
    let renderer = ConsoleRenderer::new(!cli.plain);

    println!("{}", HELP);

    tokio::select! {
        result = command_loop(&handle, renderer) => {
            if let Err(e) = result {
                error!("Command loop failed: {:#}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting...");
        }
    }

    handle.shutdown().await
}

/// Read commands from stdin until `quit` or end of input, re-rendering the
/// dashboard after each one.
async fn command_loop(handle: &SystemHandle, renderer: ConsoleRenderer) -> Result<()> {
    let mut state_rx = handle.state_rx.clone();
    // Wait for the first snapshot before drawing
    state_rx
        .wait_for(|state| state.snapshot_sequence() > 0)
        .await
        .context("Dashboard engine stopped before the first snapshot")?;
    println!("{}", renderer.render(&handle.state()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed == "help" {
            println!("{}", HELP);
            continue;
        }

        match parse_command(trimmed) {
            Ok(UserCommand::Quit) => break,
            Ok(UserCommand::Export) => match handle.export().await {
                Ok(path) => println!("Exported to {}", path.display()),
                Err(e) => println!("Export failed: {:#}", e),
            },
            Ok(command) => {
                let state = handle.apply(command).await?;
                println!("{}", renderer.render(&state));
            }
            Err(CommandError::Empty) => {
                println!("{}", renderer.render(&handle.state()));
            }
            Err(e) => {
                warn!("{}", e);
                println!("{}", HELP);
            }
        }
    }
    Ok(())
}
