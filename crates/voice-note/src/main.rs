//! Voice-note: hold-to-record voice and video messages, driven by scripted
//! gestures against a simulated capture device.

mod app;
mod app_command;
mod cli;
mod config;
mod error;
mod indicator_state;
mod output_handler;
mod scenario;
mod simulated_backend;
mod state_publisher;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    cli::Cli,
    error::{AppError, Result as AppResult},
    indicator_state::IndicatorState,
    output_handler::OutputHandler,
    scenario::{Scenario, run_scenario},
    simulated_backend::SimulatedBackend,
    state_publisher::StatePublisher,
};

use crate::config::Config;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "voice_note=debug,voice_note_core=debug";

/// Application entry point.
fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if cli.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let code = rt.block_on(async {
        match run_scenario(&config, cli.scenario).await {
            Ok(report) => {
                info!(
                    scenario = ?report.scenario,
                    state = ?report.final_snapshot.state,
                    indicator = ?report.final_indicator,
                    "Done"
                );
                0
            }
            Err(e) => {
                error!(error = ?e, "Scenario failed");
                1
            }
        }
    });

    std::process::exit(code);
}
