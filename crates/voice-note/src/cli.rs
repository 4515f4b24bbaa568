use crate::Scenario;

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "voice-note")]
#[command(about = "Hold-to-record voice and video message controller")]
#[command(
    long_about = "Drives the hold-to-record controller through a scripted gesture against a simulated capture device and logs every transition and the final outcome"
)]
pub struct Cli {
    /// Gesture to play.
    #[arg(value_enum, default_value_t = Scenario::Tap)]
    pub scenario: Scenario,

    /// Config file (defaults to the platform config directory).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub json: bool,
}
