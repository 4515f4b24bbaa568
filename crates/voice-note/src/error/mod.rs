use voice_note_core::RecordError;

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the voice-note binary.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum AppError {
    /// Controller error from voice-note-core.
    #[error("Record error: {source} {location}")]
    Record {
        /// The underlying controller error.
        #[source]
        source: RecordError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Failed to send message through async channel.
    #[error("Channel send failed: {message} {location}")]
    ChannelSendFailed {
        /// Human-readable error message.
        message: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// A scenario did not resolve its session in time.
    #[error("Scenario did not finish: {reason} {location}")]
    ScenarioIncomplete {
        /// What the scenario was waiting for.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configuration loading or saving error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from filesystem operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

impl AppError {
    /// Whether this wraps a callback for a session that is no longer active.
    pub fn is_stale_callback(&self) -> bool {
        matches!(
            self,
            AppError::Record {
                source: RecordError::StaleCallback { .. },
                ..
            }
        )
    }
}

// Manual From<RecordError> with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<RecordError> for AppError {
    #[track_caller]
    fn from(source: RecordError) -> Self {
        AppError::Record {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        AppError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convenience type alias for Results using `AppError`.
pub type Result<T> = StdResult<T, AppError>;
