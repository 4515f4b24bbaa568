use crate::{RecordMode, RecordState, SessionId};

use error_location::ErrorLocation;
use thiserror::Error;

/// Record controller errors with source location tracking.
#[derive(Error, Debug)]
pub enum RecordError {
    /// Capture preconditions (permission, device availability) failed on press.
    #[error("Capture not permitted for {mode:?}: {reason} {location}")]
    PermissionDenied {
        /// Mode the press asked for.
        mode: RecordMode,
        /// Reason reported by the capture backend.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A press arrived while another session is still active.
    #[error("Session {session_id} is still active in state {state:?} {location}")]
    SessionActive {
        /// The session that is still active.
        session_id: SessionId,
        /// Its current state.
        state: RecordState,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// An operation that requires a session was called while idle.
    #[error("No active recording session {location}")]
    NoActiveSession {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The operation is not valid in the current state.
    #[error("Cannot {operation} while {state:?} {location}")]
    InvalidTransition {
        /// Name of the rejected operation.
        operation: &'static str,
        /// State the controller was in.
        state: RecordState,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A backend callback carried a session id that is no longer active.
    #[error("Stale callback for session {session_id} {location}")]
    StaleCallback {
        /// Session id the callback was tagged with.
        session_id: SessionId,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Policy values are inconsistent.
    #[error("Invalid record policy: {reason} {location}")]
    InvalidPolicy {
        /// Which constraint failed.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`RecordError`].
pub type Result<T> = std::result::Result<T, RecordError>;
