//! Seams between the controller and the outside world.
//!
//! The controller calls into these synchronously and never waits on them.
//! Anything the backend does asynchronously comes back later through the
//! controller's `on_capture_*` methods, tagged with the session id.

use crate::{RecordMode, RecordState, RecordingOutcome, SessionId};

use std::time::Duration;

/// Microphone/camera capture.
pub trait CaptureBackend {
    /// Permission and device availability for `mode`. `Err` carries a
    /// user-presentable reason.
    fn check_preconditions(&mut self, mode: RecordMode) -> Result<(), String>;

    /// Begin capture. Acknowledged later with
    /// [`on_capture_started`](crate::RecordController::on_capture_started).
    fn start_capture(&mut self, session_id: SessionId, mode: RecordMode);

    /// Stop capture, keeping or dropping what was recorded. Acknowledged later
    /// with [`on_capture_stopped`](crate::RecordController::on_capture_stopped).
    fn stop_capture(&mut self, session_id: SessionId, discard: bool);
}

/// Message send pipeline.
pub trait OutcomeSink {
    /// Called exactly once per session.
    fn on_recording_outcome(&mut self, outcome: RecordingOutcome);
}

/// Advisory view of the controller for feedback rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    /// Active session, `None` when idle.
    pub session_id: Option<SessionId>,
    /// Mode of the active session, or the control's mode when idle.
    pub mode: RecordMode,
    /// Controller state.
    pub state: RecordState,
    /// 1 = no cancel intent, 0 = fully slid to cancel.
    pub slide_to_cancel_progress: f32,
    /// Travel toward the lock intent threshold.
    pub lock_progress: f32,
    /// Travel toward lock confirmation once the lock sequence started.
    pub lock_confirm_progress: f32,
    /// Hands-free mode.
    pub is_locked: bool,
    /// Recording time.
    pub elapsed: Duration,
    /// Smoothed amplitude.
    pub amplitude: f32,
}

/// UI subscriber. The controller does not depend on observers for
/// correctness; they only mirror state.
pub trait StateObserver {
    /// Called after every transition and progress change.
    fn on_state_changed(&mut self, snapshot: &StateSnapshot);
}
