use std::{
    fmt,
    time::{Duration, Instant},
};

use uuid::Uuid;

/// Tag carried by every backend command and acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What the record control captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordMode {
    /// Voice message.
    #[default]
    Audio,
    /// Round video message.
    Video,
}

impl RecordMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Audio => Self::Video,
            Self::Video => Self::Audio,
        }
    }
}

/// Controller state. See the transition table on
/// [`RecordController`](crate::RecordController).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordState {
    /// No session.
    #[default]
    Idle,
    /// Start requested, waiting for the backend to confirm.
    Entering,
    /// Capturing while the pointer is held.
    Recording,
    /// Vertical drag passed the intent threshold; lock not yet confirmed.
    LockPending,
    /// Hands-free capture; pointer release no longer ends the session.
    Locked,
    /// Slide-to-cancel resolved; discard in flight.
    CancelingByGesture,
    /// Duration ceiling reached; moving straight to finalization.
    CancelingByTime,
    /// Waiting for the backend to finalize the artifact.
    Preparing,
    /// Artifact handed to the send pipeline.
    Sending,
    /// Session dropped.
    Canceled,
}

impl RecordState {
    /// `Sending` or `Canceled`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Sending | Self::Canceled)
    }

    /// States in which capture is running and the clip can still grow.
    pub fn is_capturing(self) -> bool {
        matches!(self, Self::Recording | Self::LockPending | Self::Locked)
    }

    /// States that end when the pointer goes away.
    pub fn follows_pointer(self) -> bool {
        matches!(self, Self::Entering | Self::Recording | Self::LockPending)
    }
}

/// The single in-flight recording attempt.
///
/// Owned and mutated exclusively by the controller; everything outside the
/// crate sees it read-only.
#[derive(Debug, Clone)]
pub struct RecordSession {
    pub(crate) session_id: SessionId,
    pub(crate) mode: RecordMode,
    pub(crate) state: RecordState,
    pub(crate) start_time: Option<Instant>,
    pub(crate) elapsed: Duration,
    pub(crate) slide_to_cancel_progress: f32,
    pub(crate) lock_progress: f32,
    pub(crate) lock_confirm_progress: f32,
    pub(crate) is_locked: bool,
    pub(crate) amplitude: f32,
    pub(crate) cancel_requested: bool,
    /// `start_capture` issued and not yet acknowledged.
    pub(crate) awaiting_start: bool,
    /// `stop_capture(discard = false)` issued and not yet acknowledged.
    pub(crate) awaiting_finalize: bool,
}

impl RecordSession {
    pub(crate) fn new(session_id: SessionId, mode: RecordMode) -> Self {
        Self {
            session_id,
            mode,
            state: RecordState::Entering,
            start_time: None,
            elapsed: Duration::ZERO,
            slide_to_cancel_progress: 1.0,
            lock_progress: 0.0,
            lock_confirm_progress: 0.0,
            is_locked: false,
            amplitude: 0.0,
            cancel_requested: false,
            awaiting_start: true,
            awaiting_finalize: false,
        }
    }

    /// Session tag.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Capture mode chosen at press time.
    pub fn mode(&self) -> RecordMode {
        self.mode
    }

    /// Current state.
    pub fn state(&self) -> RecordState {
        self.state
    }

    /// When capture was confirmed started.
    pub fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    /// Recording time as of the last timer poll.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// 1 = no cancel intent, 0 = fully slid to cancel.
    pub fn slide_to_cancel_progress(&self) -> f32 {
        self.slide_to_cancel_progress
    }

    /// Vertical travel toward the lock intent threshold, in [0, 1].
    pub fn lock_progress(&self) -> f32 {
        self.lock_progress
    }

    /// Travel from the intent point toward the confirm threshold, in [0, 1].
    pub fn lock_confirm_progress(&self) -> f32 {
        self.lock_confirm_progress
    }

    /// Hands-free mode.
    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    /// Last smoothed amplitude.
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Whether a cancel has been accepted for this session.
    pub fn cancel_requested(&self) -> bool {
        self.cancel_requested
    }

    /// Whether the backend still owes this session an acknowledgement.
    pub fn has_pending_callback(&self) -> bool {
        self.awaiting_start || self.awaiting_finalize
    }
}
