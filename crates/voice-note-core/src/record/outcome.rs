use crate::{RecordMode, SessionId};

use std::{fmt, time::Duration};

/// Why a session ended without sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Capture preconditions failed on press.
    PermissionDenied,
    /// The backend could not start capture.
    StartFailed,
    /// The backend could not produce an artifact.
    FinalizeFailed,
    /// The clip was below the backend's minimum viable duration.
    TooShort,
    /// Released (or fully slid) past the slide-to-cancel threshold.
    GestureCancel,
    /// The platform cancelled the pointer stream.
    PointerCanceled,
    /// The trash affordance was used.
    UserDiscarded,
    /// Cancelled from outside (app backgrounded, dialog closed).
    External,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PermissionDenied => "permission denied",
            Self::StartFailed => "capture failed to start",
            Self::FinalizeFailed => "capture failed to finalize",
            Self::TooShort => "recording too short",
            Self::GestureCancel => "slide to cancel",
            Self::PointerCanceled => "pointer cancelled",
            Self::UserDiscarded => "discarded",
            Self::External => "cancelled externally",
        };
        f.write_str(label)
    }
}

/// Reference to a finalized artifact owned by the capture backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    /// Backend-defined locator (path, content URI, upload handle).
    pub locator: String,
    /// Duration the backend measured, if it reports one.
    pub duration: Option<Duration>,
}

/// Backend acknowledgement of `start_capture`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartAck {
    /// Capture is running.
    Started,
    /// Hardware or permission error.
    Failed {
        /// Backend error description.
        reason: String,
    },
}

/// Backend acknowledgement of `stop_capture`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopAck {
    /// Artifact produced.
    Finalized {
        /// The produced artifact.
        artifact: ArtifactRef,
    },
    /// Capture dropped, as requested by `discard = true`.
    Discarded,
    /// Clip below minimum viable duration.
    TooShort,
    /// Finalization failed.
    Failed {
        /// Backend error description.
        reason: String,
    },
}

/// Terminal outcome reported once per session to the send pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingOutcome {
    /// Enqueue the artifact as an outgoing message.
    Sent {
        /// Session that produced it.
        session_id: SessionId,
        /// Audio or video.
        mode: RecordMode,
        /// Artifact to send.
        artifact: ArtifactRef,
        /// Recording time measured by the controller.
        duration: Duration,
        /// 5-bit amplitude summary for the message bubble.
        waveform: Vec<u8>,
    },
    /// Nothing is sent.
    Canceled {
        /// Session that ended.
        session_id: SessionId,
        /// Audio or video.
        mode: RecordMode,
        /// Why.
        reason: CancelReason,
    },
}

impl RecordingOutcome {
    /// Session the outcome belongs to.
    pub fn session_id(&self) -> SessionId {
        match self {
            Self::Sent { session_id, .. } | Self::Canceled { session_id, .. } => *session_id,
        }
    }
}
