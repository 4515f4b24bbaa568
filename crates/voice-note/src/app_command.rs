use voice_note_core::{PointerSample, SessionId, StartAck, StopAck};

/// Inputs for the controller task, from the UI side and from the capture
/// backend.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Pointer-down on the record button.
    Press {
        /// The down sample.
        sample: PointerSample,
    },
    /// Any later pointer sample.
    Pointer {
        /// The sample.
        sample: PointerSample,
    },
    /// Send button shown while locked.
    Stop,
    /// Trash button.
    Discard,
    /// App backgrounded or composer closed.
    Cancel,
    /// Voice/video switch next to the record button.
    ToggleMode,
    /// Backend answered a start request.
    CaptureStarted {
        /// Session the request was made for.
        session_id: SessionId,
        /// Outcome of the request.
        ack: StartAck,
    },
    /// Backend answered a stop request.
    CaptureStopped {
        /// Session the request was made for.
        session_id: SessionId,
        /// Outcome of the request.
        ack: StopAck,
    },
    /// Backend level meter report.
    Amplitude {
        /// Session being captured.
        session_id: SessionId,
        /// Normalised level.
        level: f32,
    },
    /// Backend hit its own recording limit.
    DurationCutoff {
        /// Session being captured.
        session_id: SessionId,
    },
    /// Request application shutdown.
    Shutdown,
}
