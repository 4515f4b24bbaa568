use voice_note_core::{RecordMode, RecordState, StateSnapshot};

/// Coarse recording indicator shown next to the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    /// Ready to record in the given mode.
    Idle(RecordMode),
    /// Holding to record.
    Recording,
    /// Recording hands-free.
    Locked,
    /// Finalizing or sending the clip.
    Processing,
}

impl From<&StateSnapshot> for IndicatorState {
    fn from(snapshot: &StateSnapshot) -> Self {
        match snapshot.state {
            RecordState::Idle | RecordState::Canceled => IndicatorState::Idle(snapshot.mode),
            RecordState::Entering
            | RecordState::Recording
            | RecordState::LockPending
            | RecordState::CancelingByGesture => IndicatorState::Recording,
            RecordState::Locked => IndicatorState::Locked,
            RecordState::CancelingByTime | RecordState::Preparing | RecordState::Sending => {
                IndicatorState::Processing
            }
        }
    }
}
