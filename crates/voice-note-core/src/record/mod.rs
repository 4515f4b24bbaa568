mod controller;
mod lock_transition;
mod outcome;
mod ports;
mod session;

pub use {
    controller::RecordController,
    lock_transition::{LockStep, LockTransition},
    outcome::{ArtifactRef, CancelReason, RecordingOutcome, StartAck, StopAck},
    ports::{CaptureBackend, OutcomeSink, StateObserver, StateSnapshot},
    session::{RecordMode, RecordSession, RecordState, SessionId},
};

#[cfg(test)]
pub(crate) use controller::{QUEUED_STOP_RETENTION, WAVEFORM_BINS};
