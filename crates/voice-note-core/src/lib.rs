//! Voice-note Core Library
//!
//! Toolkit-agnostic hold-to-record controller for voice and video messages:
//! press-and-hold to record, slide left to cancel, slide up to lock into
//! hands-free mode. Capture and sending are delegated to traits.
//!
//! # Example
//!
//! ```no_run
//! use voice_note_core::{
//!     CaptureBackend, CoreResult, OutcomeSink, PointerPhase, PointerSample, RecordController,
//!     RecordMode, RecordPolicy, RecordingOutcome, SessionId, StartAck,
//! };
//!
//! use std::time::Instant;
//!
//! struct Mic;
//!
//! impl CaptureBackend for Mic {
//!     fn check_preconditions(&mut self, _mode: RecordMode) -> Result<(), String> {
//!         Ok(())
//!     }
//!     fn start_capture(&mut self, _session_id: SessionId, _mode: RecordMode) {}
//!     fn stop_capture(&mut self, _session_id: SessionId, _discard: bool) {}
//! }
//!
//! struct Outbox;
//!
//! impl OutcomeSink for Outbox {
//!     fn on_recording_outcome(&mut self, outcome: RecordingOutcome) {
//!         println!("{:?}", outcome);
//!     }
//! }
//!
//! fn main() -> CoreResult<()> {
//!     let mut controller = RecordController::new(RecordPolicy::default(), Mic, Outbox)?;
//!
//!     let now = Instant::now();
//!     let session_id = controller.press(PointerSample::new(PointerPhase::Down, 300.0, 600.0, now))?;
//!     controller.on_capture_started(session_id, StartAck::Started, now)?;
//!     controller.pointer(PointerSample::new(PointerPhase::Up, 300.0, 600.0, Instant::now()));
//!     Ok(())
//! }
//! ```

mod amplitude;
mod error;
mod gesture;
mod policy;
mod record;
mod timer;

pub use {
    amplitude::{AmplitudeSink, WAVEFORM_BIN_MAX},
    error::RecordError,
    error::Result as CoreResult,
    gesture::{GestureFacts, GestureTracker, PointerPhase, PointerSample},
    policy::{AmplitudePolicy, GesturePolicy, LockPolicy, RecordPolicy, TimingPolicy},
    record::{
        ArtifactRef, CancelReason, CaptureBackend, LockStep, LockTransition, OutcomeSink,
        RecordController, RecordMode, RecordSession, RecordState, RecordingOutcome, SessionId,
        StartAck, StateObserver, StateSnapshot, StopAck,
    },
    timer::{TimerEvent, TimerService},
};

#[cfg(test)]
mod tests;
