#![allow(clippy::unwrap_used)]

use crate::{
    CaptureBackend, OutcomeSink, PointerPhase, PointerSample, RecordController, RecordMode,
    RecordPolicy, RecordingOutcome, SessionId, StartAck, StateObserver, StateSnapshot, StopAck,
    ArtifactRef,
};

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

/// Where the record button is pressed.
pub(crate) const PRESS_X: f32 = 300.0;
pub(crate) const PRESS_Y: f32 = 600.0;
/// First sample past the touch slop; drag distances are measured from here.
pub(crate) const ORIGIN_X: f32 = 300.0;
pub(crate) const ORIGIN_Y: f32 = 590.0;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BackendCall {
    Start { session_id: SessionId, mode: RecordMode },
    Stop { session_id: SessionId, discard: bool },
}

#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    pub(crate) calls: Arc<Mutex<Vec<BackendCall>>>,
    pub(crate) deny: Option<String>,
}

impl CaptureBackend for FakeBackend {
    fn check_preconditions(&mut self, _mode: RecordMode) -> Result<(), String> {
        match &self.deny {
            Some(reason) => Err(reason.clone()),
            None => Ok(()),
        }
    }

    fn start_capture(&mut self, session_id: SessionId, mode: RecordMode) {
        self.calls
            .lock()
            .unwrap()
            .push(BackendCall::Start { session_id, mode });
    }

    fn stop_capture(&mut self, session_id: SessionId, discard: bool) {
        self.calls
            .lock()
            .unwrap()
            .push(BackendCall::Stop { session_id, discard });
    }
}

#[derive(Debug, Default)]
pub(crate) struct CollectingSink {
    pub(crate) outcomes: Arc<Mutex<Vec<RecordingOutcome>>>,
}

impl OutcomeSink for CollectingSink {
    fn on_recording_outcome(&mut self, outcome: RecordingOutcome) {
        self.outcomes.lock().unwrap().push(outcome);
    }
}

pub(crate) struct SnapshotLog(pub(crate) Arc<Mutex<Vec<StateSnapshot>>>);

impl StateObserver for SnapshotLog {
    fn on_state_changed(&mut self, snapshot: &StateSnapshot) {
        self.0.lock().unwrap().push(snapshot.clone());
    }
}

/// Controller wired to fakes, with a fixed time base.
pub(crate) struct Harness {
    pub(crate) controller: RecordController<FakeBackend, CollectingSink>,
    calls: Arc<Mutex<Vec<BackendCall>>>,
    outcomes: Arc<Mutex<Vec<RecordingOutcome>>>,
    snapshots: Arc<Mutex<Vec<StateSnapshot>>>,
    t0: Instant,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self::build(RecordPolicy::default(), None)
    }

    pub(crate) fn denying(reason: &str) -> Self {
        Self::build(RecordPolicy::default(), Some(reason.to_string()))
    }

    fn build(policy: RecordPolicy, deny: Option<String>) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let snapshots = Arc::new(Mutex::new(Vec::new()));

        let backend = FakeBackend {
            calls: Arc::clone(&calls),
            deny,
        };
        let sink = CollectingSink {
            outcomes: Arc::clone(&outcomes),
        };

        let mut controller = RecordController::new(policy, backend, sink).unwrap();
        controller.subscribe(Box::new(SnapshotLog(Arc::clone(&snapshots))));

        Self {
            controller,
            calls,
            outcomes,
            snapshots,
            t0: Instant::now(),
        }
    }

    pub(crate) fn at(&self, ms: u64) -> Instant {
        self.t0 + Duration::from_millis(ms)
    }

    pub(crate) fn press(&mut self, ms: u64) -> SessionId {
        let sample = PointerSample::new(PointerPhase::Down, PRESS_X, PRESS_Y, self.at(ms));
        self.controller.press(sample).unwrap()
    }

    pub(crate) fn start_ack(&mut self, session_id: SessionId, ms: u64) {
        let now = self.at(ms);
        self.controller
            .on_capture_started(session_id, StartAck::Started, now)
            .unwrap();
    }

    /// Press and have the backend confirm immediately after.
    pub(crate) fn recording(&mut self) -> SessionId {
        let session_id = self.press(0);
        self.start_ack(session_id, 20);
        session_id
    }

    /// Move just past the touch slop so that later drags measure from the origin.
    pub(crate) fn arm_slop(&mut self, ms: u64) {
        let sample = PointerSample::new(PointerPhase::Move, ORIGIN_X, ORIGIN_Y, self.at(ms));
        self.controller.pointer(sample);
    }

    /// Move to `left` units left of and `up` units above the origin.
    pub(crate) fn drag_to(&mut self, left: f32, up: f32, ms: u64) {
        self.pointer(PointerPhase::Move, left, up, ms);
    }

    pub(crate) fn release_at(&mut self, left: f32, up: f32, ms: u64) {
        self.pointer(PointerPhase::Up, left, up, ms);
    }

    pub(crate) fn pointer(&mut self, phase: PointerPhase, left: f32, up: f32, ms: u64) {
        let sample = PointerSample::new(phase, ORIGIN_X - left, ORIGIN_Y - up, self.at(ms));
        self.controller.pointer(sample);
    }

    pub(crate) fn finalize_ack(&mut self, session_id: SessionId, ms: u64) {
        let now = self.at(ms);
        let artifact = ArtifactRef {
            locator: format!("memory://{session_id}"),
            duration: None,
        };
        self.controller
            .on_capture_stopped(session_id, StopAck::Finalized { artifact }, now)
            .unwrap();
    }

    pub(crate) fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn outcomes(&self) -> Vec<RecordingOutcome> {
        self.outcomes.lock().unwrap().clone()
    }

    pub(crate) fn snapshots(&self) -> Vec<StateSnapshot> {
        self.snapshots.lock().unwrap().clone()
    }
}
