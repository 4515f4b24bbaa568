use crate::{
    AmplitudeSink, CoreResult, RecordError, RecordPolicy,
    gesture::{GestureFacts, GestureTracker, PointerPhase, PointerSample},
    record::{
        ArtifactRef, CancelReason, CaptureBackend, LockStep, LockTransition, OutcomeSink,
        RecordMode, RecordSession, RecordState, RecordingOutcome, SessionId, StartAck,
        StateObserver, StateSnapshot, StopAck,
    },
    timer::{TimerEvent, TimerService},
};

use std::{
    collections::HashMap,
    panic::Location,
    time::{Duration, Instant},
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Bins in the waveform attached to a sent clip.
pub(crate) const WAVEFORM_BINS: usize = 100;

/// How long a discard waits for its session's start acknowledgement.
pub(crate) const QUEUED_STOP_RETENTION: Duration = Duration::from_secs(30);

/// Hold-to-record state machine.
///
/// Consumes pointer samples, timer polls and backend acknowledgements, and
/// resolves every session into exactly one [`RecordingOutcome`].
///
/// # Transitions
///
/// | from | event | to |
/// |---|---|---|
/// | Idle | press, preconditions ok | Entering |
/// | Entering | start ack ok / failed | Recording / Canceled |
/// | Recording | lock intent crossed | LockPending |
/// | LockPending | confirm crossed / fell back | Locked / Recording |
/// | Recording, LockPending | release below cancel threshold, or full slide | CancelingByGesture → Canceled |
/// | Recording, LockPending | release | Preparing |
/// | Locked | explicit stop | Preparing |
/// | Recording, LockPending, Locked | duration cutoff | CancelingByTime → Preparing |
/// | Preparing | finalized / failed, too short | Sending / Canceled |
/// | any active | pointer cancel (unless locked), discard, external cancel | Canceled |
/// | Sending, Canceled | outcome dispatched | Idle |
///
/// # Threading
///
/// Single owner, single thread. Backend work is fire-and-forget; its
/// acknowledgements must be posted back and fed in through `on_capture_*`.
/// A stop issued before the start acknowledgement is queued by session id
/// and replayed when that acknowledgement arrives. Backends are expected to
/// acknowledge every start; a queued discard whose acknowledgement has not
/// arrived within 30 seconds is dropped on the next press.
pub struct RecordController<B, S> {
    policy: RecordPolicy,
    backend: B,
    sink: S,
    observers: Vec<Box<dyn StateObserver + Send>>,
    tracker: GestureTracker,
    timer: TimerService,
    amplitude: AmplitudeSink,
    lock: Option<LockTransition>,
    session: Option<RecordSession>,
    mode: RecordMode,
    /// Sessions resolved before their start ack, mapped to when the discard
    /// was queued.
    queued_stops: HashMap<SessionId, Instant>,
}

impl<B: CaptureBackend, S: OutcomeSink> RecordController<B, S> {
    /// Create an idle controller in audio mode.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidPolicy`] if thresholds are inconsistent.
    #[track_caller]
    pub fn new(policy: RecordPolicy, backend: B, sink: S) -> CoreResult<Self> {
        policy.validate()?;

        let tracker = GestureTracker::new(&policy.gesture);
        let timer = TimerService::new(policy.timing.tick_interval);
        let amplitude = AmplitudeSink::new(policy.amplitude.clone());

        Ok(Self {
            policy,
            backend,
            sink,
            observers: Vec::new(),
            tracker,
            timer,
            amplitude,
            lock: None,
            session: None,
            mode: RecordMode::Audio,
            queued_stops: HashMap::new(),
        })
    }

    /// Attach a feedback observer.
    pub fn subscribe(&mut self, observer: Box<dyn StateObserver + Send>) {
        self.observers.push(observer);
    }

    /// Active policy.
    pub fn policy(&self) -> &RecordPolicy {
        &self.policy
    }

    /// Mode the next press will record in.
    pub fn mode(&self) -> RecordMode {
        self.mode
    }

    /// Current state, `Idle` when there is no session.
    pub fn state(&self) -> RecordState {
        self.session
            .as_ref()
            .map_or(RecordState::Idle, |s| s.state)
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&RecordSession> {
        self.session.as_ref()
    }

    /// No session is active.
    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    /// Sessions whose discard still waits for a start acknowledgement.
    pub fn queued_stops(&self) -> usize {
        self.queued_stops.len()
    }

    /// Capture backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Capture backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Send pipeline.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Earliest instant at which [`on_timer`](Self::on_timer) must be called.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.next_deadline()
    }

    /// Advisory state for renderers.
    pub fn snapshot(&self) -> StateSnapshot {
        match &self.session {
            Some(s) => StateSnapshot {
                session_id: Some(s.session_id),
                mode: s.mode,
                state: s.state,
                slide_to_cancel_progress: s.slide_to_cancel_progress,
                lock_progress: s.lock_progress,
                lock_confirm_progress: s.lock_confirm_progress,
                is_locked: s.is_locked,
                elapsed: s.elapsed,
                amplitude: s.amplitude,
            },
            None => StateSnapshot {
                session_id: None,
                mode: self.mode,
                state: RecordState::Idle,
                slide_to_cancel_progress: 1.0,
                lock_progress: 0.0,
                lock_confirm_progress: 0.0,
                is_locked: false,
                elapsed: Duration::ZERO,
                amplitude: 0.0,
            },
        }
    }

    /// Choose the mode for the next press.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::SessionActive`] while a session is in flight.
    #[track_caller]
    pub fn set_mode(&mut self, mode: RecordMode) -> CoreResult<()> {
        if let Some(session) = &self.session {
            return Err(RecordError::SessionActive {
                session_id: session.session_id,
                state: session.state,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.mode != mode {
            self.mode = mode;
            info!(mode = ?mode, "Record mode changed");
            self.notify();
        }

        Ok(())
    }

    /// Switch between audio and video for the next press.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::SessionActive`] while a session is in flight.
    #[track_caller]
    pub fn toggle_mode(&mut self) -> CoreResult<RecordMode> {
        let mode = self.mode.toggled();
        self.set_mode(mode)?;
        Ok(mode)
    }

    /// Pointer-down on the record control.
    ///
    /// On success a session is created in `Entering` and `start_capture` has
    /// been issued. If the backend's preconditions fail, a
    /// `Canceled { PermissionDenied }` outcome is dispatched, the controller
    /// stays idle and the error is returned.
    ///
    /// # Errors
    ///
    /// - [`RecordError::SessionActive`] if a session is already in flight.
    /// - [`RecordError::InvalidTransition`] if `sample` is not a down sample.
    /// - [`RecordError::PermissionDenied`] if preconditions fail.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn press(&mut self, sample: PointerSample) -> CoreResult<SessionId> {
        if let Some(session) = &self.session {
            return Err(RecordError::SessionActive {
                session_id: session.session_id,
                state: session.state,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if sample.phase != PointerPhase::Down {
            return Err(RecordError::InvalidTransition {
                operation: "press",
                state: RecordState::Idle,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.prune_queued_stops(sample.timestamp);

        let mode = self.mode;
        let session_id = SessionId::new();

        if let Err(reason) = self.backend.check_preconditions(mode) {
            warn!(session_id = %session_id, mode = ?mode, reason = %reason, "Capture preconditions failed");
            self.sink.on_recording_outcome(RecordingOutcome::Canceled {
                session_id,
                mode,
                reason: CancelReason::PermissionDenied,
            });
            return Err(RecordError::PermissionDenied {
                mode,
                reason,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.tracker.reset();
        self.tracker.track(&sample);
        self.amplitude.reset(Some(session_id));
        self.lock = None;
        self.session = Some(RecordSession::new(session_id, mode));

        self.backend.start_capture(session_id, mode);

        info!(session_id = %session_id, mode = ?mode, "Recording requested");
        self.notify();
        self.check_liveness();

        Ok(session_id)
    }

    /// Any pointer sample after the press: moves, release, cancel, and
    /// samples from unrelated pointers (which are ignored).
    #[instrument(level = "trace", skip(self))]
    pub fn pointer(&mut self, sample: PointerSample) {
        self.poll_timer(sample.timestamp);

        let Some(facts) = self.tracker.track(&sample) else {
            return;
        };
        if self.session.is_none() {
            return;
        }

        match facts.phase {
            PointerPhase::Down => {}
            PointerPhase::Move => self.apply_drag(&facts),
            PointerPhase::Up => self.release(&facts),
            PointerPhase::Cancel => self.pointer_canceled(facts.timestamp),
        }

        self.check_liveness();
    }

    /// Send affordance shown while locked.
    ///
    /// # Errors
    ///
    /// - [`RecordError::NoActiveSession`] when idle.
    /// - [`RecordError::InvalidTransition`] unless the session is locked.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn stop(&mut self, now: Instant) -> CoreResult<()> {
        self.poll_timer(now);

        match self.state() {
            RecordState::Locked => {
                self.finalize(now);
                self.check_liveness();
                Ok(())
            }
            RecordState::Idle => Err(RecordError::NoActiveSession {
                location: ErrorLocation::from(Location::caller()),
            }),
            state => Err(RecordError::InvalidTransition {
                operation: "stop",
                state,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Trash affordance: drop the active session.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NoActiveSession`] when idle.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn discard(&mut self, now: Instant) -> CoreResult<()> {
        self.cancel_with(CancelReason::UserDiscarded, now)
    }

    /// External cancel (app backgrounded, dialog closed).
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NoActiveSession`] when idle.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn cancel(&mut self, now: Instant) -> CoreResult<()> {
        self.cancel_with(CancelReason::External, now)
    }

    /// Backend acknowledgement of `start_capture`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::StaleCallback`] if `session_id` is not the
    /// session waiting for this acknowledgement. Nothing is mutated.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn on_capture_started(
        &mut self,
        session_id: SessionId,
        ack: StartAck,
        now: Instant,
    ) -> CoreResult<()> {
        self.poll_timer(now);

        if self.queued_stops.remove(&session_id).is_some() {
            match ack {
                StartAck::Started => {
                    info!(session_id = %session_id, "Replaying discard queued before start ack");
                    self.backend.stop_capture(session_id, true);
                }
                StartAck::Failed { reason } => {
                    debug!(session_id = %session_id, reason = %reason, "Queued session never started");
                }
            }
            return Ok(());
        }

        let Some(session) = self
            .session
            .as_mut()
            .filter(|s| s.session_id == session_id && s.awaiting_start)
        else {
            return Err(stale(session_id));
        };

        session.awaiting_start = false;

        match ack {
            StartAck::Started => {
                session.state = RecordState::Recording;
                session.start_time = Some(now);
                session.elapsed = Duration::ZERO;

                let cutoff = match session.mode {
                    RecordMode::Video => Some(self.policy.timing.video_duration_limit),
                    RecordMode::Audio => self.policy.timing.audio_duration_limit,
                };
                self.timer.start(session_id, now, cutoff);

                info!(session_id = %session_id, "Recording started");
                self.notify();
            }
            StartAck::Failed { reason } => {
                warn!(session_id = %session_id, reason = %reason, "Capture failed to start");
                self.resolve_canceled(CancelReason::StartFailed, now);
            }
        }

        self.check_liveness();
        Ok(())
    }

    /// Backend acknowledgement of `stop_capture`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::StaleCallback`] unless the active session is
    /// waiting for finalization. Discard acknowledgements always land here,
    /// because a discarded session is already gone.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn on_capture_stopped(
        &mut self,
        session_id: SessionId,
        ack: StopAck,
        now: Instant,
    ) -> CoreResult<()> {
        self.poll_timer(now);

        let Some(session) = self
            .session
            .as_mut()
            .filter(|s| s.session_id == session_id && s.awaiting_finalize)
        else {
            return Err(stale(session_id));
        };

        session.awaiting_finalize = false;

        match ack {
            StopAck::Finalized { artifact } => self.complete_send(artifact),
            StopAck::TooShort => {
                info!(session_id = %session_id, "Recording below minimum duration");
                self.resolve_canceled(CancelReason::TooShort, now);
            }
            StopAck::Discarded => {
                warn!(session_id = %session_id, "Backend discarded a clip that was meant to be kept");
                self.resolve_canceled(CancelReason::FinalizeFailed, now);
            }
            StopAck::Failed { reason } => {
                warn!(session_id = %session_id, reason = %reason, "Capture failed to finalize");
                self.resolve_canceled(CancelReason::FinalizeFailed, now);
            }
        }

        self.check_liveness();
        Ok(())
    }

    /// Amplitude push from the backend.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::StaleCallback`] unless `session_id` is
    /// currently capturing.
    #[track_caller]
    #[instrument(level = "trace", skip(self))]
    pub fn on_amplitude(&mut self, session_id: SessionId, level: f32, now: Instant) -> CoreResult<()> {
        self.poll_timer(now);

        let Some(session) = self
            .session
            .as_mut()
            .filter(|s| s.session_id == session_id && s.state.is_capturing())
        else {
            return Err(stale(session_id));
        };

        self.amplitude.push(session_id, level, now);
        session.amplitude = self.amplitude.level(now);
        self.notify();

        Ok(())
    }

    /// Duration cutoff raised by a backend that owns its own timer.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::StaleCallback`] unless `session_id` is
    /// currently capturing.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn on_duration_cutoff(&mut self, session_id: SessionId, now: Instant) -> CoreResult<()> {
        self.poll_timer(now);

        let capturing = self
            .session
            .as_ref()
            .is_some_and(|s| s.session_id == session_id && s.state.is_capturing());
        if !capturing {
            return Err(stale(session_id));
        }

        self.cut_off(now);
        self.check_liveness();
        Ok(())
    }

    /// Deliver due ticks and the cutoff. Call at
    /// [`next_deadline`](Self::next_deadline); extra calls are harmless.
    #[instrument(level = "trace", skip(self))]
    pub fn on_timer(&mut self, now: Instant) {
        self.poll_timer(now);
        self.check_liveness();
    }

    fn poll_timer(&mut self, now: Instant) {
        for event in self.timer.poll(now) {
            match event {
                TimerEvent::Tick {
                    session_id,
                    elapsed,
                } => {
                    if let Some(session) = self
                        .session
                        .as_mut()
                        .filter(|s| s.session_id == session_id)
                    {
                        session.elapsed = elapsed;
                        session.amplitude = self.amplitude.level(now);
                        self.notify();
                    }
                }
                TimerEvent::Cutoff {
                    session_id,
                    elapsed,
                } => {
                    let capturing = self
                        .session
                        .as_ref()
                        .is_some_and(|s| s.session_id == session_id && s.state.is_capturing());
                    if capturing {
                        info!(session_id = %session_id, elapsed_ms = elapsed.as_millis(), "Duration limit reached");
                        self.cut_off(now);
                    } else {
                        debug!(session_id = %session_id, "Ignoring cutoff for inactive session");
                    }
                }
            }
        }
    }

    fn apply_drag(&mut self, facts: &GestureFacts) {
        let max_cancel = self.tracker.max_cancel_distance();
        let intent = self.policy.lock.intent_distance;

        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.state.follows_pointer() {
            return;
        }

        session.slide_to_cancel_progress = (1.0 - facts.cancel_distance / max_cancel).clamp(0.0, 1.0);
        session.lock_progress = (facts.lock_distance / intent).clamp(0.0, 1.0);

        match session.state {
            RecordState::Recording if session.lock_progress >= 1.0 => {
                self.lock = Some(LockTransition::begin(facts.lock_distance, &self.policy.lock));
                session.state = RecordState::LockPending;
                session.lock_confirm_progress = 0.0;
                debug!(session_id = %session.session_id, origin = facts.lock_distance, "Lock sequence started");
            }
            RecordState::LockPending => {
                let step = self
                    .lock
                    .as_ref()
                    .map_or(LockStep::Aborted, |lock| lock.advance(facts.lock_distance));
                match step {
                    LockStep::Pending { progress } => {
                        session.lock_confirm_progress = progress;
                    }
                    LockStep::Complete => {
                        self.lock = None;
                        session.is_locked = true;
                        session.lock_confirm_progress = 1.0;
                        session.state = RecordState::Locked;
                        info!(session_id = %session.session_id, "Recording locked");
                    }
                    LockStep::Aborted => {
                        self.lock = None;
                        session.lock_confirm_progress = 0.0;
                        session.state = RecordState::Recording;
                        debug!(session_id = %session.session_id, "Lock sequence aborted");
                    }
                }
            }
            _ => {}
        }

        // Lock wins: only a session with no lock sequence in progress can be
        // canceled by a full slide. An aborted lock is re-checked here.
        let fully_slid = matches!(session.state, RecordState::Entering | RecordState::Recording)
            && session.slide_to_cancel_progress <= 0.0;

        if fully_slid {
            self.cancel_by_gesture(facts.timestamp);
        } else {
            self.notify();
        }
    }

    fn release(&mut self, facts: &GestureFacts) {
        let max_cancel = self.tracker.max_cancel_distance();
        let cancel_threshold = self.policy.gesture.cancel_threshold;

        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.state {
            RecordState::Entering | RecordState::Recording | RecordState::LockPending => {
                session.slide_to_cancel_progress =
                    (1.0 - facts.cancel_distance / max_cancel).clamp(0.0, 1.0);
                let cancel_intent = session.slide_to_cancel_progress < cancel_threshold;
                let state = session.state;

                if cancel_intent {
                    self.cancel_by_gesture(facts.timestamp);
                } else if state == RecordState::Entering {
                    debug!(session_id = %session.session_id, "Released before capture started");
                    self.resolve_canceled(CancelReason::TooShort, facts.timestamp);
                } else {
                    self.finalize(facts.timestamp);
                }
            }
            RecordState::Locked => {
                debug!(session_id = %session.session_id, "Pointer released, session stays locked");
            }
            _ => {}
        }
    }

    fn pointer_canceled(&mut self, now: Instant) {
        match self.state() {
            state if state.follows_pointer() => {
                self.resolve_canceled(CancelReason::PointerCanceled, now);
            }
            state => {
                debug!(state = ?state, "Pointer cancel ignored, session does not follow the pointer");
            }
        }
    }

    #[track_caller]
    fn cancel_with(&mut self, reason: CancelReason, now: Instant) -> CoreResult<()> {
        self.poll_timer(now);

        if self.session.is_none() {
            return Err(RecordError::NoActiveSession {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.resolve_canceled(reason, now);
        self.check_liveness();
        Ok(())
    }

    fn cancel_by_gesture(&mut self, now: Instant) {
        if let Some(session) = self.session.as_mut() {
            session.state = RecordState::CancelingByGesture;
            info!(session_id = %session.session_id, "Slide to cancel");
            self.notify();
        }
        self.resolve_canceled(CancelReason::GestureCancel, now);
    }

    fn cut_off(&mut self, now: Instant) {
        if let Some(session) = self.session.as_mut() {
            session.state = RecordState::CancelingByTime;
            session.is_locked = false;
            self.lock = None;
            self.notify();
        }
        self.finalize(now);
    }

    /// Ask the backend to finalize the clip and wait in `Preparing`.
    fn finalize(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let Some(elapsed) = self.timer.elapsed(now) {
            session.elapsed = elapsed;
        }
        self.timer.cancel();
        self.lock = None;

        session.state = RecordState::Preparing;
        session.awaiting_finalize = true;
        let session_id = session.session_id;

        info!(
            session_id = %session_id,
            duration_ms = session.elapsed.as_millis(),
            locked = session.is_locked,
            "Finalizing recording"
        );

        self.backend.stop_capture(session_id, false);
        self.notify();
    }

    fn complete_send(&mut self, artifact: ArtifactRef) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        session.state = RecordState::Sending;
        let outcome = RecordingOutcome::Sent {
            session_id: session.session_id,
            mode: session.mode,
            artifact,
            duration: session.elapsed,
            waveform: self.amplitude.waveform(WAVEFORM_BINS),
        };
        info!(session_id = %session.session_id, "Recording sent");
        self.notify();

        self.dispatch(outcome);
    }

    /// Move the session to `Canceled`, release whatever the backend still
    /// holds for it, dispatch the outcome and go idle.
    fn resolve_canceled(&mut self, reason: CancelReason, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let Some(elapsed) = self.timer.elapsed(now) {
            session.elapsed = elapsed;
        }
        self.timer.cancel();
        self.lock = None;

        let session_id = session.session_id;
        let mode = session.mode;
        let capture_running = session.state.is_capturing()
            || session.state == RecordState::CancelingByGesture
            || session.awaiting_finalize;

        if session.awaiting_start {
            // Replayed by on_capture_started.
            self.queued_stops.insert(session_id, now);
            debug!(session_id = %session_id, "Discard queued until capture start is acknowledged");
        } else if capture_running {
            self.backend.stop_capture(session_id, true);
        }

        session.awaiting_start = false;
        session.awaiting_finalize = false;
        session.cancel_requested = true;
        session.is_locked = false;
        session.state = RecordState::Canceled;

        info!(session_id = %session_id, reason = %reason, "Recording canceled");
        self.notify();

        self.dispatch(RecordingOutcome::Canceled {
            session_id,
            mode,
            reason,
        });
    }

    fn prune_queued_stops(&mut self, now: Instant) {
        self.queued_stops.retain(|session_id, queued_at| {
            let waiting = now.saturating_duration_since(*queued_at);
            let keep = waiting < QUEUED_STOP_RETENTION;
            if !keep {
                warn!(
                    session_id = %session_id,
                    waiting_ms = waiting.as_millis(),
                    "Start never acknowledged, dropping queued discard"
                );
            }
            keep
        });
    }

    fn dispatch(&mut self, outcome: RecordingOutcome) {
        self.sink.on_recording_outcome(outcome);
        self.session = None;
        self.lock = None;
        self.amplitude.reset(None);
        self.notify();
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_state_changed(&snapshot);
        }
    }

    fn check_liveness(&self) {
        if let Some(session) = &self.session {
            let waiting_on_backend =
                matches!(session.state, RecordState::Entering | RecordState::Preparing);
            debug_assert!(
                !waiting_on_backend || session.has_pending_callback(),
                "session {} left in {:?} with no backend callback outstanding",
                session.session_id,
                session.state
            );
            debug_assert!(
                !session.state.is_terminal(),
                "session {} left in terminal state {:?}",
                session.session_id,
                session.state
            );
            debug_assert!(
                !session.is_locked
                    || matches!(
                        session.state,
                        RecordState::Locked | RecordState::Preparing | RecordState::Sending
                    ),
                "session {} locked in {:?}",
                session.session_id,
                session.state
            );
        }
    }
}

#[track_caller]
fn stale(session_id: SessionId) -> RecordError {
    debug!(session_id = %session_id, "Ignoring stale backend callback");
    RecordError::StaleCallback {
        session_id,
        location: ErrorLocation::from(Location::caller()),
    }
}
