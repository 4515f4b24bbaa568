#![allow(clippy::unwrap_used, clippy::panic)]

use crate::{
    CancelReason, PointerPhase, PointerSample, RecordError, RecordMode, RecordState,
    RecordingOutcome, StartAck, StopAck,
    record::{QUEUED_STOP_RETENTION, WAVEFORM_BINS},
    tests::support::{BackendCall, Harness, ORIGIN_X, ORIGIN_Y},
};

use std::time::Duration;

fn cancel_reason(outcome: &RecordingOutcome) -> Option<CancelReason> {
    match outcome {
        RecordingOutcome::Canceled { reason, .. } => Some(*reason),
        RecordingOutcome::Sent { .. } => None,
    }
}

/// WHAT: Press, short hold, release without dragging sends the clip
/// WHY: A short press-and-release is a valid clip, not an accidental cancel
#[test]
fn given_short_hold_without_drag_when_released_then_clip_is_sent() {
    // Given: A session confirmed by the backend
    let mut h = Harness::new();
    let session_id = h.recording();

    // When: Releasing 200ms after the press with no travel
    h.release_at(0.0, 10.0, 200);

    // Then: The backend is asked to keep the clip
    assert_eq!(h.controller.state(), RecordState::Preparing);
    assert_eq!(
        h.calls().last(),
        Some(&BackendCall::Stop {
            session_id,
            discard: false
        })
    );
    assert!(h.outcomes().is_empty());

    // When: The backend finalizes
    h.finalize_ack(session_id, 250);

    // Then: Exactly one Sent outcome with controller-measured duration, then idle
    let outcomes = h.outcomes();
    assert_eq!(outcomes.len(), 1);
    match &outcomes[0] {
        RecordingOutcome::Sent {
            session_id: sent_id,
            mode,
            duration,
            waveform,
            ..
        } => {
            assert_eq!(*sent_id, session_id);
            assert_eq!(*mode, RecordMode::Audio);
            assert_eq!(*duration, Duration::from_millis(180));
            assert_eq!(waveform.len(), WAVEFORM_BINS);
        }
        other => panic!("expected Sent, got {other:?}"),
    }
    assert!(h.controller.is_idle());
}

/// WHAT: Releasing while slid past the cancel threshold cancels and discards
/// WHY: Slide-to-cancel must drop the recording
#[test]
fn given_drag_past_cancel_threshold_when_released_then_canceled_with_gesture_cancel() {
    // Given: A recording dragged 100 units left (progress ~0.21 < 0.3)
    let mut h = Harness::new();
    let session_id = h.recording();
    h.arm_slop(40);
    h.drag_to(100.0, 0.0, 80);
    assert_eq!(h.controller.state(), RecordState::Recording);

    // When: Releasing at the same spot
    h.release_at(100.0, 0.0, 120);

    // Then: Canceled by gesture and the backend is told to discard
    let outcomes = h.outcomes();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(cancel_reason(&outcomes[0]), Some(CancelReason::GestureCancel));
    assert_eq!(
        h.calls().last(),
        Some(&BackendCall::Stop {
            session_id,
            discard: true
        })
    );
    assert!(h.controller.is_idle());
}

/// WHAT: Dragging past the threshold and back again before release sends
/// WHY: Recovering from a partial slide must withdraw the cancel intent
#[test]
fn given_drag_past_threshold_and_back_when_released_then_clip_is_finalized() {
    // Given: A recording that slid past the threshold, then recovered
    let mut h = Harness::new();
    let session_id = h.recording();
    h.arm_slop(40);
    h.drag_to(100.0, 0.0, 80);
    h.drag_to(20.0, 0.0, 120);

    let progress = h.controller.session().unwrap().slide_to_cancel_progress();
    assert!(progress > 0.3, "progress {progress} should have recovered");

    // When: Releasing after recovery
    h.release_at(20.0, 0.0, 160);

    // Then: Finalization requested, nothing canceled
    assert_eq!(h.controller.state(), RecordState::Preparing);
    assert_eq!(
        h.calls().last(),
        Some(&BackendCall::Stop {
            session_id,
            discard: false
        })
    );

    h.finalize_ack(session_id, 200);
    assert!(matches!(
        h.outcomes().as_slice(),
        [RecordingOutcome::Sent { .. }]
    ));
}

/// WHAT: Sliding all the way cancels without waiting for release
/// WHY: Progress reaching zero forces CancelingByGesture immediately
#[test]
fn given_recording_when_slid_fully_then_canceled_before_release() {
    // Given: A recording session
    let mut h = Harness::new();
    h.recording();
    h.arm_slop(40);

    // When: Dragging beyond the full cancel distance
    h.drag_to(200.0, 0.0, 80);

    // Then: Canceled immediately; the later release adds nothing
    assert!(h.controller.is_idle());
    h.release_at(200.0, 0.0, 120);
    let outcomes = h.outcomes();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(cancel_reason(&outcomes[0]), Some(CancelReason::GestureCancel));

    let states: Vec<_> = h.snapshots().iter().map(|s| s.state).collect();
    assert!(states.contains(&RecordState::CancelingByGesture));
}

/// WHAT: Crossing both lock thresholds locks; release keeps recording
/// WHY: Hands-free mode must survive lifting the finger
#[test]
fn given_drag_up_past_both_thresholds_when_released_then_session_stays_locked() {
    // Given: A recording dragged up past intent, then past confirm
    let mut h = Harness::new();
    let session_id = h.recording();
    h.arm_slop(40);
    h.drag_to(0.0, 45.0, 80);
    assert_eq!(h.controller.state(), RecordState::LockPending);
    h.drag_to(0.0, 130.0, 120);

    // Then: Locked
    assert_eq!(h.controller.state(), RecordState::Locked);
    assert!(h.controller.session().unwrap().is_locked());

    // When: Releasing
    h.release_at(0.0, 130.0, 160);

    // Then: Still locked, nothing dispatched, no stop issued
    assert_eq!(h.controller.state(), RecordState::Locked);
    assert!(h.outcomes().is_empty());
    assert_eq!(h.calls().len(), 1);

    // When: The locked-mode send affordance is tapped
    h.controller.stop(h.at(2_500)).unwrap();

    // Then: Preparing, then Sending once finalized
    assert_eq!(h.controller.state(), RecordState::Preparing);
    assert!(h.controller.session().unwrap().is_locked());
    h.finalize_ack(session_id, 2_600);
    let outcomes = h.outcomes();
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(
        outcomes[0],
        RecordingOutcome::Sent { duration, .. } if duration == Duration::from_millis(2_480)
    ));
}

/// WHAT: Trash affordance in locked mode discards
/// WHY: Locked sessions only end through explicit controls
#[test]
fn given_locked_session_when_discarded_then_canceled_and_capture_discarded() {
    // Given: A locked session
    let mut h = Harness::new();
    let session_id = h.recording();
    h.arm_slop(40);
    h.drag_to(0.0, 45.0, 80);
    h.drag_to(0.0, 130.0, 120);
    h.release_at(0.0, 130.0, 160);

    // When: Discarding
    h.controller.discard(h.at(1_000)).unwrap();

    // Then: Canceled with UserDiscarded, capture discarded
    assert_eq!(
        cancel_reason(&h.outcomes()[0]),
        Some(CancelReason::UserDiscarded)
    );
    assert_eq!(
        h.calls().last(),
        Some(&BackendCall::Stop {
            session_id,
            discard: true
        })
    );
    assert!(h.controller.is_idle());
}

/// WHAT: Falling back below the intent threshold aborts the lock sequence
/// WHY: Vertical jitter must not lock
#[test]
fn given_lock_pending_when_pointer_drops_below_intent_then_back_to_recording() {
    // Given: A session in LockPending
    let mut h = Harness::new();
    h.recording();
    h.arm_slop(40);
    h.drag_to(0.0, 45.0, 80);
    assert_eq!(h.controller.state(), RecordState::LockPending);

    // When: Moving back down below the intent threshold
    h.drag_to(0.0, 30.0, 120);

    // Then: Plain recording again; release finalizes
    assert_eq!(h.controller.state(), RecordState::Recording);
    h.release_at(0.0, 30.0, 160);
    assert_eq!(h.controller.state(), RecordState::Preparing);
    assert!(!h.controller.session().unwrap().is_locked());
}

/// WHAT: Releasing during LockPending sends rather than locks
/// WHY: Only the confirm threshold converts the session to hands-free
#[test]
fn given_lock_pending_short_of_confirm_when_released_then_finalized() {
    // Given: LockPending with 15 units of confirm travel (< 80)
    let mut h = Harness::new();
    h.recording();
    h.arm_slop(40);
    h.drag_to(0.0, 45.0, 80);
    h.drag_to(0.0, 60.0, 100);
    let confirm = h.controller.session().unwrap().lock_confirm_progress();
    assert!(confirm > 0.0 && confirm < 1.0);

    // When: Releasing
    h.release_at(0.0, 60.0, 140);

    // Then: Preparing, unlocked
    assert_eq!(h.controller.state(), RecordState::Preparing);
    assert!(!h.controller.session().unwrap().is_locked());
}

/// WHAT: Lock completion and full slide in one sample resolve to Locked
/// WHY: Locking is reversible, cancellation is not
#[test]
fn given_lock_pending_when_one_sample_completes_lock_and_full_slide_then_lock_wins() {
    // Given: LockPending
    let mut h = Harness::new();
    h.recording();
    h.arm_slop(40);
    h.drag_to(0.0, 45.0, 80);

    // When: A diagonal sample passes confirm and slides fully left
    h.drag_to(200.0, 130.0, 120);

    // Then: Locked, not canceled
    assert_eq!(h.controller.state(), RecordState::Locked);
    assert!(h.outcomes().is_empty());
}

/// WHAT: Crossing lock intent and full slide together keeps the session
/// WHY: The lock tie-break applies to the intent crossing too
#[test]
fn given_recording_when_one_sample_crosses_intent_and_full_slide_then_lock_pending() {
    // Given: Recording
    let mut h = Harness::new();
    h.recording();
    h.arm_slop(40);

    // When: One diagonal sample crosses the intent threshold and slides fully
    h.drag_to(200.0, 45.0, 80);

    // Then: Lock sequence started, session alive
    assert_eq!(h.controller.state(), RecordState::LockPending);
    assert!(h.outcomes().is_empty());

    // When: The next sample stays fully slid with the lock still pending
    h.drag_to(200.0, 50.0, 96);

    // Then: Still pending, nothing dispatched
    assert_eq!(h.controller.state(), RecordState::LockPending);
    assert!(h.outcomes().is_empty());

    // When: The finger keeps climbing past confirm
    h.drag_to(200.0, 130.0, 112);

    // Then: Locked
    assert_eq!(h.controller.state(), RecordState::Locked);
    assert!(h.outcomes().is_empty());
}

/// WHAT: A lock that aborts while fully slid falls back to slide-to-cancel
/// WHY: Holding off the cancel during the lock sequence must not disable it
#[test]
fn given_lock_pending_fully_slid_when_lock_aborts_then_gesture_cancel() {
    // Given: Lock pending with the finger fully slid
    let mut h = Harness::new();
    h.recording();
    h.arm_slop(40);
    h.drag_to(200.0, 45.0, 80);
    h.drag_to(200.0, 50.0, 96);
    assert_eq!(h.controller.state(), RecordState::LockPending);

    // When: The finger drops back below the intent threshold
    h.drag_to(200.0, 10.0, 112);

    // Then: Canceled by the slide
    assert_eq!(h.controller.state(), RecordState::Idle);
    let outcomes = h.outcomes();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(cancel_reason(&outcomes[0]), Some(CancelReason::GestureCancel));
}

/// WHAT: Pointer cancel phase cancels regardless of drag progress
/// WHY: The platform took the gesture away, so nothing can be confirmed
#[test]
fn given_recording_without_drag_when_pointer_cancels_then_canceled() {
    // Given: Recording with no drag
    let mut h = Harness::new();
    let session_id = h.recording();

    // When: The pointer stream is cancelled
    h.pointer(PointerPhase::Cancel, 0.0, 10.0, 100);

    // Then: Canceled and discarded
    assert_eq!(
        cancel_reason(&h.outcomes()[0]),
        Some(CancelReason::PointerCanceled)
    );
    assert_eq!(
        h.calls().last(),
        Some(&BackendCall::Stop {
            session_id,
            discard: true
        })
    );
}

/// WHAT: A cancel tagged with another pointer id still cancels the session
/// WHY: Platforms cancel the whole touch stream at once
#[test]
fn given_recording_when_secondary_pointer_cancels_then_pointer_canceled() {
    // Given: Recording
    let mut h = Harness::new();
    h.recording();

    // When: The cancel arrives for pointer 3
    let sample = PointerSample::new(PointerPhase::Cancel, ORIGIN_X, ORIGIN_Y, h.at(100))
        .with_pointers(3, 2);
    h.controller.pointer(sample);

    // Then
    assert_eq!(h.controller.state(), RecordState::Idle);
    assert_eq!(
        cancel_reason(&h.outcomes()[0]),
        Some(CancelReason::PointerCanceled)
    );
}

/// WHAT: Pointer cancel after locking is ignored
/// WHY: A locked session no longer depends on the pointer
#[test]
fn given_locked_session_when_pointer_cancels_then_still_locked() {
    // Given: Locked (finger still down)
    let mut h = Harness::new();
    h.recording();
    h.arm_slop(40);
    h.drag_to(0.0, 45.0, 80);
    h.drag_to(0.0, 130.0, 120);

    // When: Pointer cancel arrives
    h.pointer(PointerPhase::Cancel, 0.0, 130.0, 160);

    // Then: Still locked
    assert_eq!(h.controller.state(), RecordState::Locked);
    assert!(h.outcomes().is_empty());
}

/// WHAT: Video sessions reach Preparing at the ceiling with no pointer input
/// WHY: The cutoff must not depend on UI events or redraws
#[test]
fn given_video_recording_when_timer_polled_past_ceiling_then_preparing() {
    // Given: A video session held without any movement
    let mut h = Harness::new();
    h.controller.set_mode(RecordMode::Video).unwrap();
    let session_id = h.recording();

    // When: The timer is polled only once, long after the ceiling
    h.controller.on_timer(h.at(20 + 61_000));

    // Then: Finalization requested; the clip is kept
    assert_eq!(h.controller.state(), RecordState::Preparing);
    assert_eq!(
        h.calls().last(),
        Some(&BackendCall::Stop {
            session_id,
            discard: false
        })
    );
    let states: Vec<_> = h.snapshots().iter().map(|s| s.state).collect();
    assert!(states.contains(&RecordState::CancelingByTime));

    // And: A second late poll changes nothing
    h.controller.on_timer(h.at(20 + 62_000));
    assert_eq!(h.calls().len(), 2);
}

/// WHAT: A cutoff noticed through a late pointer sample still fires
/// WHY: Any input after the deadline must observe the ceiling first
#[test]
fn given_locked_video_when_late_input_arrives_after_ceiling_then_finalized() {
    // Given: A locked video session
    let mut h = Harness::new();
    h.controller.set_mode(RecordMode::Video).unwrap();
    let session_id = h.recording();
    h.arm_slop(40);
    h.drag_to(0.0, 45.0, 80);
    h.drag_to(0.0, 130.0, 120);

    // When: The next thing that happens is an amplitude sample at 61s
    let result = h.controller.on_amplitude(session_id, 0.5, h.at(61_000));

    // Then: Cutoff already moved it to Preparing; the sample is stale
    assert!(matches!(result, Err(RecordError::StaleCallback { .. })));
    assert_eq!(h.controller.state(), RecordState::Preparing);
    assert!(!h.controller.session().unwrap().is_locked());
}

/// WHAT: Audio sessions have no ceiling by default
/// WHY: Only video carries a fixed duration limit
#[test]
fn given_audio_recording_when_polled_after_video_ceiling_then_still_recording() {
    // Given: Audio recording
    let mut h = Harness::new();
    h.recording();

    // When: Polling at 2 minutes
    h.controller.on_timer(h.at(120_000));

    // Then: Still recording with elapsed updated
    assert_eq!(h.controller.state(), RecordState::Recording);
    let elapsed = h.controller.session().unwrap().elapsed();
    assert_eq!(elapsed, Duration::from_millis(120_000 - 20));
}

/// WHAT: A start ack from an earlier session never touches the new one
/// WHY: Stale callbacks are the classic delayed-callback bug
#[test]
fn given_session_b_active_when_session_a_start_ack_arrives_then_b_unaffected() {
    // Given: A pressed and cancelled before its start ack, then B pressed
    let mut h = Harness::new();
    let a = h.press(0);
    h.controller.cancel(h.at(10)).unwrap();
    let b = h.press(20);
    assert_eq!(h.controller.state(), RecordState::Entering);

    // When: A's start ack arrives
    h.controller
        .on_capture_started(a, StartAck::Started, h.at(30))
        .unwrap();

    // Then: B is still Entering; A's queued discard is replayed
    let session = h.controller.session().unwrap();
    assert_eq!(session.session_id(), b);
    assert_eq!(session.state(), RecordState::Entering);
    assert_eq!(
        h.calls().last(),
        Some(&BackendCall::Stop {
            session_id: a,
            discard: true
        })
    );

    // And: B's own ack still works
    h.start_ack(b, 40);
    assert_eq!(h.controller.state(), RecordState::Recording);
}

/// WHAT: A discard whose start is never acknowledged is eventually dropped
/// WHY: A backend that loses an acknowledgement must not grow the queue forever
#[test]
fn given_unacknowledged_queued_discard_when_retention_passes_then_dropped_on_next_press() {
    // Given: A cancelled before its start ack, B pressed shortly after
    let mut h = Harness::new();
    let a = h.press(0);
    h.controller.cancel(h.at(10)).unwrap();
    let b = h.press(20);
    assert_eq!(h.controller.queued_stops(), 1);
    h.controller.cancel(h.at(30)).unwrap();
    assert_eq!(h.controller.queued_stops(), 2);

    // When: The next press comes after the retention window
    let late = 30 + QUEUED_STOP_RETENTION.as_millis() as u64;
    h.press(late);

    // Then: Both stale entries are gone
    assert_eq!(h.controller.queued_stops(), 0);

    // And: A late start ack for A is now just stale, with no stop issued
    let calls_before = h.calls().len();
    let result = h
        .controller
        .on_capture_started(a, StartAck::Started, h.at(late + 10));
    assert!(matches!(result, Err(RecordError::StaleCallback { .. })));
    assert_eq!(h.calls().len(), calls_before);
    assert_ne!(h.controller.session().unwrap().session_id(), b);
}

/// WHAT: A discard ack from an earlier session is rejected as stale
/// WHY: Late stop acknowledgements must not resolve the new session
#[test]
fn given_session_b_recording_when_session_a_stop_ack_arrives_then_stale_error() {
    // Given: A recorded and discarded, B recording
    let mut h = Harness::new();
    let a = h.recording();
    h.controller.discard(h.at(100)).unwrap();
    let b = h.press(200);
    h.start_ack(b, 220);

    // When: A's discard ack arrives
    let result = h
        .controller
        .on_capture_stopped(a, StopAck::Discarded, h.at(230));

    // Then: Stale, B untouched, still one outcome (A's)
    assert!(matches!(result, Err(RecordError::StaleCallback { .. })));
    assert_eq!(h.controller.state(), RecordState::Recording);
    assert_eq!(h.controller.session().unwrap().session_id(), b);
    assert_eq!(h.outcomes().len(), 1);
}

/// WHAT: Releasing before capture starts cancels at once and discards later
/// WHY: A stop issued before the start ack must be replayed, not dropped
#[test]
fn given_entering_when_released_then_canceled_and_discard_replayed_on_ack() {
    // Given: Pressed, no ack yet
    let mut h = Harness::new();
    let session_id = h.press(0);

    // When: Released quickly
    h.release_at(0.0, 10.0, 50);

    // Then: Canceled immediately, but no stop sent yet
    assert!(h.controller.is_idle());
    assert_eq!(cancel_reason(&h.outcomes()[0]), Some(CancelReason::TooShort));
    assert_eq!(h.calls().len(), 1);

    // When: The start ack finally arrives
    h.controller
        .on_capture_started(session_id, StartAck::Started, h.at(80))
        .unwrap();

    // Then: The discard is replayed once
    assert_eq!(
        h.calls(),
        vec![
            BackendCall::Start {
                session_id,
                mode: RecordMode::Audio
            },
            BackendCall::Stop {
                session_id,
                discard: true
            },
        ]
    );
    assert_eq!(h.outcomes().len(), 1);
}

/// WHAT: A queued stop is dropped when the start itself fails
/// WHY: There is nothing to discard if capture never ran
#[test]
fn given_queued_discard_when_start_fails_then_no_stop_issued() {
    // Given: Released before ack
    let mut h = Harness::new();
    let session_id = h.press(0);
    h.release_at(0.0, 10.0, 50);

    // When: The start ack reports failure
    h.controller
        .on_capture_started(
            session_id,
            StartAck::Failed {
                reason: "camera busy".to_string(),
            },
            h.at(80),
        )
        .unwrap();

    // Then: Only the start call was ever made
    assert_eq!(h.calls().len(), 1);
}

/// WHAT: Backend start failure resolves to StartFailed
/// WHY: Hardware errors must end the session and reach idle
#[test]
fn given_entering_when_start_fails_then_canceled_with_start_failed() {
    // Given: Pressed
    let mut h = Harness::new();
    let session_id = h.press(0);

    // When: The backend reports failure
    h.controller
        .on_capture_started(
            session_id,
            StartAck::Failed {
                reason: "microphone in use".to_string(),
            },
            h.at(30),
        )
        .unwrap();

    // Then: Canceled, idle, no stop command
    assert_eq!(
        cancel_reason(&h.outcomes()[0]),
        Some(CancelReason::StartFailed)
    );
    assert!(h.controller.is_idle());
    assert_eq!(h.calls().len(), 1);
}

/// WHAT: Failed preconditions keep the controller idle
/// WHY: Permission must be granted before a session exists
#[test]
fn given_permission_denied_when_pressed_then_idle_and_permission_outcome() {
    // Given: A backend without microphone permission
    let mut h = Harness::denying("microphone permission missing");

    // When: Pressing
    let sample = PointerSample::new(PointerPhase::Down, 300.0, 600.0, h.at(0));
    let result = h.controller.press(sample);

    // Then: Error returned, outcome reported, nothing started
    assert!(matches!(result, Err(RecordError::PermissionDenied { .. })));
    assert!(h.controller.is_idle());
    assert!(h.calls().is_empty());
    assert_eq!(
        cancel_reason(&h.outcomes()[0]),
        Some(CancelReason::PermissionDenied)
    );
}

/// WHAT: A too-short report from the backend cancels
/// WHY: Clips below the minimum viable duration are not sent
#[test]
fn given_preparing_when_backend_reports_too_short_then_canceled() {
    // Given: Released into Preparing
    let mut h = Harness::new();
    let session_id = h.recording();
    h.release_at(0.0, 10.0, 60);

    // When: Backend says too short
    h.controller
        .on_capture_stopped(session_id, StopAck::TooShort, h.at(70))
        .unwrap();

    // Then: Canceled TooShort, no second stop command
    assert_eq!(cancel_reason(&h.outcomes()[0]), Some(CancelReason::TooShort));
    assert_eq!(h.calls().len(), 2);
    assert!(h.controller.is_idle());
}

/// WHAT: Finalize failure cancels with FinalizeFailed
/// WHY: No artifact means nothing to send
#[test]
fn given_preparing_when_finalize_fails_then_canceled_with_finalize_failed() {
    // Given: Preparing
    let mut h = Harness::new();
    let session_id = h.recording();
    h.release_at(0.0, 10.0, 500);

    // When: Finalization fails
    h.controller
        .on_capture_stopped(
            session_id,
            StopAck::Failed {
                reason: "encoder error".to_string(),
            },
            h.at(600),
        )
        .unwrap();

    // Then: FinalizeFailed
    assert_eq!(
        cancel_reason(&h.outcomes()[0]),
        Some(CancelReason::FinalizeFailed)
    );
    assert!(h.controller.is_idle());
}

/// WHAT: External cancel during Preparing drops the artifact
/// WHY: Finalization is itself cancellable
#[test]
fn given_preparing_when_canceled_externally_then_discard_and_late_finalize_is_stale() {
    // Given: Preparing
    let mut h = Harness::new();
    let session_id = h.recording();
    h.release_at(0.0, 10.0, 500);

    // When: The app is backgrounded
    h.controller.cancel(h.at(510)).unwrap();

    // Then: Discard issued, canceled outcome
    assert_eq!(
        h.calls().last(),
        Some(&BackendCall::Stop {
            session_id,
            discard: true
        })
    );
    assert_eq!(cancel_reason(&h.outcomes()[0]), Some(CancelReason::External));

    // And: A late finalize ack is stale and dispatches nothing
    let late = h.controller.on_capture_stopped(
        session_id,
        StopAck::Finalized {
            artifact: crate::ArtifactRef {
                locator: "late".to_string(),
                duration: None,
            },
        },
        h.at(600),
    );
    assert!(matches!(late, Err(RecordError::StaleCallback { .. })));
    assert_eq!(h.outcomes().len(), 1);
}

/// WHAT: No new press while a clip is being finalized
/// WHY: Preparing blocks new attempts until it completes or is canceled
#[test]
fn given_preparing_when_pressed_again_then_session_active_error() {
    // Given: Preparing
    let mut h = Harness::new();
    h.recording();
    h.release_at(0.0, 10.0, 500);

    // When: Pressing again
    let sample = PointerSample::new(PointerPhase::Down, 300.0, 600.0, h.at(520));
    let result = h.controller.press(sample);

    // Then: Rejected, state unchanged
    assert!(matches!(result, Err(RecordError::SessionActive { .. })));
    assert_eq!(h.controller.state(), RecordState::Preparing);
}

/// WHAT: Explicit stop outside locked mode is rejected
/// WHY: Unlocked sessions finish on pointer release
#[test]
fn given_unlocked_or_idle_when_stop_called_then_error() {
    // Given: Idle
    let mut h = Harness::new();

    // When/Then: Stop while idle
    assert!(matches!(
        h.controller.stop(h.at(0)),
        Err(RecordError::NoActiveSession { .. })
    ));

    // When/Then: Stop while recording unlocked
    h.recording();
    assert!(matches!(
        h.controller.stop(h.at(100)),
        Err(RecordError::InvalidTransition {
            operation: "stop",
            state: RecordState::Recording,
            ..
        })
    ));
}

/// WHAT: Unrelated second-finger input is excluded from classification
/// WHY: A pinch on an adjacent preview must not cancel or lock
#[test]
fn given_recording_when_second_pointer_moves_then_drag_ignored() {
    // Given: Recording with the slop armed
    let mut h = Harness::new();
    h.recording();
    h.arm_slop(40);

    // When: A second pointer drags far left, and a primary sample
    // taken while both are down also lands far left
    let far_left = ORIGIN_X - 300.0;
    let second = PointerSample::new(PointerPhase::Move, far_left, ORIGIN_Y, h.at(60))
        .with_pointers(1, 2);
    h.controller.pointer(second);
    let primary_during_pinch =
        PointerSample::new(PointerPhase::Move, far_left, ORIGIN_Y, h.at(70)).with_pointers(0, 2);
    h.controller.pointer(primary_during_pinch);

    // Then: Nothing moved
    assert_eq!(h.controller.state(), RecordState::Recording);
    assert_eq!(
        h.controller.session().unwrap().slide_to_cancel_progress(),
        1.0
    );

    // And: Releasing at the origin finalizes
    h.release_at(0.0, 0.0, 100);
    assert_eq!(h.controller.state(), RecordState::Preparing);
}

/// WHAT: Amplitude feeds the session and the sent waveform
/// WHY: Feedback gating reads the smoothed level
#[test]
fn given_recording_when_amplitude_arrives_then_session_level_rises() {
    // Given: Recording
    let mut h = Harness::new();
    let session_id = h.recording();

    // When: Loud samples arrive
    for i in 0..10u64 {
        h.controller
            .on_amplitude(session_id, 0.8, h.at(30 + i * 10))
            .unwrap();
    }

    // Then: The smoothed level moved toward the samples
    let level = h.controller.session().unwrap().amplitude();
    assert!(level > 0.5, "level {level}");

    // And: The waveform of the sent clip carries the peaks
    h.release_at(0.0, 10.0, 200);
    h.finalize_ack(session_id, 220);
    match &h.outcomes()[0] {
        RecordingOutcome::Sent { waveform, .. } => {
            assert!(waveform.iter().any(|&bin| bin > 0));
        }
        other => panic!("expected Sent, got {other:?}"),
    }
}

/// WHAT: Observers see the full tap lifecycle
/// WHY: UI renders purely from state notifications
#[test]
fn given_observer_when_tap_completes_then_sees_each_state_in_order() {
    // Given/When: A full tap-to-send
    let mut h = Harness::new();
    let session_id = h.recording();
    h.release_at(0.0, 10.0, 300);
    h.finalize_ack(session_id, 320);

    // Then: States appear in lifecycle order
    let mut states: Vec<_> = h.snapshots().iter().map(|s| s.state).collect();
    states.dedup();
    assert_eq!(
        states,
        vec![
            RecordState::Entering,
            RecordState::Recording,
            RecordState::Preparing,
            RecordState::Sending,
            RecordState::Idle,
        ]
    );
}

/// WHAT: Mode can only change while idle
/// WHY: A session's mode is fixed for its lifetime
#[test]
fn given_active_session_when_toggling_mode_then_rejected() {
    // Given: Idle in audio mode
    let mut h = Harness::new();

    // When/Then: Toggle while idle switches to video
    assert_eq!(h.controller.toggle_mode().unwrap(), RecordMode::Video);

    // When/Then: Toggle while recording fails
    h.recording();
    assert!(matches!(
        h.controller.toggle_mode(),
        Err(RecordError::SessionActive { .. })
    ));
    assert_eq!(h.controller.session().unwrap().mode(), RecordMode::Video);
}

/// WHAT: Every path through the state machine dispatches exactly one outcome
/// WHY: The send pipeline must never see zero or duplicate outcomes
#[test]
fn given_each_terminal_path_when_driven_to_end_then_exactly_one_outcome() {
    type Path = fn(&mut Harness);

    let paths: [(&str, Path); 9] = [
        ("tap send", |h| {
            let id = h.recording();
            h.release_at(0.0, 10.0, 200);
            h.finalize_ack(id, 220);
        }),
        ("slide cancel", |h| {
            h.recording();
            h.arm_slop(40);
            h.drag_to(100.0, 0.0, 60);
            h.release_at(100.0, 0.0, 80);
        }),
        ("full slide then release", |h| {
            h.recording();
            h.arm_slop(40);
            h.drag_to(200.0, 0.0, 60);
            h.release_at(200.0, 0.0, 80);
        }),
        ("lock then stop", |h| {
            let id = h.recording();
            h.arm_slop(40);
            h.drag_to(0.0, 45.0, 60);
            h.drag_to(0.0, 130.0, 80);
            h.release_at(0.0, 130.0, 100);
            h.controller.stop(h.at(500)).unwrap();
            h.finalize_ack(id, 520);
        }),
        ("lock then cancel twice", |h| {
            h.recording();
            h.arm_slop(40);
            h.drag_to(0.0, 45.0, 60);
            h.drag_to(0.0, 130.0, 80);
            h.controller.cancel(h.at(300)).unwrap();
            assert!(h.controller.cancel(h.at(310)).is_err());
        }),
        ("release before start", |h| {
            let id = h.press(0);
            h.release_at(0.0, 10.0, 20);
            let _ = h.controller.on_capture_started(id, StartAck::Started, h.at(40));
        }),
        ("pointer cancel", |h| {
            h.recording();
            h.pointer(PointerPhase::Cancel, 0.0, 10.0, 50);
            h.release_at(0.0, 10.0, 60);
        }),
        ("video cutoff", |h| {
            h.controller.set_mode(RecordMode::Video).unwrap();
            let id = h.recording();
            h.controller.on_timer(h.at(70_000));
            h.release_at(0.0, 10.0, 70_010);
            h.finalize_ack(id, 70_100);
        }),
        ("finalize then external cancel", |h| {
            let id = h.recording();
            h.release_at(0.0, 10.0, 200);
            h.controller.cancel(h.at(210)).unwrap();
            let _ = h.controller.on_capture_stopped(id, StopAck::Discarded, h.at(230));
        }),
    ];

    for (name, path) in paths {
        // Given: A fresh controller
        let mut h = Harness::new();

        // When: Driving the path
        path(&mut h);

        // Then: One outcome, controller idle
        assert_eq!(h.outcomes().len(), 1, "path {name}");
        assert!(h.controller.is_idle(), "path {name}");
    }
}

/// WHAT: The next timer deadline follows the armed session
/// WHY: Drivers sleep until this instant; a stale deadline would leak
#[test]
fn given_video_session_when_canceled_then_no_deadline_remains() {
    // Given: Video recording
    let mut h = Harness::new();
    h.controller.set_mode(RecordMode::Video).unwrap();
    h.recording();
    assert_eq!(h.controller.next_deadline(), Some(h.at(20 + 1_000)));

    // When: Canceled
    h.controller.cancel(h.at(500)).unwrap();

    // Then: Nothing pending
    assert_eq!(h.controller.next_deadline(), None);
}
