//! Send pipeline for finished recordings.
//!
//! Receives exactly one outcome per session from the controller. Sent clips
//! are queued as outgoing messages; canceled sessions are logged and dropped.

use voice_note_core::{OutcomeSink, RecordingOutcome};

use tokio::sync::mpsc;
use tracing::{info, warn};

/// Hands outcomes to the outgoing message queue.
pub struct OutputHandler {
    pub(crate) outbox_tx: mpsc::UnboundedSender<RecordingOutcome>,
    pub(crate) sent: usize,
    pub(crate) dropped: usize,
}

impl OutputHandler {
    /// Create a handler feeding `outbox_tx`.
    pub fn new(outbox_tx: mpsc::UnboundedSender<RecordingOutcome>) -> Self {
        Self {
            outbox_tx,
            sent: 0,
            dropped: 0,
        }
    }
}

impl OutcomeSink for OutputHandler {
    fn on_recording_outcome(&mut self, outcome: RecordingOutcome) {
        match &outcome {
            RecordingOutcome::Sent {
                session_id,
                mode,
                artifact,
                duration,
                waveform,
            } => {
                self.sent += 1;
                info!(
                    session_id = %session_id,
                    mode = ?mode,
                    locator = %artifact.locator,
                    duration_ms = duration.as_millis(),
                    waveform_bins = waveform.len(),
                    "Message queued for sending"
                );
            }
            RecordingOutcome::Canceled {
                session_id,
                mode,
                reason,
            } => {
                self.dropped += 1;
                info!(
                    session_id = %session_id,
                    mode = ?mode,
                    reason = %reason,
                    "Recording dropped"
                );
            }
        }

        if self.outbox_tx.send(outcome).is_err() {
            warn!("Outbox closed, outcome not delivered");
        }
    }
}
