//! Capture backend that stands in for microphone and camera hardware.
//!
//! Every request is answered asynchronously: start and stop are acknowledged
//! after configurable latencies by posting [`AppCommand`]s back to the
//! controller task, and a level meter reports amplitude while capturing.
//! Must be driven from inside a tokio runtime.

use crate::{AppCommand, config::BackendConfig};

use voice_note_core::{ArtifactRef, CaptureBackend, RecordMode, SessionId, StartAck, StopAck};

use std::collections::HashMap;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant},
};
use tracing::{debug, info, instrument, warn};

struct ActiveCapture {
    mode: RecordMode,
    requested_at: Instant,
    meter: JoinHandle<()>,
}

/// Simulated microphone/camera.
pub struct SimulatedBackend {
    config: BackendConfig,
    command_tx: mpsc::Sender<AppCommand>,
    captures: HashMap<SessionId, ActiveCapture>,
}

impl SimulatedBackend {
    /// Backend posting its acknowledgements to `command_tx`.
    pub fn new(config: BackendConfig, command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self {
            config,
            command_tx,
            captures: HashMap::new(),
        }
    }

    /// Number of captures that have been started and not yet stopped.
    pub fn active_captures(&self) -> usize {
        self.captures.len()
    }

    /// Abort every running capture without acknowledging it.
    pub fn shutdown(&mut self) {
        for (session_id, capture) in self.captures.drain() {
            capture.meter.abort();
            debug!(session_id = %session_id, "Capture aborted on shutdown");
        }
    }
}

impl CaptureBackend for SimulatedBackend {
    fn check_preconditions(&mut self, mode: RecordMode) -> Result<(), String> {
        if self.config.permission_granted {
            return Ok(());
        }

        let device = match mode {
            RecordMode::Audio => "microphone",
            RecordMode::Video => "camera",
        };
        Err(format!("{device} permission not granted"))
    }

    #[instrument(skip(self))]
    fn start_capture(&mut self, session_id: SessionId, mode: RecordMode) {
        let tx = self.command_tx.clone();
        let start_latency = self.config.start_latency();

        // A device that never opens holds no capture, and gets no stop.
        if self.config.fail_start {
            tokio::spawn(async move {
                time::sleep(start_latency).await;
                let ack = StartAck::Failed {
                    reason: "simulated device failed to open".to_string(),
                };
                post(&tx, AppCommand::CaptureStarted { session_id, ack }).await;
            });
            debug!(session_id = %session_id, mode = ?mode, "Capture requested, device will fail");
            return;
        }

        let interval = self.config.amplitude_interval();
        let device_limit = self.config.device_limit_ms.map(time::Duration::from_millis);

        let meter = tokio::spawn(async move {
            time::sleep(start_latency).await;

            let started = Instant::now();
            let ack = StartAck::Started;
            if !post(&tx, AppCommand::CaptureStarted { session_id, ack }).await {
                return;
            }

            let mut ticker = time::interval_at(started + interval, interval);
            let mut frame: u32 = 0;
            loop {
                ticker.tick().await;
                frame = frame.wrapping_add(1);

                if device_limit.is_some_and(|limit| started.elapsed() >= limit) {
                    info!(session_id = %session_id, "Device recording limit reached");
                    post(&tx, AppCommand::DurationCutoff { session_id }).await;
                    return;
                }

                let level = simulated_level(frame);
                if !post(&tx, AppCommand::Amplitude { session_id, level }).await {
                    return;
                }
            }
        });

        self.captures.insert(
            session_id,
            ActiveCapture {
                mode,
                requested_at: Instant::now(),
                meter,
            },
        );

        debug!(session_id = %session_id, mode = ?mode, "Capture requested");
    }

    #[instrument(skip(self))]
    fn stop_capture(&mut self, session_id: SessionId, discard: bool) {
        let Some(capture) = self.captures.remove(&session_id) else {
            warn!(session_id = %session_id, "Stop requested for unknown capture");
            return;
        };
        capture.meter.abort();

        let captured = capture
            .requested_at
            .elapsed()
            .saturating_sub(self.config.start_latency());
        let finalize_latency = self.config.finalize_latency();
        let min_duration = self.config.min_duration();
        let fail_finalize = self.config.fail_finalize;
        let mode = capture.mode;
        let tx = self.command_tx.clone();

        tokio::spawn(async move {
            time::sleep(finalize_latency).await;

            let ack = if discard {
                StopAck::Discarded
            } else if fail_finalize {
                StopAck::Failed {
                    reason: "simulated encoder error".to_string(),
                }
            } else if captured < min_duration {
                StopAck::TooShort
            } else {
                let kind = match mode {
                    RecordMode::Audio => "voice",
                    RecordMode::Video => "round",
                };
                StopAck::Finalized {
                    artifact: ArtifactRef {
                        locator: format!("sim://{kind}/{session_id}"),
                        duration: Some(captured),
                    },
                }
            };

            debug!(session_id = %session_id, ack = ?ack, "Capture stopped");
            post(&tx, AppCommand::CaptureStopped { session_id, ack }).await;
        });
    }
}

async fn post(tx: &mpsc::Sender<AppCommand>, command: AppCommand) -> bool {
    match tx.send(command).await {
        Ok(()) => true,
        Err(e) => {
            debug!(error = %e, "Controller channel closed");
            false
        }
    }
}

/// Speech-like envelope in [0, 1].
fn simulated_level(frame: u32) -> f32 {
    let t = frame as f32 * 0.35;
    (0.5 + 0.4 * t.sin() * (t * 0.37).cos()).clamp(0.0, 1.0)
}
