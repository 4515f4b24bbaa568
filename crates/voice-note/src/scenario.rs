//! Scripted gestures on the record button.
//!
//! A [`Scenario`] expands into [`GestureStep`]s that [`ScenarioPlayer`] turns
//! into pointer samples and UI commands, the way a touch screen and the
//! composer buttons would. [`run_scenario`] wires the controller task, the
//! simulated backend and the outbox together and waits for the single
//! outcome of the session.

use crate::{
    App, AppCommand, AppError, AppResult, IndicatorState, StatePublisher, app::now,
    config::Config,
};

use voice_note_core::{PointerPhase, PointerSample, RecordingOutcome, StateSnapshot};

use std::{panic::Location, time::Duration};

use clap::ValueEnum;
use error_location::ErrorLocation;
use tokio::{
    sync::{mpsc, watch},
    time,
};
use tracing::{debug, info, instrument};

/// Where the scripted finger presses the record button.
pub(crate) const PRESS_X: f32 = 320.0;
pub(crate) const PRESS_Y: f32 = 640.0;

/// Delay after each pointer or button step (one 60 Hz frame).
pub(crate) const FRAME: Duration = Duration::from_millis(16);

/// Extra time allowed for the outcome beyond the backend latencies.
const OUTCOME_GRACE: Duration = Duration::from_secs(2);

const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Canned interaction with the record button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Hold, release in place: voice message sent.
    Tap,
    /// Hold, slide left past the threshold, release: canceled.
    SlideCancel,
    /// Slide past the threshold, come back, release: sent.
    Recover,
    /// Slide up to lock, lift the finger, tap send.
    LockSend,
    /// Slide up to lock, lift the finger, tap trash.
    LockDiscard,
    /// Switch to video, lock, and wait for the duration ceiling.
    VideoCutoff,
    /// Hold and start sliding until the system steals the touch.
    Interrupted,
}

/// One scripted action. Offsets are measured left of and above the press
/// point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureStep {
    /// Do nothing for a while.
    Wait(Duration),
    /// Finger down on the record button.
    Press,
    /// Finger moved.
    Drag {
        /// Leftward offset.
        left: f32,
        /// Upward offset.
        up: f32,
    },
    /// Finger lifted.
    Release {
        /// Leftward offset.
        left: f32,
        /// Upward offset.
        up: f32,
    },
    /// The system took the touch away.
    PointerCancel,
    /// Send button.
    Stop,
    /// Trash button.
    Discard,
    /// Voice/video switch.
    ToggleMode,
}

impl Scenario {
    /// Steps for this scenario under `config`.
    pub fn steps(&self, config: &Config) -> Vec<GestureStep> {
        use GestureStep::*;

        let hold = Wait(Duration::from_millis(800));
        let lock_path = [
            Drag { left: 0.0, up: 12.0 },
            Drag { left: 0.0, up: 40.0 },
            Drag { left: 0.0, up: 70.0 },
            Drag { left: 0.0, up: 110.0 },
            Drag { left: 0.0, up: 160.0 },
            Release { left: 0.0, up: 160.0 },
        ];

        match self {
            Scenario::Tap => vec![Press, hold, Release { left: 0.0, up: 0.0 }],
            Scenario::SlideCancel => vec![
                Press,
                hold,
                Drag { left: 12.0, up: 0.0 },
                Drag { left: 40.0, up: 0.0 },
                Drag { left: 80.0, up: 0.0 },
                Drag { left: 110.0, up: 0.0 },
                Release { left: 110.0, up: 0.0 },
            ],
            Scenario::Recover => vec![
                Press,
                hold,
                Drag { left: 12.0, up: 0.0 },
                Drag { left: 60.0, up: 0.0 },
                Drag { left: 110.0, up: 0.0 },
                Drag { left: 60.0, up: 0.0 },
                Drag { left: 20.0, up: 0.0 },
                Release { left: 20.0, up: 0.0 },
            ],
            Scenario::LockSend => {
                let mut steps = vec![Press, hold];
                steps.extend(lock_path);
                steps.extend([Wait(Duration::from_millis(1_500)), Stop]);
                steps
            }
            Scenario::LockDiscard => {
                let mut steps = vec![Press, hold];
                steps.extend(lock_path);
                steps.extend([Wait(Duration::from_millis(1_500)), Discard]);
                steps
            }
            Scenario::VideoCutoff => {
                let past_ceiling = Duration::from_millis(config.timing.video_duration_limit_ms)
                    + Duration::from_millis(500);
                let mut steps = vec![ToggleMode, Press, hold];
                steps.extend(lock_path);
                steps.push(Wait(past_ceiling));
                steps
            }
            Scenario::Interrupted => vec![
                Press,
                hold,
                Drag { left: 12.0, up: 0.0 },
                Drag { left: 30.0, up: 0.0 },
                PointerCancel,
            ],
        }
    }
}

/// Plays gesture steps into the controller's command channel.
pub struct ScenarioPlayer {
    steps: Vec<GestureStep>,
    command_tx: mpsc::Sender<AppCommand>,
}

impl ScenarioPlayer {
    /// Player sending to `command_tx`.
    pub fn new(steps: Vec<GestureStep>, command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self { steps, command_tx }
    }

    /// Play every step, stopping early if the controller shuts down.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        for step in &self.steps {
            if *shutdown_rx.borrow() {
                debug!("Controller shut down, scenario stopped");
                break;
            }

            let command = match *step {
                GestureStep::Wait(duration) => {
                    tokio::select! {
                        () = time::sleep(duration) => {}
                        _ = shutdown_rx.changed() => {}
                    }
                    continue;
                }
                GestureStep::Press => AppCommand::Press {
                    sample: sample(PointerPhase::Down, 0.0, 0.0),
                },
                GestureStep::Drag { left, up } => AppCommand::Pointer {
                    sample: sample(PointerPhase::Move, left, up),
                },
                GestureStep::Release { left, up } => AppCommand::Pointer {
                    sample: sample(PointerPhase::Up, left, up),
                },
                GestureStep::PointerCancel => AppCommand::Pointer {
                    sample: sample(PointerPhase::Cancel, 0.0, 0.0),
                },
                GestureStep::Stop => AppCommand::Stop,
                GestureStep::Discard => AppCommand::Discard,
                GestureStep::ToggleMode => AppCommand::ToggleMode,
            };

            debug!(step = ?step, "Gesture step");
            self.send(command).await?;
            time::sleep(FRAME).await;
        }

        Ok(())
    }

    async fn send(&self, command: AppCommand) -> AppResult<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send gesture command: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

fn sample(phase: PointerPhase, left: f32, up: f32) -> PointerSample {
    PointerSample::new(phase, PRESS_X - left, PRESS_Y - up, now())
}

/// Result of one scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    /// The scenario that ran.
    pub scenario: Scenario,
    /// The single outcome of its session.
    pub outcome: RecordingOutcome,
    /// Last state published to renderers.
    pub final_snapshot: StateSnapshot,
    /// Last indicator shown.
    pub final_indicator: IndicatorState,
}

/// Run `scenario` against a fresh controller and return its outcome.
#[instrument(skip(config))]
pub async fn run_scenario(config: &Config, scenario: Scenario) -> AppResult<ScenarioReport> {
    let policy = config.to_policy()?;

    let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (outbox_tx, mut outbox_rx) = mpsc::unbounded_channel();

    let mut app = App::new(
        policy,
        config.backend.clone(),
        command_tx.clone(),
        command_rx,
        outbox_tx,
        shutdown_tx,
    )?;
    let (publisher, snapshot_rx, indicator_rx) = StatePublisher::new(app.controller.snapshot());
    app.controller.subscribe(Box::new(publisher));

    let app_handle = tokio::spawn(app.run());

    let player = ScenarioPlayer::new(scenario.steps(config), command_tx.clone());
    let played = player.run(shutdown_rx).await;

    let wait = Duration::from_millis(
        config.backend.start_latency_ms + config.backend.finalize_latency_ms,
    ) + OUTCOME_GRACE;
    let received = time::timeout(wait, outbox_rx.recv()).await;

    if let Err(e) = command_tx.send(AppCommand::Shutdown).await {
        debug!(error = %e, "Controller already stopped");
    }
    let stopped = app_handle.await.map_err(|e| AppError::ScenarioIncomplete {
        reason: format!("Controller task failed: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;
    stopped?;
    played?;

    let outcome = match received {
        Ok(Some(outcome)) => outcome,
        Ok(None) => {
            return Err(AppError::ScenarioIncomplete {
                reason: "Outbox closed before an outcome arrived".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Err(_) => {
            return Err(AppError::ScenarioIncomplete {
                reason: format!("No outcome within {:?}", wait),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    };

    let report = ScenarioReport {
        scenario,
        outcome,
        final_snapshot: snapshot_rx.borrow().clone(),
        final_indicator: *indicator_rx.borrow(),
    };

    info!(
        scenario = ?report.scenario,
        session_id = %report.outcome.session_id(),
        outcome = ?report.outcome,
        "Scenario finished"
    );

    Ok(report)
}
