use crate::{AppCommand, AppResult, OutputHandler, SimulatedBackend, config::BackendConfig};

use voice_note_core::{RecordController, RecordPolicy, RecordingOutcome};

use tokio::{
    sync::{mpsc, watch},
    time,
};
use tracing::{debug, info, instrument, warn};

/// Current time on the runtime clock.
///
/// Goes through tokio so that paused-clock tests and the controller agree.
pub(crate) fn now() -> std::time::Instant {
    time::Instant::now().into_std()
}

/// Controller task state.
///
/// Owns the record controller exclusively. UI input and backend
/// acknowledgements arrive over `command_rx`; timer deadlines are slept on
/// in the same `select!`, so every transition happens on this task.
pub struct App {
    pub(crate) controller: RecordController<SimulatedBackend, OutputHandler>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

impl App {
    /// Wire a controller to the simulated backend and the outbox.
    #[track_caller]
    pub(crate) fn new(
        policy: RecordPolicy,
        backend_config: BackendConfig,
        command_tx: mpsc::Sender<AppCommand>,
        command_rx: mpsc::Receiver<AppCommand>,
        outbox_tx: mpsc::UnboundedSender<RecordingOutcome>,
        shutdown_tx: watch::Sender<bool>,
    ) -> AppResult<Self> {
        let backend = SimulatedBackend::new(backend_config, command_tx);
        let output = OutputHandler::new(outbox_tx);
        let controller = RecordController::new(policy, backend, output)?;

        Ok(Self {
            controller,
            command_rx,
            shutdown_tx,
        })
    }

    /// Run the controller event loop until shutdown.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Voice-note controller starting");

        loop {
            let deadline = self.controller.next_deadline();

            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(AppCommand::Shutdown) => {
                        info!("Shutdown requested");
                        break;
                    }
                    Some(command) => {
                        if let Err(e) = self.handle_command(command) {
                            if e.is_stale_callback() {
                                debug!(error = ?e, "Stale backend callback ignored");
                            } else {
                                warn!(error = ?e, "Command rejected");
                            }
                        }
                    }
                    None => {
                        info!("All channels closed, shutting down");
                        break;
                    }
                },

                () = wait_until(deadline) => {
                    self.controller.on_timer(now());
                }
            }
        }

        if !self.controller.is_idle() {
            info!(state = ?self.controller.state(), "Canceling active session on shutdown");
            self.controller.cancel(now())?;
        }
        let active_captures = self.controller.backend().active_captures();
        if active_captures > 0 {
            debug!(active_captures, "Aborting captures still running");
        }
        self.controller.backend_mut().shutdown();

        let output = self.controller.sink();
        info!(
            sent = output.sent,
            dropped = output.dropped,
            "Voice-note controller shut down"
        );

        let _ = self.shutdown_tx.send(true);

        Ok(())
    }

    /// Feed one command to the controller.
    #[instrument(level = "debug", skip(self))]
    fn handle_command(&mut self, command: AppCommand) -> AppResult<()> {
        let now = now();

        match command {
            AppCommand::Press { sample } => {
                let session_id = self.controller.press(sample)?;
                debug!(session_id = %session_id, "Press accepted");
            }
            AppCommand::Pointer { sample } => self.controller.pointer(sample),
            AppCommand::Stop => self.controller.stop(now)?,
            AppCommand::Discard => self.controller.discard(now)?,
            AppCommand::Cancel => self.controller.cancel(now)?,
            AppCommand::ToggleMode => {
                let mode = self.controller.toggle_mode()?;
                info!(mode = ?mode, "Record mode toggled");
            }
            AppCommand::CaptureStarted { session_id, ack } => {
                self.controller.on_capture_started(session_id, ack, now)?;
            }
            AppCommand::CaptureStopped { session_id, ack } => {
                self.controller.on_capture_stopped(session_id, ack, now)?;
            }
            AppCommand::Amplitude { session_id, level } => {
                self.controller.on_amplitude(session_id, level, now)?;
            }
            AppCommand::DurationCutoff { session_id } => {
                self.controller.on_duration_cutoff(session_id, now)?;
            }
            AppCommand::Shutdown => {}
        }

        Ok(())
    }
}

async fn wait_until(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
