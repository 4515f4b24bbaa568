use crate::IndicatorState;

use voice_note_core::{StateObserver, StateSnapshot};

use tokio::sync::watch;
use tracing::{info, trace};

/// Publishes controller snapshots to renderers over a watch channel.
///
/// Renderers only ever need the latest snapshot, so intermediate ones are
/// overwritten. Indicator changes are logged.
pub struct StatePublisher {
    snapshot_tx: watch::Sender<StateSnapshot>,
    indicator_tx: watch::Sender<IndicatorState>,
}

impl StatePublisher {
    /// Publisher seeded with `initial`.
    pub fn new(
        initial: StateSnapshot,
    ) -> (
        Self,
        watch::Receiver<StateSnapshot>,
        watch::Receiver<IndicatorState>,
    ) {
        let indicator = IndicatorState::from(&initial);
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);
        let (indicator_tx, indicator_rx) = watch::channel(indicator);

        (
            Self {
                snapshot_tx,
                indicator_tx,
            },
            snapshot_rx,
            indicator_rx,
        )
    }
}

impl StateObserver for StatePublisher {
    fn on_state_changed(&mut self, snapshot: &StateSnapshot) {
        let indicator = IndicatorState::from(snapshot);

        let changed = self.indicator_tx.send_if_modified(|current| {
            if *current == indicator {
                return false;
            }
            *current = indicator;
            true
        });
        if changed {
            info!(
                indicator = ?indicator,
                state = ?snapshot.state,
                session_id = ?snapshot.session_id,
                "Indicator changed"
            );
        }

        trace!(
            state = ?snapshot.state,
            slide_to_cancel = snapshot.slide_to_cancel_progress,
            lock = snapshot.lock_progress,
            lock_confirm = snapshot.lock_confirm_progress,
            elapsed_ms = snapshot.elapsed.as_millis(),
            amplitude = snapshot.amplitude,
            "State snapshot"
        );

        self.snapshot_tx.send_replace(snapshot.clone());
    }
}
