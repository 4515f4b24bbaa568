//! Session-scoped display tick and duration cutoff.
//!
//! The service is polled rather than callback driven: the owner asks for
//! [`TimerService::next_deadline`], sleeps until then (or until any other
//! input arrives) and calls [`TimerService::poll`]. A late poll still
//! reports the cutoff, so dropped frames cannot skip it.

use crate::SessionId;

use std::time::{Duration, Instant};

use tracing::{debug, trace};

/// Event produced by [`TimerService::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Display tick. Late polls coalesce into a single tick.
    Tick {
        /// Session that armed the timer.
        session_id: SessionId,
        /// Time since the session started recording.
        elapsed: Duration,
    },
    /// The duration ceiling was reached. Fires at most once per arming.
    Cutoff {
        /// Session that armed the timer.
        session_id: SessionId,
        /// Time since the session started recording.
        elapsed: Duration,
    },
}

#[derive(Debug)]
struct ArmedTimer {
    session_id: SessionId,
    started_at: Instant,
    next_tick: Instant,
    cutoff_at: Option<Instant>,
}

/// Monotonic elapsed time, display tick and cutoff for one session at a time.
#[derive(Debug)]
pub struct TimerService {
    tick_interval: Duration,
    armed: Option<ArmedTimer>,
}

impl TimerService {
    /// Timer with the given display tick period.
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            armed: None,
        }
    }

    /// Arm for `session_id`, replacing anything previously armed.
    pub fn start(&mut self, session_id: SessionId, now: Instant, cutoff: Option<Duration>) {
        if let Some(previous) = self.armed.take() {
            debug!(
                previous = %previous.session_id,
                session_id = %session_id,
                "Replacing armed timer"
            );
        }

        self.armed = Some(ArmedTimer {
            session_id,
            started_at: now,
            next_tick: now + self.tick_interval,
            cutoff_at: cutoff.map(|limit| now + limit),
        });

        debug!(session_id = %session_id, cutoff_ms = ?cutoff.map(|c| c.as_millis()), "Timer armed");
    }

    /// Disarm. Pending ticks and the cutoff are dropped.
    pub fn cancel(&mut self) {
        if let Some(armed) = self.armed.take() {
            trace!(session_id = %armed.session_id, "Timer cancelled");
        }
    }

    /// Session the timer is armed for, if any.
    pub fn session_id(&self) -> Option<SessionId> {
        self.armed.as_ref().map(|a| a.session_id)
    }

    /// Time since the armed session started, or `None` when disarmed.
    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.armed
            .as_ref()
            .map(|a| now.saturating_duration_since(a.started_at))
    }

    /// Earliest instant at which [`poll`](Self::poll) has something to report.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.armed.as_ref().map(|a| match a.cutoff_at {
            Some(cutoff) => cutoff.min(a.next_tick),
            None => a.next_tick,
        })
    }

    /// Report every event due at `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerEvent> {
        let tick_interval = self.tick_interval;
        let Some(armed) = self.armed.as_mut() else {
            return Vec::new();
        };

        let elapsed = now.saturating_duration_since(armed.started_at);
        let mut events = Vec::with_capacity(2);

        if now >= armed.next_tick {
            events.push(TimerEvent::Tick {
                session_id: armed.session_id,
                elapsed,
            });
            let ticks_passed = elapsed.as_nanos() / tick_interval.as_nanos().max(1);
            let next = u32::try_from(ticks_passed + 1).unwrap_or(u32::MAX);
            armed.next_tick = armed.started_at + tick_interval.saturating_mul(next);
        }

        if armed.cutoff_at.is_some_and(|cutoff| now >= cutoff) {
            armed.cutoff_at = None;
            events.push(TimerEvent::Cutoff {
                session_id: armed.session_id,
                elapsed,
            });
        }

        events
    }
}
