//! Tunable thresholds for gesture classification, locking and timing.
//!
//! None of these are presentation constants. The app layer loads them from
//! configuration and hands a validated [`RecordPolicy`] to the controller.

use crate::{CoreResult, RecordError};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;

/// Gesture thresholds, in the same units as pointer coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct GesturePolicy {
    /// Minimum travel before a drag is treated as intentional.
    pub touch_slop: f32,
    /// Width of the container hosting the record control.
    pub container_width: f32,
    /// Fraction of `container_width` that a full slide-to-cancel spans.
    pub max_cancel_fraction: f32,
    /// Slide-to-cancel progress below which a release cancels.
    pub cancel_threshold: f32,
    /// Clamp for upward travel on the lock axis.
    pub max_lock_distance: f32,
}

/// Two-stage slide-to-lock thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct LockPolicy {
    /// Upward travel that starts the lock sequence.
    pub intent_distance: f32,
    /// Further travel, measured from where the sequence started, that locks.
    pub confirm_distance: f32,
}

/// Display tick and duration ceilings.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingPolicy {
    /// Period of the display tick.
    pub tick_interval: Duration,
    /// Hard ceiling for video messages.
    pub video_duration_limit: Duration,
    /// Optional ceiling for audio messages.
    pub audio_duration_limit: Option<Duration>,
}

/// Smoothing for the advisory amplitude level.
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudePolicy {
    /// Blend factor applied when a sample is louder than the current level.
    pub attack: f32,
    /// Blend factor applied when a sample is quieter than the current level.
    pub release: f32,
    /// Time for the level to halve once samples stop arriving.
    pub decay_half_life: Duration,
}

/// Complete policy for one [`RecordController`](crate::RecordController).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordPolicy {
    /// Gesture classification.
    pub gesture: GesturePolicy,
    /// Slide-to-lock.
    pub lock: LockPolicy,
    /// Timers.
    pub timing: TimingPolicy,
    /// Amplitude smoothing.
    pub amplitude: AmplitudePolicy,
}

impl Default for GesturePolicy {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            container_width: 360.0,
            max_cancel_fraction: 0.35,
            cancel_threshold: 0.3,
            max_lock_distance: 200.0,
        }
    }
}

impl Default for LockPolicy {
    fn default() -> Self {
        Self {
            intent_distance: 40.0,
            confirm_distance: 80.0,
        }
    }
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            video_duration_limit: Duration::from_secs(60),
            audio_duration_limit: None,
        }
    }
}

impl Default for AmplitudePolicy {
    fn default() -> Self {
        Self {
            attack: 0.6,
            release: 0.15,
            decay_half_life: Duration::from_millis(300),
        }
    }
}

impl GesturePolicy {
    /// Leftward travel that corresponds to slide-to-cancel progress 0.
    pub fn max_cancel_distance(&self) -> f32 {
        self.container_width * self.max_cancel_fraction
    }
}

impl RecordPolicy {
    /// Check that thresholds are positive and ordered.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidPolicy`] naming the first violated constraint.
    // Negated comparisons so that NaN fails.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        let g = &self.gesture;
        let l = &self.lock;

        let failure = if !(g.touch_slop >= 0.0) {
            Some("touch_slop must be non-negative")
        } else if !(g.max_cancel_distance() > 0.0) {
            Some("container_width * max_cancel_fraction must be positive")
        } else if !(g.cancel_threshold > 0.0 && g.cancel_threshold < 1.0) {
            Some("cancel_threshold must lie strictly between 0 and 1")
        } else if !(l.intent_distance > 0.0) {
            Some("lock intent_distance must be positive")
        } else if !(l.confirm_distance > l.intent_distance) {
            Some("lock confirm_distance must exceed intent_distance")
        } else if !(g.max_lock_distance >= l.intent_distance + l.confirm_distance) {
            Some("max_lock_distance must leave room for both lock thresholds")
        } else if self.timing.tick_interval.is_zero() {
            Some("tick_interval must be non-zero")
        } else if self.timing.video_duration_limit.is_zero() {
            Some("video_duration_limit must be non-zero")
        } else if !(self.amplitude.attack > 0.0 && self.amplitude.attack <= 1.0)
            || !(self.amplitude.release > 0.0 && self.amplitude.release <= 1.0)
        {
            Some("amplitude attack and release must lie in (0, 1]")
        } else {
            None
        };

        match failure {
            Some(reason) => Err(RecordError::InvalidPolicy {
                reason: reason.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Ok(()),
        }
    }
}
