use crate::{
    GesturePolicy,
    gesture::{PointerPhase, PointerSample},
};

use std::time::Instant;

use tracing::{debug, trace};

/// Classified facts about the record gesture after one pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureFacts {
    /// Phase of the sample that produced these facts.
    pub phase: PointerPhase,
    /// Leftward travel from the origin, clamped.
    pub cancel_distance: f32,
    /// Upward travel from the origin, clamped.
    pub lock_distance: f32,
    /// Whether travel has exceeded the touch slop since pointer-down.
    pub exceeded_slop: bool,
    /// Timestamp of the sample.
    pub timestamp: Instant,
}

/// Turns raw pointer samples for the record control into drag distances.
///
/// Only the pointer that pressed the control is followed. Samples from other
/// pointers, and samples taken while more than one pointer is down, leave
/// the distances untouched.
#[derive(Debug)]
pub struct GestureTracker {
    touch_slop: f32,
    max_cancel_distance: f32,
    max_lock_distance: f32,
    primary: Option<u32>,
    down_at: (f32, f32),
    origin: Option<(f32, f32)>,
    cancel_distance: f32,
    lock_distance: f32,
}

impl GestureTracker {
    /// Tracker using the thresholds from `policy`.
    pub fn new(policy: &GesturePolicy) -> Self {
        Self {
            touch_slop: policy.touch_slop,
            max_cancel_distance: policy.max_cancel_distance(),
            max_lock_distance: policy.max_lock_distance,
            primary: None,
            down_at: (0.0, 0.0),
            origin: None,
            cancel_distance: 0.0,
            lock_distance: 0.0,
        }
    }

    /// Leftward travel that maps to slide-to-cancel progress 0.
    pub fn max_cancel_distance(&self) -> f32 {
        self.max_cancel_distance
    }

    /// Whether a primary pointer is currently being followed.
    pub fn is_tracking(&self) -> bool {
        self.primary.is_some()
    }

    /// Forget the current gesture.
    pub fn reset(&mut self) {
        self.primary = None;
        self.origin = None;
        self.cancel_distance = 0.0;
        self.lock_distance = 0.0;
    }

    /// Feed one sample. Returns `None` when the sample is excluded.
    pub fn track(&mut self, sample: &PointerSample) -> Option<GestureFacts> {
        match (self.primary, sample.phase) {
            (None, PointerPhase::Down) => {
                self.reset();
                self.primary = Some(sample.pointer_id);
                self.down_at = (sample.x, sample.y);
                trace!(pointer_id = sample.pointer_id, "Primary pointer down");
                Some(self.facts(sample))
            }
            (None, _) => None,
            // Cancel applies to the whole gesture, whichever pointer reports it.
            (Some(primary), PointerPhase::Cancel) if primary != sample.pointer_id => {
                debug!(pointer_id = sample.pointer_id, "Gesture cancelled via secondary pointer");
                let facts = self.facts(sample);
                self.primary = None;
                Some(facts)
            }
            (Some(primary), _) if primary != sample.pointer_id => {
                debug!(
                    pointer_id = sample.pointer_id,
                    phase = ?sample.phase,
                    "Ignoring secondary pointer"
                );
                None
            }
            (Some(_), PointerPhase::Down) => None,
            (Some(_), PointerPhase::Move) => {
                if sample.pointer_count > 1 {
                    trace!(pointer_count = sample.pointer_count, "Multi-touch move excluded");
                    return None;
                }
                self.update_distances(sample);
                Some(self.facts(sample))
            }
            (Some(_), PointerPhase::Up | PointerPhase::Cancel) => {
                if sample.pointer_count <= 1 {
                    self.update_distances(sample);
                }
                let facts = self.facts(sample);
                self.primary = None;
                Some(facts)
            }
        }
    }

    fn update_distances(&mut self, sample: &PointerSample) {
        let origin = match self.origin {
            Some(origin) => origin,
            None => {
                let dx = sample.x - self.down_at.0;
                let dy = sample.y - self.down_at.1;
                if dx.hypot(dy) <= self.touch_slop {
                    return;
                }
                // Distances are measured from the first sample past the slop.
                self.origin = Some((sample.x, sample.y));
                debug!(x = sample.x, y = sample.y, "Touch slop exceeded");
                return;
            }
        };

        self.cancel_distance = (origin.0 - sample.x).clamp(0.0, self.max_cancel_distance);
        self.lock_distance = (origin.1 - sample.y).clamp(0.0, self.max_lock_distance);
    }

    fn facts(&self, sample: &PointerSample) -> GestureFacts {
        GestureFacts {
            phase: sample.phase,
            cancel_distance: self.cancel_distance,
            lock_distance: self.lock_distance,
            exceeded_slop: self.origin.is_some(),
            timestamp: sample.timestamp,
        }
    }
}
