use crate::LockPolicy;

/// Result of feeding a lock-axis distance to a [`LockTransition`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LockStep {
    /// Still between the two thresholds.
    Pending {
        /// Travel from the origin toward the confirm threshold, in [0, 1].
        progress: f32,
    },
    /// Confirm threshold passed; the session locks.
    Complete,
    /// Pointer fell back below the intent threshold.
    Aborted,
}

/// One-shot slide-to-lock sequence.
///
/// Started when upward travel crosses the intent threshold. The offset at
/// that moment becomes the origin, and the lock only completes once the
/// pointer travels a further `confirm_distance` from it. Small vertical
/// jitter around the intent threshold therefore never locks.
#[derive(Debug, Clone, PartialEq)]
pub struct LockTransition {
    origin: f32,
    intent_distance: f32,
    confirm_distance: f32,
}

impl LockTransition {
    /// Snapshot `origin` (current lock-axis distance) and start the sequence.
    pub fn begin(origin: f32, policy: &LockPolicy) -> Self {
        Self {
            origin,
            intent_distance: policy.intent_distance,
            confirm_distance: policy.confirm_distance,
        }
    }

    /// Lock-axis distance captured by [`begin`](Self::begin).
    pub fn origin(&self) -> f32 {
        self.origin
    }

    /// Feed the current lock-axis distance.
    pub fn advance(&self, lock_distance: f32) -> LockStep {
        if lock_distance < self.intent_distance {
            return LockStep::Aborted;
        }

        let offset = (lock_distance - self.origin).max(0.0);
        if offset >= self.confirm_distance {
            LockStep::Complete
        } else {
            LockStep::Pending {
                progress: offset / self.confirm_distance,
            }
        }
    }
}
