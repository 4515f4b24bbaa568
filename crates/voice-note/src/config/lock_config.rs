use crate::config::{default_lock_confirm_distance, default_lock_intent_distance};

use voice_note_core::LockPolicy;

use serde::{Deserialize, Serialize};

/// Slide-to-lock thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockConfig {
    /// Upward travel that starts the lock sequence.
    #[serde(default = "default_lock_intent_distance")]
    pub intent_distance: f32,
    /// Further upward travel that locks.
    #[serde(default = "default_lock_confirm_distance")]
    pub confirm_distance: f32,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            intent_distance: default_lock_intent_distance(),
            confirm_distance: default_lock_confirm_distance(),
        }
    }
}

impl From<&LockConfig> for LockPolicy {
    fn from(config: &LockConfig) -> Self {
        LockPolicy {
            intent_distance: config.intent_distance,
            confirm_distance: config.confirm_distance,
        }
    }
}
