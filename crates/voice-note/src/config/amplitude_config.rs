use crate::config::{default_attack, default_decay_half_life_ms, default_release};

use voice_note_core::AmplitudePolicy;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Smoothing of the live amplitude level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeConfig {
    /// Blend toward louder samples.
    #[serde(default = "default_attack")]
    pub attack: f32,
    /// Blend toward quieter samples.
    #[serde(default = "default_release")]
    pub release: f32,
    /// Half-life of the level once samples stop.
    #[serde(default = "default_decay_half_life_ms")]
    pub decay_half_life_ms: u64,
}

impl Default for AmplitudeConfig {
    fn default() -> Self {
        Self {
            attack: default_attack(),
            release: default_release(),
            decay_half_life_ms: default_decay_half_life_ms(),
        }
    }
}

impl From<&AmplitudeConfig> for AmplitudePolicy {
    fn from(config: &AmplitudeConfig) -> Self {
        AmplitudePolicy {
            attack: config.attack,
            release: config.release,
            decay_half_life: Duration::from_millis(config.decay_half_life_ms),
        }
    }
}
