use crate::config::{
    default_cancel_threshold, default_container_width, default_max_cancel_fraction,
    default_max_lock_distance, default_touch_slop,
};

use voice_note_core::GesturePolicy;

use serde::{Deserialize, Serialize};

/// Gesture classification thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Travel before a drag counts as intentional.
    #[serde(default = "default_touch_slop")]
    pub touch_slop: f32,
    /// Width of the composer hosting the record button.
    #[serde(default = "default_container_width")]
    pub container_width: f32,
    /// Fraction of the container a full slide-to-cancel spans.
    #[serde(default = "default_max_cancel_fraction")]
    pub max_cancel_fraction: f32,
    /// Releasing below this slide-to-cancel progress cancels.
    #[serde(default = "default_cancel_threshold")]
    pub cancel_threshold: f32,
    /// Clamp for upward travel.
    #[serde(default = "default_max_lock_distance")]
    pub max_lock_distance: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: default_touch_slop(),
            container_width: default_container_width(),
            max_cancel_fraction: default_max_cancel_fraction(),
            cancel_threshold: default_cancel_threshold(),
            max_lock_distance: default_max_lock_distance(),
        }
    }
}

impl From<&GestureConfig> for GesturePolicy {
    fn from(config: &GestureConfig) -> Self {
        GesturePolicy {
            touch_slop: config.touch_slop,
            container_width: config.container_width,
            max_cancel_fraction: config.max_cancel_fraction,
            cancel_threshold: config.cancel_threshold,
            max_lock_distance: config.max_lock_distance,
        }
    }
}
