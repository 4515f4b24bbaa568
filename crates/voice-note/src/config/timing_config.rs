use crate::config::{
    default_audio_duration_limit_ms, default_tick_interval_ms, default_video_duration_limit_ms,
};

use voice_note_core::TimingPolicy;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Display tick and duration ceilings, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Elapsed-time display tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Hard ceiling for video messages.
    #[serde(default = "default_video_duration_limit_ms")]
    pub video_duration_limit_ms: u64,
    /// Ceiling for voice messages (None = unlimited).
    #[serde(default = "default_audio_duration_limit_ms")]
    pub audio_duration_limit_ms: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            video_duration_limit_ms: default_video_duration_limit_ms(),
            audio_duration_limit_ms: default_audio_duration_limit_ms(),
        }
    }
}

impl From<&TimingConfig> for TimingPolicy {
    fn from(config: &TimingConfig) -> Self {
        TimingPolicy {
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            video_duration_limit: Duration::from_millis(config.video_duration_limit_ms),
            audio_duration_limit: config.audio_duration_limit_ms.map(Duration::from_millis),
        }
    }
}
