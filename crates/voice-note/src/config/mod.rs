mod amplitude_config;
mod backend_config;
#[allow(clippy::module_inception)]
mod config;
mod gesture_config;
mod lock_config;
mod timing_config;

pub(crate) use {
    amplitude_config::AmplitudeConfig, backend_config::BackendConfig, config::Config,
    gesture_config::GestureConfig, lock_config::LockConfig, timing_config::TimingConfig,
};

use voice_note_core::{AmplitudePolicy, GesturePolicy, LockPolicy, TimingPolicy};

use std::time::Duration;

// Controller thresholds default to the core policy; only the simulated
// device has defaults of its own.
pub(crate) const DEFAULT_START_LATENCY_MS: u64 = 80;
pub(crate) const DEFAULT_FINALIZE_LATENCY_MS: u64 = 150;
pub(crate) const DEFAULT_AMPLITUDE_INTERVAL_MS: u64 = 100;
pub(crate) const DEFAULT_MIN_DURATION_MS: u64 = 300;

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

pub(crate) fn default_touch_slop() -> f32 {
    GesturePolicy::default().touch_slop
}

pub(crate) fn default_container_width() -> f32 {
    GesturePolicy::default().container_width
}

pub(crate) fn default_max_cancel_fraction() -> f32 {
    GesturePolicy::default().max_cancel_fraction
}

pub(crate) fn default_cancel_threshold() -> f32 {
    GesturePolicy::default().cancel_threshold
}

pub(crate) fn default_max_lock_distance() -> f32 {
    GesturePolicy::default().max_lock_distance
}

pub(crate) fn default_lock_intent_distance() -> f32 {
    LockPolicy::default().intent_distance
}

pub(crate) fn default_lock_confirm_distance() -> f32 {
    LockPolicy::default().confirm_distance
}

pub(crate) fn default_tick_interval_ms() -> u64 {
    millis(TimingPolicy::default().tick_interval)
}

pub(crate) fn default_video_duration_limit_ms() -> u64 {
    millis(TimingPolicy::default().video_duration_limit)
}

pub(crate) fn default_audio_duration_limit_ms() -> Option<u64> {
    TimingPolicy::default().audio_duration_limit.map(millis)
}

pub(crate) fn default_attack() -> f32 {
    AmplitudePolicy::default().attack
}

pub(crate) fn default_release() -> f32 {
    AmplitudePolicy::default().release
}

pub(crate) fn default_decay_half_life_ms() -> u64 {
    millis(AmplitudePolicy::default().decay_half_life)
}

pub(crate) fn default_start_latency_ms() -> u64 {
    DEFAULT_START_LATENCY_MS
}

pub(crate) fn default_finalize_latency_ms() -> u64 {
    DEFAULT_FINALIZE_LATENCY_MS
}

pub(crate) fn default_amplitude_interval_ms() -> u64 {
    DEFAULT_AMPLITUDE_INTERVAL_MS
}

pub(crate) fn default_min_duration_ms() -> u64 {
    DEFAULT_MIN_DURATION_MS
}

pub(crate) fn default_true() -> bool {
    true
}
