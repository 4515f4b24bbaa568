use crate::config::{
    default_amplitude_interval_ms, default_finalize_latency_ms, default_min_duration_ms,
    default_start_latency_ms, default_true,
};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Behaviour of the simulated capture device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Delay before a start request is acknowledged.
    #[serde(default = "default_start_latency_ms")]
    pub start_latency_ms: u64,
    /// Delay before a stop request is acknowledged.
    #[serde(default = "default_finalize_latency_ms")]
    pub finalize_latency_ms: u64,
    /// Period of amplitude reports while capturing.
    #[serde(default = "default_amplitude_interval_ms")]
    pub amplitude_interval_ms: u64,
    /// Clips shorter than this are reported as too short.
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,
    /// Whether microphone and camera access is granted.
    #[serde(default = "default_true")]
    pub permission_granted: bool,
    /// Make every start request fail.
    #[serde(default)]
    pub fail_start: bool,
    /// Make every finalization fail.
    #[serde(default)]
    pub fail_finalize: bool,
    /// Device-side recording limit, reported as a duration cutoff.
    #[serde(default)]
    pub device_limit_ms: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            start_latency_ms: default_start_latency_ms(),
            finalize_latency_ms: default_finalize_latency_ms(),
            amplitude_interval_ms: default_amplitude_interval_ms(),
            min_duration_ms: default_min_duration_ms(),
            permission_granted: true,
            fail_start: false,
            fail_finalize: false,
            device_limit_ms: None,
        }
    }
}

impl BackendConfig {
    /// Start acknowledgement delay.
    pub fn start_latency(&self) -> Duration {
        Duration::from_millis(self.start_latency_ms)
    }

    /// Stop acknowledgement delay.
    pub fn finalize_latency(&self) -> Duration {
        Duration::from_millis(self.finalize_latency_ms)
    }

    /// Amplitude report period, never zero.
    pub fn amplitude_interval(&self) -> Duration {
        Duration::from_millis(self.amplitude_interval_ms.max(1))
    }

    /// Minimum viable clip length.
    pub fn min_duration(&self) -> Duration {
        Duration::from_millis(self.min_duration_ms)
    }
}
