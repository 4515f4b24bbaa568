use crate::{AmplitudePolicy, SessionId};

use std::time::Instant;

use tracing::trace;

/// Maximum raw points retained for the waveform summary.
/// When full, neighbouring points are merged and the stride doubles, so a
/// long recording costs the same memory as a short one.
pub(crate) const MAX_WAVEFORM_POINTS: usize = 1024;

/// Highest value of one waveform bin (5 bits).
pub const WAVEFORM_BIN_MAX: u8 = 31;

/// Receives amplitude samples from the capture backend.
///
/// Keeps a smoothed level for feedback animation and a bounded history that
/// is folded into a compact waveform when the clip is sent. Advisory only:
/// nothing here feeds control decisions.
#[derive(Debug)]
pub struct AmplitudeSink {
    policy: AmplitudePolicy,
    session_id: Option<SessionId>,
    level: f32,
    last_sample_at: Option<Instant>,
    points: Vec<f32>,
    stride: usize,
    pending_peak: f32,
    pending_count: usize,
}

impl AmplitudeSink {
    /// Sink with the given smoothing policy, bound to no session.
    pub fn new(policy: AmplitudePolicy) -> Self {
        Self {
            policy,
            session_id: None,
            level: 0.0,
            last_sample_at: None,
            points: Vec::new(),
            stride: 1,
            pending_peak: 0.0,
            pending_count: 0,
        }
    }

    /// Clear history and accept samples for `session_id` only.
    pub fn reset(&mut self, session_id: Option<SessionId>) {
        self.session_id = session_id;
        self.level = 0.0;
        self.last_sample_at = None;
        self.points.clear();
        self.stride = 1;
        self.pending_peak = 0.0;
        self.pending_count = 0;
    }

    /// Record one sample. Returns `false` when it belongs to another session.
    pub fn push(&mut self, session_id: SessionId, level: f32, now: Instant) -> bool {
        if self.session_id != Some(session_id) {
            trace!(session_id = %session_id, "Amplitude sample for inactive session");
            return false;
        }

        let level = if level.is_finite() {
            level.clamp(0.0, 1.0)
        } else {
            0.0
        };

        let current = self.level(now);
        let blend = if level > current {
            self.policy.attack
        } else {
            self.policy.release
        };
        self.level = current + (level - current) * blend;
        self.last_sample_at = Some(now);

        self.record_point(level);

        true
    }

    /// Smoothed level at `now`, decaying once samples stop.
    pub fn level(&self, now: Instant) -> f32 {
        let Some(last) = self.last_sample_at else {
            return 0.0;
        };

        let half_life = self.policy.decay_half_life.as_secs_f32();
        if half_life <= 0.0 {
            return self.level;
        }

        let quiet = now.saturating_duration_since(last).as_secs_f32();
        self.level * 0.5f32.powf(quiet / half_life)
    }

    /// Fold the session's samples into `bins` 5-bit peaks.
    pub fn waveform(&self, bins: usize) -> Vec<u8> {
        let mut points = self.points.clone();
        if self.pending_count > 0 {
            points.push(self.pending_peak);
        }

        if bins == 0 {
            return Vec::new();
        }
        if points.is_empty() {
            return vec![0; bins];
        }

        let max = WAVEFORM_BIN_MAX as f32;
        (0..bins)
            .map(|bin| {
                let start = bin * points.len() / bins;
                let end = ((bin + 1) * points.len() / bins).max(start + 1);
                let peak = points[start..end.min(points.len())]
                    .iter()
                    .copied()
                    .fold(0.0f32, f32::max);
                (peak * max).round().clamp(0.0, max) as u8
            })
            .collect()
    }

    fn record_point(&mut self, level: f32) {
        self.pending_peak = self.pending_peak.max(level);
        self.pending_count += 1;
        if self.pending_count < self.stride {
            return;
        }

        self.points.push(self.pending_peak);
        self.pending_peak = 0.0;
        self.pending_count = 0;

        if self.points.len() >= MAX_WAVEFORM_POINTS {
            self.points = self
                .points
                .chunks(2)
                .map(|pair| pair.iter().copied().fold(0.0f32, f32::max))
                .collect();
            self.stride *= 2;
        }
    }
}
