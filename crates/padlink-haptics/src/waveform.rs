//! Vibration waveforms

use serde::{Deserialize, Serialize};

/// A span of constant vibration. Amplitude 0 means the motor is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// Length of the span
    pub duration_ms: u64,
    /// Device amplitude for the span
    pub amplitude: u8,
}

impl Segment {
    /// Construct a segment
    pub const fn new(duration_ms: u64, amplitude: u8) -> Self {
        Self {
            duration_ms,
            amplitude,
        }
    }

    /// A silent span
    pub const fn off(duration_ms: u64) -> Self {
        Self::new(duration_ms, 0)
    }
}

/// What a [`Vibrator`](crate::Vibrator) is asked to play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "segments", rename_all = "snake_case")]
pub enum Waveform {
    /// A single constant buzz
    OneShot(Segment),
    /// A sequence of segments played back to back, once
    Pattern(Vec<Segment>),
}

impl Waveform {
    /// All segments in playback order.
    pub fn segments(&self) -> &[Segment] {
        match self {
            Waveform::OneShot(segment) => std::slice::from_ref(segment),
            Waveform::Pattern(segments) => segments,
        }
    }

    /// Segment durations, in the `timings` layout vibration APIs expect.
    pub fn timings(&self) -> Vec<u64> {
        self.segments().iter().map(|s| s.duration_ms).collect()
    }

    /// Segment amplitudes, parallel to [`Waveform::timings`].
    pub fn amplitudes(&self) -> Vec<u8> {
        self.segments().iter().map(|s| s.amplitude).collect()
    }

    /// Total playback length.
    pub fn total_duration_ms(&self) -> u64 {
        self.segments()
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.duration_ms))
    }

    /// Loudest segment.
    pub fn peak_amplitude(&self) -> u8 {
        self.segments()
            .iter()
            .map(|s| s.amplitude)
            .max()
            .unwrap_or(0)
    }

    /// True for a constant buzz.
    pub fn is_one_shot(&self) -> bool {
        matches!(self, Waveform::OneShot(_))
    }
}
