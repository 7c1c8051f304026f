//! Synthesizer configuration

use serde::{Deserialize, Serialize};

use crate::error::{HapticsError, HapticsResult};

/// Tuning knobs for [`Synthesizer`](crate::Synthesizer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Milliseconds of vibration per second requested by the host.
    ///
    /// Phone motors spin up slowly, so short host pulses feel weak at 1:1.
    /// 2000 matches how the host's effects were tuned.
    pub duration_scale_ms: f32,
    /// Multiplier from the `[0, 1]` command amplitude to device amplitude.
    pub amplitude_gain: f32,
    /// Ceiling for device amplitude. The floor is always 1.
    pub max_amplitude: u8,
    /// Upper bound on a single waveform's length.
    pub max_duration_ms: u64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            duration_scale_ms: 2000.0,
            amplitude_gain: 100.0,
            max_amplitude: 100,
            max_duration_ms: 30_000,
        }
    }
}

impl SynthConfig {
    /// Set the duration scale
    #[must_use]
    pub fn with_duration_scale_ms(mut self, scale: f32) -> Self {
        self.duration_scale_ms = scale;
        self
    }

    /// Set the amplitude gain
    #[must_use]
    pub fn with_amplitude_gain(mut self, gain: f32) -> Self {
        self.amplitude_gain = gain;
        self
    }

    /// Set the amplitude ceiling
    #[must_use]
    pub fn with_max_amplitude(mut self, max: u8) -> Self {
        self.max_amplitude = max;
        self
    }

    /// Set the waveform length cap
    #[must_use]
    pub fn with_max_duration_ms(mut self, max: u64) -> Self {
        self.max_duration_ms = max;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`HapticsError::InvalidConfig`] if any knob is out of range.
    pub fn validate(&self) -> HapticsResult<()> {
        if !(self.duration_scale_ms.is_finite() && self.duration_scale_ms > 0.0) {
            return Err(HapticsError::invalid_config(
                "duration_scale_ms must be a positive number",
            ));
        }
        if !(self.amplitude_gain.is_finite() && self.amplitude_gain > 0.0) {
            return Err(HapticsError::invalid_config(
                "amplitude_gain must be a positive number",
            ));
        }
        if self.max_amplitude == 0 {
            return Err(HapticsError::invalid_config(
                "max_amplitude must be at least 1",
            ));
        }
        if self.max_duration_ms == 0 {
            return Err(HapticsError::invalid_config(
                "max_duration_ms must be greater than 0",
            ));
        }
        Ok(())
    }
}
