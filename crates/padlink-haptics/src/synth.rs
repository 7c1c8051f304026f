//! Command → waveform synthesis

use padlink_protocol::HapticCommand;
use tracing::trace;

use crate::config::SynthConfig;
use crate::error::HapticsResult;
use crate::feedback::ButtonFeedback;
use crate::waveform::{Segment, Waveform};

/// Converts host haptic commands into device waveforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct Synthesizer {
    config: SynthConfig,
}

impl Synthesizer {
    /// Create a synthesizer with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HapticsError::InvalidConfig`](crate::HapticsError::InvalidConfig)
    /// if `config` fails validation.
    pub fn new(config: SynthConfig) -> HapticsResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Device amplitude for a `[0, 1]` command amplitude.
    ///
    /// Out-of-range input is clamped first; the result never drops below 1 so
    /// an accepted command always produces a perceptible buzz.
    pub fn device_amplitude(&self, amplitude: f32) -> u8 {
        let unit = if amplitude.is_nan() {
            0.0
        } else {
            amplitude.clamp(0.0, 1.0)
        };
        let scaled = (unit * self.config.amplitude_gain).trunc();
        let max = f32::from(self.config.max_amplitude);
        scaled.clamp(1.0, max) as u8
    }

    /// Device duration for a host duration in seconds.
    pub fn device_duration_ms(&self, duration_seconds: f32) -> u64 {
        let ms = (duration_seconds * self.config.duration_scale_ms).trunc();
        if ms.is_nan() || ms <= 0.0 {
            return 0;
        }
        (ms as u64).min(self.config.max_duration_ms)
    }

    /// Build the waveform for `command`.
    ///
    /// A positive frequency becomes a square wave of equal on and off halves
    /// repeated for as many whole periods as fit in the duration. Anything
    /// that does not yield at least one whole period with a non-zero on time
    /// becomes a single constant pulse.
    pub fn synthesize(&self, command: &HapticCommand) -> Waveform {
        let duration_ms = self.device_duration_ms(command.duration_seconds);
        let amplitude = self.device_amplitude(command.amplitude);

        if command.frequency > 0.0 {
            let period_ms = 1000.0 / f64::from(command.frequency);
            let half_ms = (period_ms / 2.0).trunc() as u64;
            let cycles = (duration_ms as f64 / period_ms).trunc() as usize;

            if cycles > 0 && half_ms > 0 {
                let mut segments = Vec::with_capacity(cycles.saturating_mul(2));
                for _ in 0..cycles {
                    segments.push(Segment::new(half_ms, amplitude));
                    segments.push(Segment::off(half_ms));
                }
                trace!(cycles, half_ms, amplitude, "pulsed haptic");
                return Waveform::Pattern(segments);
            }
        }

        trace!(duration_ms, amplitude, "constant haptic");
        Waveform::OneShot(Segment::new(duration_ms, amplitude))
    }

    /// Local click pattern at this synthesizer's full amplitude.
    pub fn feedback(&self, kind: ButtonFeedback) -> Waveform {
        kind.waveform(self.config.max_amplitude)
    }
}
