//! Prelude module for convenient imports

pub use crate::config::SynthConfig;
pub use crate::error::{HapticsError, HapticsResult};
pub use crate::feedback::ButtonFeedback;
pub use crate::synth::Synthesizer;
pub use crate::vibrator::{RecordingVibrator, Vibrator, VibratorError};
pub use crate::waveform::{Segment, Waveform};
