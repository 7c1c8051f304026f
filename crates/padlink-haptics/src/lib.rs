//! Haptic synthesis for padlink controllers.
//!
//! The host describes a vibration as amplitude, frequency and duration. Phone
//! vibrators only understand a list of `(milliseconds, amplitude)` segments,
//! so this crate converts one into the other and provides the fixed patterns
//! used for local button clicks.
//!
//! ```
//! use padlink_haptics::prelude::*;
//! use padlink_protocol::HapticCommand;
//!
//! let synth = Synthesizer::default();
//! let wave = synth.synthesize(&HapticCommand {
//!     left_controller: false,
//!     amplitude: 1.0,
//!     frequency: 5.0,
//!     duration_seconds: 1.0,
//! });
//! assert_eq!(wave.segments().len(), 20);
//! assert_eq!(wave.total_duration_ms(), 2000);
//! ```

#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod feedback;
pub mod prelude;
pub mod synth;
pub mod vibrator;
pub mod waveform;

pub use config::SynthConfig;
pub use error::{HapticsError, HapticsResult};
pub use feedback::ButtonFeedback;
pub use synth::Synthesizer;
pub use vibrator::{RecordingVibrator, Vibrator, VibratorError};
pub use waveform::{Segment, Waveform};
