//! Device vibration seam

use crate::waveform::Waveform;

/// Error returned by a device vibrator.
pub type VibratorError = Box<dyn std::error::Error + Send + Sync>;

/// Something that can play a [`Waveform`].
///
/// The embedding application implements this over the platform vibration
/// API. A new waveform replaces whatever is currently playing.
pub trait Vibrator: Send {
    /// Start playing `waveform`.
    ///
    /// # Errors
    ///
    /// Whatever the device layer reports.
    fn vibrate(&mut self, waveform: &Waveform) -> Result<(), VibratorError>;

    /// Stop any playback in progress.
    ///
    /// # Errors
    ///
    /// Whatever the device layer reports.
    fn cancel(&mut self) -> Result<(), VibratorError> {
        Ok(())
    }
}

impl<V: Vibrator + ?Sized> Vibrator for Box<V> {
    fn vibrate(&mut self, waveform: &Waveform) -> Result<(), VibratorError> {
        (**self).vibrate(waveform)
    }

    fn cancel(&mut self) -> Result<(), VibratorError> {
        (**self).cancel()
    }
}

/// Vibrator that records every waveform it is given.
#[derive(Debug, Default, Clone)]
pub struct RecordingVibrator {
    played: Vec<Waveform>,
    cancels: usize,
}

impl RecordingVibrator {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Waveforms played so far, oldest first.
    pub fn played(&self) -> &[Waveform] {
        &self.played
    }

    /// Most recent waveform.
    pub fn last(&self) -> Option<&Waveform> {
        self.played.last()
    }

    /// Number of `cancel` calls.
    pub fn cancels(&self) -> usize {
        self.cancels
    }
}

impl Vibrator for RecordingVibrator {
    fn vibrate(&mut self, waveform: &Waveform) -> Result<(), VibratorError> {
        self.played.push(waveform.clone());
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), VibratorError> {
        self.cancels = self.cancels.saturating_add(1);
        Ok(())
    }
}
