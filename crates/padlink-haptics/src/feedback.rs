//! Fixed click patterns for on-screen buttons

use serde::{Deserialize, Serialize};

use crate::waveform::{Segment, Waveform};

/// Local feedback played when the user touches a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonFeedback {
    /// Single short click (25 ms)
    Tap,
    /// Two-stage click (35 ms + 55 ms)
    Double,
    /// Three quick ticks (5 ms + 10 ms + 5 ms)
    Triple,
}

impl ButtonFeedback {
    /// Pulse lengths, each preceded by a zero-length gap.
    pub const fn pulses_ms(self) -> &'static [u64] {
        match self {
            ButtonFeedback::Tap => &[25],
            ButtonFeedback::Double => &[35, 55],
            ButtonFeedback::Triple => &[5, 10, 5],
        }
    }

    /// Pattern with every pulse at `amplitude`.
    pub fn waveform(self, amplitude: u8) -> Waveform {
        let segments = self
            .pulses_ms()
            .iter()
            .flat_map(|&ms| [Segment::off(0), Segment::new(ms, amplitude)])
            .collect();
        Waveform::Pattern(segments)
    }
}

impl TryFrom<u8> for ButtonFeedback {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ButtonFeedback::Tap),
            1 => Ok(ButtonFeedback::Double),
            2 => Ok(ButtonFeedback::Triple),
            other => Err(other),
        }
    }
}
