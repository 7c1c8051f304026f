//! Mailbox → vibrator dispatch

use std::sync::Arc;

use padlink_haptics::{Synthesizer, Vibrator, Waveform};
use padlink_protocol::{MalformedPacket, decode_haptic};
use tracing::{debug, warn};

use crate::mailbox::Mailbox;

/// Result of handling one mailbox entry.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Mailbox was empty
    Idle,
    /// Command decoded and handed to the vibrator
    Rendered(Waveform),
    /// Command addressed to the other controller; ignored
    OtherHand,
    /// Message was not a valid haptic frame; dropped
    Malformed(MalformedPacket),
    /// The vibrator rejected the waveform
    DeviceFailed(String),
}

/// Pulls host messages from a [`Mailbox`] and plays them on a [`Vibrator`].
#[derive(Debug)]
pub struct HapticDispatcher<V> {
    mailbox: Arc<Mailbox>,
    synth: Synthesizer,
    vibrator: V,
    left_hand: bool,
}

impl<V: Vibrator> HapticDispatcher<V> {
    /// Create a dispatcher for the controller bound to `left_hand`.
    pub fn new(mailbox: Arc<Mailbox>, synth: Synthesizer, vibrator: V, left_hand: bool) -> Self {
        Self {
            mailbox,
            synth,
            vibrator,
            left_hand,
        }
    }

    /// Handle the oldest waiting message, if any.
    pub fn dispatch_next(&mut self) -> DispatchOutcome {
        let Some(message) = self.mailbox.read_last() else {
            return DispatchOutcome::Idle;
        };

        let command = match decode_haptic(&message) {
            Ok(command) => command,
            Err(err) => {
                warn!("Dropping malformed haptic frame: {}", err);
                return DispatchOutcome::Malformed(err);
            }
        };

        if !command.targets(self.left_hand) {
            debug!("Haptic command for the other controller");
            return DispatchOutcome::OtherHand;
        }

        let waveform = self.synth.synthesize(&command);
        match self.vibrator.vibrate(&waveform) {
            Ok(()) => DispatchOutcome::Rendered(waveform),
            Err(e) => {
                warn!("Vibrator rejected waveform: {}", e);
                DispatchOutcome::DeviceFailed(e.to_string())
            }
        }
    }

    /// Handle every waiting message. Returns how many were played.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut rendered = 0usize;
        loop {
            match self.dispatch_next() {
                DispatchOutcome::Idle => return rendered,
                DispatchOutcome::Rendered(_) => rendered = rendered.saturating_add(1),
                DispatchOutcome::OtherHand
                | DispatchOutcome::Malformed(_)
                | DispatchOutcome::DeviceFailed(_) => {}
            }
        }
    }

    /// The wrapped vibrator.
    pub fn vibrator(&self) -> &V {
        &self.vibrator
    }

    /// Unwrap the vibrator.
    pub fn into_vibrator(self) -> V {
        self.vibrator
    }
}
