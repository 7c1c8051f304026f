//! Haptic command encoding (host → controller).

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

use crate::constants::{
    HAPTIC_AMPLITUDE_SCALE, HAPTIC_DURATION_SCALE, HAPTIC_FREQUENCY_SCALE, HAPTIC_HEADER_LEN,
    MIN_HAPTIC_DURATION_S,
};
use crate::error::{MalformedPacket, ProtocolResult};
use crate::varint::{FrameReader, write_zigzag};

const LEFT_CONTROLLER_BIT: u8 = 0x01;

/// A vibration request addressed to one controller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HapticCommand {
    /// Target hand
    pub left_controller: bool,
    /// Strength, nominally `[0, 1]`
    pub amplitude: f32,
    /// Pulse rate in Hz; 0 means a constant buzz
    pub frequency: f32,
    /// How long to vibrate, in seconds
    pub duration_seconds: f32,
}

impl HapticCommand {
    /// Whether this command targets the controller bound to `left_hand`.
    pub fn targets(&self, left_hand: bool) -> bool {
        self.left_controller == left_hand
    }
}

fn quantize(value: f32, scale: f64) -> i64 {
    (f64::from(value) * scale).round() as i64
}

fn dequantize(value: i64, scale: f64) -> f32 {
    (value as f64 / scale) as f32
}

fn floor_duration(seconds: f32) -> f32 {
    if seconds > 0.0 {
        seconds
    } else {
        MIN_HAPTIC_DURATION_S
    }
}

/// Encode a command to its base64 wire string.
///
/// A non-positive duration is raised to [`MIN_HAPTIC_DURATION_S`].
pub fn encode_haptic(command: &HapticCommand) -> String {
    let mut raw = Vec::with_capacity(16);
    raw.push(if command.left_controller {
        LEFT_CONTROLLER_BIT
    } else {
        0
    });
    write_zigzag(&mut raw, quantize(command.amplitude, HAPTIC_AMPLITUDE_SCALE));
    write_zigzag(&mut raw, quantize(command.frequency, HAPTIC_FREQUENCY_SCALE));
    write_zigzag(
        &mut raw,
        quantize(floor_duration(command.duration_seconds), HAPTIC_DURATION_SCALE),
    );
    BASE64.encode(raw)
}

/// Decode raw (already base64-decoded) command bytes.
///
/// # Errors
///
/// [`MalformedPacket::TooShort`] for an empty buffer, or a varint error if any
/// field is truncated or overlong.
pub fn decode_haptic_bytes(bytes: &[u8]) -> ProtocolResult<HapticCommand> {
    let mut reader = FrameReader::new(bytes);
    let flags = reader
        .read_u8()
        .ok_or(MalformedPacket::too_short(HAPTIC_HEADER_LEN, bytes.len()))?;

    let amplitude = dequantize(reader.read_zigzag()?, HAPTIC_AMPLITUDE_SCALE);
    let frequency = dequantize(reader.read_zigzag()?, HAPTIC_FREQUENCY_SCALE);
    let duration = dequantize(reader.read_zigzag()?, HAPTIC_DURATION_SCALE);

    Ok(HapticCommand {
        left_controller: flags & LEFT_CONTROLLER_BIT != 0,
        amplitude,
        frequency,
        duration_seconds: floor_duration(duration),
    })
}

/// Decode a base64 wire string. Surrounding whitespace is ignored.
///
/// # Errors
///
/// [`MalformedPacket::Base64`] for invalid text, otherwise as
/// [`decode_haptic_bytes`].
pub fn decode_haptic(wire: &str) -> ProtocolResult<HapticCommand> {
    let bytes = BASE64.decode(wire.trim())?;
    decode_haptic_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty_is_too_short() {
        assert_eq!(
            decode_haptic_bytes(&[]),
            Err(MalformedPacket::too_short(1, 0))
        );
    }

    #[test]
    fn test_decode_missing_duration() {
        // flags, amplitude 500, frequency 0
        let result = decode_haptic_bytes(&[0x01, 0xE8, 0x07, 0x00]);
        assert_eq!(result, Err(MalformedPacket::TruncatedVarint { offset: 4 }));
    }

    #[test]
    fn test_zero_duration_is_floored() {
        // flags 0, amplitude 0, frequency 0, duration 0
        let cmd = decode_haptic_bytes(&[0x00, 0x00, 0x00, 0x00]);
        assert!(matches!(
            cmd,
            Ok(HapticCommand { duration_seconds, .. })
                if (duration_seconds - MIN_HAPTIC_DURATION_S).abs() < f32::EPSILON
        ));
    }

    #[test]
    fn test_targets() {
        let cmd = HapticCommand {
            left_controller: true,
            ..HapticCommand::default()
        };
        assert!(cmd.targets(true));
        assert!(!cmd.targets(false));
    }
}
