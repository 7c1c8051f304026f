//! Telemetry frame encoding (controller → host).

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::constants::{GYRO_SCALE, JOY_SCALE, MAX_TELEMETRY_FRAME_LEN, TELEMETRY_HEADER_LEN};
use crate::error::{MalformedPacket, ProtocolResult};
use crate::input::{Orientation, PressState, Stick};
use crate::varint::{FrameReader, write_zigzag};

bitflags! {
    /// First byte of a telemetry frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FrameFlags: u8 {
        /// Frame comes from the left-hand controller
        const LEFT_CONTROLLER = 1 << 0;
        /// System / menu button held
        const SYSTEM_OR_MENU = 1 << 1;
        /// A (right) or X (left) button held
        const BUTTON_A_OR_X = 1 << 2;
        /// B (right) or Y (left) button held
        const BUTTON_B_OR_Y = 1 << 3;
        /// Charger connected
        const BATTERY_PLUGGED = 1 << 4;
        /// Stick is inside its deadzone
        const JOYSTICK_IN_DEADZONE = 1 << 5;
    }
}

/// One tick of controller state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryFrame {
    /// Which hand this controller is bound to
    pub left_controller: bool,
    /// Trigger state
    pub trigger: PressState,
    /// Grip state
    pub grip: PressState,
    /// Joystick click state
    pub joystick_state: PressState,
    /// System / menu button
    pub system_or_menu: bool,
    /// A or X button
    pub button_a_or_x: bool,
    /// B or Y button
    pub button_b_or_y: bool,
    /// Stick inside its deadzone
    pub joystick_in_deadzone: bool,
    /// Charger connected
    pub battery_plugged: bool,
    /// Battery charge as a fraction, nominally `[0, 1]`
    pub battery_percent: f32,
    /// Orientation in degrees
    pub orientation: Orientation,
    /// Stick deflection
    pub joystick: Stick,
}

impl TelemetryFrame {
    /// Flags byte for this frame.
    pub fn flags(&self) -> FrameFlags {
        let mut flags = FrameFlags::empty();
        flags.set(FrameFlags::LEFT_CONTROLLER, self.left_controller);
        flags.set(FrameFlags::SYSTEM_OR_MENU, self.system_or_menu);
        flags.set(FrameFlags::BUTTON_A_OR_X, self.button_a_or_x);
        flags.set(FrameFlags::BUTTON_B_OR_Y, self.button_b_or_y);
        flags.set(FrameFlags::BATTERY_PLUGGED, self.battery_plugged);
        flags.set(FrameFlags::JOYSTICK_IN_DEADZONE, self.joystick_in_deadzone);
        flags
    }

    /// Modes byte: trigger in bits 0-1, grip in 2-3, joystick click in 4-5.
    pub fn modes(&self) -> u8 {
        self.trigger.bits() | (self.grip.bits() << 2) | (self.joystick_state.bits() << 4)
    }

    /// Battery byte: whole percent, saturated into a byte.
    pub fn battery_byte(&self) -> u8 {
        let pct = (f64::from(self.battery_percent) * 100.0).round();
        if pct.is_nan() {
            return 0;
        }
        pct.clamp(0.0, 255.0) as u8
    }

    /// Encode to the base64 wire string (no line terminator).
    pub fn encode(&self) -> String {
        encode_telemetry(self)
    }
}

fn quantize(value: f32, scale: f64) -> i64 {
    (f64::from(value) * scale).round() as i64
}

fn dequantize(value: i64, scale: f64) -> f32 {
    (value as f64 / scale) as f32
}

/// Append the raw (pre-base64) frame bytes to `out`.
pub fn encode_telemetry_bytes(frame: &TelemetryFrame, out: &mut Vec<u8>) {
    out.reserve(MAX_TELEMETRY_FRAME_LEN);
    out.push(frame.flags().bits());
    out.push(frame.modes());
    out.push(frame.battery_byte());

    let o = frame.orientation;
    for value in [o.yaw, o.pitch, o.roll] {
        write_zigzag(out, quantize(value, GYRO_SCALE));
    }
    for value in [frame.joystick.x, frame.joystick.y] {
        write_zigzag(out, quantize(value, JOY_SCALE));
    }
}

/// Encode a frame to its base64 wire string (no line terminator).
pub fn encode_telemetry(frame: &TelemetryFrame) -> String {
    let mut raw = Vec::with_capacity(MAX_TELEMETRY_FRAME_LEN);
    encode_telemetry_bytes(frame, &mut raw);
    BASE64.encode(raw)
}

/// Decode raw (already base64-decoded) frame bytes.
///
/// # Errors
///
/// [`MalformedPacket::TooShort`] for fewer than three bytes, or a varint error
/// if any channel is truncated or overlong.
pub fn decode_telemetry_bytes(bytes: &[u8]) -> ProtocolResult<TelemetryFrame> {
    if bytes.len() < TELEMETRY_HEADER_LEN {
        return Err(MalformedPacket::too_short(TELEMETRY_HEADER_LEN, bytes.len()));
    }

    let mut reader = FrameReader::new(bytes);
    let header = (reader.read_u8(), reader.read_u8(), reader.read_u8());
    let (Some(flags), Some(modes), Some(battery)) = header else {
        return Err(MalformedPacket::too_short(TELEMETRY_HEADER_LEN, bytes.len()));
    };
    let flags = FrameFlags::from_bits_truncate(flags);

    let yaw = dequantize(reader.read_zigzag()?, GYRO_SCALE);
    let pitch = dequantize(reader.read_zigzag()?, GYRO_SCALE);
    let roll = dequantize(reader.read_zigzag()?, GYRO_SCALE);
    let x = dequantize(reader.read_zigzag()?, JOY_SCALE);
    let y = dequantize(reader.read_zigzag()?, JOY_SCALE);

    Ok(TelemetryFrame {
        left_controller: flags.contains(FrameFlags::LEFT_CONTROLLER),
        system_or_menu: flags.contains(FrameFlags::SYSTEM_OR_MENU),
        button_a_or_x: flags.contains(FrameFlags::BUTTON_A_OR_X),
        button_b_or_y: flags.contains(FrameFlags::BUTTON_B_OR_Y),
        battery_plugged: flags.contains(FrameFlags::BATTERY_PLUGGED),
        joystick_in_deadzone: flags.contains(FrameFlags::JOYSTICK_IN_DEADZONE),
        trigger: PressState::from_bits(modes),
        grip: PressState::from_bits(modes >> 2),
        joystick_state: PressState::from_bits(modes >> 4),
        battery_percent: f32::from(battery) / 100.0,
        orientation: Orientation::new(yaw, pitch, roll),
        joystick: Stick::new(x, y),
    })
}

/// Decode a base64 wire string. Surrounding whitespace, including the line
/// terminator, is ignored.
///
/// # Errors
///
/// [`MalformedPacket::Base64`] for invalid text, otherwise as
/// [`decode_telemetry_bytes`].
pub fn decode_telemetry(wire: &str) -> ProtocolResult<TelemetryFrame> {
    let bytes = BASE64.decode(wire.trim())?;
    decode_telemetry_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_layout() {
        let frame = TelemetryFrame {
            left_controller: true,
            joystick_in_deadzone: true,
            ..TelemetryFrame::default()
        };
        assert_eq!(frame.flags().bits(), 0b10_0001);
    }

    #[test]
    fn test_modes_layout() {
        let frame = TelemetryFrame {
            trigger: PressState::Touched,
            grip: PressState::Pressed,
            joystick_state: PressState::Reserved,
            ..TelemetryFrame::default()
        };
        assert_eq!(frame.modes(), 0b11_10_01);
    }

    #[test]
    fn test_battery_byte_saturates() {
        let mut frame = TelemetryFrame {
            battery_percent: 0.756,
            ..TelemetryFrame::default()
        };
        assert_eq!(frame.battery_byte(), 76);

        frame.battery_percent = 3.0;
        assert_eq!(frame.battery_byte(), 255);

        frame.battery_percent = -0.5;
        assert_eq!(frame.battery_byte(), 0);

        frame.battery_percent = f32::NAN;
        assert_eq!(frame.battery_byte(), 0);
    }

    #[test]
    fn test_default_frame_bytes() {
        let mut raw = Vec::new();
        encode_telemetry_bytes(&TelemetryFrame::default(), &mut raw);
        assert_eq!(raw, vec![0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_decode_rejects_short_header() {
        assert_eq!(
            decode_telemetry_bytes(&[0x01, 0x02]),
            Err(MalformedPacket::too_short(3, 2))
        );
    }

    #[test]
    fn test_decode_rejects_missing_channels() {
        let result = decode_telemetry_bytes(&[0x00, 0x00, 0x00, 0x00]);
        assert_eq!(result, Err(MalformedPacket::TruncatedVarint { offset: 4 }));
    }
}
