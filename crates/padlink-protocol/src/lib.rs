//! Padlink wire protocol: telemetry frames, haptic commands, and their compact codec.
//!
//! This crate is I/O-free. It turns controller state into the dense
//! base64 text frames the host expects and decodes the haptic commands the host
//! sends back. Everything here is a pure function over bytes or strings so it
//! can be tested and fuzzed without a socket.
//!
//! # Wire layout
//!
//! Telemetry (controller → host):
//!
//! ```text
//! [flags:1][modes:1][battery:1][yaw][pitch][roll][stick x][stick y]
//! ```
//!
//! Haptic (host → controller):
//!
//! ```text
//! [flags:1][amplitude][frequency][duration]
//! ```
//!
//! Every bracketed float is a zigzag-encoded LEB128 varint of the value
//! multiplied by its channel scale. The whole buffer travels as standard
//! padded base64, one frame per line.
//!
//! # Example
//!
//! ```
//! use padlink_protocol::prelude::*;
//!
//! let frame = TelemetryFrame {
//!     trigger: PressState::Pressed,
//!     battery_percent: 0.8,
//!     ..TelemetryFrame::default()
//! };
//! let wire = encode_telemetry(&frame);
//! let back = decode_telemetry(&wire)?;
//! assert_eq!(back.trigger, PressState::Pressed);
//! # Ok::<(), MalformedPacket>(())
//! ```

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod constants;
pub mod error;
pub mod haptic;
pub mod input;
pub mod prelude;
pub mod telemetry;
pub mod varint;

pub use constants::{
    CLOSE_MESSAGE, DEFAULT_PORT, GYRO_SCALE, JOY_SCALE, JOYSTICK_DEADZONE, LOGIN_MESSAGE,
    MAX_TELEMETRY_FRAME_LEN, MAX_VARINT_LEN, MIN_HAPTIC_DURATION_S, UPDATE_INTERVAL_MS,
};
pub use error::{MalformedPacket, ProtocolResult};
pub use haptic::{HapticCommand, decode_haptic, decode_haptic_bytes, encode_haptic};
pub use input::{Orientation, PressState, Stick};
pub use telemetry::{
    FrameFlags, TelemetryFrame, decode_telemetry, decode_telemetry_bytes, encode_telemetry,
    encode_telemetry_bytes,
};
