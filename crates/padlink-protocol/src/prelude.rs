//! Prelude module for convenient imports

pub use crate::constants::{
    CLOSE_MESSAGE, DEFAULT_PORT, GYRO_SCALE, JOY_SCALE, JOYSTICK_DEADZONE, LOGIN_MESSAGE,
    MIN_HAPTIC_DURATION_S, UPDATE_INTERVAL_MS,
};
pub use crate::error::{MalformedPacket, ProtocolResult};
pub use crate::haptic::{HapticCommand, decode_haptic, encode_haptic};
pub use crate::input::{Orientation, PressState, Stick};
pub use crate::telemetry::{FrameFlags, TelemetryFrame, decode_telemetry, encode_telemetry};
