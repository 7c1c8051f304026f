//! Wire constants shared by the controller and the host.

/// TCP port the host listens on.
pub const DEFAULT_PORT: u16 = 9775;

/// First line written after the socket connects.
pub const LOGIN_MESSAGE: &str = "s2uk_connection_init";

/// Best-effort last line written before the socket is torn down.
pub const CLOSE_MESSAGE: &str = "s2uk_connection_closed";

/// Orientation channels are sent in thousandths of a degree.
pub const GYRO_SCALE: f64 = 1000.0;

/// Joystick channels are sent in hundred-thousandths of full deflection.
pub const JOY_SCALE: f64 = 100_000.0;

/// Haptic amplitude quantization (0..1 → 0..1000).
pub const HAPTIC_AMPLITUDE_SCALE: f64 = 1000.0;

/// Haptic frequency quantization (centihertz).
pub const HAPTIC_FREQUENCY_SCALE: f64 = 100.0;

/// Haptic duration quantization (milliseconds).
pub const HAPTIC_DURATION_SCALE: f64 = 1000.0;

/// Shortest pulse the host will ever ask for, in seconds.
pub const MIN_HAPTIC_DURATION_S: f32 = 0.005;

/// A 64-bit varint never needs more than ten 7-bit groups.
pub const MAX_VARINT_LEN: usize = 10;

/// flags + modes + battery.
pub const TELEMETRY_HEADER_LEN: usize = 3;

/// flags.
pub const HAPTIC_HEADER_LEN: usize = 1;

/// Number of varint channels in a telemetry frame.
pub const TELEMETRY_CHANNELS: usize = 5;

/// Worst-case raw telemetry frame size before base64.
pub const MAX_TELEMETRY_FRAME_LEN: usize = TELEMETRY_HEADER_LEN + TELEMETRY_CHANNELS * MAX_VARINT_LEN;

/// Radius below which a stick reading counts as centred.
pub const JOYSTICK_DEADZONE: f32 = 0.27;

/// Controller tick period (~90 Hz).
pub const UPDATE_INTERVAL_MS: u64 = 11;
