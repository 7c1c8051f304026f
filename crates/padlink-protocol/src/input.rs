//! Controller input value types.

use serde::{Deserialize, Serialize};

use crate::constants::{JOY_SCALE, JOYSTICK_DEADZONE};

/// Two-bit tri-state used by the trigger, grip and joystick click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PressState {
    /// Not touched.
    #[default]
    Released = 0,
    /// Single press or touch.
    Touched = 1,
    /// Double press or hold.
    Pressed = 2,
    /// Unassigned bit pattern; decoded as-is, never produced by the controller.
    Reserved = 3,
}

impl PressState {
    /// Interpret the low two bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => PressState::Released,
            1 => PressState::Touched,
            2 => PressState::Pressed,
            _ => PressState::Reserved,
        }
    }

    /// Two-bit wire value.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// True for anything other than [`PressState::Released`].
    pub const fn is_active(self) -> bool {
        !matches!(self, PressState::Released)
    }
}

impl From<u8> for PressState {
    fn from(bits: u8) -> Self {
        PressState::from_bits(bits)
    }
}

/// Controller orientation in degrees, as produced by sensor fusion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    /// Heading
    pub yaw: f32,
    /// Nose up/down
    pub pitch: f32,
    /// Bank
    pub roll: f32,
}

impl Orientation {
    /// Construct from yaw, pitch, roll.
    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }
}

/// Joystick deflection, each axis nominally in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Stick {
    /// Right is positive
    pub x: f32,
    /// Up is positive
    pub y: f32,
}

impl Stick {
    /// Construct from raw components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert an on-screen joystick reading to a deflection vector.
    ///
    /// `angle_deg` is measured counter-clockwise from the positive x axis
    /// (0° = right, 90° = up) and `strength_pct` is 0..100. Strength is
    /// clamped to `[0, 1]`, near-zero components snap to zero, and both
    /// components are rounded to the joystick wire precision.
    pub fn from_polar(angle_deg: f32, strength_pct: f32) -> Self {
        let norm = (f64::from(strength_pct) / 100.0).clamp(0.0, 1.0);
        let rad = (90.0 - f64::from(angle_deg)).to_radians();
        Self {
            x: snap(norm * rad.sin()),
            y: snap(norm * rad.cos()),
        }
    }

    /// Distance from centre.
    pub fn magnitude(&self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Whether the stick sits within `radius` of centre.
    pub fn in_deadzone(&self, radius: f32) -> bool {
        self.magnitude() <= radius
    }

    /// [`Stick::in_deadzone`] with the default radius.
    pub fn in_default_deadzone(&self) -> bool {
        self.in_deadzone(JOYSTICK_DEADZONE)
    }
}

fn snap(v: f64) -> f32 {
    if v.abs() < 1e-6 {
        return 0.0;
    }
    ((v * JOY_SCALE).round() / JOY_SCALE) as f32
}
