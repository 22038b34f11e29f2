//! Held-key state and wheel-delta normalization.
//!
//! The binaries translate winit events into these types; everything here
//! stays windowing-free so the tests can drive it directly.

use crate::constants::WHEEL_LINE_STEP;

/// Movement keys the camera reacts to while held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKey {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    RollLeft,
    RollRight,
}

impl MoveKey {
    pub const ALL: [MoveKey; 6] = [
        MoveKey::Forward,
        MoveKey::Back,
        MoveKey::StrafeLeft,
        MoveKey::StrafeRight,
        MoveKey::RollLeft,
        MoveKey::RollRight,
    ];

    fn index(self) -> usize {
        match self {
            MoveKey::Forward => 0,
            MoveKey::Back => 1,
            MoveKey::StrafeLeft => 2,
            MoveKey::StrafeRight => 3,
            MoveKey::RollLeft => 4,
            MoveKey::RollRight => 5,
        }
    }
}

/// Boolean set of currently-held movement keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyState {
    held: [bool; 6],
}

impl KeyState {
    pub fn set_held(&mut self, key: MoveKey, held: bool) {
        self.held[key.index()] = held;
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held[key.index()]
    }

    pub fn any_held(&self) -> bool {
        self.held.iter().any(|&h| h)
    }
}

/// Edge-triggered latch for the spotlight key: each press flips the state,
/// releases are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct Toggle {
    on: bool,
}

impl Toggle {
    pub fn flip(&mut self) {
        self.on = !self.on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

/// Convert a line-based scroll delta (one notch = 1.0) into the
/// eighth-degree wheel units the fov sensitivity is calibrated for.
#[inline]
pub fn wheel_lines_to_units(lines: f32) -> f32 {
    lines * WHEEL_LINE_STEP
}
