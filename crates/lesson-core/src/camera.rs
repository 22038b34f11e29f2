//! Quaternion free-fly camera.
//!
//! Orientation is a single accumulated rotation; pan/tilt/roll rotate it
//! about the camera's current up/right/view axes, matching how the mouse
//! and Q/E keys steer the lessons. Pitch and roll keep degree accumulators
//! purely for the saturation bounds.

use glam::{Mat4, Quat, Vec3};

use crate::constants::{
    CAMERA_SPEED_FACTOR, FOV_MAX_DEG, FOV_MIN_DEG, MOUSE_SENSITIVITY, PITCH_LIMIT_DEG,
    ROLL_LIMIT_DEG, ROLL_RATE_DEG, WHEEL_SENSITIVITY, Z_FAR, Z_NEAR,
};
use crate::input::{KeyState, MoveKey};

/// Per-lesson motion constants, all scaled by the frame delta in
/// milliseconds before use.
#[derive(Clone, Copy, Debug)]
pub struct CameraTuning {
    pub speed_factor: f32,
    pub mouse_sensitivity: f32,
    pub wheel_sensitivity: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            speed_factor: CAMERA_SPEED_FACTOR,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            wheel_sensitivity: WHEEL_SENSITIVITY,
        }
    }
}

/// Free-fly camera pose plus field of view.
///
/// The identity orientation looks down -Z with +Y up, so a camera at
/// (0, 0, 3) starts out facing the scene at the origin.
#[derive(Clone, Debug)]
pub struct FlyCamera {
    position: Vec3,
    orientation: Quat,
    yaw_deg: f32,
    pitch_deg: f32,
    roll_deg: f32,
    fov_deg: f32,
    tuning: CameraTuning,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0), CameraTuning::default())
    }
}

impl FlyCamera {
    pub fn new(position: Vec3, tuning: CameraTuning) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            yaw_deg: 0.0,
            pitch_deg: 0.0,
            roll_deg: 0.0,
            fov_deg: FOV_MAX_DEG,
            tuning,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current view direction (unit length).
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Current up vector (unit length, tilts with roll).
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// normalize(cross(forward, up)), the strafe axis.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up()).normalize()
    }

    pub fn yaw_deg(&self) -> f32 {
        self.yaw_deg
    }

    pub fn pitch_deg(&self) -> f32 {
        self.pitch_deg
    }

    pub fn roll_deg(&self) -> f32 {
        self.roll_deg
    }

    pub fn fov_deg(&self) -> f32 {
        self.fov_deg
    }

    /// Mouse look. `dx`/`dy` are raw screen-space pixel deltas (y grows
    /// downward); `dt_ms` is the frame delta in milliseconds.
    ///
    /// Yaw is unbounded; pitch saturates at +/-89 degrees. Only the portion
    /// of the pitch delta that fits inside the bound is applied, so the
    /// accumulator and the orientation never disagree.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32, dt_ms: f32) {
        let scale = self.tuning.mouse_sensitivity * dt_ms;
        let yaw_offset = dx * scale;
        let pitch_offset = -dy * scale;

        self.yaw_deg += yaw_offset;
        let pitch_applied = clamped_step(&mut self.pitch_deg, pitch_offset, PITCH_LIMIT_DEG);

        self.pan(yaw_offset);
        self.tilt(pitch_applied);
    }

    /// Wheel zoom: positive deltas narrow the field of view. Saturates at
    /// [5, 45] degrees.
    pub fn apply_scroll(&mut self, wheel_delta: f32, dt_ms: f32) {
        let step = wheel_delta * self.tuning.wheel_sensitivity * dt_ms;
        self.fov_deg = (self.fov_deg - step).clamp(FOV_MIN_DEG, FOV_MAX_DEG);
    }

    /// Held-key movement: W/S along the view vector, A/D along the strafe
    /// axis, Q/E rolling at 5 degrees per speed unit with the same
    /// saturation policy as pitch.
    pub fn apply_movement(&mut self, keys: &KeyState, dt_ms: f32) {
        let speed = self.tuning.speed_factor * dt_ms;

        if keys.is_held(MoveKey::Forward) {
            self.position += self.forward() * speed;
        }
        if keys.is_held(MoveKey::Back) {
            self.position -= self.forward() * speed;
        }
        if keys.is_held(MoveKey::StrafeLeft) {
            self.position -= self.right() * speed;
        }
        if keys.is_held(MoveKey::StrafeRight) {
            self.position += self.right() * speed;
        }

        if keys.is_held(MoveKey::RollLeft) {
            let applied = clamped_step(&mut self.roll_deg, -ROLL_RATE_DEG * speed, ROLL_LIMIT_DEG);
            self.roll(applied);
        }
        if keys.is_held(MoveKey::RollRight) {
            let applied = clamped_step(&mut self.roll_deg, ROLL_RATE_DEG * speed, ROLL_LIMIT_DEG);
            self.roll(applied);
        }
    }

    /// Look-at view matrix, recomputed from the pose on every call.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), self.up())
    }

    /// Perspective projection from the current field of view.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), aspect, Z_NEAR, Z_FAR)
    }

    // Positive pan turns right: rotate about the current up axis.
    fn pan(&mut self, angle_deg: f32) {
        self.rotate_about(self.up(), -angle_deg);
    }

    // Positive tilt looks up: rotate about the strafe axis.
    fn tilt(&mut self, angle_deg: f32) {
        self.rotate_about(self.right(), angle_deg);
    }

    // Positive roll leans right: rotate about the view vector.
    fn roll(&mut self, angle_deg: f32) {
        self.rotate_about(self.forward(), angle_deg);
    }

    fn rotate_about(&mut self, axis: Vec3, angle_deg: f32) {
        if angle_deg == 0.0 {
            return;
        }
        let rot = Quat::from_axis_angle(axis, angle_deg.to_radians());
        self.orientation = (rot * self.orientation).normalize();
    }
}

/// Advance `accum` by `delta`, saturating at `+/-limit`, and return the
/// portion actually applied. At the bound the returned step is zero.
fn clamped_step(accum: &mut f32, delta: f32, limit: f32) -> f32 {
    let clamped = (*accum + delta).clamp(-limit, limit);
    let applied = clamped - *accum;
    *accum = clamped;
    applied
}

/// Spherical-to-Cartesian view direction for the yaw/pitch convention used
/// here (yaw 0 faces -Z, positive yaw turns right, positive pitch looks
/// up). Reference implementation for tests; the camera itself never
/// recomputes its forward vector from angles.
pub fn euler_forward(yaw_deg: f32, pitch_deg: f32) -> Vec3 {
    let yaw = yaw_deg.to_radians();
    let pitch = pitch_deg.to_radians();
    Vec3::new(
        yaw.sin() * pitch.cos(),
        pitch.sin(),
        -yaw.cos() * pitch.cos(),
    )
    .normalize()
}
