// Shared tuning constants. All *_SENSITIVITY / *_FACTOR values are per
// millisecond of frame delta so motion is frame-rate independent.

// Camera tuning
pub const CAMERA_SPEED_FACTOR: f32 = 0.003; // world units per ms (lights lesson)
pub const FAST_CAMERA_SPEED_FACTOR: f32 = 0.006; // camera lesson moves twice as fast
pub const MOUSE_SENSITIVITY: f32 = 0.008; // degrees per pixel per ms
pub const WHEEL_SENSITIVITY: f32 = 0.001; // fov degrees per wheel unit per ms
pub const ROLL_RATE_DEG: f32 = 5.0; // degrees per speed unit while Q/E held

// Clamp bounds
pub const PITCH_LIMIT_DEG: f32 = 89.0;
pub const ROLL_LIMIT_DEG: f32 = 89.0;
pub const FOV_MIN_DEG: f32 = 5.0;
pub const FOV_MAX_DEG: f32 = 45.0;

// Projection clip planes
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

// Scene animation
pub const SPIN_RATE_DEG_PER_SEC: f32 = 3.6; // base cube spin in the camera lesson
pub const LAMP_SCALE: f32 = 0.1; // lamp cubes are a tenth of a scene cube

// One wheel notch as reported by line-based scrolling, in eighth-degree
// units. Keeps WHEEL_SENSITIVITY meaningful for both delta kinds.
pub const WHEEL_LINE_STEP: f32 = 120.0;
