//! Shared logic for the lesson binaries: free-fly camera math, held-key
//! input state, frame timing, and the static scene/light constant tables.
//!
//! Everything here is platform-free so it can be exercised by plain host
//! tests; the binaries own all windowing and GPU state.

pub mod assets;
pub mod camera;
pub mod constants;
pub mod input;
pub mod lights;
pub mod scene;
pub mod timing;

pub use camera::{CameraTuning, FlyCamera};
pub use input::{KeyState, MoveKey, Toggle};
pub use lights::{LightingRig, LightsUniform};
pub use timing::FrameClock;
