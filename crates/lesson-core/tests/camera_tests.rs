use glam::Vec3;
use lesson_core::camera::euler_forward;
use lesson_core::{CameraTuning, FlyCamera, KeyState, MoveKey};

const EPS: f32 = 1e-4;

fn assert_vec3_near(actual: Vec3, expected: Vec3, eps: f32) {
    assert!(
        (actual - expected).length() < eps,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn default_pose_faces_the_origin() {
    let camera = FlyCamera::default();
    assert_vec3_near(camera.position(), Vec3::new(0.0, 0.0, 3.0), EPS);
    assert_vec3_near(camera.forward(), Vec3::NEG_Z, EPS);
    assert_vec3_near(camera.up(), Vec3::Y, EPS);
    assert_vec3_near(camera.right(), Vec3::X, EPS);
    assert_eq!(camera.fov_deg(), 45.0);
}

#[test]
fn mouse_yaw_turns_right() {
    let mut camera = FlyCamera::default();
    // 10 px * 0.008 * 100 ms = 8 degrees
    camera.apply_mouse_delta(10.0, 0.0, 100.0);
    assert!((camera.yaw_deg() - 8.0).abs() < EPS);
    assert_vec3_near(camera.forward(), euler_forward(8.0, 0.0), EPS);
}

#[test]
fn mouse_up_motion_looks_up() {
    let mut camera = FlyCamera::default();
    // Screen y grows downward, so a negative dy raises the pitch.
    camera.apply_mouse_delta(0.0, -10.0, 100.0);
    assert!((camera.pitch_deg() - 8.0).abs() < EPS);
    assert_vec3_near(camera.forward(), euler_forward(0.0, 8.0), EPS);
}

#[test]
fn combined_mouse_delta_matches_euler_reference() {
    let mut camera = FlyCamera::default();
    camera.apply_mouse_delta(25.0, -12.5, 100.0);
    assert_vec3_near(
        camera.forward(),
        euler_forward(camera.yaw_deg(), camera.pitch_deg()),
        EPS,
    );
}

#[test]
fn pitch_saturates_at_89_degrees() {
    let mut camera = FlyCamera::default();
    camera.apply_mouse_delta(0.0, -200.0, 100.0);
    assert_eq!(camera.pitch_deg(), 89.0);
    assert_vec3_near(camera.forward(), euler_forward(0.0, 89.0), EPS);

    // Further input at the bound must not push the orientation past it.
    camera.apply_mouse_delta(0.0, -200.0, 100.0);
    assert_eq!(camera.pitch_deg(), 89.0);
    assert_vec3_near(camera.forward(), euler_forward(0.0, 89.0), EPS);
}

#[test]
fn pitch_saturates_at_minus_89_degrees() {
    let mut camera = FlyCamera::default();
    camera.apply_mouse_delta(0.0, 200.0, 100.0);
    assert_eq!(camera.pitch_deg(), -89.0);
    assert_vec3_near(camera.forward(), euler_forward(0.0, -89.0), EPS);
}

#[test]
fn zero_frame_delta_is_a_no_op() {
    let mut camera = FlyCamera::default();
    camera.apply_mouse_delta(50.0, 50.0, 0.0);
    camera.apply_scroll(120.0, 0.0);
    assert_eq!(camera.yaw_deg(), 0.0);
    assert_eq!(camera.pitch_deg(), 0.0);
    assert_eq!(camera.fov_deg(), 45.0);
    assert_vec3_near(camera.forward(), Vec3::NEG_Z, EPS);
}

#[test]
fn mouse_response_scales_linearly_with_frame_delta() {
    let mut slow = FlyCamera::default();
    let mut fast = FlyCamera::default();
    slow.apply_mouse_delta(10.0, 0.0, 16.0);
    fast.apply_mouse_delta(10.0, 0.0, 32.0);
    assert!((fast.yaw_deg() - 2.0 * slow.yaw_deg()).abs() < EPS);
}

#[test]
fn scroll_forward_narrows_the_fov() {
    let mut camera = FlyCamera::default();
    // One notch (120 units) * 0.001 * 100 ms = 12 degrees
    camera.apply_scroll(120.0, 100.0);
    assert!((camera.fov_deg() - 33.0).abs() < EPS);
}

#[test]
fn fov_saturates_at_both_bounds() {
    let mut camera = FlyCamera::default();
    camera.apply_scroll(10_000.0, 100.0);
    assert_eq!(camera.fov_deg(), 5.0);
    camera.apply_scroll(-10_000.0, 100.0);
    assert_eq!(camera.fov_deg(), 45.0);
}

#[test]
fn holding_w_for_a_second_reaches_the_origin() {
    let mut camera = FlyCamera::default();
    let mut keys = KeyState::default();
    keys.set_held(MoveKey::Forward, true);
    // speed_factor 0.003 * 1000 ms = 3 units along -Z from (0, 0, 3)
    camera.apply_movement(&keys, 1000.0);
    assert_vec3_near(camera.position(), Vec3::ZERO, EPS);
}

#[test]
fn strafing_moves_along_the_right_axis() {
    let mut camera = FlyCamera::default();
    let mut keys = KeyState::default();
    keys.set_held(MoveKey::StrafeRight, true);
    camera.apply_movement(&keys, 1000.0);
    assert_vec3_near(camera.position(), Vec3::new(3.0, 0.0, 3.0), EPS);
    assert_vec3_near(camera.forward(), Vec3::NEG_Z, EPS);
}

#[test]
fn opposed_keys_cancel_out() {
    let mut camera = FlyCamera::default();
    let mut keys = KeyState::default();
    keys.set_held(MoveKey::Forward, true);
    keys.set_held(MoveKey::Back, true);
    camera.apply_movement(&keys, 1000.0);
    assert_vec3_near(camera.position(), Vec3::new(0.0, 0.0, 3.0), EPS);
}

#[test]
fn roll_saturates_at_89_degrees() {
    let mut camera = FlyCamera::default();
    let mut keys = KeyState::default();
    keys.set_held(MoveKey::RollRight, true);
    // 5 deg * 0.003 * 10000 ms = 150 degrees requested, clamped to 89
    camera.apply_movement(&keys, 10_000.0);
    assert_eq!(camera.roll_deg(), 89.0);
    let up_at_bound = camera.up();
    camera.apply_movement(&keys, 10_000.0);
    assert_eq!(camera.roll_deg(), 89.0);
    assert_vec3_near(camera.up(), up_at_bound, EPS);
}

#[test]
fn roll_does_not_change_the_view_direction() {
    let mut camera = FlyCamera::default();
    let mut keys = KeyState::default();
    keys.set_held(MoveKey::RollLeft, true);
    camera.apply_movement(&keys, 2000.0);
    assert!(camera.roll_deg() < 0.0);
    assert_vec3_near(camera.forward(), Vec3::NEG_Z, EPS);
}

#[test]
fn view_matrix_maps_the_eye_to_the_view_origin() {
    let mut camera = FlyCamera::default();
    camera.apply_mouse_delta(17.0, -9.0, 50.0);
    let eye_in_view = camera.view_matrix().transform_point3(camera.position());
    assert_vec3_near(eye_in_view, Vec3::ZERO, EPS);
}

#[test]
fn point_ahead_projects_to_the_clip_center() {
    let mut camera = FlyCamera::new(Vec3::new(1.0, -2.0, 4.0), CameraTuning::default());
    camera.apply_mouse_delta(40.0, 15.0, 50.0);
    let view_proj = camera.projection_matrix(16.0 / 9.0) * camera.view_matrix();
    let ahead = camera.position() + camera.forward() * 5.0;
    let clip = view_proj * ahead.extend(1.0);
    assert!(clip.w > 0.0);
    assert!((clip.x / clip.w).abs() < EPS);
    assert!((clip.y / clip.w).abs() < EPS);
}
