use glam::{Mat4, Vec3};
use lesson_core::scene::{
    advance_spin, lamp_model, lit_cube_model, spinning_cube_model, CUBE_POSITIONS, CUBE_VERTICES,
    POINT_LIGHT_POSITIONS,
};

const EPS: f32 = 1e-5;

fn assert_vec3_near(actual: Vec3, expected: Vec3, eps: f32) {
    assert!(
        (actual - expected).length() < eps,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn spin_advances_at_3_6_degrees_per_second() {
    assert!((advance_spin(0.0, 500.0) - 1.8).abs() < EPS);
    assert!((advance_spin(10.0, 1000.0) - 13.6).abs() < EPS);
}

#[test]
fn spin_wraps_to_zero_past_a_full_turn() {
    assert_eq!(advance_spin(359.9, 1000.0), 0.0);
    assert_eq!(advance_spin(360.0, 0.1), 0.0);
}

#[test]
fn spinning_cube_sits_at_its_table_position() {
    for (i, pos) in CUBE_POSITIONS.iter().enumerate() {
        let model = spinning_cube_model(i, 123.0);
        assert_vec3_near(model.transform_point3(Vec3::ZERO), Vec3::from(*pos), EPS);
    }
}

#[test]
fn unspun_cube_is_pure_translation() {
    let model = spinning_cube_model(0, 0.0);
    let expected = Mat4::from_translation(Vec3::from(CUBE_POSITIONS[0]));
    assert!(model.abs_diff_eq(expected, EPS));
}

#[test]
fn each_cube_spins_at_its_own_multiple() {
    // Cube 1 turns twice as fast as cube 0, so at half the spin it shows
    // the same rotation.
    let rot_a = spinning_cube_model(1, 7.0).transform_vector3(Vec3::X);
    let rot_b = spinning_cube_model(0, 14.0).transform_vector3(Vec3::X);
    assert_vec3_near(rot_a, rot_b, EPS);
}

#[test]
fn lit_cubes_are_staggered_twenty_degrees() {
    let first = lit_cube_model(0);
    let expected = Mat4::from_translation(Vec3::from(CUBE_POSITIONS[0]));
    assert!(first.abs_diff_eq(expected, EPS));

    // Index 2 carries a 40 degree rotation, so a basis vector moves.
    let rotated = lit_cube_model(2).transform_vector3(Vec3::X);
    assert!((rotated - Vec3::X).length() > 0.1);
    assert!((rotated.length() - 1.0).abs() < EPS);
}

#[test]
fn lamp_model_translates_and_shrinks() {
    let position = Vec3::new(0.7, 0.2, 2.0);
    let model = lamp_model(position);
    assert_vec3_near(model.transform_point3(Vec3::ZERO), position, EPS);
    assert_vec3_near(model.transform_vector3(Vec3::X), Vec3::X * 0.1, EPS);
}

#[test]
fn placement_tables_have_the_lesson_sizes() {
    assert_eq!(CUBE_POSITIONS.len(), 10);
    assert_eq!(POINT_LIGHT_POSITIONS.len(), 4);
    assert_eq!(CUBE_VERTICES.len(), 36);
}

#[test]
fn cube_normals_are_unit_and_axis_aligned() {
    for vertex in CUBE_VERTICES {
        let normal = Vec3::from(vertex.normal);
        assert!((normal.length() - 1.0).abs() < EPS);
        let nonzero = [normal.x, normal.y, normal.z]
            .iter()
            .filter(|c| c.abs() > EPS)
            .count();
        assert_eq!(nonzero, 1);
    }
}

#[test]
fn cube_faces_share_one_normal_each() {
    for face in CUBE_VERTICES.chunks(6) {
        let normal = face[0].normal;
        assert!(face.iter().all(|v| v.normal == normal));
    }
}
