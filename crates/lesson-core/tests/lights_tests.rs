use std::mem::size_of;

use glam::Vec3;
use lesson_core::lights::{
    LightsUniform, Material, RawDirLight, RawPointLight, RawSpotLight, EMERALD, OBSIDIAN, RUBY,
};
use lesson_core::scene::POINT_LIGHT_POSITIONS;
use lesson_core::LightingRig;

const EPS: f32 = 1e-6;

#[test]
fn lesson_defaults_match_the_light_table() {
    let rig = LightingRig::lesson_defaults();

    assert_eq!(rig.dir.direction, Vec3::new(-0.2, -1.0, -0.3));
    assert_eq!(rig.dir.ambient, Vec3::splat(0.05));
    assert_eq!(rig.dir.diffuse, Vec3::splat(0.4));
    assert_eq!(rig.dir.specular, Vec3::splat(0.5));

    assert_eq!(rig.points.len(), 4);
    for (point, pos) in rig.points.iter().zip(POINT_LIGHT_POSITIONS) {
        assert_eq!(point.position, Vec3::from(pos));
        assert_eq!(point.ambient, Vec3::splat(0.05));
        assert_eq!(point.diffuse, Vec3::splat(0.8));
        assert_eq!(point.specular, Vec3::splat(1.0));
        assert_eq!(point.constant, 1.0);
        assert_eq!(point.linear, 0.09);
        assert_eq!(point.quadratic, 0.032);
    }

    assert_eq!(rig.spot.cut_off_deg, 12.5);
    assert_eq!(rig.spot.outer_cut_off_deg, 17.5);
}

#[test]
fn uniform_pins_the_spot_to_the_given_pose() {
    let rig = LightingRig::lesson_defaults();
    let position = Vec3::new(1.0, 2.0, 3.0);
    let direction = Vec3::new(0.0, 0.0, -1.0);
    let uniform = rig.to_uniform(position, direction, true);

    assert_eq!(uniform.spot.position, [1.0, 2.0, 3.0, 1.0]);
    assert_eq!(uniform.spot.direction, [0.0, 0.0, -1.0, 0.0]);
}

#[test]
fn activated_flag_lands_in_the_attenuation_lane() {
    let rig = LightingRig::lesson_defaults();
    let on = rig.to_uniform(Vec3::ZERO, Vec3::NEG_Z, true);
    let off = rig.to_uniform(Vec3::ZERO, Vec3::NEG_Z, false);

    assert_eq!(on.spot.attenuation, [1.0, 0.09, 0.032, 1.0]);
    assert_eq!(off.spot.attenuation, [1.0, 0.09, 0.032, 0.0]);
}

#[test]
fn cone_lanes_carry_the_cut_off_cosines() {
    let uniform = LightingRig::lesson_defaults().to_uniform(Vec3::ZERO, Vec3::NEG_Z, false);
    assert!((uniform.spot.cone[0] - 12.5f32.to_radians().cos()).abs() < EPS);
    assert!((uniform.spot.cone[1] - 17.5f32.to_radians().cos()).abs() < EPS);
    // Inner cone is tighter, so its cosine is the larger one.
    assert!(uniform.spot.cone[0] > uniform.spot.cone[1]);
}

#[test]
fn point_lights_pack_positions_and_attenuation() {
    let uniform = LightingRig::lesson_defaults().to_uniform(Vec3::ZERO, Vec3::NEG_Z, false);
    for (raw, pos) in uniform.points.iter().zip(POINT_LIGHT_POSITIONS) {
        assert_eq!(raw.position, [pos[0], pos[1], pos[2], 1.0]);
        assert_eq!(raw.attenuation, [1.0, 0.09, 0.032, 0.0]);
    }
}

#[test]
fn uniform_layout_matches_the_shader_block() {
    assert_eq!(size_of::<RawDirLight>(), 64);
    assert_eq!(size_of::<RawPointLight>(), 80);
    assert_eq!(size_of::<RawSpotLight>(), 112);
    assert_eq!(size_of::<LightsUniform>(), 64 + 4 * 80 + 112);

    let uniform = LightingRig::lesson_defaults().to_uniform(Vec3::ZERO, Vec3::NEG_Z, false);
    assert_eq!(bytemuck::bytes_of(&uniform).len(), size_of::<LightsUniform>());
}

#[test]
fn material_presets_keep_their_exponents() {
    let presets: [Material; 3] = [OBSIDIAN, RUBY, EMERALD];
    assert_eq!(presets[0].shininess, 32.0);
    assert_eq!(presets[1].shininess, 64.0);
    assert_eq!(presets[2].shininess, 64.0);
    for preset in presets {
        assert!(preset.ambient.min_element() >= 0.0);
        assert!(preset.diffuse.max_element() <= 1.0);
    }
}
