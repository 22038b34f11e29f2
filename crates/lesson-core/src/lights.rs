//! Light and material constant tables for the lights lesson.
//!
//! The rig is plain data; `to_uniform` packs it into one `#[repr(C)]`
//! block with vec4-aligned fields so the whole table uploads in a single
//! buffer write instead of dozens of per-name uniform calls.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::scene::POINT_LIGHT_POSITIONS;

/// Shininess exponent used with the diffuse/specular map material.
pub const MAP_SHININESS: f32 = 64.0;

#[derive(Clone, Debug)]
pub struct DirLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

#[derive(Clone, Debug)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

/// Camera-attached torch. Position and direction come from the camera each
/// frame; only the colors, attenuation and cone angles live here.
#[derive(Clone, Debug)]
pub struct SpotLight {
    pub cut_off_deg: f32,
    pub outer_cut_off_deg: f32,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

/// Every light the lesson shader knows about.
#[derive(Clone, Debug)]
pub struct LightingRig {
    pub dir: DirLight,
    pub points: [PointLight; 4],
    pub spot: SpotLight,
}

impl LightingRig {
    /// The lesson's fixed table: one dim directional light, four identical
    /// point lights at the lamp positions, and the torch cones.
    pub fn lesson_defaults() -> Self {
        let point = |position: Vec3| PointLight {
            position,
            ambient: Vec3::splat(0.05),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::splat(1.0),
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        };
        Self {
            dir: DirLight {
                direction: Vec3::new(-0.2, -1.0, -0.3),
                ambient: Vec3::splat(0.05),
                diffuse: Vec3::splat(0.4),
                specular: Vec3::splat(0.5),
            },
            points: POINT_LIGHT_POSITIONS.map(|p| point(Vec3::from(p))),
            spot: SpotLight {
                cut_off_deg: 12.5,
                outer_cut_off_deg: 17.5,
                ambient: Vec3::splat(0.05),
                diffuse: Vec3::splat(0.8),
                specular: Vec3::splat(1.0),
                constant: 1.0,
                linear: 0.09,
                quadratic: 0.032,
            },
        }
    }

    /// Pack the rig for upload. The spot light is pinned to the given pose;
    /// `spot_activated` maps to 1.0/0.0 in its attenuation lane.
    pub fn to_uniform(
        &self,
        spot_position: Vec3,
        spot_direction: Vec3,
        spot_activated: bool,
    ) -> LightsUniform {
        LightsUniform {
            dir: RawDirLight {
                direction: vec4(self.dir.direction, 0.0),
                ambient: vec4(self.dir.ambient, 0.0),
                diffuse: vec4(self.dir.diffuse, 0.0),
                specular: vec4(self.dir.specular, 0.0),
            },
            points: self.points.each_ref().map(|p| RawPointLight {
                position: vec4(p.position, 1.0),
                ambient: vec4(p.ambient, 0.0),
                diffuse: vec4(p.diffuse, 0.0),
                specular: vec4(p.specular, 0.0),
                attenuation: [p.constant, p.linear, p.quadratic, 0.0],
            }),
            spot: RawSpotLight {
                position: vec4(spot_position, 1.0),
                direction: vec4(spot_direction, 0.0),
                ambient: vec4(self.spot.ambient, 0.0),
                diffuse: vec4(self.spot.diffuse, 0.0),
                specular: vec4(self.spot.specular, 0.0),
                attenuation: [
                    self.spot.constant,
                    self.spot.linear,
                    self.spot.quadratic,
                    if spot_activated { 1.0 } else { 0.0 },
                ],
                cone: [
                    self.spot.cut_off_deg.to_radians().cos(),
                    self.spot.outer_cut_off_deg.to_radians().cos(),
                    0.0,
                    0.0,
                ],
            },
        }
    }
}

#[inline]
fn vec4(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct RawDirLight {
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct RawPointLight {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// constant, linear, quadratic, pad
    pub attenuation: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct RawSpotLight {
    pub position: [f32; 4],
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// constant, linear, quadratic, activated
    pub attenuation: [f32; 4],
    /// cos(cut_off), cos(outer_cut_off), pad, pad
    pub cone: [f32; 4],
}

/// The complete light table as one uniform block.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LightsUniform {
    pub dir: RawDirLight,
    pub points: [RawPointLight; 4],
    pub spot: RawSpotLight,
}

/// Solid-color material preset (no maps). Kept for reference alongside the
/// map-based material the shader actually uses.
#[derive(Clone, Copy, Debug)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

pub const OBSIDIAN: Material = Material {
    ambient: Vec3::new(0.05375, 0.05, 0.06625),
    diffuse: Vec3::new(0.18275, 0.17, 0.22525),
    specular: Vec3::new(0.332741, 0.328634, 0.346435),
    shininess: 32.0,
};

pub const RUBY: Material = Material {
    ambient: Vec3::new(0.1745, 0.01175, 0.01175),
    diffuse: Vec3::new(0.61424, 0.04136, 0.04136),
    specular: Vec3::new(0.727811, 0.626959, 0.626959),
    shininess: 64.0,
};

pub const EMERALD: Material = Material {
    ambient: Vec3::new(0.0215, 0.1745, 0.0215),
    diffuse: Vec3::new(0.07568, 0.61424, 0.07568),
    specular: Vec3::new(0.633, 0.727811, 0.633),
    shininess: 64.0,
};
