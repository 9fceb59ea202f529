use glam::Mat4;

use crate::material::{Material, PointsMaterial};
use crate::math::normal_matrix;

pub const MAX_DIRECTIONAL_LIGHTS: usize = 2;
pub const MAX_POINT_LIGHTS: usize = 4;

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub time: f32, // Elapsed seconds, drives surface distortion
    pub viewport: [f32; 2],
    pub _pad: [f32; 2],
}

/// One directional or point light
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightData {
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    pub _pad: f32,
}

/// Fixed-capacity light table; `counts` = (directional, point, 0, 0)
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub ambient: [f32; 4], // rgb premultiplied by intensity
    pub directional: [LightData; MAX_DIRECTIONAL_LIGHTS],
    pub points: [LightData; MAX_POINT_LIGHTS],
    pub counts: [u32; 4],
}

/// Per-mesh transform and material
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    pub emissive: [f32; 4],
    pub surface: [f32; 4], // roughness, metalness, distort amount, distort speed
}

impl ObjectUniform {
    pub fn new(model: Mat4, material: &Material) -> Self {
        let [r, g, b] = material.base_color();
        let [er, eg, eb] = material.emissive();
        Self {
            model: model.to_cols_array_2d(),
            normal: normal_matrix(model).to_cols_array_2d(),
            base_color: [r, g, b, 1.0],
            emissive: [er, eg, eb, 0.0],
            surface: [
                material.roughness,
                material.metalness,
                material.distort_amount(),
                material.distort_speed(),
            ],
        }
    }
}

/// Particle field transform and point appearance
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4], // rgb, opacity
    pub params: [f32; 4], // size, size attenuation (0/1), unused, unused
}

impl ParticleUniform {
    pub fn new(model: Mat4, material: &PointsMaterial) -> Self {
        let [r, g, b] = material.base_color();
        Self {
            model: model.to_cols_array_2d(),
            color: [r, g, b, material.opacity],
            params: [
                material.size,
                if material.size_attenuation { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ],
        }
    }
}
