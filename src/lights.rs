use glam::Vec3;

use crate::math::hex_to_linear;
use crate::types::{LightData, LightsUniform, MAX_DIRECTIONAL_LIGHTS, MAX_POINT_LIGHTS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: u32,
    pub intensity: f32,
}

/// Parallel light shining from `position` towards the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub color: u32,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: u32,
    pub intensity: f32,
}

/// All lights of a scene; fixed for the session
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub directional: Vec<DirectionalLight>,
    pub points: Vec<PointLight>,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: 0xffffff,
                intensity: 0.0,
            },
            directional: Vec::new(),
            points: Vec::new(),
        }
    }
}

impl LightRig {
    /// Pack into the GPU light table. Lights beyond the table capacity are ignored.
    pub fn to_uniform(&self) -> LightsUniform {
        let [r, g, b] = hex_to_linear(self.ambient.color);
        let intensity = self.ambient.intensity;

        let mut directional = [LightData::default(); MAX_DIRECTIONAL_LIGHTS];
        for (slot, light) in directional.iter_mut().zip(&self.directional) {
            *slot = light_data(light.position, light.color, light.intensity);
        }

        let mut points = [LightData::default(); MAX_POINT_LIGHTS];
        for (slot, light) in points.iter_mut().zip(&self.points) {
            *slot = light_data(light.position, light.color, light.intensity);
        }

        LightsUniform {
            ambient: [r * intensity, g * intensity, b * intensity, 0.0],
            directional,
            points,
            counts: [
                self.directional.len().min(MAX_DIRECTIONAL_LIGHTS) as u32,
                self.points.len().min(MAX_POINT_LIGHTS) as u32,
                0,
                0,
            ],
        }
    }
}

fn light_data(position: Vec3, color: u32, intensity: f32) -> LightData {
    LightData {
        position: position.to_array(),
        intensity,
        color: hex_to_linear(color),
        _pad: 0.0,
    }
}
