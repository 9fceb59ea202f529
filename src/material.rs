use crate::math::hex_to_linear;

/// Vertex noise displacement of a distorted surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distortion {
    /// Displacement strength; the shader scales by its square
    pub amount: f32,
    /// Noise animation speed relative to elapsed time
    pub speed: f32,
}

/// Physically-inspired surface parameters of a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Packed sRGB `0xRRGGBB`
    pub color: u32,
    pub roughness: f32,
    pub metalness: f32,
    /// Self-illumination in the object's own color
    pub emissive_intensity: f32,
    pub distortion: Option<Distortion>,
}

impl Material {
    pub fn standard(color: u32, roughness: f32, metalness: f32) -> Self {
        Self {
            color,
            roughness,
            metalness,
            emissive_intensity: 0.0,
            distortion: None,
        }
    }

    pub fn with_emissive(mut self, intensity: f32) -> Self {
        self.emissive_intensity = intensity;
        self
    }

    pub fn with_distortion(mut self, amount: f32, speed: f32) -> Self {
        self.distortion = Some(Distortion { amount, speed });
        self
    }

    /// Linear RGB base color
    pub fn base_color(&self) -> [f32; 3] {
        hex_to_linear(self.color)
    }

    /// Linear RGB emitted radiance
    pub fn emissive(&self) -> [f32; 3] {
        self.base_color().map(|c| c * self.emissive_intensity)
    }

    pub fn distort_amount(&self) -> f32 {
        self.distortion.map_or(0.0, |d| d.amount)
    }

    pub fn distort_speed(&self) -> f32 {
        self.distortion.map_or(0.0, |d| d.speed)
    }
}

/// Appearance of the particle field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsMaterial {
    pub color: u32,
    /// Point size in world units when attenuated, pixels otherwise
    pub size: f32,
    pub opacity: f32,
    pub size_attenuation: bool,
}

impl Default for PointsMaterial {
    fn default() -> Self {
        Self {
            color: 0x00d4ff,
            size: 0.03,
            opacity: 0.6,
            size_attenuation: true,
        }
    }
}

impl PointsMaterial {
    pub fn base_color(&self) -> [f32; 3] {
        hex_to_linear(self.color)
    }
}
