//! Per-kind dispatch table: rotation rates, float coefficients, default
//! appearance and geometry of each primitive shape.

use serde::{Deserialize, Serialize};

use crate::core::animator::RotationRates;
use crate::core::float::FloatParams;
use crate::geometry::{box_geometry, icosahedron_geometry, torus_geometry, Geometry};
use crate::material::Material;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    IcosahedronDistort,
    Torus,
    Box,
}

/// Everything that differs between primitive kinds
#[derive(Debug, Clone, Copy)]
pub struct KindProfile {
    pub rates: RotationRates,
    pub float: FloatParams,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive_intensity: f32,
    /// (amount, speed)
    pub distortion: Option<(f32, f32)>,
    pub geometry: fn() -> Geometry,
}

impl KindProfile {
    pub fn material(&self, color: u32) -> Material {
        let material = Material::standard(color, self.roughness, self.metalness)
            .with_emissive(self.emissive_intensity);
        match self.distortion {
            Some((amount, speed)) => material.with_distortion(amount, speed),
            None => material,
        }
    }
}

const ICOSAHEDRON: KindProfile = KindProfile {
    rates: RotationRates::new(0.2, 0.3, 0.0, true),
    float: FloatParams::new(2.0, 1.0, 2.0),
    roughness: 0.2,
    metalness: 0.8,
    emissive_intensity: 0.0,
    distortion: Some((0.3, 1.5)),
    geometry: icosahedron_mesh,
};

const TORUS: KindProfile = KindProfile {
    rates: RotationRates::new(0.5, 0.0, 0.3, false),
    float: FloatParams::new(1.5, 0.5, 1.5),
    roughness: 0.1,
    metalness: 0.9,
    emissive_intensity: 0.2,
    distortion: None,
    geometry: torus_mesh,
};

const BOX: KindProfile = KindProfile {
    rates: RotationRates::new(0.2, 0.4, 0.0, false),
    float: FloatParams::new(1.0, 0.8, 1.0),
    roughness: 0.2,
    metalness: 0.8,
    emissive_intensity: 0.1,
    distortion: None,
    geometry: box_mesh,
};

fn icosahedron_mesh() -> Geometry {
    icosahedron_geometry(1.0, 1)
}

fn torus_mesh() -> Geometry {
    torus_geometry(0.8, 0.3, 16, 32)
}

fn box_mesh() -> Geometry {
    box_geometry(0.7)
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 3] = [
        PrimitiveKind::IcosahedronDistort,
        PrimitiveKind::Torus,
        PrimitiveKind::Box,
    ];

    pub fn profile(self) -> &'static KindProfile {
        match self {
            PrimitiveKind::IcosahedronDistort => &ICOSAHEDRON,
            PrimitiveKind::Torus => &TORUS,
            PrimitiveKind::Box => &BOX,
        }
    }

    pub fn rotation_rates(self) -> RotationRates {
        self.profile().rates
    }

    pub fn float_params(self) -> FloatParams {
        self.profile().float
    }

    pub fn geometry(self) -> Geometry {
        (self.profile().geometry)()
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::IcosahedronDistort => "icosahedron",
            PrimitiveKind::Torus => "torus",
            PrimitiveKind::Box => "box",
        }
    }
}
