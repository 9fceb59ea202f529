use glam::Vec3;

use crate::camera::CameraConfig;
use crate::config::Settings;
use crate::scene::{Scene, SceneBuilder};

pub mod palette {
    pub const CYAN: u32 = 0x00d4ff;
    pub const VIOLET: u32 = 0x8b5cf6;
    pub const PINK: u32 = 0xec4899;
    pub const BLUE: u32 = 0x3b82f6;
    pub const WHITE: u32 = 0xffffff;
}

use palette::*;

/// Portfolio hero background: two distorted icosahedra, two tori, two boxes,
/// a four-light rig and a particle field, seen from (0, 0, 8).
pub fn create_hero_scene(settings: &Settings) -> Scene {
    let builder = match settings.seed {
        Some(seed) => SceneBuilder::seeded(seed),
        None => SceneBuilder::new(),
    };

    hero_topology(builder)
        .with_particles(settings.particle_count)
        .transparent(settings.transparent)
        .build()
}

/// Camera, lights and primitives of the hero scene, without the particle field
pub fn hero_topology(builder: SceneBuilder) -> SceneBuilder {
    builder
        .with_camera(CameraConfig::at(Vec3::new(0.0, 0.0, 8.0)).with_fov(45.0))
        .with_ambient(0.3)
        .add_directional(Vec3::new(10.0, 10.0, 5.0), WHITE, 1.0)
        .add_point_light(Vec3::new(-10.0, -10.0, -5.0), CYAN, 0.5)
        .add_point_light(Vec3::new(10.0, -10.0, 5.0), VIOLET, 0.5)
        .add_distorted_icosahedron(Vec3::new(-3.0, 2.0, -2.0), CYAN, 0.8)
        .add_distorted_icosahedron(Vec3::new(3.5, -1.0, -1.0), VIOLET, 1.2)
        .add_torus(Vec3::new(-2.0, -2.0, -3.0), CYAN)
        .add_torus(Vec3::new(4.0, 2.0, -2.0), PINK)
        .add_box(Vec3::new(2.0, 3.0, -4.0), VIOLET)
        .add_box(Vec3::new(-4.0, 0.0, -3.0), BLUE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::PrimitiveKind;

    fn seeded() -> Scene {
        create_hero_scene(&Settings {
            seed: Some(42),
            ..Settings::default()
        })
    }

    #[test]
    fn hero_topology_counts() {
        let scene = seeded();
        assert_eq!(scene.objects().len(), 6);
        for kind in PrimitiveKind::ALL {
            assert_eq!(scene.objects_of(kind).count(), 2);
        }
        assert_eq!(scene.particles().map(|p| p.count()), Some(200));
        assert_eq!(scene.lights().directional.len(), 1);
        assert_eq!(scene.lights().points.len(), 2);
        assert!(scene.is_transparent());
    }

    #[test]
    fn icosahedra_carry_speed_multipliers() {
        let scene = seeded();
        let speeds: Vec<f32> = scene
            .objects_of(PrimitiveKind::IcosahedronDistort)
            .map(|o| o.speed())
            .collect();
        assert_eq!(speeds, vec![0.8, 1.2]);
    }

    #[test]
    fn settings_drive_particles_and_transparency() {
        let scene = create_hero_scene(&Settings {
            seed: Some(1),
            particle_count: 12,
            transparent: false,
            ..Settings::default()
        });
        assert_eq!(scene.particles().map(|p| p.positions().len()), Some(36));
        assert!(!scene.is_transparent());
    }
}
