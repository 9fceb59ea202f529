use glam::Vec3;
use hero_scene::config::Settings;
use hero_scene::primitive::PrimitiveKind;
use hero_scene::scenes::create_hero_scene;
use hero_scene::Scene;

fn hero(seed: u64) -> Scene {
    create_hero_scene(&Settings {
        seed: Some(seed),
        ..Settings::default()
    })
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[cfg(test)]
mod hero_scene_tests {
    use super::*;

    #[test]
    fn test_all_objects_at_rest_at_zero() {
        let mut scene = hero(1);
        scene.update(0.0);

        for object in scene.objects() {
            assert_eq!(object.rotation(), Vec3::ZERO, "{:?} should not be rotated", object.kind());
        }
    }

    #[test]
    fn test_first_icosahedron_at_ten_seconds() {
        let mut scene = hero(1);
        scene.update(10.0);

        let ico = scene
            .objects_of(PrimitiveKind::IcosahedronDistort)
            .next()
            .expect("hero scene has icosahedra");
        assert_eq!(ico.speed(), 0.8);
        assert!(approx(ico.rotation().x, 1.6), "x = {}", ico.rotation().x);
        assert!(approx(ico.rotation().y, 2.4), "y = {}", ico.rotation().y);
        assert_eq!(ico.rotation().z, 0.0);
    }

    #[test]
    fn test_torus_at_five_seconds() {
        let mut scene = hero(1);
        scene.update(5.0);

        for torus in scene.objects_of(PrimitiveKind::Torus) {
            assert!(approx(torus.rotation().x, 2.5));
            assert_eq!(torus.rotation().y, 0.0);
            assert!(approx(torus.rotation().z, 1.5));
        }
    }

    #[test]
    fn test_particle_rotation_at_hundred_seconds() {
        let mut scene = hero(1);
        for t in [3.0, 250.0, 0.5, 99.0] {
            scene.update(t);
        }
        scene.update(100.0);

        let rotation = scene.particles().expect("hero scene has particles").rotation();
        assert!(approx(rotation.y, 2.0));
        assert!(approx(rotation.x, 1.0));
    }

    #[test]
    fn test_second_icosahedron_uses_its_speed() {
        let mut scene = hero(1);
        scene.update(10.0);

        let second = scene
            .objects_of(PrimitiveKind::IcosahedronDistort)
            .nth(1)
            .expect("two icosahedra");
        assert!(approx(second.rotation().x, 10.0 * 0.2 * 1.2));
        assert!(approx(second.rotation().y, 10.0 * 0.3 * 1.2));
    }

    #[test]
    fn test_boxes_ignore_speed() {
        let mut scene = hero(1);
        scene.update(2.0);

        for cube in scene.objects_of(PrimitiveKind::Box) {
            assert!(approx(cube.rotation().x, 0.4));
            assert!(approx(cube.rotation().y, 0.8));
            assert_eq!(cube.rotation().z, 0.0);
        }
    }

    #[test]
    fn test_replay_is_bit_identical() {
        let mut a = hero(5);
        let mut b = hero(5);
        a.update(12.75);
        b.update(3.0);
        b.update(12.75);

        let graph_a = a.frame_graph();
        let graph_b = b.frame_graph();
        for (ma, mb) in graph_a.meshes.iter().zip(&graph_b.meshes) {
            assert_eq!(ma.model, mb.model);
        }
    }

    #[test]
    fn test_positions_are_fixed() {
        let scene = hero(2);
        let positions: Vec<Vec3> = scene.objects().iter().map(|o| o.position()).collect();
        assert_eq!(
            positions,
            vec![
                Vec3::new(-3.0, 2.0, -2.0),
                Vec3::new(3.5, -1.0, -1.0),
                Vec3::new(-2.0, -2.0, -3.0),
                Vec3::new(4.0, 2.0, -2.0),
                Vec3::new(2.0, 3.0, -4.0),
                Vec3::new(-4.0, 0.0, -3.0),
            ]
        );
    }

    #[test]
    fn test_lights_and_camera() {
        let scene = hero(2);
        let lights = scene.lights();
        assert_eq!(lights.ambient.intensity, 0.3);
        assert_eq!(lights.directional[0].position, Vec3::new(10.0, 10.0, 5.0));
        assert_eq!(lights.directional[0].intensity, 1.0);
        assert_eq!(lights.points[0].color, 0x00d4ff);
        assert_eq!(lights.points[1].color, 0x8b5cf6);
        assert_eq!(lights.points[1].intensity, 0.5);

        let camera = scene.camera();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 8.0));
        assert_eq!(camera.fov_degrees, 45.0);
    }

    #[test]
    fn test_materials_per_kind() {
        let scene = hero(2);
        for object in scene.objects() {
            let material = object.material();
            assert_eq!(material.color, object.color());
            match object.kind() {
                PrimitiveKind::IcosahedronDistort => {
                    assert_eq!(material.distort_amount(), 0.3);
                    assert_eq!(material.distort_speed(), 1.5);
                }
                PrimitiveKind::Torus => assert_eq!(material.emissive_intensity, 0.2),
                PrimitiveKind::Box => assert_eq!(material.emissive_intensity, 0.1),
            }
        }
    }

    #[test]
    fn test_description_serializes() {
        let json = serde_json::to_value(hero(3).describe()).expect("serializable");
        assert_eq!(json["objects"].as_array().map(Vec::len), Some(6));
        assert_eq!(json["objects"][0]["kind"], "icosahedron_distort");
        assert_eq!(json["particle_count"], 200);
        assert_eq!(json["transparent"], true);
    }
}
