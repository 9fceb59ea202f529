use hero_scene::geometry::{box_geometry, icosahedron_geometry, torus_geometry, Geometry};
use hero_scene::primitive::PrimitiveKind;

fn indices_in_range(geometry: &Geometry) -> bool {
    geometry
        .indices
        .iter()
        .all(|&i| (i as usize) < geometry.vertices.len())
}

#[cfg(test)]
mod geometry_tests {
    use super::*;

    #[test]
    fn test_kind_geometry_counts() {
        assert_eq!(PrimitiveKind::IcosahedronDistort.geometry().triangle_count(), 80);
        assert_eq!(PrimitiveKind::Torus.geometry().triangle_count(), 16 * 32 * 2);
        assert_eq!(PrimitiveKind::Box.geometry().triangle_count(), 12);
    }

    #[test]
    fn test_indices_reference_vertices() {
        for kind in PrimitiveKind::ALL {
            assert!(indices_in_range(&kind.geometry()), "{:?}", kind);
        }
    }

    #[test]
    fn test_icosahedron_on_sphere() {
        let geometry = icosahedron_geometry(2.5, 2);
        for vertex in &geometry.vertices {
            let [x, y, z] = vertex.position;
            let r = (x * x + y * y + z * z).sqrt();
            assert!((r - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_normals_are_unit_length() {
        let geometries = [
            box_geometry(0.7),
            torus_geometry(0.8, 0.3, 16, 32),
            icosahedron_geometry(1.0, 1),
        ];
        for geometry in &geometries {
            for vertex in &geometry.vertices {
                let [x, y, z] = vertex.normal;
                assert!(((x * x + y * y + z * z).sqrt() - 1.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_bounding_radius() {
        let torus = torus_geometry(0.8, 0.3, 16, 32);
        assert!((torus.bounding_radius() - 1.1).abs() < 1e-4);

        let cube = box_geometry(0.7);
        assert!((cube.bounding_radius() - 0.35 * 3.0_f32.sqrt()).abs() < 1e-4);
    }
}
