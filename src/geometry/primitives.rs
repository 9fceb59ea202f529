use std::f32::consts::TAU;

use glam::Vec3;

use super::{Geometry, Vertex};

/// Axis-aligned cube centered on the origin, 4 vertices per face
pub fn box_geometry(size: f32) -> Geometry {
    let half = size * 0.5;
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    // (normal, tangent u, tangent v) per face; u x v == normal keeps winding CCW
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    for (normal, u, v) in faces {
        let base = vertices.len() as u32;
        let center = normal * half;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = center + u * (su * half) + v * (sv * half);
            vertices.push(Vertex::new(position.to_array(), normal.to_array()));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Geometry::from_data(vertices, indices)
}

/// Torus in the XY plane with its hole along Z
pub fn torus_geometry(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Geometry {
    let radial_segments = radial_segments.max(3);
    let tubular_segments = tubular_segments.max(3);

    let mut vertices = Vec::with_capacity(((radial_segments + 1) * (tubular_segments + 1)) as usize);
    let mut indices = Vec::with_capacity((radial_segments * tubular_segments * 6) as usize);

    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;

            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let ring_center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let normal = (position - ring_center).normalize();

            vertices.push(Vertex::new(position.to_array(), normal.to_array()));
        }
    }

    let stride = tubular_segments + 1;
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Geometry::from_data(vertices, indices)
}

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

fn icosahedron_corners() -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
}

/// Geodesic sphere: each icosahedron face split into `(detail + 1)^2`
/// triangles, every vertex pushed out to `radius`. Smooth normals.
pub fn icosahedron_geometry(radius: f32, detail: u32) -> Geometry {
    let corners = icosahedron_corners();
    let cols = detail as usize + 1;

    let mut vertices = Vec::with_capacity(20 * cols * cols * 3);

    let mut push = |p: Vec3| {
        let n = p.normalize();
        vertices.push(Vertex::new((n * radius).to_array(), n.to_array()));
    };

    for [ia, ib, ic] in ICOSAHEDRON_FACES {
        let (a, b, c) = (corners[ia], corners[ib], corners[ic]);

        // rows[i][j]: row i slides from edge a-b towards c
        let rows: Vec<Vec<Vec3>> = (0..=cols)
            .map(|i| {
                let aj = a.lerp(c, i as f32 / cols as f32);
                let bj = b.lerp(c, i as f32 / cols as f32);
                let count = cols - i;
                (0..=count)
                    .map(|j| if count == 0 { aj } else { aj.lerp(bj, j as f32 / count as f32) })
                    .collect()
            })
            .collect();

        for i in 0..cols {
            for j in 0..(2 * (cols - i) - 1) {
                let k = j / 2;
                if j % 2 == 0 {
                    push(rows[i][k + 1]);
                    push(rows[i + 1][k]);
                    push(rows[i][k]);
                } else {
                    push(rows[i][k + 1]);
                    push(rows[i + 1][k + 1]);
                    push(rows[i + 1][k]);
                }
            }
        }
    }

    let indices = (0..vertices.len() as u32).collect();
    Geometry::from_data(vertices, indices)
}
