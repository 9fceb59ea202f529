use glam::{Mat4, Vec3};
use rand::Rng;

use crate::material::PointsMaterial;
use crate::math::rotation_xyz;

pub const DEFAULT_PARTICLE_COUNT: usize = 200;
/// Edge length of the cube the particles are scattered in
pub const FIELD_EXTENT: f32 = 20.0;
pub const ROTATION_RATE_X: f32 = 0.01;
pub const ROTATION_RATE_Y: f32 = 0.02;

/// Scatters `count` points uniformly in a cube of edge [`FIELD_EXTENT`] centered on the origin.
/// Returns a flat `[x0, y0, z0, x1, ...]` buffer of length `count * 3`.
pub fn generate_positions<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<f32> {
    (0..count * 3)
        .map(|_| (rng.gen::<f32>() - 0.5) * FIELD_EXTENT)
        .collect()
}

/// Rotation of the whole field, derived from elapsed time only
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldRotation {
    pub x: f32,
    pub y: f32,
}

impl FieldRotation {
    pub fn at(elapsed: f32) -> Self {
        Self {
            x: elapsed * ROTATION_RATE_X,
            y: elapsed * ROTATION_RATE_Y,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        rotation_xyz(Vec3::new(self.x, self.y, 0.0))
    }
}

/// Fixed point cloud whose positions never change after generation;
/// only the field rotation follows the clock.
#[derive(Debug, Clone)]
pub struct ParticleField {
    positions: Box<[f32]>,
    rotation: FieldRotation,
    material: PointsMaterial,
}

impl ParticleField {
    pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        Self {
            positions: generate_positions(count, rng).into_boxed_slice(),
            rotation: FieldRotation::default(),
            material: PointsMaterial::default(),
        }
    }

    pub fn with_material(mut self, material: PointsMaterial) -> Self {
        self.material = material;
        self
    }

    /// Absolute update: the result depends on `elapsed` alone, never on earlier calls
    pub fn update(&mut self, elapsed: f32) {
        self.rotation = FieldRotation::at(elapsed);
    }

    pub fn count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn point(&self, index: usize) -> Option<Vec3> {
        let start = index.checked_mul(3)?;
        self.positions
            .get(start..start.checked_add(3)?)
            .map(Vec3::from_slice)
    }

    pub fn rotation(&self) -> FieldRotation {
        self.rotation
    }

    pub fn material(&self) -> &PointsMaterial {
        &self.material
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.rotation.matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generate_has_three_floats_per_point() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(generate_positions(200, &mut rng).len(), 600);
        assert!(generate_positions(0, &mut rng).is_empty());
    }

    #[test]
    fn update_is_absolute() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = ParticleField::generate(10, &mut rng);
        field.update(50.0);
        field.update(3.0);
        assert_eq!(field.rotation(), FieldRotation::at(3.0));
    }

    #[test]
    fn point_lookup_matches_buffer() {
        let mut rng = StdRng::seed_from_u64(3);
        let field = ParticleField::generate(4, &mut rng);
        let p = field.point(2).unwrap();
        assert_eq!(p.to_array(), [field.positions()[6], field.positions()[7], field.positions()[8]]);
        assert!(field.point(4).is_none());
    }

    #[test]
    fn huge_point_index_is_none() {
        let mut rng = StdRng::seed_from_u64(3);
        let field = ParticleField::generate(4, &mut rng);
        assert!(field.point(usize::MAX).is_none());
        assert!(field.point(usize::MAX / 3).is_none());
    }

    #[test]
    fn model_matrix_at_rest_is_identity() {
        let mut rng = StdRng::seed_from_u64(3);
        let field = ParticleField::generate(1, &mut rng);
        assert_eq!(field.model_matrix(), Mat4::IDENTITY);
    }
}
