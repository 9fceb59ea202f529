use glam::{Mat4, Vec3};

use crate::types::CameraUniform;

pub const DEFAULT_FOV_DEGREES: f32 = 45.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 1000.0;

/// Fixed perspective camera looking down -Z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub position: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::at(Vec3::new(0.0, 0.0, 8.0))
    }
}

impl CameraConfig {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            fov_degrees: DEFAULT_FOV_DEGREES,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }

    pub fn with_fov(mut self, degrees: f32) -> Self {
        self.fov_degrees = degrees;
        self
    }

    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::NEG_Z
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    /// Vertical field of view, aspect = width / height
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect.max(f32::EPSILON), self.near, self.far)
    }

    pub fn to_uniform(&self, width: u32, height: u32, time: f32) -> CameraUniform {
        let aspect = width as f32 / height.max(1) as f32;

        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix(aspect).to_cols_array_2d(),
            position: self.position.to_array(),
            time,
            viewport: [width as f32, height as f32],
            _pad: [0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_hero_camera() {
        let camera = CameraConfig::default();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 8.0));
        assert_eq!(camera.fov_degrees, 45.0);
        assert_eq!((camera.near, camera.far), (0.1, 1000.0));
    }

    #[test]
    fn origin_is_straight_ahead() {
        let camera = CameraConfig::default();
        let view = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(view.x.abs() < 1e-6 && view.y.abs() < 1e-6);
        assert!((view.z + 8.0).abs() < 1e-5);
    }

    #[test]
    fn projection_maps_near_and_far_to_depth_range() {
        let camera = CameraConfig::default();
        let proj = camera.projection_matrix(16.0 / 9.0);
        let near = proj.project_point3(Vec3::new(0.0, 0.0, -0.1));
        let far = proj.project_point3(Vec3::new(0.0, 0.0, -1000.0));
        assert!(near.z.abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn uniform_carries_viewport_and_time() {
        let uniform = CameraConfig::default().to_uniform(1280, 720, 3.5);
        assert_eq!(uniform.viewport, [1280.0, 720.0]);
        assert_eq!(uniform.time, 3.5);
        assert_eq!(uniform.position, [0.0, 0.0, 8.0]);
    }
}
