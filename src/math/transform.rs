use glam::{Mat4, Vec3};

/// Euler rotation applied in X, Y, Z order (`Rx * Ry * Rz`)
pub fn rotation_xyz(angles: Vec3) -> Mat4 {
    Mat4::from_rotation_x(angles.x) * Mat4::from_rotation_y(angles.y) * Mat4::from_rotation_z(angles.z)
}

/// Inverse-transpose of the model matrix, for transforming normals
pub fn normal_matrix(model: Mat4) -> Mat4 {
    model.inverse().transpose()
}
