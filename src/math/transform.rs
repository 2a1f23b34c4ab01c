use glam::{Mat3, Mat4, Quat, Vec3};

/// Rigid pose: a world-space position and an attitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Builds the rotation whose local X, Y and Z axes map onto `right`, `up`
    /// and `forward`. The three axes must form a right-handed orthonormal basis.
    pub fn rotation_from_axes(right: Vec3, up: Vec3, forward: Vec3) -> Quat {
        Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize()
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.position
    }

    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation * direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_of_identity_basis_give_identity_rotation() {
        let q = Pose::rotation_from_axes(Vec3::X, Vec3::Y, Vec3::Z);
        assert!(q.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn rotation_from_axes_maps_local_axes() {
        let right = Vec3::new(0.0, 0.0, -1.0);
        let up = Vec3::Y;
        let forward = right.cross(up);
        let pose = Pose::new(Vec3::ONE, Pose::rotation_from_axes(right, up, forward));

        assert!(pose.right().abs_diff_eq(right, 1e-5));
        assert!(pose.up().abs_diff_eq(up, 1e-5));
        assert!(pose.forward().abs_diff_eq(forward, 1e-5));
        assert!(pose
            .transform_point(Vec3::X)
            .abs_diff_eq(Vec3::ONE + right, 1e-5));
    }
}
