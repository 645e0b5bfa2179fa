use glam::{Mat3, Quat, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Orients the transform so that `forward()` points along `direction`.
    /// `up` only needs to be roughly perpendicular to `direction`.
    pub fn looking_to(mut self, direction: Vec3, up: Vec3) -> Self {
        let forward = direction.normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);

        // Columns are the images of +X, +Y, +Z; forward is -Z
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize();
        self
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

#[cfg(test)]
mod tests {
    use super::Transform;
    use glam::Vec3;

    #[test]
    fn looking_to_points_forward() {
        let dir = Vec3::new(1.0, -0.5, 2.0).normalize();
        let transform = Transform::from_position(Vec3::new(3.0, 1.0, -2.0)).looking_to(dir, Vec3::Y);

        assert!(transform.forward().abs_diff_eq(dir, 1e-5));
        assert!(transform.right().dot(dir).abs() < 1e-5);
        assert!(transform.up().y > 0.0);
    }
}
