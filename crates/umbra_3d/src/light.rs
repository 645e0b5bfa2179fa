use umbra_math::Vec3;

/// Base properties shared by every light kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

impl Light {
    pub fn new(color: Vec3, intensity: f32) -> Self {
        Self { color, intensity }
    }

    /// Color scaled by intensity.
    #[inline]
    pub fn radiance(&self) -> Vec3 {
        self.color * self.intensity
    }
}
