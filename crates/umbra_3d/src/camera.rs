use umbra_math::{frustum, Quat, Transform, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    Perspective(f32), //fov in degrees
    Orthographic(f32), //view height in world units
}

/// The viewing camera, as seen by the shadow subsystem.
///
/// Pose changes made through the setters are flagged until [`Camera::end_frame`]
/// is called, which is how per-frame consumers find out the camera moved.
/// Depth range comes from the render config's `z_far`, not from the camera.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub projection: Projection,
    aspect: f32,
    transform: Transform,
    moved: bool,
    rotated: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            projection: Projection::Perspective(45.0),
            aspect: 16.0 / 9.0,
            transform: Transform::default(),
            moved: false,
            rotated: false,
        }
    }
}

impl Camera {
    pub fn new(transform: Transform, projection: Projection, aspect: f32) -> Self {
        Self {
            transform,
            projection,
            aspect,
            ..Default::default()
        }
    }

    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn set_position(&mut self, position: Vec3) {
        if position != self.transform.position {
            self.transform.position = position;
            self.moved = true;
        }
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        if rotation != self.transform.rotation {
            self.transform.rotation = rotation;
            self.rotated = true;
        }
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.set_position(transform.position);
        self.set_rotation(transform.rotation);
        self.transform.scale = transform.scale;
    }

    #[inline]
    pub fn is_moved(&self) -> bool {
        self.moved
    }

    #[inline]
    pub fn is_rotated(&self) -> bool {
        self.rotated
    }

    /// Clears the motion flags. Call once per frame after every consumer ran.
    pub fn end_frame(&mut self) {
        self.moved = false;
        self.rotated = false;
    }

    /// Half width and height of the view volume at `distance` from the camera.
    pub fn half_extents_at(&self, distance: f32) -> Vec2 {
        let half_height = match self.projection {
            Projection::Perspective(fov) => distance * (fov.to_radians() * 0.5).tan(),
            Projection::Orthographic(view_height) => view_height * 0.5,
        };
        Vec2::new(half_height * self.aspect, half_height)
    }

    /// World space corners of the view volume between `near` and `far`.
    pub fn slice_corners(&self, near: f32, far: f32) -> [Vec3; 8] {
        frustum::slice_corners(
            &self.transform,
            near,
            self.half_extents_at(near),
            far,
            self.half_extents_at(far),
        )
    }
}
