use umbra_math::{Mat4, Vec3};

use crate::{Result, ShadowError};

/// Directions whose Y component is smaller than this are rejected, the up
/// vector solve divides by it.
pub const BASIS_EPSILON: f32 = 1e-4;

/// `|up · direction|` above this is reported as a non orthogonal basis.
pub const ORTHOGONALITY_TOLERANCE: f32 = 1e-4;

/// Light space axes derived from a directional light's direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightBasis {
    pub direction: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub view: Mat4,
}

impl LightBasis {
    /// Builds the basis for `direction`, which does not need to be normalized.
    ///
    /// `up` lies in the vertical plane containing `direction` and is solved so
    /// that `up · direction == 0`. Directions parallel to the ground plane (or
    /// pointing straight up/down, where that plane is undefined) fail with
    /// [`ShadowError::DegenerateBasis`] instead of producing NaN matrices.
    pub fn new(direction: Vec3) -> Result<Self> {
        let degenerate = move || ShadowError::DegenerateBasis { direction };

        let direction = direction
            .try_normalize()
            .filter(|d| d.y.abs() >= BASIS_EPSILON)
            .ok_or_else(degenerate)?;

        let mut up = Vec3::new(direction.x, 0.0, direction.z);
        up.y = -(up.x * direction.x + up.z * direction.z) / direction.y;
        let up = up.try_normalize().ok_or_else(degenerate)?;

        warn_if_not_orthogonal(up, direction);

        let right = up.cross(direction).try_normalize().ok_or_else(degenerate)?;
        let view = Mat4::look_at_rh(Vec3::ZERO, direction, up);

        if !view.is_finite() {
            return Err(degenerate());
        }

        Ok(Self {
            direction,
            up,
            right,
            view,
        })
    }
}

/// Logs a warning when `up` and `direction` drift apart from a right angle.
///
/// The up solve above is orthogonal by construction, so this only fires on
/// accumulated float error and is not expected for any valid direction.
fn warn_if_not_orthogonal(up: Vec3, direction: Vec3) -> bool {
    let alignment = up.dot(direction);
    let skewed = alignment.abs() > ORTHOGONALITY_TOLERANCE;
    if skewed {
        log::warn!(
            "Light basis up {} and direction {} not orthogonal (dot {})",
            up,
            direction,
            alignment
        );
    }
    skewed
}
