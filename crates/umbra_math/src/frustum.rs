//! Frustum slice corners and the light-space bounds used to fit shadow projections.

use glam::{Mat4, Vec2, Vec3};

use crate::Transform;

/// Corners of a view frustum slice, near plane first.
///
/// Each plane is ordered bottom-left, bottom-right, top-right, top-left as seen
/// from the viewer. `near_half` and `far_half` are the half width/height of the
/// slice at the respective distance.
pub fn slice_corners(
    transform: &Transform,
    near: f32,
    near_half: Vec2,
    far: f32,
    far_half: Vec2,
) -> [Vec3; 8] {
    let origin = transform.position;
    let forward = transform.forward();
    let right = transform.right();
    let up = transform.up();

    let plane = |distance: f32, half: Vec2| {
        let center = origin + forward * distance;
        let x = right * half.x;
        let y = up * half.y;
        [center - x - y, center + x - y, center + x + y, center - x + y]
    };

    let [n0, n1, n2, n3] = plane(near, near_half);
    let [f0, f1, f2, f3] = plane(far, far_half);

    [n0, n1, n2, n3, f0, f1, f2, f3]
}

/// Radius of the sphere centered on the centroid of `points` that contains all of them.
pub fn bounding_radius(points: &[Vec3]) -> f32 {
    if points.is_empty() {
        return 0.0;
    }
    let center = points.iter().copied().sum::<Vec3>() / points.len() as f32;

    points
        .iter()
        .map(|point| point.distance(center))
        .fold(0.0, f32::max)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        Some(rest.iter().fold(
            Self {
                min: *first,
                max: *first,
            },
            |acc, point| Self {
                min: acc.min.min(*point),
                max: acc.max.max(*point),
            },
        ))
    }

    /// Bounds of `points` after transforming them by `matrix`.
    pub fn from_transformed(points: &[Vec3], matrix: &Mat4) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let first = matrix.transform_point3(*first);

        Some(rest.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |acc, point| {
                let point = matrix.transform_point3(*point);
                Self {
                    min: acc.min.min(point),
                    max: acc.max.max(point),
                }
            },
        ))
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}
