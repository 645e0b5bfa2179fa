use umbra_3d::{Camera, ShadowConfig};
use umbra_math::{frustum, Aabb, Mat4, Vec3};

use crate::{LightBasis, Result, ShadowError};

/// How a cascade's orthographic volume is fitted around its frustum slice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitSettings {
    /// Shadow map edge length in texels, used for snapping.
    pub resolution: u32,
    pub stabilize: bool,
    pub caster_padding: f32,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self::from(&ShadowConfig::default())
    }
}

impl From<&ShadowConfig> for FitSettings {
    fn from(config: &ShadowConfig) -> Self {
        Self {
            resolution: config.quality.resolution(),
            stabilize: config.stabilize,
            caster_padding: config.caster_padding,
        }
    }
}

/// One cascade: a depth slice of the camera frustum and the light space
/// projection covering it.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitCamera {
    near_depth: f32,
    far_depth: f32,
    ortho_view_projection: Mat4,
}

impl SplitCamera {
    pub fn new(near_fraction: f32, far_fraction: f32, z_far: f32) -> Self {
        Self {
            near_depth: near_fraction * z_far,
            far_depth: far_fraction * z_far,
            ortho_view_projection: Mat4::IDENTITY,
        }
    }

    #[inline]
    pub fn near_depth(&self) -> f32 {
        self.near_depth
    }

    #[inline]
    pub fn far_depth(&self) -> f32 {
        self.far_depth
    }

    #[inline]
    pub fn ortho_view_projection(&self) -> &Mat4 {
        &self.ortho_view_projection
    }

    /// Computes the orthographic view-projection for this slice without storing it.
    pub fn fit(&self, camera: &Camera, basis: &LightBasis, settings: &FitSettings) -> Result<Mat4> {
        let corners = camera.slice_corners(self.near_depth, self.far_depth);
        let mut bounds = Aabb::from_transformed(&corners, &basis.view).ok_or(
            ShadowError::DegenerateProjection {
                near: self.near_depth,
                far: self.far_depth,
            },
        )?;

        if settings.stabilize {
            bounds = stabilized_bounds(&corners, bounds, settings.resolution);
        }

        // Light space looks down -Z: the slice spans z in [min.z, max.z]
        let projection = Mat4::orthographic_rh(
            bounds.min.x,
            bounds.max.x,
            bounds.min.y,
            bounds.max.y,
            -bounds.max.z - settings.caster_padding,
            -bounds.min.z,
        );
        let view_projection = projection * basis.view;

        if !view_projection.is_finite() {
            return Err(ShadowError::DegenerateProjection {
                near: self.near_depth,
                far: self.far_depth,
            });
        }

        Ok(view_projection)
    }

    /// Refits the projection for the given camera and light basis.
    pub fn update(&mut self, camera: &Camera, basis: &LightBasis, settings: &FitSettings) -> Result<()> {
        self.ortho_view_projection = self.fit(camera, basis, settings)?;
        Ok(())
    }

    pub(crate) fn set_ortho_view_projection(&mut self, matrix: Mat4) {
        self.ortho_view_projection = matrix;
    }
}

/// Square, texel aligned x/y bounds whose size only depends on the slice
/// shape, so camera rotation and translation don't change the texel grid.
fn stabilized_bounds(corners: &[Vec3; 8], bounds: Aabb, resolution: u32) -> Aabb {
    let radius = frustum::bounding_radius(corners);
    let radius = (radius * 16.0).ceil() / 16.0;

    if radius <= 0.0 || resolution == 0 {
        return bounds;
    }

    let texel = (radius * 2.0) / resolution as f32;
    let center = bounds.center();
    let snapped_x = (center.x / texel).floor() * texel;
    let snapped_y = (center.y / texel).floor() * texel;
    // Snapping moves the center by up to one texel
    let half = radius + texel;

    Aabb {
        min: Vec3::new(snapped_x - half, snapped_y - half, bounds.min.z),
        max: Vec3::new(snapped_x + half, snapped_y + half, bounds.max.z),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umbra_math::{Transform, Vec4Swizzles};

    fn camera() -> Camera {
        let transform = Transform::from_position(Vec3::new(0.0, 10.0, 0.0))
            .looking_to(Vec3::new(0.0, -0.2, -1.0), Vec3::Y);
        Camera::new(transform, umbra_3d::Projection::Perspective(60.0), 16.0 / 9.0)
    }

    fn basis() -> LightBasis {
        LightBasis::new(Vec3::new(0.3, -0.8, 0.2)).unwrap()
    }

    #[test]
    fn depths_scale_with_far_plane() {
        let split = SplitCamera::new(0.1, 0.3, 1000.0);

        assert_eq!(split.near_depth(), 100.0);
        assert_eq!(split.far_depth(), 300.0);
        assert_eq!(*split.ortho_view_projection(), Mat4::IDENTITY);
    }

    #[test]
    fn slice_corners_land_inside_clip_volume() {
        let camera = camera();
        let basis = basis();

        for stabilize in [false, true] {
            let settings = FitSettings {
                stabilize,
                ..Default::default()
            };
            let split = SplitCamera::new(0.01, 0.05, 1000.0);
            let matrix = split.fit(&camera, &basis, &settings).unwrap();

            for corner in camera.slice_corners(split.near_depth(), split.far_depth()) {
                let clip = matrix * corner.extend(1.0);
                let ndc = clip.xyz() / clip.w;
                assert!(ndc.x.abs() <= 1.0 + 1e-3, "x {} out of range", ndc.x);
                assert!(ndc.y.abs() <= 1.0 + 1e-3, "y {} out of range", ndc.y);
                assert!((-1e-3..=1.0 + 1e-3).contains(&ndc.z), "z {} out of range", ndc.z);
            }
        }
    }

    #[test]
    fn update_is_idempotent() {
        let camera = camera();
        let basis = basis();
        let settings = FitSettings::default();
        let mut split = SplitCamera::new(0.0, 0.02, 1000.0);

        split.update(&camera, &basis, &settings).unwrap();
        let first = *split.ortho_view_projection();
        split.update(&camera, &basis, &settings).unwrap();

        assert_eq!(first, *split.ortho_view_projection());
    }

    #[test]
    fn stabilized_extent_ignores_camera_rotation() {
        let basis = basis();
        let settings = FitSettings::default();
        let split = SplitCamera::new(0.0, 0.05, 1000.0);

        let mut camera = camera();
        let a = split.fit(&camera, &basis, &settings).unwrap();
        camera.set_rotation(camera.transform().rotation * umbra_math::Quat::from_rotation_y(0.7));
        let b = split.fit(&camera, &basis, &settings).unwrap();

        // Row 0 is the light's right axis scaled by 2 / extent
        let scale = |m: Mat4| m.row(0).truncate().length();
        assert!((scale(a) - scale(b)).abs() < 1e-6);
    }

    #[test]
    fn caster_padding_extends_volume_toward_light() {
        let camera = camera();
        let basis = basis();
        let split = SplitCamera::new(0.01, 0.05, 1000.0);
        let padding = 200.0;

        // Slice corner closest to the light, i.e. largest light space z
        let light_z = |p: Vec3| basis.view.transform_point3(p).z;
        let closest = camera
            .slice_corners(split.near_depth(), split.far_depth())
            .into_iter()
            .max_by(|a, b| light_z(*a).total_cmp(&light_z(*b)))
            .unwrap();
        let caster = closest - basis.direction * (padding * 0.5);

        let depth = |caster_padding: f32| {
            let settings = FitSettings {
                caster_padding,
                ..Default::default()
            };
            let matrix = split.fit(&camera, &basis, &settings).unwrap();
            let clip = matrix * caster.extend(1.0);
            clip.z / clip.w
        };

        assert!(depth(0.0) < 0.0, "unpadded depth {}", depth(0.0));
        assert!(
            (0.0..=1.0).contains(&depth(padding)),
            "padded depth {}",
            depth(padding)
        );
    }

    #[test]
    fn non_finite_camera_is_degenerate() {
        let mut camera = camera();
        camera.set_position(Vec3::NAN);

        for stabilize in [false, true] {
            let settings = FitSettings {
                stabilize,
                ..Default::default()
            };
            let err = SplitCamera::new(0.0, 0.1, 100.0)
                .fit(&camera, &basis(), &settings)
                .unwrap_err();
            assert!(matches!(
                err,
                ShadowError::DegenerateProjection { near, far } if near == 0.0 && far == 10.0
            ));
        }
    }
}
