use umbra_3d::{Camera, Light, RenderConfig, Shared};
use umbra_math::Vec3;

use crate::{
    CascadeSet, FitSettings, LightBasis, LightBuffer, MatricesBuffer, Result, SplitScheme,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateState {
    #[default]
    Idle,
    Updating,
}

/// A shadow casting directional light (the sun).
///
/// Owns the light basis, the cascades and both GPU buffer images, and decides
/// how much of that has to be recomputed when the camera moves or the light
/// direction changes. The camera and render configuration are shared with
/// the rest of the renderer and only locked for the duration of a call.
pub struct DirectionalLight {
    camera: Shared<Camera>,
    config: Shared<RenderConfig>,
    light: Light,
    ambient: Vec3,
    basis: LightBasis,
    cascades: CascadeSet,
    matrices: MatricesBuffer,
    light_buffer: LightBuffer,
    state: UpdateState,
}

impl DirectionalLight {
    pub fn new(camera: Shared<Camera>, config: Shared<RenderConfig>) -> Result<Self> {
        let cfg = config.read().clone();
        cfg.validate()?;

        let basis = LightBasis::new(cfg.sun_direction)?;
        let scheme = SplitScheme::from_pairs(&cfg.shadows.split_scheme)?;
        let settings = FitSettings::from(&cfg.shadows);

        let cascades = {
            let camera = camera.read();
            CascadeSet::new(scheme, cfg.z_far, settings, &camera, &basis)?
        };

        let mut matrices = MatricesBuffer::new(cascades.len());
        matrices.pack(&cascades)?;

        let light = Light::new(cfg.sun_color, cfg.sun_intensity);
        let light_buffer = LightBuffer::new(basis.direction, &light, cfg.ambient);

        log::debug!(
            "Directional light {} with {} cascades up to {}",
            basis.direction,
            cascades.len(),
            cfg.z_far
        );

        Ok(Self {
            camera,
            config,
            light,
            ambient: cfg.ambient,
            basis,
            cascades,
            matrices,
            light_buffer,
            state: UpdateState::Idle,
        })
    }

    /// Per frame hook: refits the cascades if the shared camera moved or rotated.
    /// Returns whether anything was updated.
    pub fn on_frame(&mut self) -> Result<bool> {
        let (moved, rotated) = {
            let camera = self.camera.read();
            (camera.is_moved(), camera.is_rotated())
        };

        self.on_camera_motion(moved, rotated)
    }

    /// Camera motion alone never refits the last cascade.
    pub fn on_camera_motion(&mut self, camera_moved: bool, camera_rotated: bool) -> Result<bool> {
        if camera_moved || camera_rotated {
            self.update_shadow_matrices(false)?;
            return Ok(true);
        }

        Ok(false)
    }

    /// Points the light along `direction` and refits every cascade.
    ///
    /// The direction is normalized and also written back to the shared
    /// configuration. On error neither the light nor the configuration change.
    pub fn set_direction(&mut self, direction: Vec3) -> Result<()> {
        let basis = LightBasis::new(direction)?;

        self.refit(&basis, true)?;

        self.basis = basis;
        self.config.write().sun_direction = basis.direction;
        self.light_buffer.direction = basis.direction.to_array();

        log::debug!("Sun direction set to {}", basis.direction);
        Ok(())
    }

    /// Refits the cascades for the current basis and repacks the matrices.
    pub fn update_shadow_matrices(&mut self, sun_position_changed: bool) -> Result<()> {
        let basis = self.basis;
        self.refit(&basis, sun_position_changed)
    }

    fn refit(&mut self, basis: &LightBasis, sun_position_changed: bool) -> Result<()> {
        self.state = UpdateState::Updating;

        let result = {
            let camera = self.camera.read();
            self.cascades.update(&camera, basis, sun_position_changed)
        }
        .and_then(|_| self.matrices.pack(&self.cascades));

        self.state = UpdateState::Idle;
        result
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.basis.direction
    }

    #[inline]
    pub fn basis(&self) -> &LightBasis {
        &self.basis
    }

    #[inline]
    pub fn cascades(&self) -> &CascadeSet {
        &self.cascades
    }

    #[inline]
    pub fn matrices(&self) -> &MatricesBuffer {
        &self.matrices
    }

    #[inline]
    pub fn light_buffer(&self) -> &LightBuffer {
        &self.light_buffer
    }

    #[inline]
    pub fn state(&self) -> UpdateState {
        self.state
    }

    #[inline]
    pub fn light(&self) -> &Light {
        &self.light
    }

    #[inline]
    pub fn ambient(&self) -> Vec3 {
        self.ambient
    }

    pub fn set_ambient(&mut self, ambient: Vec3) {
        self.ambient = ambient;
        self.light_buffer.ambient = ambient.to_array();
    }

    pub fn set_color(&mut self, color: Vec3) {
        self.light.color = color;
        self.light_buffer.color = color.to_array();
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.light.intensity = intensity;
        self.light_buffer.intensity = intensity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShadowError;
    use umbra_3d::shared;
    use umbra_math::{Quat, Transform};

    fn setup() -> (Shared<Camera>, Shared<RenderConfig>) {
        let transform = Transform::from_position(Vec3::new(0.0, 30.0, 0.0))
            .looking_to(Vec3::new(0.0, -0.4, -1.0), Vec3::Y);
        let camera = Camera::new(transform, umbra_3d::Projection::Perspective(60.0), 16.0 / 9.0);

        let config = RenderConfig {
            sun_direction: Vec3::new(0.707, -0.707, 0.0),
            z_far: 1000.0,
            ..Default::default()
        };

        (shared(camera), shared(config))
    }

    #[test]
    fn idle_camera_does_nothing() {
        let (camera, config) = setup();
        let mut light = DirectionalLight::new(camera, config).unwrap();
        let before = light.matrices().clone();

        assert!(!light.on_frame().unwrap());
        assert_eq!(&before, light.matrices());
        assert_eq!(light.state(), UpdateState::Idle);
    }

    #[test]
    fn camera_motion_refits_all_but_last() {
        let (camera, config) = setup();
        let mut light = DirectionalLight::new(camera.clone(), config).unwrap();
        let last = light.cascades().len() - 1;
        let before = light.matrices().clone();

        {
            let mut camera = camera.write();
            camera.set_position(Vec3::new(120.0, 30.0, -80.0));
            camera.set_rotation(Quat::from_rotation_y(0.8));
        }
        assert!(light.on_frame().unwrap());

        assert_ne!(before.matrix(0), light.matrices().matrix(0));
        assert_eq!(before.matrix(last), light.matrices().matrix(last));
        assert_eq!(before.len(), light.matrices().len());
    }

    #[test]
    fn set_direction_refits_everything_and_persists() {
        let (camera, config) = setup();
        let mut light = DirectionalLight::new(camera, config.clone()).unwrap();
        let last = light.cascades().len() - 1;
        let before = light.matrices().clone();

        light.set_direction(Vec3::new(-1.0, -2.0, 0.5)).unwrap();

        let expected = Vec3::new(-1.0, -2.0, 0.5).normalize();
        assert!(light.direction().abs_diff_eq(expected, 1e-6));
        assert!(config.read().sun_direction.abs_diff_eq(expected, 1e-6));
        assert_ne!(before.matrix(last), light.matrices().matrix(last));
        assert_eq!(light.light_buffer().direction, expected.to_array());
    }

    #[test]
    fn degenerate_direction_changes_nothing() {
        let (camera, config) = setup();
        let mut light = DirectionalLight::new(camera, config.clone()).unwrap();
        let before = light.matrices().clone();
        let direction = light.direction();

        let err = light.set_direction(Vec3::new(0.0, -1.0, 0.0)).unwrap_err();

        assert!(matches!(err, ShadowError::DegenerateBasis { .. }));
        assert_eq!(light.direction(), direction);
        assert_eq!(config.read().sun_direction, Vec3::new(0.707, -0.707, 0.0));
        assert_eq!(&before, light.matrices());
    }

    #[test]
    fn rejects_invalid_scheme_from_config() {
        let (camera, config) = setup();
        config.write().shadows.split_scheme = vec![[0.0, 0.2], [0.3, 1.0]];

        let err = DirectionalLight::new(camera, config).err().unwrap();
        assert!(matches!(err, ShadowError::InvalidSplitScheme(_)));
    }

    #[test]
    fn light_properties_reach_the_buffer() {
        let (camera, config) = setup();
        let mut light = DirectionalLight::new(camera, config).unwrap();

        light.set_color(Vec3::new(1.0, 0.0, 0.0));
        light.set_intensity(3.0);
        light.set_ambient(Vec3::splat(0.2));

        let floats = light.light_buffer().as_floats();
        assert_eq!(floats[3], 3.0);
        assert_eq!(&floats[4..7], &[0.2, 0.2, 0.2]);
        assert_eq!(&floats[8..11], &[1.0, 0.0, 0.0]);
        assert_eq!(light.light().radiance(), Vec3::new(3.0, 0.0, 0.0));
    }
}
