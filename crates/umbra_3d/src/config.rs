use std::path::Path;

use serde::{Deserialize, Serialize};
use umbra_math::Vec3;

use crate::ConfigError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShadowQuality {
    Low,
    Medium,
    #[default]
    High,
    Ultra,
}

impl ShadowQuality {
    /// Edge length in texels of one cascade's shadow map.
    pub const fn resolution(self) -> u32 {
        match self {
            ShadowQuality::Low => 256,
            ShadowQuality::Medium => 1024,
            ShadowQuality::High => 2048,
            ShadowQuality::Ultra => 4096,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    pub quality: ShadowQuality,
    /// `[near, far]` pairs, as fractions of `RenderConfig::z_far`, nearest cascade first.
    pub split_scheme: Vec<[f32; 2]>,
    /// Snap cascade bounds to whole texels so shadows don't shimmer while the camera moves.
    pub stabilize: bool,
    /// How far behind each slice (towards the light) casters are still captured.
    pub caster_padding: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            quality: ShadowQuality::default(),
            split_scheme: vec![
                [0.0, 0.0025],
                [0.0025, 0.008],
                [0.008, 0.02],
                [0.02, 0.05],
                [0.05, 0.12],
                [0.12, 0.3],
            ],
            stabilize: true,
            caster_padding: 500.0,
        }
    }
}

/// Scene wide render settings consumed by the directional light.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub sun_direction: Vec3,
    pub ambient: Vec3,
    pub sun_color: Vec3,
    pub sun_intensity: f32,
    pub z_far: f32,
    pub shadows: ShadowConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sun_direction: Vec3::new(0.4, -0.8, 0.45).normalize(),
            ambient: Vec3::splat(0.08),
            sun_color: Vec3::new(1.0, 0.95, 0.87),
            sun_intensity: 1.2,
            z_far: 10000.0,
            shadows: ShadowConfig::default(),
        }
    }
}

impl RenderConfig {
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        log::debug!("Loading render config from {:?}", path);
        Self::from_yaml(&source)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_yaml()?).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })
    }

    /// Checks the scalar fields. The split scheme's shape is validated by its consumer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !self.sun_direction.is_finite() || self.sun_direction.length_squared() == 0.0 {
            return Err(invalid("sun_direction", "must be a finite, non-zero vector"));
        }
        if !(self.z_far.is_finite() && self.z_far > 0.0) {
            return Err(invalid("z_far", format!("must be positive, got {}", self.z_far)));
        }
        if !(self.sun_intensity.is_finite() && self.sun_intensity >= 0.0) {
            return Err(invalid("sun_intensity", "must be non-negative"));
        }
        if !self.sun_color.is_finite() || !self.ambient.is_finite() {
            return Err(invalid("sun_color", "colors must be finite"));
        }
        if !(self.shadows.caster_padding.is_finite() && self.shadows.caster_padding >= 0.0) {
            return Err(invalid("shadows.caster_padding", "must be non-negative"));
        }

        Ok(())
    }
}
