use thiserror::Error;
use umbra_3d::ConfigError;
use umbra_math::Vec3;

#[derive(Debug, Error)]
pub enum ShadowError {
    #[error("Cannot build an orthonormal light basis for direction {direction}")]
    DegenerateBasis { direction: Vec3 },
    #[error("Fitted projection for the split {near}..{far} is not finite")]
    DegenerateProjection { near: f32, far: f32 },
    #[error("Invalid split scheme: {0}")]
    InvalidSplitScheme(String),
    #[error("Buffer sized for {expected} cascades, got {found}")]
    LayoutMismatch { expected: usize, found: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ShadowError>;
