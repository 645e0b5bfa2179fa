//! Cascaded (parallel split) shadow maps for directional lights.
//!
//! [`DirectionalLight`] ties the pieces together: a [`LightBasis`] derived from
//! the light direction, a [`CascadeSet`] of [`SplitCamera`]s covering slices of
//! the view frustum, and the [`MatricesBuffer`]/[`LightBuffer`] images handed
//! to the renderer for upload.

pub mod basis;
pub mod buffer;
pub mod cascade;
pub mod error;
pub mod light;
pub mod scheme;
pub mod split;

pub use basis::LightBasis;
pub use buffer::*;
pub use cascade::CascadeSet;
pub use error::{Result, ShadowError};
pub use light::{DirectionalLight, UpdateState};
pub use scheme::SplitScheme;
pub use split::{FitSettings, SplitCamera};
