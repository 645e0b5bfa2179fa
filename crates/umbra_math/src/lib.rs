pub use glam::*;

pub mod frustum;
mod transform;

pub use frustum::Aabb;
pub use transform::*;
