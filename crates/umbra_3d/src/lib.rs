pub mod camera;
pub mod config;
pub mod error;
pub mod light;

use std::sync::Arc;

pub use camera::*;
pub use config::*;
pub use error::ConfigError;
pub use light::*;

use parking_lot::RwLock;

/// Handle to state owned outside the shadow subsystem (camera, configuration).
pub type Shared<T> = Arc<RwLock<T>>;

pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(RwLock::new(value))
}
