mod profile;
mod timer;

pub use profile::*;
pub use timer::ScopeTimer;

pub use profiling;
