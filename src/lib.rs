pub mod math {
    pub use umbra_math::*;
}
pub mod dev {
    pub use umbra_dev::*;
}
pub mod g3d {
    pub use umbra_3d::*;
}
pub mod shadow {
    pub use umbra_shadow::*;
}
