pub mod camera;
pub mod controls;
pub mod sdf_instance;

pub use camera::{CameraUniform, PerspectiveCamera, Projection, Ray, Viewport};
pub use controls::OrbitControls;
