pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::viewer::{Viewer, ViewerConfig, EngineContext};
pub use api::types::{EntityId, UiCommand};
pub use components::entity::{Entity, Transform};
pub use components::mesh::{Color, Material, MeshComponent, Shape};
pub use core::scene::Scene;
pub use renderer::camera::{CameraUniform, PerspectiveCamera, Ray, Viewport};
pub use renderer::controls::OrbitControls;
pub use renderer::sdf_instance::{SDFInstance, SDFBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::{ProtocolLayout, LIGHT_FLOATS, DEFAULT_MAX_LIGHTS};
pub use systems::lighting::{PointLight, LightState, ShadowConfig};
pub use systems::raycast::{raycast, RayHit};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex, VectorColor};
