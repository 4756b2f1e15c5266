use glam::Vec3;
use crate::api::types::{EntityId, UiCommand};
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::renderer::camera::{PerspectiveCamera, Viewport};
use crate::renderer::controls::OrbitControls;
use crate::systems::lighting::LightState;
#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// Configuration for the engine, provided by the viewer.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Initial drawable size in CSS pixels.
    pub viewport: Viewport,
    /// Vertical field of view in degrees (default: 45).
    pub fov_y: f32,
    /// Near clip distance (default: 0.1).
    pub near: f32,
    /// Far clip distance (default: 1000).
    pub far: f32,
    /// Initial camera position.
    pub camera_position: Vec3,
    /// Orbit controls damping factor (default: 0.05).
    pub damping_factor: f32,
    /// Maximum number of SDF instances (default: 128).
    pub max_sdf_instances: usize,
    /// Maximum number of vector vertices (default: 16384).
    pub max_vector_vertices: usize,
    /// Maximum number of point lights (default: 4).
    pub max_lights: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            fov_y: 45.0,
            near: 0.1,
            far: 1000.0,
            camera_position: Vec3::new(0.0, 0.0, 10.0),
            damping_factor: 0.05,
            max_sdf_instances: 128,
            max_vector_vertices: 16384,
            max_lights: 4,
        }
    }
}

/// The contract every viewer application fulfills.
pub trait Viewer {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> ViewerConfig {
        ViewerConfig::default()
    }

    /// Build the scene, lights and initial camera.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One display frame. Apply input, advance animation, emit UI commands.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Viewer::init and Viewer::update.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub lights: LightState,
    #[cfg(feature = "vectors")]
    pub vectors: VectorState,
    /// UI commands emitted this frame, drained by the runner.
    pub ui: Vec<UiCommand>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&ViewerConfig::default())
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        let mut camera = PerspectiveCamera::new(config.fov_y, config.viewport, config.near, config.far);
        camera.position = config.camera_position;
        Self {
            scene: Scene::new(),
            camera,
            controls: OrbitControls::new().with_damping(config.damping_factor),
            lights: LightState::new(),
            #[cfg(feature = "vectors")]
            vectors: VectorState::new(),
            ui: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Queue a UI command for the DOM adapter.
    pub fn emit_ui(&mut self, command: UiCommand) {
        self.ui.push(command);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.ui.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_start_at_one() {
        let mut ctx = EngineContext::new();
        assert_eq!(ctx.next_id(), EntityId(1));
        assert_eq!(ctx.next_id(), EntityId(2));
    }

    #[test]
    fn from_config_places_camera() {
        let config = ViewerConfig {
            camera_position: Vec3::new(-175.0, 115.0, 5.0),
            damping_factor: 0.75,
            ..Default::default()
        };
        let ctx = EngineContext::from_config(&config);
        assert_eq!(ctx.camera.position, Vec3::new(-175.0, 115.0, 5.0));
        assert!(ctx.controls.enable_damping);
        assert_eq!(ctx.controls.damping_factor, 0.75);
    }

    #[test]
    fn clear_frame_data_drops_ui_commands() {
        let mut ctx = EngineContext::new();
        ctx.emit_ui(UiCommand::HideInfo);
        assert_eq!(ctx.ui.len(), 1);
        ctx.clear_frame_data();
        assert!(ctx.ui.is_empty());
    }
}
