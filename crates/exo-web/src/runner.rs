use exo_engine::{
    Viewer, ViewerConfig, EngineContext,
    InputEvent, InputQueue, SDFBuffer,
    ProtocolLayout, UiCommand, CameraUniform,
};
use exo_engine::bridge::protocol::{
    HEADER_FLOATS, HEADER_FRAME_COUNTER, HEADER_SDF_INSTANCE_COUNT, HEADER_VECTOR_VERTEX_COUNT,
    HEADER_LIGHT_COUNT, HEADER_VIEWPORT_WIDTH, HEADER_VIEWPORT_HEIGHT, HEADER_AMBIENT_R,
    HEADER_AMBIENT_G, HEADER_AMBIENT_B, HEADER_SHADOW_MAP_SIZE, HEADER_SHADOW_NEAR, HEADER_SHADOW_FAR,
};
use exo_engine::systems::render::build_sdf_buffer;
#[cfg(feature = "vectors")]
use exo_engine::systems::render::build_vector_geometry;

/// Generic viewer runner that wires up the engine loop.
///
/// Each concrete viewer creates a `thread_local!` ViewerRunner through
/// [`export_viewer!`](crate::export_viewer) and exports free functions via
/// `#[wasm_bindgen]`, because wasm-bindgen cannot export generic structs.
pub struct ViewerRunner<V: Viewer> {
    viewer: V,
    ctx: EngineContext,
    input: InputQueue,
    sdf_buffer: SDFBuffer,
    config: ViewerConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    camera: CameraUniform,
    frame: u32,
    initialized: bool,
}

impl<V: Viewer> ViewerRunner<V> {
    pub fn new(viewer: V) -> Self {
        let config = viewer.config();
        let layout = ProtocolLayout::from_config(&config);
        let ctx = EngineContext::from_config(&config);

        Self {
            viewer,
            camera: ctx.camera.uniform(),
            ctx,
            input: InputQueue::new(),
            sdf_buffer: SDFBuffer::with_capacity(config.max_sdf_instances),
            header: layout.header(),
            layout,
            config,
            frame: 0,
            initialized: false,
        }
    }

    /// Build the scene and the first frame's buffers. Call once after construction.
    pub fn init(&mut self) {
        #[cfg(feature = "vectors")]
        {
            self.ctx.vectors = exo_engine::VectorState::with_capacity(self.config.max_vector_vertices);
        }
        self.viewer.init(&mut self.ctx);
        self.ctx.controls.update(&mut self.ctx.camera);
        self.initialized = true;
        self.build_frame();
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one display frame and return the UI commands it produced.
    pub fn tick(&mut self) -> Vec<UiCommand> {
        if !self.initialized {
            return Vec::new();
        }

        self.ctx.clear_frame_data();

        // Resizes land before any logic so picking and buffers use the new aspect.
        for event in self.input.iter() {
            if let InputEvent::Resize { width, height } = *event {
                self.ctx.camera.resize(width, height);
            }
        }

        self.viewer.update(&mut self.ctx, &self.input);
        self.input.drain();

        self.ctx.controls.update(&mut self.ctx.camera);
        self.build_frame();
        self.frame = self.frame.wrapping_add(1);

        std::mem::take(&mut self.ctx.ui)
    }

    fn build_frame(&mut self) {
        build_sdf_buffer(&self.ctx.scene, &self.ctx.camera, &mut self.sdf_buffer, self.layout.max_sdf_instances);
        #[cfg(feature = "vectors")]
        build_vector_geometry(&self.ctx.scene, &self.ctx.camera, &mut self.ctx.vectors);
        self.camera = self.ctx.camera.uniform();

        let viewport = self.ctx.camera.viewport();
        let ambient = self.ctx.lights.ambient();
        self.header[HEADER_FRAME_COUNTER] = self.frame as f32;
        self.header[HEADER_SDF_INSTANCE_COUNT] = self.sdf_buffer.instance_count() as f32;
        self.header[HEADER_VECTOR_VERTEX_COUNT] = self.vector_vertex_count() as f32;
        self.header[HEADER_LIGHT_COUNT] = self.light_count() as f32;
        self.header[HEADER_VIEWPORT_WIDTH] = viewport.width;
        self.header[HEADER_VIEWPORT_HEIGHT] = viewport.height;
        self.header[HEADER_AMBIENT_R] = ambient[0];
        self.header[HEADER_AMBIENT_G] = ambient[1];
        self.header[HEADER_AMBIENT_B] = ambient[2];
        let shadow = self.ctx.lights.shadow;
        self.header[HEADER_SHADOW_MAP_SIZE] = shadow.map_size as f32;
        self.header[HEADER_SHADOW_NEAR] = shadow.near;
        self.header[HEADER_SHADOW_FAR] = shadow.far;
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for renderer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn sdf_instances_ptr(&self) -> *const f32 {
        self.sdf_buffer.instances_ptr()
    }

    pub fn sdf_instance_count(&self) -> u32 {
        self.sdf_buffer.instance_count() as u32
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.ctx.vectors.buffer_ptr()
    }

    pub fn vector_vertex_count(&self) -> u32 {
        #[cfg(feature = "vectors")]
        {
            self.ctx.vectors.vertex_count() as u32
        }
        #[cfg(not(feature = "vectors"))]
        {
            0
        }
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    /// Lights beyond the configured capacity are not exposed.
    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count().min(self.layout.max_lights) as u32
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ctx.lights.ambient()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        (&self.camera as *const CameraUniform).cast()
    }

    pub fn viewport_width(&self) -> f32 {
        self.ctx.camera.viewport().width
    }

    pub fn viewport_height(&self) -> f32 {
        self.ctx.camera.viewport().height
    }

    pub fn frame_count(&self) -> u32 {
        self.frame
    }

    // ---- Capacity accessors ----

    pub fn max_sdf_instances(&self) -> u32 {
        self.layout.max_sdf_instances as u32
    }

    pub fn max_vector_vertices(&self) -> u32 {
        self.layout.max_vector_vertices as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
