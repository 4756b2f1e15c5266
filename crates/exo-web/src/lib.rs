pub mod runner;
pub mod page;
pub mod dom;

pub use exo_engine;
pub use runner::ViewerRunner;
pub use page::FetchError;

/// Install the panic hook and the console logger. Safe to call more than once.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Generate the `#[wasm_bindgen]` frame, input and buffer exports for a viewer.
///
/// Generates:
/// - `thread_local!` storage for the ViewerRunner
/// - `with_runner()`, which returns `None` until a viewer is installed
/// - `install_viewer()`, which builds the scene and starts accepting ticks
/// - exports for ticking, pointer/wheel/resize input and buffer accessors
///
/// Initialization is left to the application because it is usually async
/// (fetching data) and may fail before any viewer exists.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod viewer;
/// use viewer::MyViewer;
///
/// exo_web::export_viewer!(MyViewer, "my-viewer");
///
/// #[wasm_bindgen]
/// pub fn viewer_init() {
///     exo_web::init_logging();
///     install_viewer(MyViewer::new());
/// }
/// ```
#[macro_export]
macro_rules! export_viewer {
    ($viewer_type:ty, $viewer_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::ViewerRunner<$viewer_type>>> = RefCell::new(None);
        }

        #[allow(dead_code)]
        fn with_runner<R>(f: impl FnOnce(&mut $crate::ViewerRunner<$viewer_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        fn push_input(event: $crate::exo_engine::InputEvent) {
            if with_runner(|r| r.push_input(event)).is_none() {
                log::debug!("{}: input before init ignored", $viewer_name);
            }
        }

        fn install_viewer(viewer: $viewer_type) {
            let mut runner = $crate::ViewerRunner::new(viewer);
            runner.init();
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $viewer_name);
        }

        #[wasm_bindgen]
        pub fn viewer_tick() {
            let commands = with_runner(|r| r.tick()).unwrap_or_default();
            for command in &commands {
                $crate::dom::apply_ui_command(command);
            }
        }

        #[wasm_bindgen]
        pub fn viewer_pointer_down(x: f32, y: f32) {
            push_input($crate::exo_engine::InputEvent::PointerDown { x, y });
        }

        #[wasm_bindgen]
        pub fn viewer_pointer_up(x: f32, y: f32) {
            push_input($crate::exo_engine::InputEvent::PointerUp { x, y });
        }

        #[wasm_bindgen]
        pub fn viewer_pointer_move(x: f32, y: f32) {
            push_input($crate::exo_engine::InputEvent::PointerMove { x, y });
        }

        #[wasm_bindgen]
        pub fn viewer_wheel(delta_y: f32) {
            push_input($crate::exo_engine::InputEvent::Wheel { delta_y });
        }

        #[wasm_bindgen]
        pub fn viewer_resize(width: f32, height: f32) {
            push_input($crate::exo_engine::InputEvent::Resize { width, height });
        }

        #[wasm_bindgen]
        pub fn viewer_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            push_input($crate::exo_engine::InputEvent::Custom { kind, a, b, c });
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_sdf_instances_ptr() -> *const f32 {
            with_runner(|r| r.sdf_instances_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_sdf_instance_count() -> u32 {
            with_runner(|r| r.sdf_instance_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_lights_ptr() -> *const f32 {
            with_runner(|r| r.lights_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_light_count() -> u32 {
            with_runner(|r| r.light_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_ambient_r() -> f32 {
            with_runner(|r| r.ambient()[0]).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_ambient_g() -> f32 {
            with_runner(|r| r.ambient()[1]).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_ambient_b() -> f32 {
            with_runner(|r| r.ambient()[2]).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_viewport_width() -> f32 {
            with_runner(|r| r.viewport_width()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_viewport_height() -> f32 {
            with_runner(|r| r.viewport_height()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_frame_count() -> u32 {
            with_runner(|r| r.frame_count()).unwrap_or(0)
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_sdf_instances() -> u32 {
            with_runner(|r| r.max_sdf_instances()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_lights() -> u32 {
            with_runner(|r| r.max_lights()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
        }
    };

    // Variant with vectors feature
    ($viewer_type:ty, $viewer_name:literal, vectors) => {
        $crate::export_viewer!($viewer_type, $viewer_name);

        // ---- Vector accessors (only when vectors feature is enabled) ----

        #[wasm_bindgen]
        pub fn get_vector_vertices_ptr() -> *const f32 {
            with_runner(|r| r.vector_vertices_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_vector_vertex_count() -> u32 {
            with_runner(|r| r.vector_vertex_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_vector_vertices() -> u32 {
            with_runner(|r| r.max_vector_vertices()).unwrap_or(0)
        }
    };
}
