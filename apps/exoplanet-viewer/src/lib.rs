use wasm_bindgen::prelude::*;
use exo_engine::{InputEvent, Viewport};

pub mod dataset;
pub mod derive;
pub mod interaction;
pub mod options;
pub mod settings;
pub mod system;
pub mod viewer;

use dataset::PlanetRecord;
use derive::DerivedVisualParams;
use options::ViewerOptions;
use settings::{CUSTOM_CLOSE_INFO, CUSTOM_SET_ORBIT_SPEED, CUSTOM_SET_ROTATION_SPEED, CUSTOM_SET_STAR_BRIGHTNESS};
use viewer::ExoplanetViewer;

exo_web::export_viewer!(ExoplanetViewer, "exoplanet-viewer", vectors);

/// Control-panel container, checked at startup.
const GUI_CONTAINER_ID: &str = "gui-container";
/// Page-level name of the close hook called by the info panel.
const CLOSE_HOOK: &str = "closeInfo";

/// Log, alert and hand the failure back to the page.
fn fail(message: String) -> JsValue {
    log::error!("{message}");
    exo_web::dom::alert(&message);
    JsValue::from_str(&message)
}

fn parse_options(options_json: Option<String>) -> Result<ViewerOptions, JsValue> {
    ViewerOptions::from_json(options_json.as_deref()).map_err(|e| fail(format!("invalid viewer options: {e}")))
}

fn start(record: &PlanetRecord, options: &ViewerOptions) {
    let (win_w, win_h) = exo_web::page::window_size().unwrap_or((800.0, 600.0));
    let viewport = Viewport::new(options.width.unwrap_or(win_w), options.height.unwrap_or(win_h));
    let params = DerivedVisualParams::from_record(record);
    install_viewer(ExoplanetViewer::new(params, options.system(), viewport));
    exo_web::dom::install_global_hook(CLOSE_HOOK, viewer_close_info);
}

/// Resolve the planet named by `?sy_id=` and build its scene.
/// Any failure is alerted and no scene is created.
#[wasm_bindgen]
pub async fn viewer_init(options_json: Option<String>) -> Result<(), JsValue> {
    exo_web::init_logging();
    let options = parse_options(options_json)?;
    exo_web::dom::check_element(GUI_CONTAINER_ID);

    let record = dataset::resolve(&options.dataset_path)
        .await
        .map_err(|e| fail(e.to_string()))?;
    start(&record, &options);
    Ok(())
}

/// Build the scene from a single record literal, skipping the dataset fetch.
#[wasm_bindgen]
pub fn viewer_init_with_record(record_json: &str, options_json: Option<String>) -> Result<(), JsValue> {
    exo_web::init_logging();
    let options = parse_options(options_json)?;
    exo_web::dom::check_element(GUI_CONTAINER_ID);

    let record = dataset::parse_record(record_json).map_err(|e| fail(e.to_string()))?;
    start(&record, &options);
    Ok(())
}

fn push_custom(kind: u32, a: f32) {
    push_input(InputEvent::Custom { kind, a, b: 0.0, c: 0.0 });
}

#[wasm_bindgen]
pub fn viewer_close_info() {
    push_custom(CUSTOM_CLOSE_INFO, 0.0);
}

#[wasm_bindgen]
pub fn viewer_set_orbit_speed(value: f32) {
    push_custom(CUSTOM_SET_ORBIT_SPEED, value);
}

#[wasm_bindgen]
pub fn viewer_set_rotation_speed(value: f32) {
    push_custom(CUSTOM_SET_ROTATION_SPEED, value);
}

#[wasm_bindgen]
pub fn viewer_set_star_brightness(value: f32) {
    push_custom(CUSTOM_SET_STAR_BRIGHTNESS, value);
}
