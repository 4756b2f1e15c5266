//! HTML overlay adapter: info panel, alerts, element checks and global hooks.
//!
//! Missing elements are advisory: they are logged and the operation is skipped.

use exo_engine::UiCommand;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

pub const INFO_PANEL_ID: &str = "planetInfo";
pub const INFO_TITLE_ID: &str = "planetName";
pub const INFO_DETAILS_ID: &str = "planetDetails";

fn element(id: &str) -> Option<HtmlElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// Whether an element with `id` exists; logs a warning when it does not.
pub fn check_element(id: &str) -> bool {
    let found = element(id).is_some();
    if !found {
        log::warn!("element #{id} not found");
    }
    found
}

/// Blocking browser alert.
pub fn alert(message: &str) {
    match web_sys::window() {
        Some(win) => {
            if win.alert_with_message(message).is_err() {
                log::warn!("alert failed: {message}");
            }
        }
        None => log::warn!("no window for alert: {message}"),
    }
}

fn set_display(panel: &HtmlElement, value: &str) {
    if panel.style().set_property("display", value).is_err() {
        log::warn!("could not set #{INFO_PANEL_ID} display");
    }
}

pub fn show_info(title: &str, details: &str) {
    let (Some(panel), Some(name), Some(body)) =
        (element(INFO_PANEL_ID), element(INFO_TITLE_ID), element(INFO_DETAILS_ID))
    else {
        log::warn!("info panel elements missing; skipping show");
        return;
    };
    name.set_inner_text(title);
    body.set_inner_text(details);
    set_display(&panel, "block");
}

pub fn hide_info() {
    match element(INFO_PANEL_ID) {
        Some(panel) => set_display(&panel, "none"),
        None => log::warn!("element #{INFO_PANEL_ID} not found; skipping hide"),
    }
}

pub fn apply_ui_command(command: &UiCommand) {
    match command {
        UiCommand::ShowInfo { title, details } => show_info(title, details),
        UiCommand::HideInfo => hide_info(),
    }
}

/// Install `f` as `window[name]` so page markup can call it.
/// The closure lives for the rest of the page.
pub fn install_global_hook(name: &str, f: fn()) {
    let Some(win) = web_sys::window() else {
        log::warn!("no window; hook {name} not installed");
        return;
    };
    let closure = Closure::<dyn Fn()>::new(f);
    match js_sys::Reflect::set(&win, &JsValue::from_str(name), closure.as_ref()) {
        Ok(_) => closure.forget(),
        Err(e) => log::warn!("could not install window.{name}: {:?}", e),
    }
}
