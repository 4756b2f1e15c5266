//! Page-level browser access: query string and HTTP fetch.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("HTTP {status} {status_text}")]
    Status { status: u16, status_text: String },
}

fn js_err(e: JsValue) -> FetchError {
    FetchError::Network(format!("{:?}", e))
}

/// Value of a query-string parameter of the current page, if present.
pub fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name)
}

/// Inner size of the browser window in CSS pixels.
pub fn window_size() -> Option<(f32, f32)> {
    let win = web_sys::window()?;
    let width = win.inner_width().ok()?.as_f64()?;
    let height = win.inner_height().ok()?.as_f64()?;
    Some((width as f32, height as f32))
}

/// Single GET of `url`, returning the body as text. Non-2xx statuses are errors.
pub async fn fetch_text(url: &str) -> Result<String, FetchError> {
    let win = web_sys::window().ok_or_else(|| FetchError::Network("no window".into()))?;
    let resp_val = JsFuture::from(win.fetch_with_str(url))
        .await
        .map_err(js_err)?;
    let resp: web_sys::Response = resp_val.dyn_into().map_err(js_err)?;

    if !resp.ok() {
        return Err(FetchError::Status {
            status: resp.status(),
            status_text: resp.status_text(),
        });
    }

    let text_promise = resp.text().map_err(js_err)?;
    let text_val = JsFuture::from(text_promise).await.map_err(js_err)?;
    text_val
        .as_string()
        .ok_or_else(|| FetchError::Network("response.text() was not a string".into()))
}
