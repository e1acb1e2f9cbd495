#![forbid(unsafe_code)]

//! `web-sys` implementations of the host traits and the exported app.

mod app;
mod dom;
mod frames;
mod head;

use wasm_bindgen::JsValue;

pub use app::SiteApp;
pub use dom::{BrowserViewport, DomElement, DomObserver};
pub use frames::BrowserFrames;
pub use head::BrowserDocument;

/// Record a browser call that threw. The caller carries on degraded.
fn log_js_error(op: &'static str, err: &JsValue) {
    #[cfg(feature = "tracing")]
    tracing::warn!(target: "rescuenet::web", op, error = ?err, "browser call failed");
    #[cfg(not(feature = "tracing"))]
    let _ = (op, err);
}
