//! Renderer error taxonomy.
//!
//! Every variant ends the same way — an inline error card inside the
//! iframe — but the messages differ, and the distinction matters when
//! someone is debugging a misconfigured embed from the browser console.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Missing required parameters: widget_id and publishable_key")]
    MissingParams,

    #[error("Failed to fetch widget and testimonials: {code} {text}")]
    Status { code: u16, text: String },

    #[error("Failed to decode widget response: {0}")]
    Decode(String),

    #[error("Browser request failed: {0}")]
    Browser(String),
}

impl WidgetError {
    /// Wraps an opaque JS exception from the fetch pipeline.
    pub fn js(err: JsValue) -> Self {
        let detail = err
            .as_string()
            .unwrap_or_else(|| format!("{err:?}"));
        Self::Browser(detail)
    }
}
