//! # plaudit-widget
//!
//! The application that runs inside the embed iframe, on the rendering
//! origin. It reads `widget_id` and `publishable_key` (plus the optional
//! `size` and `testimonials` selection parameters) from its own location,
//! fetches the widget and its testimonials in one combo request, renders
//! them, and reports its content height to the parent window so the embed
//! script can size the iframe.
//!
//! Failures stay inside the frame: a bad fetch renders an inline error
//! card, never anything the host page can observe beyond a resize.

mod app;
mod error;
mod params;
pub mod api;
pub mod resize;
pub mod view;

use wasm_bindgen::prelude::*;

pub use error::WidgetError;
pub use params::WidgetParams;

/// Design defaults for the renderer.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Base path of the widgets API. Relative by default so the dev proxy
    /// and the production edge both work without rebuilding.
    pub api_base: String,
    /// Pixels added to the measured content height before posting, so the
    /// host iframe never clips a shadow or an outline.
    pub resize_padding: u32,
    /// Delay before the first height report, giving layout a beat to
    /// settle after the initial paint.
    pub initial_report_delay_ms: i32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            api_base: "/api".to_string(),
            resize_padding: 20,
            initial_report_delay_ms: 100,
        }
    }
}

/// Entry point when loaded as the widget bundle.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    wasm_bindgen_futures::spawn_local(app::run());
}
