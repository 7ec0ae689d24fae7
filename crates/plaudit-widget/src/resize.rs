//! Height measurement and reporting.
//!
//! The renderer measures its full scrollable content height (not just the
//! viewport), pads it, and posts a resize message at the parent window with
//! an unrestricted target origin — the renderer cannot know which host page
//! embedded it. Best effort, fire-and-forget: a lost message just leaves
//! the iframe at its previous height until the next report.

use js_sys::Object;
use plaudit_core::message::ResizeMessage;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::RendererConfig;

/// Full content height in CSS pixels: the max over the body's and the
/// document element's scroll/offset/client heights, so an overflowing grid
/// is measured by what it needs, not by what currently fits.
pub fn content_height(document: &Document) -> f64 {
    let mut height = 0i32;
    if let Some(body) = document.body() {
        height = height.max(body.scroll_height()).max(body.offset_height());
    }
    if let Some(root) = document.document_element() {
        height = height.max(root.scroll_height()).max(root.client_height());
    }
    height as f64
}

/// Measures and posts one resize message. No-op outside an iframe.
pub fn post_now(window: &Window, document: &Document, widget_id: &str, config: &RendererConfig) {
    let Ok(Some(parent)) = window.parent() else {
        return;
    };
    // At the top level `parent` is the window itself; nothing to report to.
    if Object::is(parent.as_ref(), window.as_ref()) {
        return;
    }

    let height = content_height(document) + f64::from(config.resize_padding);
    let message = ResizeMessage::outbound(widget_id, height);
    if let Ok(value) = serde_wasm_bindgen::to_value(&message) {
        let _ = parent.post_message(&value, "*");
    }
}

/// Schedules the initial report (layout needs a beat after first paint)
/// and re-reports on every own-window resize.
pub fn install_reporting(
    window: &Window,
    document: &Document,
    widget_id: String,
    config: &RendererConfig,
) -> Result<(), JsValue> {
    let initial = Closure::once({
        let window = window.clone();
        let document = document.clone();
        let widget_id = widget_id.clone();
        let config = config.clone();
        move || post_now(&window, &document, &widget_id, &config)
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        initial.as_ref().unchecked_ref(),
        config.initial_report_delay_ms,
    )?;
    initial.forget();

    let on_resize = Closure::<dyn FnMut()>::new({
        let window = window.clone();
        let document = document.clone();
        let config = config.clone();
        move || post_now(&window, &document, &widget_id, &config)
    });
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    // Lives as long as the frame does.
    on_resize.forget();
    Ok(())
}
