//! # plaudit-embed
//!
//! The embed script a host page loads to mount Plaudit testimonial widgets:
//!
//! ```html
//! <script async src="https://cdn.plaudit.app/embed.js?publishable_key=pk_live_..."></script>
//! <div data-widget="w_61f2a9"></div>
//! ```
//!
//! On boot it resolves the publishable key from its own script tag, mounts
//! one sandboxed iframe per `[data-widget]` placeholder, re-scans on every
//! DOM mutation (client-side routers insert placeholders late), and keeps
//! each iframe sized to its content by applying validated resize messages
//! from the rendering origin.
//!
//! Nothing in this crate is allowed to throw into the host page. A missing
//! key, a malformed placeholder, or a garbage message each degrade to a
//! skipped unit of work, logged at worst.

mod mounter;

use plaudit_core::EmbedConfig;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlScriptElement};

pub use mounter::Mounter;

/// Entry point when loaded as the embed bundle.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    if let Err(err) = boot() {
        web_sys::console::warn_2(&"plaudit: embed failed to boot".into(), &err);
    }
}

/// Boot sequence: run the first scan once the document is ready, then keep
/// observing. Safe to call in non-browser contexts (no-op without a window).
pub fn boot() -> Result<(), JsValue> {
    let Some(window) = web_sys::window() else {
        return Ok(());
    };
    let Some(document) = window.document() else {
        return Ok(());
    };

    if document.ready_state() == "loading" {
        let deferred = Closure::once(move || {
            if let Err(err) = init_mounter() {
                web_sys::console::warn_2(&"plaudit: embed failed to boot".into(), &err);
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", deferred.as_ref().unchecked_ref())?;
        // Fires exactly once; the closure may leak with the page.
        deferred.forget();
    } else {
        init_mounter()?;
    }
    Ok(())
}

fn init_mounter() -> Result<(), JsValue> {
    let Some(window) = web_sys::window() else {
        return Ok(());
    };
    let Some(document) = window.document() else {
        return Ok(());
    };

    let config = EmbedConfig::default();
    let Some(key) = resolve_key_from_document(&document, &config) else {
        // Recoverable "not configured" state: log and take no further
        // action, per the embed contract. Never an exception.
        web_sys::console::warn_1(
            &"plaudit: embed.js loaded without a publishable_key; widgets will not mount".into(),
        );
        return Ok(());
    };

    let mounter = Mounter::new(config, key);
    mounter.scan(&document);
    mounter.observe(&document)?;
    mounter.listen(&window)?;
    Ok(())
}

/// Finds the publishable key on this module's own script tag.
///
/// Collects every `<script src>` in document order and defers to the core
/// resolver (path must end with the embed filename, key read from its query
/// string).
pub fn resolve_key_from_document(document: &Document, config: &EmbedConfig) -> Option<String> {
    let scripts = document.get_elements_by_tag_name("script");
    let mut srcs = Vec::with_capacity(scripts.length() as usize);
    for index in 0..scripts.length() {
        let Some(element) = scripts.item(index) else {
            continue;
        };
        if let Some(script) = element.dyn_ref::<HtmlScriptElement>() {
            srcs.push(script.src());
        }
    }
    plaudit_core::script::resolve_publishable_key(srcs, config)
}
