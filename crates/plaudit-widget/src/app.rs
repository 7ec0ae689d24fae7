//! Renderer startup and rotation.

use std::cell::Cell;
use std::rc::Rc;

use plaudit_core::model::{WidgetBundle, WidgetKind};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

use crate::params::WidgetParams;
use crate::{api, resize, view, RendererConfig};

pub async fn run() {
    if let Err(err) = run_inner().await {
        web_sys::console::error_2(&"plaudit widget: failed to start".into(), &err);
    }
}

async fn run_inner() -> Result<(), JsValue> {
    let Some(window) = web_sys::window() else {
        return Ok(());
    };
    let Some(document) = window.document() else {
        return Ok(());
    };
    let Some(root) = mount_root(&document) else {
        return Ok(());
    };

    view::inject_styles(&document)?;
    let config = RendererConfig::default();

    let search = window.location().search().unwrap_or_default();
    let params = match WidgetParams::from_query(&search) {
        Ok(params) => params,
        Err(err) => {
            // Misconfigured embed: surface inside the frame only. Without a
            // widget id there is nothing to report a height for.
            view::render_error(&document, &root, &err.to_string())?;
            return Ok(());
        }
    };

    // Report heights from the start so even the skeleton/error states size
    // the host iframe correctly.
    resize::install_reporting(&window, &document, params.widget_id.clone(), &config)?;
    view::render_loading(&document, &root)?;

    match api::fetch_bundle(&config, &params).await {
        Ok(bundle) => {
            view::render_bundle(&document, &root, &bundle, 0)?;
            resize::post_now(&window, &document, &params.widget_id, &config);
            start_rotation(&window, &document, &root, bundle, &params.widget_id, &config)?;
        }
        Err(err) => {
            web_sys::console::warn_1(&format!("plaudit widget: {err}").into());
            view::render_error(&document, &root, &err.to_string())?;
            resize::post_now(&window, &document, &params.widget_id, &config);
        }
    }
    Ok(())
}

/// The element the app renders into. The served widget page always carries
/// `#root`; anywhere else (a page that merely links the bundle) the app
/// stays inert rather than taking over the body.
fn mount_root(document: &Document) -> Option<Element> {
    document.get_element_by_id("root")
}

/// Single-layout widgets with auto-rotate enabled cycle through their
/// testimonials, re-reporting the height each tick since cards differ in
/// length.
fn start_rotation(
    window: &Window,
    document: &Document,
    root: &Element,
    bundle: WidgetBundle,
    widget_id: &str,
    config: &RendererConfig,
) -> Result<(), JsValue> {
    if bundle.widget.kind != WidgetKind::Single
        || !bundle.widget.settings.auto_rotate
        || bundle.testimonials.len() < 2
    {
        return Ok(());
    }

    let interval_ms = bundle.widget.settings.rotation_interval.max(1000) as i32;
    let index = Rc::new(Cell::new(0usize));
    let tick = Closure::<dyn FnMut()>::new({
        let window = window.clone();
        let document = document.clone();
        let root = root.clone();
        let widget_id = widget_id.to_string();
        let config = config.clone();
        move || {
            index.set((index.get() + 1) % bundle.testimonials.len());
            if view::render_bundle(&document, &root, &bundle, index.get()).is_ok() {
                resize::post_now(&window, &document, &widget_id, &config);
            }
        }
    });
    window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        interval_ms,
    )?;
    // Rotates for the lifetime of the frame.
    tick.forget();
    Ok(())
}
