//! The combo endpoint client.
//!
//! One GET fetches the widget's settings and its testimonials together.
//! Credentials are omitted: the publishable key in the query string is the
//! whole authorization story, and sending cookies would only complicate
//! CORS.

use plaudit_core::model::{combo_endpoint, WidgetBundle};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, RequestMode, Response};

use crate::error::WidgetError;
use crate::params::WidgetParams;
use crate::RendererConfig;

pub async fn fetch_bundle(
    config: &RendererConfig,
    params: &WidgetParams,
) -> Result<WidgetBundle, WidgetError> {
    let endpoint = combo_endpoint(
        &config.api_base,
        &params.widget_id,
        &params.publishable_key,
        params.size.as_deref(),
        params.testimonials.as_deref(),
    );

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    opts.set_credentials(RequestCredentials::Omit);

    let request = Request::new_with_str_and_init(&endpoint, &opts).map_err(WidgetError::js)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(WidgetError::js)?;

    let window = web_sys::window()
        .ok_or_else(|| WidgetError::Browser("no window in this context".to_string()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(WidgetError::js)?
        .dyn_into()
        .map_err(|_| WidgetError::Browser("fetch returned a non-Response".to_string()))?;

    if !response.ok() {
        return Err(WidgetError::Status {
            code: response.status(),
            text: response.status_text(),
        });
    }

    let json = JsFuture::from(response.json().map_err(WidgetError::js)?)
        .await
        .map_err(WidgetError::js)?;
    serde_wasm_bindgen::from_value(json).map_err(|err| WidgetError::Decode(err.to_string()))
}
