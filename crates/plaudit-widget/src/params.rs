//! Query-parameter parsing for the framed renderer.
//!
//! The embed script sets exactly `widget_id` and `publishable_key`; `size`
//! and `testimonials` are selection hints a dashboard preview may add and
//! the mounter never touches.

use crate::error::WidgetError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetParams {
    pub widget_id: String,
    pub publishable_key: String,
    pub size: Option<String>,
    pub testimonials: Option<String>,
}

impl WidgetParams {
    /// Parses a `location.search` string (leading `?` optional).
    ///
    /// Both required parameters must be present and non-empty; everything
    /// unrecognized is ignored.
    pub fn from_query(query: &str) -> Result<Self, WidgetError> {
        let mut widget_id = None;
        let mut publishable_key = None;
        let mut size = None;
        let mut testimonials = None;

        let query = query.trim_start_matches('?');
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match name.as_ref() {
                "widget_id" => widget_id = Some(value.into_owned()),
                "publishable_key" => publishable_key = Some(value.into_owned()),
                "size" => size = Some(value.into_owned()),
                "testimonials" => testimonials = Some(value.into_owned()),
                _ => {}
            }
        }

        match (widget_id, publishable_key) {
            (Some(widget_id), Some(publishable_key))
                if !widget_id.is_empty() && !publishable_key.is_empty() =>
            {
                Ok(Self {
                    widget_id,
                    publishable_key,
                    size,
                    testimonials,
                })
            }
            _ => Err(WidgetError::MissingParams),
        }
    }
}
