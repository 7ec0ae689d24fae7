//! Combo API contract types.
//!
//! The framed renderer fetches widget settings and testimonials in one
//! round trip from the combo endpoint. These types mirror that response
//! shape; the backend itself is an external collaborator and this crate
//! only cares that the JSON deserializes.

use serde::{Deserialize, Serialize};

/// Builds the combo endpoint URL for one widget.
///
/// `api_base` may be relative (`/api` behind the dev proxy) or absolute, so
/// this is plain concatenation with form-encoded query parameters rather
/// than `Url` joining.
pub fn combo_endpoint(
    api_base: &str,
    widget_id: &str,
    publishable_key: &str,
    size: Option<&str>,
    testimonials: Option<&str>,
) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("publishable_key", publishable_key);
    if let Some(size) = size {
        query.append_pair("size", size);
    }
    if let Some(testimonials) = testimonials {
        query.append_pair("testimonials", testimonials);
    }
    format!(
        "{}/widgets/public/combo/{}?{}",
        api_base.trim_end_matches('/'),
        widget_id,
        query.finish()
    )
}

/// The combo response: one widget plus the testimonials it should show.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetBundle {
    pub widget: Widget,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
}

/// How many testimonials a widget shows at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// One testimonial at a time (optionally auto-rotating).
    Single,
    /// Everything the backend returned, laid out as a grid.
    #[serde(other)]
    Grid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub layout: String,
    pub theme: String,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub selected_testimonials: Option<Vec<String>>,
    pub settings: WidgetSettings,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSettings {
    #[serde(default)]
    pub show_author_image: bool,
    #[serde(default)]
    pub show_rating: bool,
    #[serde(default)]
    pub show_date: bool,
    #[serde(default)]
    pub auto_rotate: bool,
    /// Rotation period in milliseconds.
    #[serde(default = "default_rotation_interval")]
    pub rotation_interval: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(rename = "_id")]
    pub id: String,
    pub content: String,
    pub author_name: String,
    #[serde(default)]
    pub author_title: Option<String>,
    #[serde(default)]
    pub author_company: Option<String>,
    #[serde(default)]
    pub metadata: Option<TestimonialMetadata>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialMetadata {
    #[serde(default)]
    pub rating: Option<u8>,
}

impl Testimonial {
    /// Star rating to render, out of five. Unrated testimonials show full
    /// marks rather than an accusatory empty row.
    pub fn rating(&self) -> u8 {
        self.metadata
            .as_ref()
            .and_then(|m| m.rating)
            .unwrap_or(5)
            .min(5)
    }
}

fn default_true() -> bool {
    true
}

fn default_rotation_interval() -> u32 {
    5000
}
