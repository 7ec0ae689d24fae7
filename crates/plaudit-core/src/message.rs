//! The cross-frame resize message contract.
//!
//! The framed renderer posts `{ type: "resized", widgetId, height }` at its
//! parent with an unrestricted target origin (it cannot know the host's
//! origin in advance). The mounter accepts the message only after an exact
//! origin check against the rendering origin; the shape check here is
//! deliberately weak because the origin check is the authentication.
//!
//! `widgetId` is optional on the wire. When present the mounter uses it as
//! the dispatch key into the mount registry; when absent the mounter falls
//! back to matching the event's source window.

use serde::{Deserialize, Serialize};

/// The `type` discriminator carried by resize messages.
pub const RESIZE_MESSAGE_TYPE: &str = "resized";

/// A resize request from the framed renderer.
///
/// Deserialization is tolerant: extra fields are ignored and `height`/
/// `widgetId` may be absent, so a malformed payload either fails to
/// deserialize or fails [`ResizeMessage::requested_height`] — both end as a
/// silent discard, never an error surfaced to the host page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl ResizeMessage {
    /// The message the renderer posts: always typed, always routed.
    pub fn outbound(widget_id: impl Into<String>, height: f64) -> Self {
        Self {
            kind: RESIZE_MESSAGE_TYPE.to_string(),
            widget_id: Some(widget_id.into()),
            height: Some(height),
        }
    }

    /// Shape check: returns the requested height when the message is a
    /// well-formed resize request.
    ///
    /// Mirrors JS truthiness on `height` (zero and NaN are "absent"), so a
    /// renderer that posts garbage leaves the iframe exactly as it was.
    pub fn requested_height(&self) -> Option<f64> {
        if self.kind != RESIZE_MESSAGE_TYPE {
            return None;
        }
        match self.height {
            Some(h) if h.is_finite() && h != 0.0 => Some(h),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_message_yields_height() {
        let msg: ResizeMessage =
            serde_json::from_str(r#"{"type":"resized","widgetId":"w1","height":400}"#).unwrap();
        assert_eq!(msg.requested_height(), Some(400.0));
        assert_eq!(msg.widget_id.as_deref(), Some("w1"));
    }

    #[test]
    fn widget_id_is_optional() {
        let msg: ResizeMessage =
            serde_json::from_str(r#"{"type":"resized","height":250}"#).unwrap();
        assert_eq!(msg.requested_height(), Some(250.0));
        assert!(msg.widget_id.is_none());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let msg: ResizeMessage =
            serde_json::from_str(r#"{"type":"scrolled","height":400}"#).unwrap();
        assert_eq!(msg.requested_height(), None);
    }

    #[test]
    fn missing_height_is_rejected() {
        let msg: ResizeMessage = serde_json::from_str(r#"{"type":"resized"}"#).unwrap();
        assert_eq!(msg.requested_height(), None);
    }

    #[test]
    fn zero_height_is_falsy() {
        let msg: ResizeMessage =
            serde_json::from_str(r#"{"type":"resized","height":0}"#).unwrap();
        assert_eq!(msg.requested_height(), None);
    }

    #[test]
    fn negative_height_is_truthy() {
        // Negative numbers are truthy in JS; they survive the shape check
        // and get clamped to the minimum downstream.
        let msg: ResizeMessage =
            serde_json::from_str(r#"{"type":"resized","height":-50}"#).unwrap();
        assert_eq!(msg.requested_height(), Some(-50.0));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let msg: ResizeMessage = serde_json::from_str(
            r#"{"type":"resized","height":400,"nonce":"abc","nested":{"a":1}}"#,
        )
        .unwrap();
        assert_eq!(msg.requested_height(), Some(400.0));
    }

    #[test]
    fn non_object_payloads_fail_to_deserialize() {
        assert!(serde_json::from_str::<ResizeMessage>(r#""resized""#).is_err());
        assert!(serde_json::from_str::<ResizeMessage>("42").is_err());
        assert!(serde_json::from_str::<ResizeMessage>(r#"{"height":400}"#).is_err());
    }

    #[test]
    fn outbound_round_trips() {
        let json = serde_json::to_string(&ResizeMessage::outbound("w9", 512.0)).unwrap();
        let back: ResizeMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.requested_height(), Some(512.0));
        assert_eq!(back.widget_id.as_deref(), Some("w9"));
    }
}
