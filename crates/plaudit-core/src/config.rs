//! Embed configuration.
//!
//! These are design constants, not knobs: the embed script ships as a single
//! file on a fixed origin and every host page gets the same behavior. The
//! [`EmbedConfig`] struct exists so tests can run independent mounters with
//! different origins and thresholds, not so integrators can tune them.

use serde::{Deserialize, Serialize};

use crate::height::HeightLimits;

/// Origin serving the framed renderer. The trust boundary for the resize
/// channel: only messages from exactly this origin are honored.
pub const WIDGET_ORIGIN: &str = "https://widget.plaudit.app";

/// Iframe height applied at creation, before the first valid resize message.
pub const DEFAULT_HEIGHT: u32 = 300;

/// Lower bound for renderer-requested heights, in pixels.
pub const MIN_HEIGHT: u32 = 100;

/// Upper bound for renderer-requested heights, in pixels.
pub const MAX_HEIGHT: u32 = 5000;

/// Height deltas at or below this many pixels are ignored (jitter).
pub const JITTER_THRESHOLD: u32 = 5;

/// Filename the embed script is served under; used to find our own script
/// tag among everything else the host page loads.
pub const EMBED_FILENAME: &str = "embed.js";

/// Query parameter on the embed script URL that carries the publishable key.
pub const KEY_PARAM: &str = "publishable_key";

/// Configuration for one mounter instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// Origin the iframes point at and the only origin resize messages are
    /// accepted from.
    pub widget_origin: String,
    /// Height applied to a freshly created iframe.
    pub default_height: u32,
    /// Clamp bounds for requested heights.
    pub limits: HeightLimits,
    /// Hysteresis threshold in pixels.
    pub jitter_threshold: u32,
    /// Filename suffix identifying our own script tag.
    pub script_filename: String,
    /// Query parameter name carrying the publishable key.
    pub key_param: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            widget_origin: WIDGET_ORIGIN.to_string(),
            default_height: DEFAULT_HEIGHT,
            limits: HeightLimits {
                min: MIN_HEIGHT,
                max: MAX_HEIGHT,
            },
            jitter_threshold: JITTER_THRESHOLD,
            script_filename: EMBED_FILENAME.to_string(),
            key_param: KEY_PARAM.to_string(),
        }
    }
}
