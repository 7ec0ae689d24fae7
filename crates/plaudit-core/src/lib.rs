//! # plaudit-core
//!
//! Target-independent logic for the Plaudit embed/mount/resize protocol.
//!
//! The embed script (`plaudit-embed`) and the framed widget
//! (`plaudit-widget`) both compile this crate to WASM, but nothing in here
//! touches the DOM: this crate owns the parts of the protocol that can be
//! reasoned about (and unit-tested) natively:
//!
//! - design constants and configuration ([`config`])
//! - publishable-key resolution and iframe URL construction ([`script`])
//! - the mount registry that makes mounting idempotent ([`registry`])
//! - resize-message shape validation ([`message`])
//! - height clamping and hysteresis ([`height`])
//! - the combo API contract types ([`model`])

pub mod config;
pub mod error;
pub mod height;
pub mod message;
pub mod model;
pub mod registry;
pub mod script;

pub use config::EmbedConfig;
pub use error::{EmbedError, Result};
pub use height::{HeightLimits, HeightTracker};
pub use message::ResizeMessage;
pub use model::{Testimonial, Widget, WidgetBundle, WidgetKind, WidgetSettings};
pub use registry::{MountEntry, MountRegistry};
