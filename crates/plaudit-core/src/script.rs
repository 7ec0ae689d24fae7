//! Publishable-key resolution and iframe URL construction.
//!
//! The embedding page configures us entirely through the URL of our own
//! script tag: `<script src="https://cdn.plaudit.app/embed.js?publishable_key=pk_...">`.
//! No globals, no init call. The key is resolved once at boot and reused
//! for every placeholder.

use url::Url;

use crate::config::EmbedConfig;
use crate::error::{EmbedError, Result};

/// Finds the publishable key among the host page's script URLs.
///
/// Scans the given `src` values in document order for the first one whose
/// URL path ends with our module filename, and returns that URL's key
/// parameter. Unparsable and empty `src` values are skipped — host pages
/// contain arbitrary script tags and none of them may break us.
///
/// Returns `None` when no script matches or the matching script carries no
/// key. That is the recoverable "not configured" state: the caller logs and
/// takes no further action.
pub fn resolve_publishable_key<I, S>(script_srcs: I, config: &EmbedConfig) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for src in script_srcs {
        let src = src.as_ref();
        if src.is_empty() {
            continue;
        }
        let Ok(url) = Url::parse(src) else {
            continue;
        };
        if !url.path().ends_with(&config.script_filename) {
            continue;
        }
        return url
            .query_pairs()
            .find(|(name, _)| name == config.key_param.as_str())
            .map(|(_, value)| value.into_owned());
    }
    None
}

/// Builds the iframe `src` for one widget.
///
/// `<rendering-origin>/?widget_id=<enc>&publishable_key=<enc>` — the only
/// two parameters the mounter ever sets. Both values are untrusted (the
/// widget id comes straight from host-page markup) and get percent-encoded
/// by the query serializer.
pub fn widget_src(config: &EmbedConfig, widget_id: &str, publishable_key: &str) -> Result<String> {
    let mut url = Url::parse(&config.widget_origin)
        .map_err(|_| EmbedError::InvalidOrigin(config.widget_origin.clone()))?;
    if url.cannot_be_a_base() {
        return Err(EmbedError::OriginCannotBeABase(config.widget_origin.clone()));
    }
    url.set_path("/");
    url.query_pairs_mut()
        .append_pair("widget_id", widget_id)
        .append_pair("publishable_key", publishable_key);
    Ok(url.into())
}
