//! Logging setup for the relay.
//!
//! `RUST_LOG` overrides the default filter; otherwise the relay logs its
//! own activity and tower-http request traces at info level.

use tracing_subscriber::EnvFilter;

pub fn init_logger() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("plaudit_proxy=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
