//! Error types for protocol configuration and URL construction.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmbedError>;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("invalid rendering origin: {0}")]
    InvalidOrigin(String),

    #[error("rendering origin cannot carry a base: {0}")]
    OriginCannotBeABase(String),
}
