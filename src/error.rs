//! Error types for the mandala renderer

use thiserror::Error;

/// Result type alias for renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the renderer
#[derive(Error, Debug)]
pub enum Error {
    /// The input word was empty after sanitization
    #[error("Word is empty after sanitization; nothing to render")]
    EmptyWord,

    /// Surface dimensions are unusable
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidSurface { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

impl From<png::EncodingError> for Error {
    fn from(err: png::EncodingError) -> Self {
        Error::Encode(err.to_string())
    }
}
