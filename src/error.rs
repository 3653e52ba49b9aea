//! Error types for pixelwire.

use std::time::Duration;

use thiserror::Error;

/// Main error type for all pixelwire operations.
#[derive(Debug, Error)]
pub enum PixelError {
    /// A command argument is out of range or malformed.
    ///
    /// Raised before any byte is written to the link.
    #[error("invalid {field}: {value} (allowed: {allowed})")]
    InvalidParameter {
        /// Name of the offending parameter.
        field: &'static str,
        /// The rejected value, rendered for diagnostics.
        value: String,
        /// Human readable description of the accepted values.
        allowed: String,
    },

    /// A word-oriented transform was given an odd number of bytes.
    #[error("buffer length {len} is not a multiple of 2")]
    InvalidLength { len: usize },

    /// A length field cannot hold the value.
    #[error("value {value} does not fit in {width} byte(s)")]
    ValueTooLarge { value: u64, width: usize },

    /// A glyph has a zero dimension, or does not match the text frame's
    /// row layout.
    #[error("glyph size {width}x{height} is invalid")]
    InvalidGlyphSize { width: usize, height: usize },

    /// A send plan violates its structural invariants.
    #[error("invalid send plan: {0}")]
    InvalidPlan(String),

    /// The device did not acknowledge a window in time.
    #[error("no acknowledgment for window {window} within {timeout:?}")]
    AckTimeout { window: usize, timeout: Duration },

    /// The link rejected a write.
    #[error("link write failed in window {window}: {source}")]
    LinkWrite {
        window: usize,
        #[source]
        source: std::io::Error,
    },

    /// JSON command envelope could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error outside the link, e.g. writing replies to stdout.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PixelError {
    /// Shorthand for building an [`PixelError::InvalidParameter`].
    pub fn invalid(
        field: &'static str,
        value: impl ToString,
        allowed: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            field,
            value: value.to_string(),
            allowed: allowed.into(),
        }
    }

    /// Whether this error was raised by argument validation.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

/// Result type alias using PixelError.
pub type Result<T> = std::result::Result<T, PixelError>;
