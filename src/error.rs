//! Error types for source extraction.
//!
//! Errors fall into two groups: configuration errors raised while building an
//! extractor from a selector, and extraction errors raised per request when the
//! source cannot be identified.

use thiserror::Error;

use crate::selector::REQUEST_HEADER_PREFIX;

/// Result type for source extraction operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Main error type for source extraction.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Extraction error.
    #[error("Source extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Construction-time errors.
///
/// A rule whose selector fails to build should refuse to start rather than
/// run without limiting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The selector names no known strategy.
    #[error("unsupported limiting variable: '{0}'")]
    UnsupportedSelector(String),

    /// `request.header.` with nothing after it.
    #[error("missing header name after '{}'", REQUEST_HEADER_PREFIX)]
    EmptyHeaderName,

    /// Malformed configuration document.
    #[error("invalid source configuration: {0}")]
    Invalid(String),
}

/// Per-request errors.
///
/// The token and amount of a failed extraction are undefined; only the error
/// is meaningful. What to do with the request is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The remote address has no host portion.
    #[error("failed to parse client IP: {remote_addr}")]
    ClientIp {
        /// The raw remote address as seen on the request.
        remote_addr: String,
    },

    /// Raised by user-supplied extractors.
    #[error("{0}")]
    Custom(String),
}

impl ExtractionError {
    /// Create a custom extraction error.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Check if this error comes from client IP parsing.
    pub fn is_client_ip(&self) -> bool {
        matches!(self, Self::ClientIp { .. })
    }
}
