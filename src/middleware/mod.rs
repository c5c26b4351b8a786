//! Middleware that identifies the source of each request.
//!
//! The middleware never rejects a request. It runs the configured extractor,
//! stores the outcome in the request extensions as [`ExtractedSource`] and
//! forwards the request. The limiter downstream reads it and decides what a
//! failed extraction means for that request.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use ratelimit_source::{middleware::SourceLayer, selector};
//!
//! let app = Router::new()
//!     .route("/api/data", get(handler))
//!     .layer(SourceLayer::new(selector::build("request.header.X-Api-Key")?));
//! ```

use crate::error::ExtractionError;
use crate::source::Source;

#[cfg(feature = "tower")]
mod layer;

#[cfg(feature = "actix")]
pub mod actix;

#[cfg(feature = "tower")]
pub use layer::{SourceLayer, SourceService};

/// The outcome of source extraction, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSource(pub Result<Source, ExtractionError>);

impl ExtractedSource {
    /// The extracted source, if extraction succeeded.
    pub fn source(&self) -> Option<&Source> {
        self.0.as_ref().ok()
    }

    /// The extraction error, if extraction failed.
    pub fn error(&self) -> Option<&ExtractionError> {
        self.0.as_ref().err()
    }

    /// Consume the wrapper, returning the outcome.
    pub fn into_inner(self) -> Result<Source, ExtractionError> {
        self.0
    }
}

impl From<Result<Source, ExtractionError>> for ExtractedSource {
    fn from(result: Result<Source, ExtractionError>) -> Self {
        Self(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_source_accessors() {
        let ok = ExtractedSource(Ok(Source::single("10.0.0.1")));
        assert_eq!(ok.source().map(Source::token), Some("10.0.0.1"));
        assert!(ok.error().is_none());

        let err = ExtractedSource::from(Err(ExtractionError::ClientIp {
            remote_addr: String::new(),
        }));
        assert!(err.source().is_none());
        assert!(err.error().is_some_and(ExtractionError::is_client_ip));
        assert!(err.into_inner().is_err());
    }
}
