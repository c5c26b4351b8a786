//! The extraction strategy contract.
//!
//! A [`SourceExtractor`] is a named, stateless function from a request to a
//! [`Source`]. Limiters hold one per rule, build it once at configuration time
//! and call it from any number of tasks concurrently.
//!
//! # Example
//!
//! ```
//! use ratelimit_source::{FnExtractor, RequestInfo, Source, SourceExtractor, SourceRequest};
//!
//! // Charge uploads by declared size in kilobytes.
//! let by_upload = FnExtractor::new("upload.kb", |req: &dyn SourceRequest| {
//!     let kb = req
//!         .header("content-length")
//!         .and_then(|v| v.parse::<u64>().ok())
//!         .map_or(1, |len| len.div_ceil(1024).max(1));
//!     Ok(Source::new(req.host(), kb))
//! });
//!
//! let request = RequestInfo::new()
//!     .with_host("files.example.com")
//!     .with_header("Content-Length", "4096");
//! let source = by_upload.extract(&request).unwrap();
//! assert_eq!(source.amount(), 4);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::ExtractionError;
use crate::request::SourceRequest;
use crate::source::Source;

/// Trait for deriving a rate limiting source from requests.
pub trait SourceExtractor: Send + Sync + 'static {
    /// Get the extractor name for diagnostics.
    ///
    /// For built-in extractors this is the selector that builds them.
    fn name(&self) -> &str;

    /// Extract the source of a request.
    ///
    /// Must not assume any field or header is present, and must not have side
    /// effects.
    fn extract(&self, request: &dyn SourceRequest) -> Result<Source, ExtractionError>;
}

impl<E: SourceExtractor + ?Sized> SourceExtractor for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn extract(&self, request: &dyn SourceRequest) -> Result<Source, ExtractionError> {
        (**self).extract(request)
    }
}

impl<E: SourceExtractor + ?Sized> SourceExtractor for Arc<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn extract(&self, request: &dyn SourceRequest) -> Result<Source, ExtractionError> {
        (**self).extract(request)
    }
}

/// An extractor backed by a closure.
#[derive(Clone)]
pub struct FnExtractor<F> {
    name: String,
    extractor: F,
}

impl<F> fmt::Debug for FnExtractor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnExtractor")
            .field("name", &self.name)
            .finish()
    }
}

impl<F> FnExtractor<F>
where
    F: Fn(&dyn SourceRequest) -> Result<Source, ExtractionError> + Send + Sync + 'static,
{
    /// Create a new function-based extractor.
    pub fn new(name: impl Into<String>, extractor: F) -> Self {
        Self {
            name: name.into(),
            extractor,
        }
    }
}

impl<F> SourceExtractor for FnExtractor<F>
where
    F: Fn(&dyn SourceRequest) -> Result<Source, ExtractionError> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, request: &dyn SourceRequest) -> Result<Source, ExtractionError> {
        (self.extractor)(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestInfo;

    fn tenant() -> FnExtractor<
        impl Fn(&dyn SourceRequest) -> Result<Source, ExtractionError> + Send + Sync + 'static,
    > {
        FnExtractor::new("tenant", |req: &dyn SourceRequest| {
            req.header("x-tenant")
                .map(Source::single)
                .ok_or_else(|| ExtractionError::custom("missing tenant"))
        })
    }

    #[test]
    fn test_fn_extractor() {
        let extractor = tenant();
        assert_eq!(extractor.name(), "tenant");

        let request = RequestInfo::new().with_header("X-Tenant", "acme");
        assert_eq!(extractor.extract(&request), Ok(Source::single("acme")));

        let err = extractor.extract(&RequestInfo::new()).unwrap_err();
        assert_eq!(err, ExtractionError::custom("missing tenant"));
    }

    #[test]
    fn test_fn_extractor_debug_shows_name() {
        assert_eq!(format!("{:?}", tenant()), r#"FnExtractor { name: "tenant" }"#);
    }

    #[test]
    fn test_boxed_and_shared_extractors() {
        let boxed: Box<dyn SourceExtractor> = Box::new(tenant());
        let shared: Arc<dyn SourceExtractor> = Arc::new(tenant());
        let request = RequestInfo::new().with_header("x-tenant", "globex");

        assert_eq!(boxed.name(), "tenant");
        assert_eq!(boxed.extract(&request), shared.extract(&request));
    }
}
