//! Tower layer for source extraction.

use std::sync::Arc;
use std::task::{Context, Poll};

use http::Request;
use tower::{Layer, Service};

use crate::extractor::SourceExtractor;
use crate::middleware::ExtractedSource;

/// Tower layer that stores an [`ExtractedSource`] in every request.
pub struct SourceLayer<E> {
    extractor: Arc<E>,
}

impl<E> SourceLayer<E> {
    /// Create a new source layer.
    pub fn new(extractor: E) -> Self {
        Self {
            extractor: Arc::new(extractor),
        }
    }
}

impl<E> Clone for SourceLayer<E> {
    fn clone(&self) -> Self {
        Self {
            extractor: self.extractor.clone(),
        }
    }
}

impl<E, Inner> Layer<Inner> for SourceLayer<E> {
    type Service = SourceService<E, Inner>;

    fn layer(&self, inner: Inner) -> Self::Service {
        SourceService {
            inner,
            extractor: self.extractor.clone(),
        }
    }
}

/// The source extraction service.
pub struct SourceService<E, Inner> {
    inner: Inner,
    extractor: Arc<E>,
}

impl<E, Inner> Clone for SourceService<E, Inner>
where
    Inner: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            extractor: self.extractor.clone(),
        }
    }
}

impl<E, Inner, B> Service<Request<B>> for SourceService<E, Inner>
where
    E: SourceExtractor,
    Inner: Service<Request<B>>,
{
    type Response = Inner::Response;
    type Error = Inner::Error;
    type Future = Inner::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        let extracted = self.extractor.extract(&request);
        if let Err(error) = &extracted {
            tracing::debug!(
                extractor = self.extractor.name(),
                %error,
                "could not identify request source"
            );
        }

        request.extensions_mut().insert(ExtractedSource(extracted));
        self.inner.call(request)
    }
}
