//! Actix-web middleware for source extraction.
//!
//! # Example
//!
//! ```ignore
//! use actix_web::{web, App, HttpServer};
//! use ratelimit_source::{middleware::actix::SourceExtraction, Extractor};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     HttpServer::new(|| {
//!         App::new()
//!             .wrap(SourceExtraction::new(Extractor::ClientIp))
//!             .route("/api/data", web::get().to(handler))
//!     })
//!     .bind("127.0.0.1:8080")?
//!     .run()
//!     .await
//! }
//! ```

use std::future::{Ready, ready};
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    dev::{ServiceRequest, ServiceResponse},
};

use crate::extractor::SourceExtractor;
use crate::middleware::ExtractedSource;

/// Source extraction middleware for Actix-web.
pub struct SourceExtraction<E> {
    extractor: Arc<E>,
}

impl<E: SourceExtractor> SourceExtraction<E> {
    /// Create a new source extraction middleware.
    pub fn new(extractor: E) -> Self {
        Self {
            extractor: Arc::new(extractor),
        }
    }
}

impl<E> Clone for SourceExtraction<E> {
    fn clone(&self) -> Self {
        Self {
            extractor: self.extractor.clone(),
        }
    }
}

impl<E, Svc, B> Transform<Svc, ServiceRequest> for SourceExtraction<E>
where
    E: SourceExtractor,
    Svc: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    Svc::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SourceExtractionMiddleware<E, Svc>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: Svc) -> Self::Future {
        ready(Ok(SourceExtractionMiddleware {
            service,
            extractor: self.extractor.clone(),
        }))
    }
}

/// The actual middleware service.
pub struct SourceExtractionMiddleware<E, Svc> {
    service: Svc,
    extractor: Arc<E>,
}

impl<E, Svc, B> Service<ServiceRequest> for SourceExtractionMiddleware<E, Svc>
where
    E: SourceExtractor,
    Svc: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    Svc::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Svc::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let extracted = self.extractor.extract(&req);
        if let Err(error) = &extracted {
            tracing::debug!(
                extractor = self.extractor.name(),
                %error,
                "could not identify request source"
            );
        }

        req.extensions_mut().insert(ExtractedSource(extracted));
        self.service.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::Extractor;
    use actix_web::{App, HttpRequest, HttpResponse, test, web};

    async fn echo_source(req: HttpRequest) -> HttpResponse {
        match req.extensions().get::<ExtractedSource>() {
            Some(ExtractedSource(Ok(source))) => HttpResponse::Ok().body(source.token().to_string()),
            Some(ExtractedSource(Err(error))) => HttpResponse::BadRequest().body(error.to_string()),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    #[actix_web::test]
    async fn test_client_ip_in_extensions() {
        let app = test::init_service(
            App::new()
                .wrap(SourceExtraction::new(Extractor::ClientIp))
                .route("/", web::get().to(echo_source)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .peer_addr("203.0.113.7:54321".parse().unwrap())
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "203.0.113.7");
    }

    #[actix_web::test]
    async fn test_missing_peer_is_forwarded_as_error() {
        let app = test::init_service(
            App::new()
                .wrap(SourceExtraction::new(Extractor::ClientIp))
                .route("/", web::get().to(echo_source)),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_header_in_extensions() {
        let app = test::init_service(
            App::new()
                .wrap(SourceExtraction::new(Extractor::header("X-Api-Key").unwrap()))
                .route("/", web::get().to(echo_source)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("x-api-key", "abc123"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "abc123");
    }
}
