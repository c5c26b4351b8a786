//! [`SourceRequest`] for actix-web requests.
//!
//! The peer address is the socket peer. Proxy headers such as `Forwarded` are
//! not consulted.

use std::borrow::Cow;

use actix_web::{
    HttpRequest,
    dev::ServiceRequest,
    http::header::{HOST, HeaderValue},
};

use super::SourceRequest;

impl SourceRequest for HttpRequest {
    fn remote_addr(&self) -> Cow<'_, str> {
        self.peer_addr()
            .map(|addr| Cow::Owned(addr.to_string()))
            .unwrap_or(Cow::Borrowed(""))
    }

    fn host(&self) -> Cow<'_, str> {
        if let Some(host) = self.headers().get(HOST).and_then(header_str) {
            return Cow::Borrowed(host);
        }
        self.uri()
            .authority()
            .map(|authority| Cow::Borrowed(authority.as_str()))
            .unwrap_or(Cow::Borrowed(""))
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name).and_then(header_str)
    }
}

// Values are opaque to extraction; only presence matters.
fn header_str(value: &HeaderValue) -> Option<&str> {
    std::str::from_utf8(value.as_bytes()).ok()
}

impl SourceRequest for ServiceRequest {
    fn remote_addr(&self) -> Cow<'_, str> {
        self.request().remote_addr()
    }

    fn host(&self) -> Cow<'_, str> {
        self.request().host()
    }

    fn header(&self, name: &str) -> Option<&str> {
        SourceRequest::header(self.request(), name)
    }
}
