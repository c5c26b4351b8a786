//! Read-only request views.
//!
//! Extractors never see a concrete framework request. They read through
//! [`SourceRequest`], which exposes only the three fields a source can be
//! derived from: the peer address, the virtual host and the headers.
//!
//! Adapters are provided for `http::Request` (feature `http`) and for actix-web
//! requests (feature `actix`). [`RequestInfo`] covers everything else.

use std::borrow::Cow;
use std::collections::HashMap;

#[cfg(feature = "http")]
mod http_view;

#[cfg(feature = "actix")]
mod actix_view;

/// A read-only view of an incoming request.
pub trait SourceRequest {
    /// The raw peer address, usually `host:port`.
    ///
    /// May be empty or malformed; extractors decide what that means.
    fn remote_addr(&self) -> Cow<'_, str>;

    /// The virtual host, exactly as the client sent it. Empty if unknown.
    fn host(&self) -> Cow<'_, str>;

    /// Look up a header value by name, ignoring case.
    ///
    /// Returns `None` if the header is absent or its value is not UTF-8.
    fn header(&self, name: &str) -> Option<&str>;
}

impl<T: SourceRequest + ?Sized> SourceRequest for &T {
    fn remote_addr(&self) -> Cow<'_, str> {
        (**self).remote_addr()
    }

    fn host(&self) -> Cow<'_, str> {
        (**self).host()
    }

    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }
}

impl<T: SourceRequest + ?Sized> SourceRequest for Box<T> {
    fn remote_addr(&self) -> Cow<'_, str> {
        (**self).remote_addr()
    }

    fn host(&self) -> Cow<'_, str> {
        (**self).host()
    }

    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }
}

/// An owned request view for callers without an HTTP framework.
///
/// ```
/// use ratelimit_source::{RequestInfo, SourceRequest};
///
/// let request = RequestInfo::new()
///     .with_remote_addr("203.0.113.7:54321")
///     .with_host("example.com")
///     .with_header("X-Api-Key", "abc123");
///
/// assert_eq!(request.header("x-api-key"), Some("abc123"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestInfo {
    remote_addr: String,
    host: String,
    // keyed by lowercased name
    headers: HashMap<String, String>,
}

impl RequestInfo {
    /// Create an empty request view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw peer address.
    pub fn with_remote_addr(mut self, remote_addr: impl Into<String>) -> Self {
        self.remote_addr = remote_addr.into();
        self
    }

    /// Set the virtual host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Add a header.
    ///
    /// Repeated headers keep their first value, which is the one lookups return.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.as_ref().to_ascii_lowercase())
            .or_insert_with(|| value.into());
        self
    }
}

impl SourceRequest for RequestInfo {
    fn remote_addr(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.remote_addr)
    }

    fn host(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.host)
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}
