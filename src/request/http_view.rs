//! [`SourceRequest`] for `http::Request`.

use std::borrow::Cow;
use std::net::SocketAddr;

use ::http::{HeaderValue, Request, header::HOST};

use super::SourceRequest;

impl<B> SourceRequest for Request<B> {
    /// The peer address stored in the request extensions.
    ///
    /// Servers usually insert a `SocketAddr` when accepting the connection. With
    /// the `axum` feature, axum's `ConnectInfo<SocketAddr>` is read as well.
    fn remote_addr(&self) -> Cow<'_, str> {
        peer_addr(self)
            .map(|addr| Cow::Owned(addr.to_string()))
            .unwrap_or(Cow::Borrowed(""))
    }

    /// The `Host` header, falling back to the URI authority.
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

fn peer_addr<B>(request: &Request<B>) -> Option<SocketAddr> {
    if let Some(addr) = request.extensions().get::<SocketAddr>() {
        return Some(*addr);
    }

    #[cfg(feature = "axum")]
    if let Some(info) = request
        .extensions()
        .get::<axum::extract::ConnectInfo<SocketAddr>>()
    {
        return Some(info.0);
    }

    None
}
