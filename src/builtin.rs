//! Built-in extractors.
//!
//! | Selector | Token | Fails when |
//! |----------|-------|------------|
//! | `client.ip` | remote address up to the first `:` | that part is empty |
//! | `request.host` | virtual host, verbatim | never |
//! | `request.header.<NAME>` | header value, `""` if absent | never |
//!
//! Every built-in charges [`DEFAULT_AMOUNT`] per request.
//!
//! `client.ip` is not IPv6 aware. A bare literal such as `2001:db8::1` yields
//! `2001`, and a bracketed peer such as `[::1]:443` yields `[`. Deployments that
//! see IPv6 peers should key on a header instead.

use std::fmt;

use crate::error::ExtractionError;
use crate::extractor::SourceExtractor;
use crate::request::SourceRequest;
use crate::selector::{CLIENT_IP, REQUEST_HEADER_PREFIX, REQUEST_HOST};
use crate::source::{DEFAULT_AMOUNT, Source};

/// The closed set of extractors a selector can name.
///
/// Build one from configuration with [`build`](crate::selector::build) or
/// `str::parse`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Extractor {
    /// `client.ip`: the peer address without its port.
    ClientIp,
    /// `request.host`: the virtual host.
    Host,
    /// `request.header.<NAME>`: the value of a header.
    ///
    /// The name is kept as configured. Lookup ignores case.
    Header(HeaderSelector),
}

/// A header selector with its prefixed name precomputed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeaderSelector {
    selector: String,
}

impl HeaderSelector {
    pub(crate) fn new(header: &str) -> Self {
        Self {
            selector: format!("{}{}", REQUEST_HEADER_PREFIX, header),
        }
    }

    /// The header name, as configured.
    pub fn header(&self) -> &str {
        &self.selector[REQUEST_HEADER_PREFIX.len()..]
    }

    /// The full selector, `request.header.<NAME>`.
    pub fn as_str(&self) -> &str {
        &self.selector
    }

    pub(crate) fn into_selector(self) -> String {
        self.selector
    }
}

impl Extractor {
    /// The client IP extractor.
    pub fn client_ip() -> Self {
        Self::ClientIp
    }

    /// The virtual host extractor.
    pub fn host() -> Self {
        Self::Host
    }

    /// Extract from the named header.
    ///
    /// Returns `None` for an empty name; use [`build`](crate::selector::build)
    /// to get a descriptive error instead.
    pub fn header(name: impl AsRef<str>) -> Option<Self> {
        let name = name.as_ref();
        if name.is_empty() {
            return None;
        }
        Some(Self::Header(HeaderSelector::new(name)))
    }

    /// The selector that builds this extractor.
    pub fn selector(&self) -> &str {
        match self {
            Self::ClientIp => CLIENT_IP,
            Self::Host => REQUEST_HOST,
            Self::Header(header) => header.as_str(),
        }
    }
}

impl SourceExtractor for Extractor {
    fn name(&self) -> &str {
        self.selector()
    }

    fn extract(&self, request: &dyn SourceRequest) -> Result<Source, ExtractionError> {
        match self {
            Self::ClientIp => client_ip(request),
            Self::Host => Ok(Source::new(request.host(), DEFAULT_AMOUNT)),
            Self::Header(header) => Ok(Source::new(
                request.header(header.header()).unwrap_or_default(),
                DEFAULT_AMOUNT,
            )),
        }
    }
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

fn client_ip(request: &dyn SourceRequest) -> Result<Source, ExtractionError> {
    let remote_addr = request.remote_addr();
    let ip = remote_addr
        .split_once(':')
        .map_or(&*remote_addr, |(ip, _port)| ip);

    if ip.is_empty() {
        return Err(ExtractionError::ClientIp {
            remote_addr: remote_addr.into_owned(),
        });
    }
    Ok(Source::new(ip, DEFAULT_AMOUNT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestInfo;

    fn from_addr(addr: &str) -> RequestInfo {
        RequestInfo::new().with_remote_addr(addr)
    }

    #[test]
    fn test_client_ip_strips_port() {
        let source = Extractor::client_ip()
            .extract(&from_addr("203.0.113.7:54321"))
            .unwrap();
        assert_eq!(source, Source::single("203.0.113.7"));
    }

    #[test]
    fn test_client_ip_without_port() {
        let source = Extractor::client_ip()
            .extract(&from_addr("192.168.1.1"))
            .unwrap();
        assert_eq!(source.token(), "192.168.1.1");
    }

    #[test]
    fn test_client_ip_empty_host_part() {
        for addr in ["", ":8080", ":"] {
            let err = Extractor::client_ip().extract(&from_addr(addr)).unwrap_err();
            assert_eq!(
                err,
                ExtractionError::ClientIp {
                    remote_addr: addr.to_string()
                }
            );
        }
    }

    #[test]
    fn test_client_ip_splits_on_first_colon() {
        let extractor = Extractor::client_ip();
        assert_eq!(
            extractor.extract(&from_addr("2001:db8::1")).unwrap().token(),
            "2001"
        );
        assert_eq!(
            extractor.extract(&from_addr("[::1]:443")).unwrap().token(),
            "["
        );
        assert_eq!(
            extractor.extract(&from_addr("not-an-ip:port:extra")).unwrap().token(),
            "not-an-ip"
        );
    }

    #[test]
    fn test_host_is_verbatim() {
        let extractor = Extractor::host();
        let request = RequestInfo::new().with_host("Example.COM:8080.");
        assert_eq!(
            extractor.extract(&request).unwrap(),
            Source::single("Example.COM:8080.")
        );

        let source = extractor.extract(&RequestInfo::new()).unwrap();
        assert_eq!(source, Source::single(""));
    }

    #[test]
    fn test_header_value_or_empty() {
        let extractor = Extractor::header("X-Api-Key").unwrap();
        let request = RequestInfo::new().with_header("x-api-key", "abc123");
        assert_eq!(extractor.extract(&request).unwrap(), Source::single("abc123"));

        let source = extractor.extract(&RequestInfo::new()).unwrap();
        assert_eq!(source.token(), "");
        assert_eq!(source.amount(), 1);
    }

    #[test]
    fn test_header_names() {
        assert!(Extractor::header("").is_none());

        let extractor = Extractor::header("X-Api-Key").unwrap();
        assert_eq!(extractor.name(), "request.header.X-Api-Key");
        assert_eq!(extractor.to_string(), "request.header.X-Api-Key");
        match &extractor {
            Extractor::Header(header) => assert_eq!(header.header(), "X-Api-Key"),
            other => panic!("unexpected extractor {other:?}"),
        }
    }

    #[test]
    fn test_fixed_names() {
        assert_eq!(Extractor::client_ip().name(), "client.ip");
        assert_eq!(Extractor::host().name(), "request.host");
    }
}
