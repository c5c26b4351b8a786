//! Request source extraction for rate limiters.
//!
//! `ratelimit_source` answers one question for a limiter: *who sent this
//! request, and how much quota does it consume?* The answer is a [`Source`],
//! a token to bucket on plus an amount to charge.
//!
//! - **Selectors**: Each rule names its strategy with a single string
//! - **Built-in extractors**: Client IP, virtual host, or any request header
//! - **Custom extractors**: Named closures through [`FnExtractor`]
//! - **Framework integration**: `http`, axum, tower and actix-web adapters
//!
//! # Quick Start
//!
//! ```
//! use ratelimit_source::{RequestInfo, SourceExtractor, selector};
//!
//! let extractor = selector::build("client.ip").unwrap();
//!
//! let request = RequestInfo::new().with_remote_addr("203.0.113.7:54321");
//! let source = extractor.extract(&request).unwrap();
//!
//! assert_eq!(source.token(), "203.0.113.7");
//! assert_eq!(source.amount(), 1);
//! ```
//!
//! # Selectors
//!
//! | Selector | Token | Errors |
//! |----------|-------|--------|
//! | `client.ip` | peer address before the first `:` | empty address part |
//! | `request.host` | virtual host, verbatim | never |
//! | `request.header.<NAME>` | header value, empty if absent | never |
//!
//! An unknown selector, or `request.header.` with no name, fails in
//! [`selector::build`] so the rule never starts.
//!
//! # Feature Flags
//!
//! - `http`: [`SourceRequest`] for `http::Request`
//! - `axum`: read the peer address from axum's `ConnectInfo`
//! - `tower`: `middleware::SourceLayer`
//! - `actix`: [`SourceRequest`] for actix-web requests and
//!   `middleware::actix::SourceExtraction`

pub mod builtin;
pub mod config;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod request;
pub mod selector;
pub mod source;

// Re-export main types
pub use builtin::{Extractor, HeaderSelector};
pub use config::RuleSource;
pub use error::{ConfigError, ExtractionError, Result, SourceError};
pub use extractor::{FnExtractor, SourceExtractor};
pub use middleware::ExtractedSource;
pub use request::{RequestInfo, SourceRequest};
pub use selector::build;
pub use source::{DEFAULT_AMOUNT, Source};

#[cfg(feature = "tower")]
pub use middleware::SourceLayer;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builtin::Extractor;
    pub use crate::error::{ConfigError, ExtractionError, Result};
    pub use crate::extractor::{FnExtractor, SourceExtractor};
    pub use crate::request::{RequestInfo, SourceRequest};
    pub use crate::source::Source;

    #[cfg(feature = "tower")]
    pub use crate::middleware::SourceLayer;
}
