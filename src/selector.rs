//! Building extractors from selector strings.
//!
//! A selector is the single configuration value of a limiting rule:
//!
//! - `client.ip`
//! - `request.host`
//! - `request.header.<NAME>` for any non-empty `<NAME>`
//!
//! Anything else is rejected when the rule is built. There is no fallback.
//!
//! ```
//! use ratelimit_source::{Extractor, SourceExtractor, selector};
//!
//! let extractor = selector::build("request.header.X-Api-Key").unwrap();
//! assert_eq!(extractor.name(), "request.header.X-Api-Key");
//!
//! let extractor: Extractor = "client.ip".parse().unwrap();
//! assert_eq!(extractor, Extractor::ClientIp);
//!
//! assert!(selector::build("client.port").is_err());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::builtin::{Extractor, HeaderSelector};
use crate::error::ConfigError;

/// Selector for [`Extractor::ClientIp`].
pub const CLIENT_IP: &str = "client.ip";

/// Selector for [`Extractor::Host`].
pub const REQUEST_HOST: &str = "request.host";

/// Prefix of header selectors.
pub const REQUEST_HEADER_PREFIX: &str = "request.header.";

/// Build the extractor a selector names.
///
/// Matching is exact and case-sensitive; the selector is not trimmed.
pub fn build(selector: &str) -> Result<Extractor, ConfigError> {
    let extractor = match selector {
        CLIENT_IP => Extractor::ClientIp,
        REQUEST_HOST => Extractor::Host,
        _ => match selector.strip_prefix(REQUEST_HEADER_PREFIX) {
            Some("") => return Err(ConfigError::EmptyHeaderName),
            Some(header) => Extractor::Header(HeaderSelector::new(header)),
            None => return Err(ConfigError::UnsupportedSelector(selector.to_string())),
        },
    };

    tracing::debug!(selector, "built source extractor");
    Ok(extractor)
}

impl FromStr for Extractor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        build(s)
    }
}

impl TryFrom<&str> for Extractor {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        build(value)
    }
}

impl TryFrom<String> for Extractor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        build(&value)
    }
}

impl From<Extractor> for String {
    fn from(extractor: Extractor) -> Self {
        match extractor {
            Extractor::Header(header) => header.into_selector(),
            other => other.selector().to_string(),
        }
    }
}

impl Serialize for Extractor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.selector())
    }
}

impl<'de> Deserialize<'de> for Extractor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let selector = String::deserialize(deserializer)?;
        build(&selector).map_err(serde::de::Error::custom)
    }
}
