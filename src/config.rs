//! Serde configuration for a rule's source.
//!
//! Limiters embed [`RuleSource`] in their rule configuration, usually with
//! `#[serde(flatten)]`:
//!
//! ```
//! use ratelimit_source::RuleSource;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Rule {
//!     #[serde(flatten)]
//!     source: RuleSource,
//!     requests_per_second: u64,
//! }
//!
//! let rule: Rule =
//!     serde_json::from_str(r#"{"source": "request.header.X-Api-Key", "requests_per_second": 5}"#)
//!         .unwrap();
//! assert_eq!(rule.source.extractor().to_string(), "request.header.X-Api-Key");
//! ```

use serde::{Deserialize, Serialize};

use crate::builtin::Extractor;
use crate::error::{ConfigError, Result};

/// The source part of a limiting rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSource {
    /// Which extractor the rule keys on, written as its selector.
    source: Extractor,
}

impl RuleSource {
    /// Create a rule source from an extractor.
    pub fn new(source: Extractor) -> Self {
        Self { source }
    }

    /// Parse a JSON document such as `{"source": "client.ip"}`.
    pub fn parse_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Invalid(e.to_string()).into())
    }

    /// The configured extractor.
    pub fn extractor(&self) -> &Extractor {
        &self.source
    }

    /// Consume the config, returning the extractor.
    pub fn into_extractor(self) -> Extractor {
        self.source
    }
}

impl From<Extractor> for RuleSource {
    fn from(source: Extractor) -> Self {
        Self::new(source)
    }
}
