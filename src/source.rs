//! The result of a successful extraction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Amount consumed by a single request under every built-in extractor.
pub const DEFAULT_AMOUNT: u64 = 1;

/// A request source: the identity a limiter buckets on, and how much quota the
/// request consumes against that bucket.
///
/// An empty token is valid. It is the shared bucket of every request that lacks
/// the field the extractor reads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Source {
    token: String,
    amount: u64,
}

impl Source {
    /// Create a source with an explicit amount.
    pub fn new(token: impl Into<String>, amount: u64) -> Self {
        Self {
            token: token.into(),
            amount,
        }
    }

    /// Create a source consuming [`DEFAULT_AMOUNT`].
    pub fn single(token: impl Into<String>) -> Self {
        Self::new(token, DEFAULT_AMOUNT)
    }

    /// The identity key.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The quota weight of the request.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Consume the source, returning the token.
    pub fn into_token(self) -> String {
        self.token
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single() {
        let source = Source::single("10.0.0.1");
        assert_eq!(source.token(), "10.0.0.1");
        assert_eq!(source.amount(), 1);
        assert_eq!(source.to_string(), "10.0.0.1");
    }

    #[test]
    fn test_serialize() {
        let source = Source::new("tenant-a", 3);
        let json = serde_json::to_string(&source).unwrap();
        assert_eq!(json, r#"{"token":"tenant-a","amount":3}"#);
        assert_eq!(source.into_token(), "tenant-a");
    }
}
