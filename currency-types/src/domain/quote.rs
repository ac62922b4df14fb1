//! Live quote types returned by remote quote providers.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Quote provider response: pair key (e.g. `USDBRL`) -> quote.
///
/// Every top-level key of the provider body is a quote entry, so the body
/// decodes straight into a map.
pub type QuoteResponse = HashMap<String, Quote>;

/// A provider's price snapshot for one currency pair.
///
/// Prices are decimal numbers encoded as strings. Only `high` is required;
/// unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub high: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codein: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Quote {
    /// Creates a quote carrying only a high price.
    pub fn with_high(high: impl Into<String>) -> Self {
        Self {
            high: high.into(),
            low: None,
            bid: None,
            ask: None,
            code: None,
            codein: None,
            name: None,
        }
    }
}

/// Upper-cased currency pair, e.g. `USD` + `BRL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairCode {
    from: String,
    to: String,
}

impl PairCode {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_uppercase(),
            to: to.to_uppercase(),
        }
    }

    /// Hyphenated form sent to the provider (`USD-BRL`).
    pub fn query(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }

    /// Unseparated form used as the response key (`USDBRL`).
    pub fn key(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parses the hyphenated form back into a pair.
    pub fn parse_query(query: &str) -> Option<Self> {
        let (from, to) = query.split_once('-')?;
        if from.is_empty() || to.is_empty() {
            return None;
        }
        Some(Self::new(from, to))
    }
}

impl fmt::Display for PairCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query())
    }
}
