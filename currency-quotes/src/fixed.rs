//! Fixed quotes for development and testing.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use currency_types::{PairCode, Quote, QuoteError, QuoteProvider, QuoteResponse};

/// Quote provider answering from a fixed table instead of the network.
///
/// Mirrors the live API's behaviour: a known pair yields a single-entry
/// response keyed by the unseparated pair code, an unknown pair is a 404.
#[derive(Debug, Clone, Default)]
pub struct StaticQuoteProvider {
    quotes: HashMap<String, Quote>,
    offline: bool,
}

impl StaticQuoteProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose every request fails at the transport level.
    pub fn offline() -> Self {
        Self {
            quotes: HashMap::new(),
            offline: true,
        }
    }

    /// Adds a quote with the given high price.
    pub fn with_quote(self, from: &str, to: &str, high: Decimal) -> Self {
        self.with_raw_quote(from, to, Quote::with_high(high.to_string()))
    }

    /// Adds a quote exactly as a provider would send it.
    pub fn with_raw_quote(mut self, from: &str, to: &str, quote: Quote) -> Self {
        self.quotes.insert(PairCode::new(from, to).key(), quote);
        self
    }
}

#[async_trait]
impl QuoteProvider for StaticQuoteProvider {
    async fn get_quote(&self, pair: &str) -> Result<QuoteResponse, QuoteError> {
        if self.offline {
            return Err(QuoteError::Transport("quote provider offline".into()));
        }

        let key = PairCode::parse_query(pair)
            .map(|p| p.key())
            .ok_or(QuoteError::Status(404))?;

        let quote = self.quotes.get(&key).cloned().ok_or(QuoteError::Status(404))?;
        Ok(HashMap::from([(key, quote)]))
    }
}
