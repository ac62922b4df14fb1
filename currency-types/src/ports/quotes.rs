//! Quote provider port.
//!
//! This trait defines the interface for live quote services.
//! Implementations can be HTTP clients, fixed-quote providers, etc.

use crate::domain::QuoteResponse;

/// Error type for quote provider operations.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider returned HTTP {0}")]
    Status(u16),

    #[error("Malformed provider response: {0}")]
    Decode(String),

    #[error("No quote for pair {0}")]
    MissingPair(String),

    #[error("Invalid price {price:?} for pair {pair}")]
    InvalidPrice { pair: String, price: String },
}

/// Port trait for live quote providers.
#[async_trait::async_trait]
pub trait QuoteProvider: Send + Sync + 'static {
    /// Fetches quotes for a hyphenated pair code (e.g. `USD-BRL`).
    ///
    /// The response is keyed by the unseparated pair code (`USDBRL`).
    /// A single attempt is made; nothing is cached.
    async fn get_quote(&self, pair: &str) -> Result<QuoteResponse, QuoteError>;
}
