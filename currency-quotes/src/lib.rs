//! Quote provider adapters.
//!
//! Two implementations of the [`QuoteProvider`] port:
//! - [`HttpQuoteProvider`] queries a live quote API over HTTP.
//! - [`StaticQuoteProvider`] serves fixed quotes for development and testing.
//!
//! # Example
//! ```
//! use currency_quotes::StaticQuoteProvider;
//! use rust_decimal::Decimal;
//!
//! let provider = StaticQuoteProvider::new()
//!     .with_quote("USD", "BRL", Decimal::new(550, 2));
//! ```

mod http;
mod fixed;

pub use fixed::StaticQuoteProvider;
pub use http::{DEFAULT_QUOTE_API_URL, HttpQuoteProvider};

pub use currency_types::{QuoteError, QuoteProvider};
