//! Domain models for the currency service.

pub mod currency;
pub mod quote;

pub use currency::{Currency, CurrencyId, NewCurrency};
pub use quote::{PairCode, Quote, QuoteResponse};
