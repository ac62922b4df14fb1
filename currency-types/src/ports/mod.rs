//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod quotes;
mod repository;

pub use quotes::{QuoteError, QuoteProvider};
pub use repository::CurrencyRepository;
