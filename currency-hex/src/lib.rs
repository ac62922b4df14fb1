//! # Currency Hex
//!
//! Application service layer and HTTP adapter for the currency service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (catalog management and conversion)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `R: CurrencyRepository` and `Q: QuoteProvider`,
//! allowing different store and quote implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::CurrencyService;
