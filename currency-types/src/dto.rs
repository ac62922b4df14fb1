//! Data Transfer Objects (DTOs) for requests and responses.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Currency;

// ─────────────────────────────────────────────────────────────────────────────
// Catalog DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to register a new currency.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCurrencyRequest {
    /// Unique, case-sensitive currency name
    #[schema(example = "BRL")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "Brazilian real")]
    pub description: String,
    /// Fixed rates: target currency name -> units of target per unit of this currency
    #[serde(default)]
    #[schema(example = json!({"USD": "0.20", "EUR": "0.18"}))]
    pub exchanges: BTreeMap<String, Decimal>,
}

/// Listing entry for a stored currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CurrencyResponse {
    /// `"<id> - <name>"`
    #[schema(example = "1 - BRL")]
    pub label: String,
}

impl From<&Currency> for CurrencyResponse {
    fn from(currency: &Currency) -> Self {
        Self {
            label: currency.label(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to convert an amount between two currencies.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConvertCurrencyRequest {
    /// Source currency name
    #[schema(example = "USD")]
    pub from: String,
    /// Target currency name
    #[schema(example = "BRL")]
    pub to: String,
    /// Amount in the source currency (must be positive)
    #[schema(example = "10")]
    pub amount: Decimal,
}

/// Result of a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConvertCurrencyResponse {
    /// Amount in the target currency
    #[schema(example = "55.00")]
    pub amount: Decimal,
}
