//! Currency domain model.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// Unique identifier for a Currency, assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CurrencyId(i64);

impl CurrencyId {
    /// Creates a CurrencyId from a raw store identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CurrencyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CurrencyId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A stored currency with its table of fixed exchange rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    /// Store-assigned identifier
    pub id: CurrencyId,
    /// Unique, case-sensitive name (the lookup key)
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Target currency name -> units of target per one unit of this currency
    pub exchanges: BTreeMap<String, Decimal>,
}

impl Currency {
    /// Reconstructs a currency from persisted parts (no validation).
    pub fn from_parts(id: CurrencyId, new: NewCurrency) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            exchanges: new.exchanges,
        }
    }

    /// Returns the stored rate towards `target`, if any.
    pub fn rate_to(&self, target: &str) -> Option<Decimal> {
        self.exchanges.get(target).copied()
    }

    /// Display label in the form `"<id> - <name>"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.id, self.name)
    }
}

/// A validated currency that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCurrency {
    pub name: String,
    pub description: String,
    pub exchanges: BTreeMap<String, Decimal>,
}

impl NewCurrency {
    /// Creates a new currency definition.
    ///
    /// # Validation
    /// - Name cannot be blank
    /// - Rate table keys cannot be blank
    /// - Every rate must be strictly positive
    pub fn new(
        name: String,
        description: String,
        exchanges: BTreeMap<String, Decimal>,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Currency name cannot be empty".into(),
            ));
        }

        for (target, rate) in &exchanges {
            if target.trim().is_empty() {
                return Err(DomainError::ValidationError(
                    "Exchange target cannot be empty".into(),
                ));
            }
            if *rate <= Decimal::ZERO {
                return Err(DomainError::ValidationError(format!(
                    "Exchange rate for {} must be positive",
                    target
                )));
            }
        }

        Ok(Self {
            name,
            description,
            exchanges,
        })
    }
}
