//! Shared database row types and row-to-domain assembly for the SQL adapters.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use sqlx::FromRow;

use currency_types::{Currency, CurrencyId, RepoError};

/// Currency row from database.
#[derive(FromRow)]
pub struct DbCurrency {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl DbCurrency {
    pub fn into_domain(self, exchanges: BTreeMap<String, Decimal>) -> Currency {
        Currency {
            id: CurrencyId::new(self.id),
            name: self.name,
            description: self.description,
            exchanges,
        }
    }
}

/// Joins currency rows with their `(currency_id, target, rate)` rows,
/// preserving the order of `rows`.
pub fn assemble(
    rows: Vec<DbCurrency>,
    exchanges: impl IntoIterator<Item = (i64, String, Decimal)>,
) -> Vec<Currency> {
    let mut tables: HashMap<i64, BTreeMap<String, Decimal>> = HashMap::new();
    for (currency_id, target, rate) in exchanges {
        tables.entry(currency_id).or_default().insert(target, rate);
    }

    rows.into_iter()
        .map(|row| {
            let table = tables.remove(&row.id).unwrap_or_default();
            row.into_domain(table)
        })
        .collect()
}

/// Maps a write failure, turning a unique-name violation into a conflict.
pub fn map_write_error(err: sqlx::Error, name: &str) -> RepoError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::Conflict(name.to_string())
        }
        _ => RepoError::Database(err.to_string()),
    }
}

pub fn db_error(err: sqlx::Error) -> RepoError {
    RepoError::Database(err.to_string())
}
