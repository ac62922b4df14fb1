//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Memory, SQLite, Postgres) will implement this trait.

use crate::domain::{Currency, CurrencyId, NewCurrency};
use crate::error::RepoError;

/// The currency store port.
///
/// Each operation touches a single currency record and MUST be atomic.
/// No operation spans more than one record.
#[async_trait::async_trait]
pub trait CurrencyRepository: Send + Sync + 'static {
    /// Finds a currency by its exact (case-sensitive) name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Currency>, RepoError>;

    /// Lists all currencies in store iteration order.
    async fn find_all(&self) -> Result<Vec<Currency>, RepoError>;

    /// Persists a new currency and assigns its id.
    ///
    /// Returns `RepoError::Conflict` if the name is already taken.
    async fn save(&self, currency: NewCurrency) -> Result<Currency, RepoError>;

    /// Deletes a currency by id. Deleting a missing id is a no-op.
    async fn delete_by_id(&self, id: CurrencyId) -> Result<(), RepoError>;
}
