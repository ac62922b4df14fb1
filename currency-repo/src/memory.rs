//! In-memory repository adapter.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};

use currency_types::{Currency, CurrencyId, CurrencyRepository, NewCurrency, RepoError};

/// Process-local store keyed by currency name.
///
/// Single-record operations are atomic through `DashMap` shard locking;
/// ids come from a monotonic sequence starting at 1.
pub struct MemoryRepo {
    currencies: DashMap<String, Currency>,
    next_id: AtomicI64,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self {
            currencies: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

impl Default for MemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CurrencyRepository for MemoryRepo {
    async fn find_by_name(&self, name: &str) -> Result<Option<Currency>, RepoError> {
        Ok(self.currencies.get(name).map(|c| c.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<Currency>, RepoError> {
        let mut all: Vec<Currency> = self.currencies.iter().map(|c| c.value().clone()).collect();
        all.sort_by_key(|c| c.id);
        Ok(all)
    }

    async fn save(&self, currency: NewCurrency) -> Result<Currency, RepoError> {
        match self.currencies.entry(currency.name.clone()) {
            Entry::Occupied(_) => Err(RepoError::Conflict(currency.name)),
            Entry::Vacant(slot) => {
                let id = CurrencyId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
                let saved = Currency::from_parts(id, currency);
                slot.insert(saved.clone());
                tracing::debug!("Stored currency {} as id {}", saved.name, id);
                Ok(saved)
            }
        }
    }

    async fn delete_by_id(&self, id: CurrencyId) -> Result<(), RepoError> {
        self.currencies.retain(|_, c| c.id != id);
        Ok(())
    }
}
