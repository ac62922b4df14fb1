//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use std::str::FromStr;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use currency_types::{Currency, CurrencyId, CurrencyRepository, NewCurrency, RepoError};

use crate::types::{DbCurrency, assemble, db_error, map_write_error};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
///
/// Rates are stored as TEXT to keep the exact decimal representation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

/// Exchange row; SQLite has no decimal type so the rate is text.
#[derive(sqlx::FromRow)]
struct DbExchange {
    currency_id: i64,
    target: String,
    rate: String,
}

impl DbExchange {
    fn into_parts(self) -> Result<(i64, String, Decimal), RepoError> {
        let rate = Decimal::from_str(&self.rate).map_err(|e| {
            RepoError::Database(format!("Invalid stored rate {:?}: {}", self.rate, e))
        })?;
        Ok((self.currency_id, self.target, rate))
    }
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `:memory:` opens a separate database, so keep
        // exactly one connection alive for the lifetime of the pool.
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(options).await?;

        let repo = Self { pool };
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_currencies.sql");
        for statement in ddl.split(';') {
            let stmt = statement.trim();
            if !stmt.is_empty() {
                sqlx::query(stmt).execute(&self.pool).await.map_err(db_error)?;
            }
        }
        Ok(())
    }

    async fn exchanges_for(&self, currency_id: i64) -> Result<Vec<DbExchange>, RepoError> {
        sqlx::query_as(
            r#"SELECT currency_id, target, rate FROM currency_exchanges WHERE currency_id = ?"#,
        )
        .bind(currency_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CurrencyRepository for SqliteRepo {
    async fn find_by_name(&self, name: &str) -> Result<Option<Currency>, RepoError> {
        let row: Option<DbCurrency> =
            sqlx::query_as(r#"SELECT id, name, description FROM currencies WHERE name = ?"#)
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let exchanges = self
            .exchanges_for(row.id)
            .await?
            .into_iter()
            .map(DbExchange::into_parts)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(assemble(vec![row], exchanges).pop())
    }

    async fn find_all(&self) -> Result<Vec<Currency>, RepoError> {
        let rows: Vec<DbCurrency> =
            sqlx::query_as(r#"SELECT id, name, description FROM currencies ORDER BY id"#)
                .fetch_all(&self.pool)
                .await
                .map_err(db_error)?;

        let exchanges: Vec<DbExchange> =
            sqlx::query_as(r#"SELECT currency_id, target, rate FROM currency_exchanges"#)
                .fetch_all(&self.pool)
                .await
                .map_err(db_error)?;

        let exchanges = exchanges
            .into_iter()
            .map(DbExchange::into_parts)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(assemble(rows, exchanges))
    }

    async fn save(&self, currency: NewCurrency) -> Result<Currency, RepoError> {
        let mut db_tx = self.pool.begin().await.map_err(db_error)?;

        let id = sqlx::query(r#"INSERT INTO currencies (name, description) VALUES (?, ?)"#)
            .bind(&currency.name)
            .bind(&currency.description)
            .execute(&mut *db_tx)
            .await
            .map_err(|e| map_write_error(e, &currency.name))?
            .last_insert_rowid();

        for (target, rate) in &currency.exchanges {
            sqlx::query(
                r#"INSERT INTO currency_exchanges (currency_id, target, rate) VALUES (?, ?, ?)"#,
            )
            .bind(id)
            .bind(target)
            .bind(rate.to_string())
            .execute(&mut *db_tx)
            .await
            .map_err(db_error)?;
        }

        db_tx.commit().await.map_err(db_error)?;

        Ok(Currency::from_parts(CurrencyId::new(id), currency))
    }

    async fn delete_by_id(&self, id: CurrencyId) -> Result<(), RepoError> {
        let mut db_tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query(r#"DELETE FROM currency_exchanges WHERE currency_id = ?"#)
            .bind(id.value())
            .execute(&mut *db_tx)
            .await
            .map_err(db_error)?;

        sqlx::query(r#"DELETE FROM currencies WHERE id = ?"#)
            .bind(id.value())
            .execute(&mut *db_tx)
            .await
            .map_err(db_error)?;

        db_tx.commit().await.map_err(db_error)?;
        Ok(())
    }
}
