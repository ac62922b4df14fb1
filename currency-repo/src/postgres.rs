//! PostgreSQL repository adapter.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use currency_types::{Currency, CurrencyId, CurrencyRepository, NewCurrency, RepoError};

use crate::types::{DbCurrency, assemble, db_error, map_write_error};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository; rates are NUMERIC columns decoded straight into `Decimal`.
pub struct PostgresRepo {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct DbExchange {
    currency_id: i64,
    target: String,
    rate: Decimal,
}

impl From<DbExchange> for (i64, String, Decimal) {
    fn from(row: DbExchange) -> Self {
        (row.currency_id, row.target, row.rate)
    }
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl PostgresRepo {
    /// Connects to PostgreSQL and runs migrations.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;

        execute_migration(
            &pool,
            include_str!("../migrations/0001_create_currencies_pg.sql"),
            "0001",
        )
        .await?;

        tracing::info!("PostgreSQL migrations applied");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CurrencyRepository for PostgresRepo {
    async fn find_by_name(&self, name: &str) -> Result<Option<Currency>, RepoError> {
        let row: Option<DbCurrency> =
            sqlx::query_as(r#"SELECT id, name, description FROM currencies WHERE name = $1"#)
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let exchanges: Vec<DbExchange> = sqlx::query_as(
            r#"SELECT currency_id, target, rate FROM currency_exchanges WHERE currency_id = $1"#,
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(assemble(vec![row], exchanges.into_iter().map(Into::into)).pop())
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

        Ok(assemble(rows, exchanges.into_iter().map(Into::into)))
    }

    async fn save(&self, currency: NewCurrency) -> Result<Currency, RepoError> {
        let mut db_tx = self.pool.begin().await.map_err(db_error)?;

        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO currencies (name, description) VALUES ($1, $2) RETURNING id"#,
        )
        .bind(&currency.name)
        .bind(&currency.description)
        .fetch_one(&mut *db_tx)
        .await
        .map_err(|e| map_write_error(e, &currency.name))?;

        for (target, rate) in &currency.exchanges {
            sqlx::query(
                r#"INSERT INTO currency_exchanges (currency_id, target, rate) VALUES ($1, $2, $3)"#,
            )
            .bind(id)
            .bind(target)
            .bind(*rate)
            .execute(&mut *db_tx)
            .await
            .map_err(db_error)?;
        }

        db_tx.commit().await.map_err(db_error)?;

        Ok(Currency::from_parts(CurrencyId::new(id), currency))
    }

    async fn delete_by_id(&self, id: CurrencyId) -> Result<(), RepoError> {
        // Exchange rows go with the currency through ON DELETE CASCADE.
        sqlx::query(r#"DELETE FROM currencies WHERE id = $1"#)
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}
