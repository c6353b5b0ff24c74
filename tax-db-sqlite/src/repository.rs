use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tax_core::{DeductionConfig, DeductionKind, DeductionRepository, RepositoryError};
use tracing::debug;

use crate::numeric::get_f64;

const SELECT_LATEST: &str =
    "SELECT personal, k_receipt FROM deductions ORDER BY id DESC LIMIT 1";

// Each update appends a row that copies the untouched column from the latest
// row, so an empty table inserts nothing.
const INSERT_PERSONAL: &str = "INSERT INTO deductions (personal, k_receipt, created_at)
     SELECT ?, k_receipt, ? FROM deductions ORDER BY id DESC LIMIT 1";

const INSERT_K_RECEIPT: &str = "INSERT INTO deductions (personal, k_receipt, created_at)
     SELECT personal, ?, ? FROM deductions ORDER BY id DESC LIMIT 1";

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self> {
        // An in-memory database lives only as long as its connection, so the
        // pool keeps exactly one and never recycles it.
        let options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = options
            .connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Load and execute all SQL seed files from the specified directory.
    /// Files are executed in alphabetical order by filename.
    pub async fn run_seeds(
        &self,
        seeds_dir: &Path,
    ) -> Result<()> {
        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .with_context(|| format!("Failed to read seeds directory '{}'", seeds_dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let sql = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read seed file '{}'", path.display()))?;

            sqlx::raw_sql(&sql)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to execute seed file '{}'", path.display()))?;

            debug!(seed = %path.display(), "applied seed file");
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_deductions(row: &sqlx::sqlite::SqliteRow) -> Result<DeductionConfig, RepositoryError> {
    Ok(DeductionConfig {
        personal: get_f64(row, "personal")?,
        k_receipt: get_f64(row, "k_receipt")?,
    })
}

#[async_trait]
impl DeductionRepository for SqliteRepository {
    async fn current_deductions(&self) -> Result<DeductionConfig, RepositoryError> {
        let row = sqlx::query(SELECT_LATEST)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        row_to_deductions(&row)
    }

    async fn set_deduction(
        &self,
        kind: DeductionKind,
        amount: f64,
    ) -> Result<DeductionConfig, RepositoryError> {
        let sql = match kind {
            DeductionKind::Personal => INSERT_PERSONAL,
            DeductionKind::KReceipt => INSERT_K_RECEIPT,
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let inserted = sqlx::query(sql)
            .bind(amount)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if inserted.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        let row = sqlx::query(SELECT_LATEST)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        let updated = row_to_deductions(&row)?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        debug!(kind = kind.as_str(), amount, "stored deduction");

        Ok(updated)
    }
}
