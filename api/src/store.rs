use std::str::FromStr;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use crate::model::{Category, EventRecord, NewEvent};

pub const TABLE: &str = "FoodWaste";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("An event was already recorded at epoch {0}")]
    DuplicateEpoch(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// The `FoodWaste` table.
#[derive(Clone)]
pub struct EventStore {
    pool: SqlitePool,
}

impl EventStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database at `url`, creating the file if needed.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        Ok(Self::new(pool))
    }

    pub async fn table_exists(&self, name: &str) -> Result<bool> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    /// Create the table unless it is already there. Returns true when it was created.
    pub async fn ensure_schema(&self) -> Result<bool> {
        if self.table_exists(TABLE).await? {
            return Ok(false);
        }

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS "FoodWaste" (
                "Epoch" INTEGER NOT NULL UNIQUE,
                "GuestNo" INTEGER NOT NULL,
                "ServingsNo" INTEGER NOT NULL,
                "PricingRank" TEXT NOT NULL,
                "PrepMethodRank" TEXT NOT NULL,
                "CustomerRank" TEXT NOT NULL,
                "ServingsWasted" REAL,
                "DateTime" TEXT NOT NULL,
                PRIMARY KEY ("Epoch")
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!(table = TABLE, "created table");
        Ok(true)
    }

    pub async fn insert(&self, event: &NewEvent) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO "FoodWaste" (Epoch, GuestNo, ServingsNo, PricingRank, PrepMethodRank, CustomerRank, ServingsWasted, DateTime)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(event.epoch)
        .bind(event.guest_no)
        .bind(event.servings_no)
        .bind(event.pricing.label())
        .bind(event.prep_method.label())
        .bind(event.customer.label())
        .bind(event.servings_wasted)
        .bind(&event.date_time)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::DuplicateEpoch(event.epoch))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Every row in storage order. No ordering is promised.
    pub async fn list_all(&self) -> Result<Vec<EventRecord>> {
        let records = sqlx::query_as::<_, EventRecord>(r#"SELECT * FROM "FoodWaste""#)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(r#"SELECT count(*) FROM "FoodWaste""#)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
