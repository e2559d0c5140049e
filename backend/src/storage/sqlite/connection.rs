use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

const MAX_CONNECTIONS: u32 = 5;

/// DbConnection manages the SQLite pool and schema
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Connect to a database URL such as `sqlite://data/ledger.db`,
    /// creating the file if it does not exist
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        Self::connect(options).await
    }

    /// Open (or create) a database file on disk
    pub async fn open_file(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect(options).await
    }

    async fn connect(options: SqliteConnectOptions) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        Self::setup_schema(&pool).await?;
        info!("SQLite schema ready");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // seq records insertion order for the date tie-break
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS milk_entries (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                date TEXT NOT NULL,
                party_id TEXT NOT NULL,
                entry_type TEXT NOT NULL CHECK (entry_type IN ('PURCHASE', 'SALE')),
                quantity TEXT NOT NULL,
                fat TEXT NOT NULL,
                clr TEXT NOT NULL,
                snf TEXT NOT NULL,
                rate TEXT NOT NULL,
                amount TEXT NOT NULL,
                status TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_milk_entries_date
            ON milk_entries(date DESC, seq DESC);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
