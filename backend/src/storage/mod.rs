//! # Storage Module
//!
//! Handles persistence of milk entries behind the [`MilkEntryStorage`] trait.
//! The domain layer only ever sees `Arc<dyn MilkEntryStorage>`, so backends
//! can be swapped through configuration without touching business rules.
//!
//! ## Backends
//!
//! - **memory**: process-local, used by tests and throwaway runs
//! - **csv**: a single CSV file in the data directory
//! - **sqlite**: SQLx pool over a database file (default)

pub mod csv;
pub mod memory;
pub mod sqlite;
pub mod traits;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::StorageConfig;

pub use self::csv::{CsvConnection, CsvEntryRepository};
pub use memory::MemoryEntryStore;
pub use sqlite::{DbConnection, SqliteEntryRepository};
pub use traits::MilkEntryStorage;

/// Open the backend selected by configuration
pub async fn open_storage(config: &StorageConfig) -> Result<Arc<dyn MilkEntryStorage>> {
    match config {
        StorageConfig::Memory => {
            info!("Using in-memory storage; entries will not survive a restart");
            Ok(Arc::new(MemoryEntryStore::new()))
        }
        StorageConfig::Csv { data_dir } => {
            let connection = CsvConnection::new(data_dir)?;
            info!("Using CSV storage in {}", connection.base_directory().display());
            Ok(Arc::new(CsvEntryRepository::new(connection)))
        }
        StorageConfig::Sqlite {
            database_url,
            data_dir,
        } => {
            let db = match database_url {
                Some(url) => {
                    info!("Using SQLite storage at {}", url);
                    DbConnection::new(url).await?
                }
                None => {
                    std::fs::create_dir_all(data_dir)?;
                    let path = StorageConfig::sqlite_file(data_dir);
                    info!("Using SQLite storage at {}", path.display());
                    DbConnection::open_file(&path).await?
                }
            };
            Ok(Arc::new(SqliteEntryRepository::new(db)))
        }
    }
}
