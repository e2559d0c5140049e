//! # Storage Traits
//!
//! This module defines the storage abstraction that lets the in-memory, CSV
//! and SQLite backends be used interchangeably by the domain layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::milk_entry::MilkEntry;

/// Trait defining the interface for milk entry storage operations
///
/// Every call is atomic on its own: a concurrent reader never observes a
/// half-written entry. No cross-entry transactions are offered.
#[async_trait]
pub trait MilkEntryStorage: Send + Sync {
    /// Store a new entry keyed by its id.
    /// Fails if an entry with the same id already exists.
    async fn store_entry(&self, entry: &MilkEntry) -> Result<()>;

    /// Delete a single entry.
    /// Returns true if the entry was found and deleted, false otherwise
    async fn delete_entry(&self, entry_id: &str) -> Result<bool>;

    /// List every entry ordered by date descending (most recent first).
    /// Entries sharing a date come newest-created first.
    async fn list_entries(&self) -> Result<Vec<MilkEntry>>;
}
