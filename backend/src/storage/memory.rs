use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{domain::models::milk_entry::MilkEntry, storage::traits::MilkEntryStorage};

/// Process-local store; contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryEntryStore {
    // insertion order is kept so ties on date can be broken by recency
    entries: Arc<RwLock<Vec<MilkEntry>>>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MilkEntryStorage for MemoryEntryStore {
    async fn store_entry(&self, entry: &MilkEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        if entries.iter().any(|existing| existing.id == entry.id) {
            bail!("entry with id '{}' already exists", entry.id);
        }
        entries.push(entry.clone());
        Ok(())
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<bool> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|entry| entry.id != entry_id);
        Ok(entries.len() < before)
    }

    async fn list_entries(&self) -> Result<Vec<MilkEntry>> {
        let entries = self.entries.read().await;
        Ok(sort_newest_first(entries.iter().cloned().collect()))
    }
}

/// Order entries held in insertion order by date descending, newest-created first on ties.
pub(crate) fn sort_newest_first(mut entries: Vec<MilkEntry>) -> Vec<MilkEntry> {
    entries.reverse();
    // stable sort keeps the reversed insertion order within a date
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}
