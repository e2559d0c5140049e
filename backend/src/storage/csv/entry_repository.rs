use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{Reader, StringRecord, Writer};
use rust_decimal::Decimal;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::connection::CsvConnection;
use crate::{
    domain::models::milk_entry::{EntryType, MilkEntry},
    storage::{memory::sort_newest_first, traits::MilkEntryStorage},
};

const HEADER: [&str; 11] = [
    "id", "date", "party_id", "type", "quantity", "fat", "clr", "snf", "rate", "amount", "status",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV-based milk entry repository.
///
/// All entries live in a single file kept in insertion order. Every mutation
/// rewrites the file through a temporary sibling and an atomic rename.
#[derive(Clone)]
pub struct CsvEntryRepository {
    connection: CsvConnection,
    // serialises read-modify-write cycles
    lock: Arc<Mutex<()>>,
}

impl CsvEntryRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            connection,
            lock: Arc::new(Mutex::new(())),
        }
    }

    fn read_entries(&self) -> Result<Vec<MilkEntry>> {
        let file_path = self.connection.entries_file_path();
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut entries = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            let record = result?;
            let entry = parse_record(&record)
                .with_context(|| format!("malformed row {} in {}", index + 1, file_path.display()))?;
            entries.push(entry);
        }

        debug!("Read {} entries from {}", entries.len(), file_path.display());
        Ok(entries)
    }

    fn write_entries(&self, entries: &[MilkEntry]) -> Result<()> {
        let file_path = self.connection.entries_file_path();
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let mut csv_writer = Writer::from_writer(BufWriter::new(file));
            csv_writer.write_record(HEADER)?;

            for entry in entries {
                csv_writer.write_record([
                    entry.id.clone(),
                    entry.date.format(DATE_FORMAT).to_string(),
                    entry.party_id.clone(),
                    entry.entry_type.as_str().to_string(),
                    entry.quantity.to_string(),
                    entry.fat.to_string(),
                    entry.clr.to_string(),
                    entry.snf.to_string(),
                    entry.rate.to_string(),
                    entry.amount.to_string(),
                    entry.status.clone(),
                ])?;
            }

            csv_writer.flush()?;
        }

        fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

#[async_trait]
impl MilkEntryStorage for CsvEntryRepository {
    async fn store_entry(&self, entry: &MilkEntry) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries()?;

        if entries.iter().any(|existing| existing.id == entry.id) {
            bail!("entry with id '{}' already exists", entry.id);
        }

        entries.push(entry.clone());
        self.write_entries(&entries)?;
        info!("Stored entry {} in CSV", entry.id);
        Ok(())
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries()?;
        let before = entries.len();
        entries.retain(|entry| entry.id != entry_id);

        if entries.len() == before {
            return Ok(false);
        }

        self.write_entries(&entries)?;
        info!("Deleted entry {} from CSV", entry_id);
        Ok(true)
    }

    async fn list_entries(&self) -> Result<Vec<MilkEntry>> {
        let _guard = self.lock.lock().await;
        Ok(sort_newest_first(self.read_entries()?))
    }
}

fn parse_record(record: &StringRecord) -> Result<MilkEntry> {
    Ok(MilkEntry {
        id: field(record, 0)?.to_string(),
        date: NaiveDate::parse_from_str(field(record, 1)?, DATE_FORMAT)?,
        party_id: field(record, 2)?.to_string(),
        entry_type: EntryType::from_str(field(record, 3)?).map_err(|e| anyhow!(e))?,
        quantity: decimal_field(record, 4)?,
        fat: decimal_field(record, 5)?,
        clr: decimal_field(record, 6)?,
        snf: decimal_field(record, 7)?,
        rate: decimal_field(record, 8)?,
        amount: decimal_field(record, 9)?,
        status: field(record, 10)?.to_string(),
    })
}

fn field(record: &StringRecord, index: usize) -> Result<&str> {
    record
        .get(index)
        .ok_or_else(|| anyhow!("missing column '{}'", HEADER[index]))
}

fn decimal_field(record: &StringRecord, index: usize) -> Result<Decimal> {
    let text = field(record, index)?;
    Decimal::from_str(text)
        .with_context(|| format!("column '{}' holds non-decimal '{}'", HEADER[index], text))
}
