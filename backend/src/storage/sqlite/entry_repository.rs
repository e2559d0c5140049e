use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;

use super::connection::DbConnection;
use crate::{
    domain::models::milk_entry::{EntryType, MilkEntry},
    storage::traits::MilkEntryStorage,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Repository for milk entry operations backed by SQLite.
///
/// Decimals are stored as TEXT so values come back with the exact digits
/// (and scale) they were written with.
#[derive(Clone)]
pub struct SqliteEntryRepository {
    db: DbConnection,
}

impl SqliteEntryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MilkEntryStorage for SqliteEntryRepository {
    async fn store_entry(&self, entry: &MilkEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO milk_entries
                (id, date, party_id, entry_type, quantity, fat, clr, snf, rate, amount, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(entry.date.format(DATE_FORMAT).to_string())
        .bind(&entry.party_id)
        .bind(entry.entry_type.as_str())
        .bind(entry.quantity.to_string())
        .bind(entry.fat.to_string())
        .bind(entry.clr.to_string())
        .bind(entry.snf.to_string())
        .bind(entry.rate.to_string())
        .bind(entry.amount.to_string())
        .bind(&entry.status)
        .execute(self.db.pool())
        .await
        .with_context(|| format!("failed to insert entry '{}'", entry.id))?;
        Ok(())
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM milk_entries WHERE id = ?")
            .bind(entry_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_entries(&self) -> Result<Vec<MilkEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, party_id, entry_type, quantity, fat, clr, snf, rate, amount, status
            FROM milk_entries
            ORDER BY date DESC, seq DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(row_to_entry).collect()
    }
}

fn row_to_entry(row: &SqliteRow) -> Result<MilkEntry> {
    let date: String = row.try_get("date")?;
    let entry_type: String = row.try_get("entry_type")?;

    Ok(MilkEntry {
        id: row.try_get("id")?,
        date: NaiveDate::parse_from_str(&date, DATE_FORMAT)?,
        party_id: row.try_get("party_id")?,
        entry_type: EntryType::from_str(&entry_type).map_err(|e| anyhow!(e))?,
        quantity: decimal_column(row, "quantity")?,
        fat: decimal_column(row, "fat")?,
        clr: decimal_column(row, "clr")?,
        snf: decimal_column(row, "snf")?,
        rate: decimal_column(row, "rate")?,
        amount: decimal_column(row, "amount")?,
        status: row.try_get("status")?,
    })
}

fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal> {
    let text: String = row.try_get(column)?;
    Decimal::from_str(&text)
        .with_context(|| format!("column '{}' holds non-decimal '{}'", column, text))
}
