//! CSV export of the entry ledger for spreadsheets and accountants.
use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::{
    commands::entries::EntryListQuery, entry_service::EntryService, errors::EntryResult,
};

const HEADERS: [&str; 8] = ["Date", "Party", "Type", "Quantity", "Fat", "SNF", "Rate", "Amount"];

/// A rendered CSV document and the file name it should be saved under
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    pub entry_count: usize,
}

#[derive(Clone)]
pub struct ExportService {
    entry_service: EntryService,
}

impl ExportService {
    pub fn new(entry_service: EntryService) -> Self {
        Self { entry_service }
    }

    /// Render the entries matching `query` as CSV, in list order.
    ///
    /// `today` only names the file.
    pub async fn export_entries_csv(
        &self,
        query: EntryListQuery,
        today: NaiveDate,
    ) -> EntryResult<CsvExport> {
        let entries = self.entry_service.query_entries(query).await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(HEADERS)
            .context("failed to write CSV header")?;

        for entry in &entries {
            writer
                .write_record([
                    entry.date.format("%Y-%m-%d").to_string(),
                    entry.party_id.clone(),
                    entry.entry_type.as_str().to_string(),
                    plain(entry.quantity),
                    plain(entry.fat),
                    plain(entry.snf),
                    plain(entry.rate),
                    plain(entry.amount),
                ])
                .with_context(|| format!("failed to write entry {}", entry.id))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow!("failed to finish CSV export: {}", e.error()))?;
        let content = String::from_utf8(bytes).context("CSV export is not valid UTF-8")?;

        let export = CsvExport {
            filename: format!("dairy_report_{}.csv", today.format("%Y-%m-%d")),
            content,
            entry_count: entries.len(),
        };
        info!("Exported {} entries as {}", export.entry_count, export.filename);

        Ok(export)
    }
}

/// Trailing zeros dropped, as a spreadsheet would show the value
fn plain(value: Decimal) -> String {
    value.normalize().to_string()
}
