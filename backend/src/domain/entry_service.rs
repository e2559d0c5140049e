//! Milk entry service: validation, derivation and persistence of entries.
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    config::PricingConfig,
    domain::{
        calculation::{calculate_milk_rate, calculate_snf, calculate_total_amount},
        commands::entries::{
            CreateMilkEntryCommand, EntryListQuery, QuoteCommand, QuoteResult,
        },
        errors::{EntryError, EntryResult},
        models::milk_entry::{MilkEntry, DEFAULT_STATUS},
        validation::{
            ensure_fat, ensure_non_negative, ensure_quantity, parse_date, parse_entry_type,
            parse_measurement, required_text,
        },
    },
    storage::MilkEntryStorage,
};

#[derive(Clone)]
pub struct EntryService {
    storage: Arc<dyn MilkEntryStorage>,
    pricing: PricingConfig,
}

impl EntryService {
    pub fn new(storage: Arc<dyn MilkEntryStorage>) -> Self {
        Self::with_pricing(storage, PricingConfig::default())
    }

    pub fn with_pricing(storage: Arc<dyn MilkEntryStorage>, pricing: PricingConfig) -> Self {
        Self { storage, pricing }
    }

    /// Validate the input, derive `snf` and `amount`, assign an id and persist.
    ///
    /// Nothing reaches the store unless every check passes; the returned
    /// entry is exactly what was stored.
    pub async fn create_entry(&self, command: CreateMilkEntryCommand) -> EntryResult<MilkEntry> {
        let quantity = parse_measurement("quantity", command.quantity.as_ref())?;
        let fat = parse_measurement("fat", command.fat.as_ref())?;
        let clr = parse_measurement("clr", command.clr.as_ref())?;
        let rate = parse_measurement("rate", command.rate.as_ref())?;

        let date = parse_date(command.date.as_deref())?;
        let party_id = required_text("partyId", command.party_id.as_deref())?.to_string();
        let entry_type = parse_entry_type(command.entry_type.as_deref())?;

        ensure_quantity(quantity)?;
        ensure_fat(fat)?;
        ensure_non_negative("clr", clr)?;
        ensure_non_negative("rate", rate)?;

        let snf = calculate_snf(clr, fat)?;
        let amount = calculate_total_amount(quantity, rate)?;

        let status = command
            .status
            .as_deref()
            .map(str::trim)
            .filter(|status| !status.is_empty())
            .unwrap_or(DEFAULT_STATUS)
            .to_string();

        let entry = MilkEntry {
            id: MilkEntry::generate_id(),
            date,
            party_id,
            entry_type,
            quantity,
            fat,
            clr,
            snf,
            rate,
            amount,
            status,
        };

        self.storage.store_entry(&entry).await?;
        info!(
            "Created {} entry {} for party {}: snf={} amount={}",
            entry.entry_type, entry.id, entry.party_id, entry.snf, entry.amount
        );

        Ok(entry)
    }

    /// All entries, most recent date first
    pub async fn list_entries(&self) -> EntryResult<Vec<MilkEntry>> {
        Ok(self.storage.list_entries().await?)
    }

    /// Entries matching the query, in the same order as [`Self::list_entries`]
    pub async fn query_entries(&self, query: EntryListQuery) -> EntryResult<Vec<MilkEntry>> {
        let entries = self.list_entries().await?;
        Ok(match query.entry_type {
            Some(entry_type) => entries
                .into_iter()
                .filter(|entry| entry.entry_type == entry_type)
                .collect(),
            None => entries,
        })
    }

    /// Remove an entry. Unknown ids fail with [`EntryError::NotFound`] every time.
    pub async fn delete_entry(&self, entry_id: &str) -> EntryResult<()> {
        if self.storage.delete_entry(entry_id).await? {
            info!("Deleted entry {}", entry_id);
            Ok(())
        } else {
            warn!("Delete requested for unknown entry {}", entry_id);
            Err(EntryError::NotFound(entry_id.to_string()))
        }
    }

    /// Preview snf, suggested rate and amount for a sample without storing anything
    pub fn quote(&self, command: QuoteCommand) -> EntryResult<QuoteResult> {
        let entry_type = parse_entry_type(command.entry_type.as_deref())?;
        let fat = parse_measurement("fat", command.fat.as_ref())?;
        let clr = parse_measurement("clr", command.clr.as_ref())?;
        ensure_fat(fat)?;
        ensure_non_negative("clr", clr)?;

        let snf = calculate_snf(clr, fat)?;
        let (fat_price, snf_price) = self.pricing.prices_for(entry_type);
        let rate = calculate_milk_rate(fat, snf, fat_price, snf_price)?;

        let amount = match command.quantity.as_ref() {
            Some(value) if !value.is_null() => {
                let quantity = parse_measurement("quantity", Some(value))?;
                ensure_quantity(quantity)?;
                Some(calculate_total_amount(quantity, rate)?)
            }
            _ => None,
        };

        Ok(QuoteResult {
            entry_type,
            snf,
            rate,
            amount,
        })
    }
}
