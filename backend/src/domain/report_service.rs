//! Read-only aggregation over stored entries for the dashboard and billing screens.
use chrono::Datelike;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    domain::{
        commands::reports::{BillingQuery, EntrySummary, MonthlyTotalRow, PartyBillingRow},
        errors::EntryResult,
        models::milk_entry::EntryType,
    },
    storage::MilkEntryStorage,
};

#[derive(Clone)]
pub struct ReportService {
    storage: Arc<dyn MilkEntryStorage>,
}

impl ReportService {
    pub fn new(storage: Arc<dyn MilkEntryStorage>) -> Self {
        Self { storage }
    }

    /// Purchase and sale totals plus the resulting profit
    pub async fn summary(&self) -> EntryResult<EntrySummary> {
        let entries = self.storage.list_entries().await?;

        let mut total_purchase_amount = Decimal::ZERO;
        let mut total_sale_amount = Decimal::ZERO;
        let mut total_purchase_quantity = Decimal::ZERO;

        for entry in &entries {
            match entry.entry_type {
                EntryType::Purchase => {
                    total_purchase_amount += entry.amount;
                    total_purchase_quantity += entry.quantity;
                }
                EntryType::Sale => total_sale_amount += entry.amount,
            }
        }

        Ok(EntrySummary {
            total_purchase_amount,
            total_sale_amount,
            total_purchase_quantity,
            profit: total_sale_amount - total_purchase_amount,
            entry_count: entries.len(),
        })
    }

    /// Purchase and sale amounts per month, oldest month first
    pub async fn monthly_totals(&self) -> EntryResult<Vec<MonthlyTotalRow>> {
        let entries = self.storage.list_entries().await?;
        let mut months: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();

        for entry in &entries {
            let totals = months
                .entry((entry.date.year(), entry.date.month()))
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            match entry.entry_type {
                EntryType::Purchase => totals.0 += entry.amount,
                EntryType::Sale => totals.1 += entry.amount,
            }
        }

        Ok(months
            .into_iter()
            .map(|((year, month), (purchase_amount, sale_amount))| MonthlyTotalRow {
                month: format!("{:04}-{:02}", year, month),
                purchase_amount,
                sale_amount,
            })
            .collect())
    }

    /// Quantity, amount and entry count per party, sorted by party id
    pub async fn billing(&self, query: BillingQuery) -> EntryResult<Vec<PartyBillingRow>> {
        let entries = self.storage.list_entries().await?;
        let mut rows: BTreeMap<String, PartyBillingRow> = BTreeMap::new();

        for entry in entries
            .into_iter()
            .filter(|entry| query.entry_type.map_or(true, |t| t == entry.entry_type))
        {
            let row = rows
                .entry(entry.party_id.clone())
                .or_insert_with(|| PartyBillingRow {
                    party_id: entry.party_id.clone(),
                    quantity: Decimal::ZERO,
                    amount: Decimal::ZERO,
                    count: 0,
                });
            row.quantity += entry.quantity;
            row.amount += entry.amount;
            row.count += 1;
        }

        Ok(rows.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::test_support::sample_entry;
    use crate::storage::MemoryEntryStore;

    async fn seeded_service() -> ReportService {
        let store = Arc::new(MemoryEntryStore::new());

        // each sample is 10 L at 35.00 => 350.00
        store.store_entry(&sample_entry("p1", (2024, 1, 1), "farm-b")).await.unwrap();
        store.store_entry(&sample_entry("p2", (2024, 1, 2), "farm-a")).await.unwrap();
        store.store_entry(&sample_entry("p3", (2024, 1, 3), "farm-b")).await.unwrap();

        let mut sale = sample_entry("s1", (2024, 1, 3), "hotel");
        sale.entry_type = EntryType::Sale;
        sale.quantity = Decimal::new(200, 1);
        sale.amount = Decimal::new(90000, 2);
        store.store_entry(&sale).await.unwrap();

        ReportService::new(store)
    }

    #[tokio::test]
    async fn test_summary_totals() {
        let service = seeded_service().await;
        let summary = service.summary().await.unwrap();

        assert_eq!(summary.total_purchase_amount, Decimal::new(105000, 2));
        assert_eq!(summary.total_sale_amount, Decimal::new(90000, 2));
        assert_eq!(summary.total_purchase_quantity, Decimal::from(30));
        assert_eq!(summary.profit, Decimal::new(-15000, 2));
        assert_eq!(summary.entry_count, 4);
    }

    #[tokio::test]
    async fn test_summary_of_empty_ledger() {
        let service = ReportService::new(Arc::new(MemoryEntryStore::new()));
        let summary = service.summary().await.unwrap();
        assert_eq!(summary.profit, Decimal::ZERO);
        assert_eq!(summary.entry_count, 0);
    }

    #[tokio::test]
    async fn test_monthly_totals_split_by_direction() {
        let service = seeded_service().await;
        let months = service.monthly_totals().await.unwrap();

        assert_eq!(
            months,
            vec![MonthlyTotalRow {
                month: "2024-01".to_string(),
                purchase_amount: Decimal::from(1050),
                sale_amount: Decimal::from(900),
            }]
        );
    }

    #[tokio::test]
    async fn test_monthly_totals_keep_years_apart_in_order() {
        let store = Arc::new(MemoryEntryStore::new());
        store.store_entry(&sample_entry("a", (2024, 3, 9), "p")).await.unwrap();
        store.store_entry(&sample_entry("b", (2023, 3, 1), "p")).await.unwrap();
        let mut sale = sample_entry("c", (2023, 11, 30), "p");
        sale.entry_type = EntryType::Sale;
        store.store_entry(&sale).await.unwrap();

        let months = ReportService::new(store).monthly_totals().await.unwrap();

        let keys: Vec<&str> = months.iter().map(|row| row.month.as_str()).collect();
        assert_eq!(keys, vec!["2023-03", "2023-11", "2024-03"]);
        assert_eq!(months[1].purchase_amount, Decimal::ZERO);
        assert_eq!(months[1].sale_amount, Decimal::from(350));
    }

    #[tokio::test]
    async fn test_monthly_totals_of_empty_ledger() {
        let service = ReportService::new(Arc::new(MemoryEntryStore::new()));
        assert!(service.monthly_totals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_billing_groups_by_party() {
        let service = seeded_service().await;
        let rows = service.billing(BillingQuery::default()).await.unwrap();

        let parties: Vec<&str> = rows.iter().map(|row| row.party_id.as_str()).collect();
        assert_eq!(parties, vec!["farm-a", "farm-b", "hotel"]);
        assert_eq!(rows[1].count, 2);
        assert_eq!(rows[1].quantity, Decimal::from(20));
        assert_eq!(rows[1].amount, Decimal::from(700));
    }

    #[tokio::test]
    async fn test_billing_filtered_by_type() {
        let service = seeded_service().await;
        let rows = service
            .billing(BillingQuery {
                entry_type: Some(EntryType::Sale),
            })
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].party_id, "hotel");
        assert_eq!(rows[0].amount, Decimal::from(900));
    }
}
