use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use shared::{
    CreateMilkEntryRequest, EntrySummaryResponse, MilkEntry as SharedMilkEntry, MonthlyTotals,
    PartyBilling, QuoteRequest, QuoteResponse, TransactionType as SharedTransactionType,
};

use crate::domain::{
    commands::{
        entries::{CreateMilkEntryCommand, QuoteCommand, QuoteResult},
        reports::{EntrySummary, MonthlyTotalRow, PartyBillingRow},
    },
    models::milk_entry::{EntryType as DomainEntryType, MilkEntry as DomainMilkEntry},
};

pub struct MilkEntryMapper;

impl MilkEntryMapper {
    pub fn to_dto(domain: DomainMilkEntry) -> SharedMilkEntry {
        SharedMilkEntry {
            id: domain.id,
            date: domain.date.format("%Y-%m-%d").to_string(),
            party_id: domain.party_id,
            entry_type: Self::to_dto_type(domain.entry_type),
            quantity: to_f64(domain.quantity),
            fat: to_f64(domain.fat),
            clr: to_f64(domain.clr),
            snf: to_f64(domain.snf),
            rate: to_f64(domain.rate),
            amount: to_f64(domain.amount),
            status: domain.status,
        }
    }

    pub fn to_create_command(request: CreateMilkEntryRequest) -> CreateMilkEntryCommand {
        CreateMilkEntryCommand {
            date: request.date,
            party_id: request.party_id,
            entry_type: request.entry_type,
            quantity: request.quantity,
            fat: request.fat,
            clr: request.clr,
            rate: request.rate,
            status: request.status,
        }
    }

    pub fn to_quote_command(request: QuoteRequest) -> QuoteCommand {
        QuoteCommand {
            entry_type: request.entry_type,
            fat: request.fat,
            clr: request.clr,
            quantity: request.quantity,
        }
    }

    pub fn to_quote_dto(result: QuoteResult) -> QuoteResponse {
        QuoteResponse {
            entry_type: Self::to_dto_type(result.entry_type),
            snf: to_f64(result.snf),
            rate: to_f64(result.rate),
            amount: result.amount.map(to_f64),
        }
    }

    pub fn to_summary_dto(summary: EntrySummary) -> EntrySummaryResponse {
        EntrySummaryResponse {
            total_purchase_amount: to_f64(summary.total_purchase_amount),
            total_sale_amount: to_f64(summary.total_sale_amount),
            total_purchase_quantity: to_f64(summary.total_purchase_quantity),
            profit: to_f64(summary.profit),
            entry_count: summary.entry_count,
        }
    }

    pub fn to_monthly_dto(row: MonthlyTotalRow) -> MonthlyTotals {
        MonthlyTotals {
            month: row.month,
            purchase_amount: to_f64(row.purchase_amount),
            sale_amount: to_f64(row.sale_amount),
        }
    }

    pub fn to_billing_dto(row: PartyBillingRow) -> PartyBilling {
        PartyBilling {
            party_id: row.party_id,
            quantity: to_f64(row.quantity),
            amount: to_f64(row.amount),
            count: row.count,
        }
    }

    fn to_dto_type(domain_type: DomainEntryType) -> SharedTransactionType {
        match domain_type {
            DomainEntryType::Purchase => SharedTransactionType::Purchase,
            DomainEntryType::Sale => SharedTransactionType::Sale,
        }
    }
}

fn to_f64(value: Decimal) -> f64 {
    // every Decimal fits in an f64
    value.to_f64().unwrap_or_default()
}
