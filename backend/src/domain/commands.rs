//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod entries {
    use rust_decimal::Decimal;
    use serde_json::Value;

    use crate::domain::models::milk_entry::EntryType;

    /// Raw input for recording a new entry.
    ///
    /// There is deliberately no id, snf or amount here: those are assigned by
    /// the service.
    #[derive(Debug, Clone, Default)]
    pub struct CreateMilkEntryCommand {
        pub date: Option<String>,
        pub party_id: Option<String>,
        pub entry_type: Option<String>,
        pub quantity: Option<Value>,
        pub fat: Option<Value>,
        pub clr: Option<Value>,
        pub rate: Option<Value>,
        pub status: Option<String>,
    }

    /// Query for listing entries; `None` lists every type.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct EntryListQuery {
        pub entry_type: Option<EntryType>,
    }

    /// Input for previewing the derived values of a sample.
    #[derive(Debug, Clone, Default)]
    pub struct QuoteCommand {
        pub entry_type: Option<String>,
        pub fat: Option<Value>,
        pub clr: Option<Value>,
        pub quantity: Option<Value>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct QuoteResult {
        pub entry_type: EntryType,
        pub snf: Decimal,
        pub rate: Decimal,
        pub amount: Option<Decimal>,
    }
}

pub mod reports {
    use rust_decimal::Decimal;

    use crate::domain::models::milk_entry::EntryType;

    #[derive(Debug, Clone, PartialEq)]
    pub struct EntrySummary {
        pub total_purchase_amount: Decimal,
        pub total_sale_amount: Decimal,
        pub total_purchase_quantity: Decimal,
        pub profit: Decimal,
        pub entry_count: usize,
    }

    /// Query for the billing report; `None` aggregates both directions.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BillingQuery {
        pub entry_type: Option<EntryType>,
    }

    /// Purchase and sale amounts for one calendar month (`YYYY-MM`)
    #[derive(Debug, Clone, PartialEq)]
    pub struct MonthlyTotalRow {
        pub month: String,
        pub purchase_amount: Decimal,
        pub sale_amount: Decimal,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct PartyBillingRow {
        pub party_id: String,
        pub quantity: Decimal,
        pub amount: Decimal,
        pub count: usize,
    }
}
