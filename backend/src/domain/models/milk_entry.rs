//! Domain model for a single milk purchase or sale.
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Status given to entries created without one
pub const DEFAULT_STATUS: &str = "PENDING";

#[derive(Debug, Clone, PartialEq)]
pub struct MilkEntry {
    pub id: String,
    pub date: NaiveDate,
    pub party_id: String,
    pub entry_type: EntryType,
    pub quantity: Decimal,
    pub fat: Decimal,
    pub clr: Decimal,
    pub snf: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
    pub status: String,
}

impl MilkEntry {
    /// Generate a fresh entry id (random v4 UUID, no coordination needed)
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Purchase,
    Sale,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Purchase => "PURCHASE",
            EntryType::Sale => "SALE",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PURCHASE" => Ok(EntryType::Purchase),
            "SALE" => Ok(EntryType::Sale),
            other => Err(format!("unknown entry type '{}'", other)),
        }
    }
}
