use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A recorded milk purchase or sale as seen by clients.
///
/// `snf` and `amount` are always computed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilkEntry {
    /// UUID assigned by the server at creation
    pub id: String,
    /// Calendar date of the transaction (ISO-8601, `YYYY-MM-DD`)
    pub date: String,
    /// Opaque counterparty reference
    pub party_id: String,
    #[serde(rename = "type")]
    pub entry_type: TransactionType,
    /// Litres
    pub quantity: f64,
    /// Fat percentage
    pub fat: f64,
    /// Corrected lactometer reading
    pub clr: f64,
    /// Solids-not-fat percentage (derived)
    pub snf: f64,
    /// Price per litre
    pub rate: f64,
    /// quantity * rate, rounded to two places (derived)
    pub amount: f64,
    pub status: String,
}

/// Direction of a milk transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Milk bought from a contractor
    Purchase,
    /// Milk sold to a client
    Sale,
}

/// Body of `POST /api/milk/entries`.
///
/// Every field is optional and the measurements are loosely typed so that
/// missing or non-numeric input reaches the domain layer and is rejected there
/// with a validation error. Any `id`, `snf` or `amount` sent by the client is
/// dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMilkEntryRequest {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub party_id: Option<String>,
    #[serde(default, rename = "type")]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub fat: Option<Value>,
    #[serde(default)]
    pub clr: Option<Value>,
    #[serde(default)]
    pub rate: Option<Value>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of `POST /api/milk/quote`: preview the derived values for a sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(default, rename = "type")]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub fat: Option<Value>,
    #[serde(default)]
    pub clr: Option<Value>,
    /// When present the response also carries the total amount
    #[serde(default)]
    pub quantity: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(rename = "type")]
    pub entry_type: TransactionType,
    pub snf: f64,
    /// Suggested price per litre from the configured fat/SNF prices
    pub rate: f64,
    pub amount: Option<f64>,
}

/// Dashboard totals over every stored entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummaryResponse {
    pub total_purchase_amount: f64,
    pub total_sale_amount: f64,
    pub total_purchase_quantity: f64,
    /// Sales minus purchases
    pub profit: f64,
    pub entry_count: usize,
}

/// Purchase and sale amounts for one month of the dashboard chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    /// `YYYY-MM`
    pub month: String,
    pub purchase_amount: f64,
    pub sale_amount: f64,
}

/// One row of the billing report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyBilling {
    pub party_id: String,
    pub quantity: f64,
    pub amount: f64,
    pub count: usize,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
