use serde::Serialize;
use uuid::Uuid;

/// Per-customer aggregates derived from invoice rows on every read; nothing
/// here is persisted, so the numbers cannot drift from the invoice table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CustomerTotalsDto {
    pub customer_id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: i64,
    pub total_paid: i64,
}

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CardSummaryDto {
    pub customer_count: i64,
    pub invoice_count: i64,
    pub total_pending: i64,
    pub total_paid: i64,
}
