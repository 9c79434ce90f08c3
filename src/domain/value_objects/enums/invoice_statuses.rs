use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
}

impl Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        };
        write!(f, "{}", status)
    }
}

impl InvoiceStatus {
    // Unknown values are rejected at validation time, so no fallback here.
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(InvoiceStatus::Pending),
            "paid" => Some(InvoiceStatus::Paid),
            _ => None,
        }
    }
}
