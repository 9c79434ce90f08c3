use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::invoices::{
    InsertInvoiceEntity, InvoiceEntity, UpdateInvoiceEntity,
};
use crate::domain::value_objects::enums::invoice_statuses::InvoiceStatus;
use crate::domain::value_objects::forms::FieldErrors;

pub const CUSTOMER_REQUIRED: &str = "Please select a customer.";
pub const AMOUNT_INVALID: &str = "Please enter an amount greater than $0.";
pub const STATUS_REQUIRED: &str = "Please select an invoice status.";

/// Raw invoice form submission, everything still stringly typed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceFormModel {
    pub customer_id: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
}

/// Coerced form output: amount already in integer cents, status narrowed to
/// the two permitted values.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInvoiceModel {
    pub customer_id: Uuid,
    pub amount_cents: i32,
    pub status: InvoiceStatus,
}

impl InvoiceFormModel {
    pub fn validate(self) -> Result<ValidatedInvoiceModel, FieldErrors> {
        let mut errors = FieldErrors::new();

        let customer_id = match self.customer_id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => match Uuid::parse_str(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push("customer_id", CUSTOMER_REQUIRED);
                    None
                }
            },
            _ => {
                errors.push("customer_id", CUSTOMER_REQUIRED);
                None
            }
        };

        let amount_cents = match parse_amount_cents(self.amount.as_deref()) {
            Some(cents) if cents > 0 => Some(cents),
            _ => {
                errors.push("amount", AMOUNT_INVALID);
                None
            }
        };

        let status = match self.status.as_deref().map(str::trim) {
            Some(raw) => InvoiceStatus::from_str(raw),
            None => None,
        };
        if status.is_none() {
            errors.push("status", STATUS_REQUIRED);
        }

        // All three are Some exactly when no error was recorded.
        match (customer_id, amount_cents, status) {
            (Some(customer_id), Some(amount_cents), Some(status)) if errors.is_empty() => {
                Ok(ValidatedInvoiceModel {
                    customer_id,
                    amount_cents,
                    status,
                })
            }
            _ => Err(errors),
        }
    }
}

// Decimal dollars in, integer cents out. Non-numeric input is a validation
// failure, never a silent zero.
fn parse_amount_cents(raw: Option<&str>) -> Option<i32> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let dollars: f64 = raw.parse().ok()?;
    if !dollars.is_finite() {
        return None;
    }
    let cents = (dollars * 100.0).round();
    if cents < i32::MIN as f64 || cents > i32::MAX as f64 {
        return None;
    }
    Some(cents as i32)
}

/// Integer cents to a display string, e.g. 1999 -> "$19.99".
pub fn format_currency(amount_cents: i64) -> String {
    let sign = if amount_cents < 0 { "-" } else { "" };
    let abs = amount_cents.unsigned_abs();
    format!("{}${}.{:02}", sign, abs / 100, abs % 100)
}

impl ValidatedInvoiceModel {
    pub fn into_insert_entity(self, date: NaiveDate) -> InsertInvoiceEntity {
        InsertInvoiceEntity {
            customer_id: self.customer_id,
            amount: self.amount_cents,
            status: self.status.to_string(),
            date,
        }
    }
}

impl From<ValidatedInvoiceModel> for UpdateInvoiceEntity {
    fn from(value: ValidatedInvoiceModel) -> Self {
        Self {
            customer_id: value.customer_id,
            amount: value.amount_cents,
            status: value.status.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvoiceDto {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: String,
    pub date: NaiveDate,
}

impl From<InvoiceEntity> for InvoiceDto {
    fn from(value: InvoiceEntity) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            amount: value.amount,
            status: value.status,
            date: value.date,
        }
    }
}

/// Invoice listing row joined against its customer for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceRowDto {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_image_url: String,
    pub amount: i32,
    pub status: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceListPageDto {
    pub invoices: Vec<InvoiceRowDto>,
    pub total_pages: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(customer_id: &str, amount: &str, status: &str) -> InvoiceFormModel {
        InvoiceFormModel {
            customer_id: Some(customer_id.to_string()),
            amount: Some(amount.to_string()),
            status: Some(status.to_string()),
        }
    }

    const CUSTOMER: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";

    #[test]
    fn coerces_decimal_amount_to_cents() {
        let validated = form(CUSTOMER, "19.99", "pending").validate().unwrap();
        assert_eq!(validated.amount_cents, 1999);
        assert_eq!(validated.status, InvoiceStatus::Pending);
    }

    #[test]
    fn whole_dollar_amounts_work_too() {
        let validated = form(CUSTOMER, "250", "paid").validate().unwrap();
        assert_eq!(validated.amount_cents, 25000);
        assert_eq!(validated.status, InvoiceStatus::Paid);
    }

    #[test]
    fn rejects_zero_and_negative_amounts() {
        for bad in ["0", "0.00", "-5", "-0.01"] {
            let errors = form(CUSTOMER, bad, "pending").validate().unwrap_err();
            assert_eq!(
                errors.field("amount"),
                Some(&[AMOUNT_INVALID.to_string()][..]),
                "amount {bad} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let errors = form(CUSTOMER, "nineteen", "pending").validate().unwrap_err();
        assert!(errors.field("amount").is_some());
    }

    #[test]
    fn rejects_unknown_status() {
        let errors = form(CUSTOMER, "19.99", "overdue").validate().unwrap_err();
        assert_eq!(
            errors.field("status"),
            Some(&[STATUS_REQUIRED.to_string()][..])
        );
    }

    #[test]
    fn rejects_missing_customer_reference() {
        let mut input = form("", "19.99", "pending");
        input.customer_id = None;
        let errors = input.validate().unwrap_err();
        assert_eq!(
            errors.field("customer_id"),
            Some(&[CUSTOMER_REQUIRED.to_string()][..])
        );
    }

    #[test]
    fn malformed_customer_uuid_reads_as_missing() {
        let errors = form("not-a-uuid", "19.99", "pending").validate().unwrap_err();
        assert!(errors.field("customer_id").is_some());
    }

    #[test]
    fn empty_form_reports_all_three_fields() {
        let errors = InvoiceFormModel::default().validate().unwrap_err();
        assert!(errors.field("customer_id").is_some());
        assert!(errors.field("amount").is_some());
        assert!(errors.field("status").is_some());
    }

    #[test]
    fn formats_cents_as_dollars() {
        assert_eq!(format_currency(1999), "$19.99");
        assert_eq!(format_currency(300), "$3.00");
        assert_eq!(format_currency(5), "$0.05");
        assert_eq!(format_currency(0), "$0.00");
    }

    #[test]
    fn amount_display_round_trips() {
        let validated = form(CUSTOMER, "19.99", "paid").validate().unwrap();
        assert_eq!(format_currency(validated.amount_cents as i64), "$19.99");
    }
}
