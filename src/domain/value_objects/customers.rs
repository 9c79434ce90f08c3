use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::customers::{
    CustomerEntity, InsertCustomerEntity, UpdateCustomerEntity,
};
use crate::domain::value_objects::forms::FieldErrors;

/// Fallback avatar when the form does not supply a photo; no upload handling
/// exists, the column is an opaque URL.
pub const DEFAULT_CUSTOMER_IMAGE_URL: &str = "https://i.pravatar.cc/300";

pub const NAME_REQUIRED: &str = "Please enter the customer's name.";
pub const EMAIL_INVALID: &str = "Please enter a valid email.";

/// Raw customer form submission. Absent and empty fields are equivalent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerFormModel {
    pub name: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCustomerModel {
    pub name: String,
    pub email: String,
    pub image_url: String,
}

impl CustomerFormModel {
    pub fn validate(self) -> Result<ValidatedCustomerModel, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.unwrap_or_default().trim().to_string();
        if name.is_empty() {
            errors.push("name", NAME_REQUIRED);
        }

        let email = self.email.unwrap_or_default().trim().to_string();
        if !is_valid_email(&email) {
            errors.push("email", EMAIL_INVALID);
        }

        let image_url = match self.image_url {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => DEFAULT_CUSTOMER_IMAGE_URL.to_string(),
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidatedCustomerModel {
            name,
            email,
            image_url,
        })
    }
}

// Shape check only: non-empty local part and a dotted domain segment.
// Deliverability is not this layer's problem.
fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.split_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

impl From<ValidatedCustomerModel> for InsertCustomerEntity {
    fn from(value: ValidatedCustomerModel) -> Self {
        Self {
            name: value.name,
            email: value.email,
            image_url: value.image_url,
        }
    }
}

impl From<ValidatedCustomerModel> for UpdateCustomerEntity {
    fn from(value: ValidatedCustomerModel) -> Self {
        Self {
            name: value.name,
            email: value.email,
            image_url: value.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

impl From<CustomerEntity> for CustomerDto {
    fn from(value: CustomerEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            image_url: value.image_url,
        }
    }
}

/// Minimal projection for the invoice form's customer dropdown.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CustomerFieldDto {
    pub id: Uuid,
    pub name: String,
}

impl From<CustomerEntity> for CustomerFieldDto {
    fn from(value: CustomerEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerListPageDto {
    pub customers: Vec<CustomerDto>,
    pub total_pages: i64,
}
