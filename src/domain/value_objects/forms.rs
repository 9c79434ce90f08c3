use std::collections::HashMap;

use serde::Serialize;

/// Validation failures keyed by form field name. Each field carries every
/// message that applies, in the order the rules were checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldErrors {
    errors: HashMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    pub fn into_inner(self) -> HashMap<String, Vec<String>> {
        self.errors
    }
}

/// Result state handed back to the form renderer: per-field errors and a
/// summary message, both absent on the success path (success navigates away
/// instead of returning a payload).
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormState {
    pub fn rejected(errors: FieldErrors, message: &str) -> Self {
        Self {
            errors: Some(errors.into_inner()),
            message: Some(message.to_string()),
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            errors: None,
            message: Some(message.to_string()),
        }
    }
}
