//! Field-level validation failures.
//!
//! Request DTOs derive [`validator::Validate`]; the resulting
//! [`ValidationErrors`] are flattened into [`FieldViolation`]s that the HTTP
//! layer returns in the `errors` array of a 400 response.

use serde::Serialize;
use validator::ValidationErrors;

use crate::error::CoreError;

/// One invalid request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Field name as it appears on the wire (camelCase).
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Flatten validator output into violations, sorted by field name.
pub fn violations_from(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = to_camel_case(&field.to_string());
            errs.iter().map(move |err| {
                let message = match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid ({})", err.code),
                };
                FieldViolation::new(field.clone(), message)
            })
        })
        .collect();

    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::InvalidInput(violations_from(&errors))
    }
}

/// `price_per_unit` -> `pricePerUnit`. Already camelCase names pass through.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
