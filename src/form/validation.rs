use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::field::{Field, FieldKind};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

// Optional leading '+', then at least 10 digits, spaces, hyphens or parens.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("valid phone regex"));

/// Why a single field failed validation. `Display` is the text shown next to the field.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("Enter a valid phone number")]
    InvalidPhone,
}

pub type ValidationResult = Result<(), ValidationError>;

/// Checks one value against its kind and required flag. First failing rule wins.
pub fn validate_field(value: &str, kind: FieldKind, required: bool) -> ValidationResult {
    let value = value.trim();

    if value.is_empty() {
        return if required {
            Err(ValidationError::Required)
        } else {
            Ok(())
        };
    }

    match kind {
        FieldKind::Email if !EMAIL_RE.is_match(value) => Err(ValidationError::InvalidEmail),
        FieldKind::Tel if !PHONE_RE.is_match(value) => Err(ValidationError::InvalidPhone),
        _ => Ok(()),
    }
}

/// Per-field outcome of validating a whole form, in field order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormReport {
    pub results: Vec<(String, ValidationResult)>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|(_, result)| result.is_ok())
    }

    pub fn errors(&self) -> Vec<(&str, ValidationError)> {
        self.results
            .iter()
            .filter_map(|(name, result)| match result {
                Err(e) => Some((name.as_str(), *e)),
                Ok(()) => None,
            })
            .collect()
    }
}

/// Validates every required field without stopping at the first failure,
/// so all errors can be shown at once. Optional fields are only checked on blur.
pub fn validate_form(fields: &[Field]) -> FormReport {
    FormReport {
        results: fields
            .iter()
            .filter(|field| field.required)
            .map(|field| {
                (
                    field.name.clone(),
                    validate_field(field.trimmed_value(), field.kind, field.required),
                )
            })
            .collect(),
    }
}
