//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        // Report the first field message; the order of the map is not stable
        // so pick the lexically smallest field for deterministic output.
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .first()
            .and_then(|(field, errs)| {
                errs.first().map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .unwrap_or_else(|| "Validation failed".to_string());

        DomainError::Validation(message)
    }
}

/// Run `validator` rules and convert the outcome into a domain result.
pub fn validate<T: Validate>(value: &T) -> DomainResult<()> {
    value.validate().map_err(DomainError::from)
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
