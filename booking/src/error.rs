//! Error types for the booking wizard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors building a wizard
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// A wizard needs at least one step
    #[error("A wizard needs at least one step")]
    NoSteps,

    /// Step ids are `u32`
    #[error("Too many steps: {count}")]
    TooManySteps {
        /// Number of steps requested
        count: usize,
    },
}

/// A single rejected field or rule
///
/// Field names use the form naming (`firstName`, `recipientFirstName`, ...).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// A required field was left empty
    #[error("{field} is required")]
    Required {
        /// Form field name
        field: String,
    },

    /// Not an email address
    #[error("{field} must be a valid email address")]
    InvalidEmail {
        /// Form field name
        field: String,
    },

    /// Free text over its length limit
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Form field name
        field: String,
        /// Maximum length in characters
        max: usize,
    },

    /// A date that has not happened yet
    #[error("{field} cannot be in the future")]
    InFuture {
        /// Form field name
        field: String,
    },

    /// Malformed value
    #[error("{field} is invalid: {reason}")]
    Invalid {
        /// Form field name
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// Departure before arrival
    #[error("Departure date {to} is before arrival date {from}")]
    DateRangeReversed {
        /// Arrival date
        from: NaiveDate,
        /// Departure date
        to: NaiveDate,
    },

    /// More people than one booking takes
    #[error("A party of {requested} exceeds the limit of {capacity} per booking")]
    PartyOverCapacity {
        /// Adults plus children requested
        requested: u32,
        /// Configured limit
        capacity: u32,
    },

    /// Card expiry month already over
    #[error("Card has expired")]
    CardExpired,

    /// A form submitted while a different step is active
    #[error("The {form} form belongs to another step (active step: {active})")]
    OutOfStep {
        /// Step that owns the form
        form: String,
        /// Name of the active step, or `none` past the last step
        active: String,
    },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`]
    #[must_use]
    pub fn required(field: impl Into<String>) -> Self {
        Self::Required {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::Invalid`]
    #[must_use]
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The form field this error belongs to, if any
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Required { field }
            | Self::InvalidEmail { field }
            | Self::TooLong { field, .. }
            | Self::InFuture { field }
            | Self::Invalid { field, .. } => Some(field),
            Self::DateRangeReversed { .. } => Some("dateTo"),
            Self::PartyOverCapacity { .. } => Some("party"),
            Self::CardExpired => Some("expiryYear"),
            Self::OutOfStep { .. } => None,
        }
    }
}

/// Every error found while validating one form
///
/// Validation collects all problems instead of stopping at the first, so a
/// form can flag every field at once.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// No errors yet
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record an error
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Record `error` when `failed` holds
    pub fn check(&mut self, failed: bool, error: impl FnOnce() -> ValidationError) {
        if failed {
            self.0.push(error());
        }
    }

    /// Take over every error from `other`
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// True when nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of errors
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the errors in the order found
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// True if some error is attached to `field`
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == Some(field))
    }

    /// `Ok(())` when empty, otherwise `Err(self)`
    ///
    /// # Errors
    ///
    /// Returns `self` if any error was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_errors() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::required("firstName"));
        errors.push(ValidationError::TooLong {
            field: "allergyDetails".to_string(),
            max: 100,
        });

        assert_eq!(
            errors.to_string(),
            "firstName is required; allergyDetails must be at most 100 characters"
        );
        assert!(errors.has_field("allergyDetails"));
        assert!(!errors.has_field("email"));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(), Ok(()));

        let mut errors = ValidationErrors::new();
        errors.check(true, || ValidationError::CardExpired);
        errors.check(false, || ValidationError::required("cvv"));
        assert_eq!(errors.len(), 1);
        assert!(errors.into_result().is_err());
    }
}
