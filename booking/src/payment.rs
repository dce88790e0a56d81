//! The payment form.
//!
//! Card details are validated for shape only. Nothing is charged, and the
//! session keeps just the cardholder name and the last four digits.

use crate::error::{ValidationError, ValidationErrors};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Where the card statement goes
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingAddress {
    /// The address given on the details step
    #[default]
    Current,
    /// Another address
    Different {
        /// Postcode
        postcode: String,
        /// First address line
        line1: String,
    },
}

/// Card details as typed in
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Name on the card
    pub cardholder_name: String,
    /// Card number, spaces allowed
    pub card_number: String,
    /// 1-12
    pub expiry_month: u32,
    /// Four-digit year
    pub expiry_year: i32,
    /// Security code
    pub cvv: String,
    /// Billing address
    pub billing: BillingAddress,
}

impl PaymentDetails {
    fn card_digits(&self) -> String {
        self.card_number.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Last four digits of the card number
    #[must_use]
    pub fn card_last_four(&self) -> String {
        let digits = self.card_digits();
        let skip = digits.chars().count().saturating_sub(4);
        digits.chars().skip(skip).collect()
    }

    /// Check the card fields on `today`
    ///
    /// A card stays valid through the last day of its expiry month.
    ///
    /// # Errors
    ///
    /// Returns every rule that failed.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check(self.cardholder_name.trim().is_empty(), || {
            ValidationError::required("cardholderName")
        });

        let digits = self.card_digits();
        if digits.is_empty() {
            errors.push(ValidationError::required("cardNumber"));
        } else if !digits.chars().all(|c| c.is_ascii_digit()) || !(12..=19).contains(&digits.len()) {
            errors.push(ValidationError::invalid("cardNumber", "must be 12 to 19 digits"));
        }

        let cvv = self.cvv.trim();
        if cvv.is_empty() {
            errors.push(ValidationError::required("cvv"));
        } else if !cvv.chars().all(|c| c.is_ascii_digit()) || !(3..=4).contains(&cvv.len()) {
            errors.push(ValidationError::invalid("cvv", "must be 3 or 4 digits"));
        }

        if (1..=12).contains(&self.expiry_month) {
            errors.check(
                (self.expiry_year, self.expiry_month) < (today.year(), today.month()),
                || ValidationError::CardExpired,
            );
        } else {
            errors.push(ValidationError::invalid("expiryMonth", "must be 1 to 12"));
        }

        if let BillingAddress::Different { postcode, line1 } = &self.billing {
            errors.check(postcode.trim().is_empty(), || {
                ValidationError::required("billingPostcode")
            });
            errors.check(line1.trim().is_empty(), || {
                ValidationError::required("billingAddressLine1")
            });
        }

        errors.into_result()
    }
}

/// What the session keeps of a payment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Name on the card
    pub cardholder_name: String,
    /// Last four digits
    pub card_last_four: String,
    /// Billing address
    pub billing: BillingAddress,
}

impl From<&PaymentDetails> for PaymentRecord {
    fn from(details: &PaymentDetails) -> Self {
        Self {
            cardholder_name: details.cardholder_name.trim().to_string(),
            card_last_four: details.card_last_four(),
            billing: details.billing.clone(),
        }
    }
}
