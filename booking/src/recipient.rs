//! Personal details of the booker and of each service recipient.
//!
//! Both are filled in with the same form. The role decides the field names
//! (`firstName` or `recipientFirstName`) and which fields apply: only the
//! booker gives an occupation and their relationship to the recipient.

use crate::error::{ValidationError, ValidationErrors};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Longest accepted allergy description, in characters
pub const ALLERGY_DETAILS_MAX: usize = 100;

/// Whose details a form holds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipientRole {
    /// The person making the booking
    Booker,
    /// Someone receiving the service
    ServiceRecipient,
}

impl RecipientRole {
    /// Form field name for `base` under this role
    ///
    /// ```
    /// use booking_wizard::recipient::RecipientRole;
    ///
    /// assert_eq!(RecipientRole::Booker.field_name("firstName"), "firstName");
    /// assert_eq!(
    ///     RecipientRole::ServiceRecipient.field_name("firstName"),
    ///     "recipientFirstName"
    /// );
    /// ```
    #[must_use]
    pub fn field_name(self, base: &str) -> String {
        match self {
            Self::Booker => base.to_string(),
            Self::ServiceRecipient => {
                let mut chars = base.chars();
                chars.next().map_or_else(
                    || "recipient".to_string(),
                    |first| format!("recipient{}{}", first.to_ascii_uppercase(), chars.as_str()),
                )
            },
        }
    }

    /// Whether the form shows `occupation` and `relationshipToRecipient`
    #[must_use]
    pub const fn has_booker_fields(self) -> bool {
        matches!(self, Self::Booker)
    }
}

/// Form of address
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Title {
    /// Mr
    Mr,
    /// Mrs
    Mrs,
    /// Miss
    Miss,
    /// Ms
    Ms,
    /// Dr
    Dr,
}

/// Gender as asked by the form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
}

/// A phone number with its international dial code
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// e.g. `+44`
    pub dial_code: String,
    /// The number without dial code
    pub number: String,
}

impl PhoneNumber {
    /// A number under `dial_code`
    #[must_use]
    pub fn new(dial_code: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            dial_code: dial_code.into(),
            number: number.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.number.trim().is_empty()
    }

    fn is_well_formed(&self) -> bool {
        let digits = self.number.chars().filter(char::is_ascii_digit).count();
        self.dial_code.starts_with('+')
            && self
                .number
                .chars()
                .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
            && (6..=15).contains(&digits)
    }
}

/// Answers to the yes/no health and support questions
///
/// `None` means not answered yet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportNeeds {
    /// Has a disability
    pub has_disability: Option<bool>,
    /// Has a special educational need
    pub has_special_educational_need: Option<bool>,
    /// Has an allergy
    pub has_allergy: Option<bool>,
    /// Required when `has_allergy` is yes
    pub allergy_details: String,
    /// Has a dietary requirement
    pub has_dietary_requirement: Option<bool>,
}

/// Everything the details form collects about one person
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientDetails {
    /// Title, required from the booker
    pub title: Option<Title>,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address, required from the booker
    pub email: String,
    /// Mobile, required from the booker
    pub mobile: PhoneNumber,
    /// Landline, optional
    pub landline: PhoneNumber,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Gender
    pub gender: Option<Gender>,
    /// Nationality (country name)
    pub nationality: String,
    /// Postcode
    pub postcode: String,
    /// Up to three address lines; the first is required
    pub address_lines: [String; 3],
    /// Health and support answers
    pub support: SupportNeeds,
    /// Booker only
    pub occupation: String,
    /// Booker only
    pub relationship_to_recipient: String,
}

impl RecipientDetails {
    /// `"{first} {last}"`
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Drop fields the form does not show for `role`
    #[must_use]
    pub fn for_role(mut self, role: RecipientRole) -> Self {
        if !role.has_booker_fields() {
            self.occupation.clear();
            self.relationship_to_recipient.clear();
        }
        self
    }

    /// Age in whole years on `today`; `None` without a date of birth or
    /// for a birth date after `today`
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let born = self.date_of_birth?;
        if born > today {
            return None;
        }
        let mut years = today.year() - born.year();
        if (today.month(), today.day()) < (born.month(), born.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }

    /// Check every field rule for `role`, collecting all failures
    ///
    /// # Errors
    ///
    /// Returns every rule that failed.
    pub fn validate(&self, role: RecipientRole, today: NaiveDate) -> Result<(), ValidationErrors> {
        let field = |base: &str| role.field_name(base);
        let mut errors = ValidationErrors::new();

        if role == RecipientRole::Booker {
            errors.check(self.title.is_none(), || ValidationError::required(field("title")));
        }
        errors.check(self.first_name.trim().is_empty(), || {
            ValidationError::required(field("firstName"))
        });
        errors.check(self.last_name.trim().is_empty(), || {
            ValidationError::required(field("lastName"))
        });

        if self.email.trim().is_empty() {
            errors.check(role == RecipientRole::Booker, || {
                ValidationError::required(field("email"))
            });
        } else if !is_email(&self.email) {
            errors.push(ValidationError::InvalidEmail {
                field: field("email"),
            });
        }

        if self.mobile.is_blank() {
            errors.check(role == RecipientRole::Booker, || {
                ValidationError::required(field("mobile"))
            });
        } else if !self.mobile.is_well_formed() {
            errors.push(ValidationError::invalid(field("mobile"), "not a phone number"));
        }
        if !self.landline.is_blank() && !self.landline.is_well_formed() {
            errors.push(ValidationError::invalid(field("landline"), "not a phone number"));
        }

        match self.date_of_birth {
            None => errors.push(ValidationError::required(field("dateOfBirth"))),
            Some(born) if born > today => errors.push(ValidationError::InFuture {
                field: field("dateOfBirth"),
            }),
            Some(_) => {},
        }

        errors.check(self.gender.is_none(), || ValidationError::required(field("gender")));
        errors.check(self.nationality.trim().is_empty(), || {
            ValidationError::required(field("nationality"))
        });
        errors.check(self.postcode.trim().is_empty(), || {
            ValidationError::required(field("postcode"))
        });
        errors.check(self.address_lines[0].trim().is_empty(), || {
            ValidationError::required(field("addressLine1"))
        });

        errors.extend(self.support.validate(role));

        errors.into_result()
    }
}

impl SupportNeeds {
    fn validate(&self, role: RecipientRole) -> ValidationErrors {
        let field = |base: &str| role.field_name(base);
        let mut errors = ValidationErrors::new();

        let answers = [
            (self.has_disability, "hasDisability"),
            (self.has_special_educational_need, "hasSpecialEducationalNeed"),
            (self.has_allergy, "hasAllergy"),
            (self.has_dietary_requirement, "hasDietaryRequirement"),
        ];
        for (answer, base) in answers {
            errors.check(answer.is_none(), || ValidationError::required(field(base)));
        }

        let details = self.allergy_details.trim();
        if self.has_allergy == Some(true) && details.is_empty() {
            errors.push(ValidationError::required(field("allergyDetails")));
        }
        if details.chars().count() > ALLERGY_DETAILS_MAX {
            errors.push(ValidationError::TooLong {
                field: field("allergyDetails"),
                max: ALLERGY_DETAILS_MAX,
            });
        }

        errors
    }
}

/// `local@domain.tld` with no spaces
fn is_email(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !value.contains(char::is_whitespace)
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(name, tld)| !name.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}
