//! Booking references: a location prefix plus six random digits.

use booking_wizard_core::environment::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Location prefixes, matched case-sensitively against the start of the
/// location
const PREFIXES: [(&str, &str); 3] = [("London", "LON"), ("Manchester", "MAN"), ("Leeds", "LEE")];

/// Prefix for every other location, including none
pub const FALLBACK_PREFIX: &str = "LHB";

/// Exclusive upper bound of the numeric suffix
const SUFFIX_RANGE: u32 = 1_000_000;

/// The reference prefix for `location`
///
/// ```
/// use booking_wizard::reference::reference_prefix;
///
/// assert_eq!(reference_prefix("London - Chelsea"), "LON");
/// assert_eq!(reference_prefix("london"), "LHB");
/// assert_eq!(reference_prefix(""), "LHB");
/// ```
#[must_use]
pub fn reference_prefix(location: &str) -> &'static str {
    PREFIXES
        .iter()
        .find(|(place, _)| location.starts_with(*place))
        .map_or(FALLBACK_PREFIX, |&(_, prefix)| prefix)
}

/// Draw a fresh reference for `location`
///
/// Every call draws again; callers that need a stable value keep it.
#[must_use]
pub fn generate_booking_reference(location: &str, random: &dyn RandomSource) -> BookingReference {
    let suffix = random.next_below(SUFFIX_RANGE);
    BookingReference(format!("{}{suffix:06}", reference_prefix(location)))
}

/// A booking reference such as `LEE004217`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingReference(String);

impl BookingReference {
    /// The full reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The letters identifying the location
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.0.get(..3).unwrap_or_default()
    }

    /// The six digits
    #[must_use]
    pub fn suffix(&self) -> &str {
        self.0.get(3..).unwrap_or_default()
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_wizard_testing::{FixedRandom, SequenceRandom};
    use proptest::prelude::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(reference_prefix("London - Chelsea"), "LON");
        assert_eq!(reference_prefix("Manchester"), "MAN");
        assert_eq!(reference_prefix("Leeds - City Centre"), "LEE");
        assert_eq!(reference_prefix("York"), "LHB");
        assert_eq!(reference_prefix("Greater London"), "LHB");
        assert_eq!(reference_prefix("LEEDS"), "LHB");
    }

    #[test]
    fn test_suffix_zero_padded() {
        let reference = generate_booking_reference("London - Chelsea", &FixedRandom::new(42));
        assert_eq!(reference.as_str(), "LON000042");
        assert_eq!(reference.prefix(), "LON");
        assert_eq!(reference.suffix(), "000042");
    }

    #[test]
    fn test_every_call_draws_again() {
        let random = SequenceRandom::new(1);
        let first = generate_booking_reference("Leeds", &random);
        let second = generate_booking_reference("Leeds", &random);
        assert_eq!(first.as_str(), "LEE000001");
        assert_eq!(second.as_str(), "LEE000002");
    }

    #[test]
    fn test_largest_suffix() {
        let reference = generate_booking_reference("", &FixedRandom::new(999_999));
        assert_eq!(reference.to_string(), "LHB999999");
    }

    proptest! {
        #[test]
        fn prop_reference_shape(
            location in booking_wizard_testing::properties::any_location(),
            draw in any::<u32>(),
        ) {
            let reference = generate_booking_reference(&location, &FixedRandom::new(draw));
            prop_assert_eq!(reference.prefix(), reference_prefix(&location));
            prop_assert_eq!(reference.suffix().len(), 6);
            prop_assert!(reference.suffix().chars().all(|c| c.is_ascii_digit()));
        }
    }
}
