//! The booking aggregate: selections contributed by the wizard steps.
//!
//! Steps hand in a [`SelectionsPatch`]. Each field of a patch says whether
//! to keep, set or clear the stored value, so a step never overwrites data
//! it did not collect. An empty string set explicitly is a value, not an
//! absence.

use crate::display::{derive_dates_display, derive_group_display};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Arrival and departure dates, either of which may be unset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Arrival
    pub from: Option<NaiveDate>,
    /// Departure
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// A range with both ends set
    #[must_use]
    pub const fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Both ends set and departure before arrival
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if to < from)
    }

    /// Calendar days covered, both ends included (1 Dec to 7 Dec is 7)
    ///
    /// `None` until both ends are set, or when reversed.
    #[must_use]
    pub fn days(&self) -> Option<u32> {
        let (from, to) = (self.from?, self.to?);
        let span = to.signed_duration_since(from).num_days();
        u32::try_from(span).ok()?.checked_add(1)
    }

    /// Nights between arrival and departure
    #[must_use]
    pub fn nights(&self) -> Option<u32> {
        self.days().map(|days| days - 1)
    }
}

/// Who the booking is for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyComposition {
    /// Number of adults
    pub adults: u32,
    /// Number of children
    pub children: u32,
}

impl PartyComposition {
    /// A party of `adults` and `children`
    #[must_use]
    pub const fn new(adults: u32, children: u32) -> Self {
        Self { adults, children }
    }

    /// Everyone in the party (saturating)
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }
}

/// How a patch treats one field
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldUpdate<T> {
    /// Not provided; leave the stored value alone
    #[default]
    Keep,
    /// Store this value
    Set(T),
    /// Remove the stored value
    Clear,
}

impl<T> FieldUpdate<T> {
    /// True unless this is [`FieldUpdate::Keep`]
    #[must_use]
    pub const fn is_provided(&self) -> bool {
        !matches!(self, Self::Keep)
    }

    /// Apply to a value whose cleared state is its default
    ///
    /// Returns true if the update was provided.
    pub fn apply(self, target: &mut T) -> bool
    where
        T: Default,
    {
        match self {
            Self::Keep => false,
            Self::Set(value) => {
                *target = value;
                true
            },
            Self::Clear => {
                *target = T::default();
                true
            },
        }
    }

    /// Apply to an optional value
    ///
    /// Returns true if the update was provided.
    pub fn apply_option(self, target: &mut Option<T>) -> bool {
        match self {
            Self::Keep => false,
            Self::Set(value) => {
                *target = Some(value);
                true
            },
            Self::Clear => {
                *target = None;
                true
            },
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// `Some` sets, `None` keeps
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Keep, Self::Set)
    }
}

/// The part of the selections one step contributes
///
/// ```
/// use booking_wizard::selections::{BookingSelections, SelectionsPatch};
///
/// let mut selections = BookingSelections::default();
/// selections.merge(SelectionsPatch::new().location("Leeds"));
/// selections.merge(SelectionsPatch::new().service_type("Mentor"));
///
/// assert_eq!(selections.location, "Leeds");
/// assert_eq!(selections.service_type, "Mentor");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionsPatch {
    /// Location
    #[serde(default)]
    pub location: FieldUpdate<String>,
    /// Service type
    #[serde(default)]
    pub service_type: FieldUpdate<String>,
    /// Arrival date
    #[serde(default)]
    pub date_from: FieldUpdate<NaiveDate>,
    /// Departure date
    #[serde(default)]
    pub date_to: FieldUpdate<NaiveDate>,
    /// Party composition
    #[serde(default)]
    pub party: FieldUpdate<PartyComposition>,
}

impl SelectionsPatch {
    /// A patch that changes nothing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the location
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = FieldUpdate::Set(location.into());
        self
    }

    /// Set the service type
    #[must_use]
    pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = FieldUpdate::Set(service_type.into());
        self
    }

    /// Set both dates
    #[must_use]
    pub fn dates(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = FieldUpdate::Set(from);
        self.date_to = FieldUpdate::Set(to);
        self
    }

    /// Clear both dates
    #[must_use]
    pub fn clear_dates(mut self) -> Self {
        self.date_from = FieldUpdate::Clear;
        self.date_to = FieldUpdate::Clear;
        self
    }

    /// Set the party
    #[must_use]
    pub fn party(mut self, adults: u32, children: u32) -> Self {
        self.party = FieldUpdate::Set(PartyComposition::new(adults, children));
        self
    }

    /// True if no field is provided
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.location.is_provided()
            || self.service_type.is_provided()
            || self.date_from.is_provided()
            || self.date_to.is_provided()
            || self.party.is_provided())
    }
}

/// Everything chosen so far, with derived display strings
///
/// Dates and party only change through [`BookingSelections::merge`], which
/// keeps the display strings in step with them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSelections {
    /// Location, empty until chosen
    pub location: String,
    /// Service type, empty until chosen
    pub service_type: String,
    date_range: DateRange,
    party: PartyComposition,
    dates_display: String,
    group_display: String,
}

impl BookingSelections {
    /// Arrival and departure
    #[must_use]
    pub const fn date_range(&self) -> &DateRange {
        &self.date_range
    }

    /// Party composition
    #[must_use]
    pub const fn party(&self) -> &PartyComposition {
        &self.party
    }

    /// `"1 Dec – 7 Dec"`, derived from the date range
    #[must_use]
    pub fn dates_display(&self) -> &str {
        &self.dates_display
    }

    /// `"2 Adults, 1 Child"`, derived from the party
    #[must_use]
    pub fn group_display(&self) -> &str {
        &self.group_display
    }

    /// Location and both dates are chosen
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.location.trim().is_empty() && self.date_range.days().is_some()
    }

    /// Fold `patch` in, leaving fields it does not provide untouched
    ///
    /// Accepts any values: reversed ranges and oversized parties are
    /// stored as given.
    pub fn merge(&mut self, patch: SelectionsPatch) {
        let SelectionsPatch {
            location,
            service_type,
            date_from,
            date_to,
            party,
        } = patch;

        location.apply(&mut self.location);
        service_type.apply(&mut self.service_type);

        let from_changed = date_from.apply_option(&mut self.date_range.from);
        let to_changed = date_to.apply_option(&mut self.date_range.to);
        if from_changed || to_changed {
            self.dates_display = derive_dates_display(&self.date_range);
        }

        if party.apply(&mut self.party) {
            self.group_display = derive_group_display(&self.party);
        }
    }

    /// `merge` on a copy
    #[must_use]
    pub fn merged(&self, patch: SelectionsPatch) -> Self {
        let mut next = self.clone();
        next.merge(patch);
        next
    }
}
