//! The confirmation screen, as data.

use crate::config::BookingSettings;
use crate::display::{arrival_display, departure_display};
use crate::pricing::PriceBreakdown;
use crate::reference::BookingReference;
use crate::session::BookingState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything the confirmation screen shows
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationSummary {
    /// `"Hello {first} {last}"`, or just `"Hello"` without a booker
    pub greeting: String,
    /// The frozen reference
    pub reference: BookingReference,
    /// Selection tags
    pub location: String,
    /// Selection tags
    pub service_type: String,
    /// Selection tags
    pub dates: String,
    /// Selection tags
    pub group: String,
    /// Number of service recipients recorded
    pub recipients: usize,
    /// `"Sunday, 1 December 2024 after 11:00"`
    pub arriving: String,
    /// `"Saturday, 7 December 2024 before 18:00"`
    pub leaving: String,
    /// Quote, when both dates are set
    pub price: Option<PriceBreakdown>,
    /// London bookings must arrange off-site accommodation for staff
    pub offsite_accommodation_required: bool,
}

impl ConfirmationSummary {
    /// Summarise `state`; `None` until a reference has been issued
    #[must_use]
    pub fn build(state: &BookingState, settings: &BookingSettings) -> Option<Self> {
        let reference = state.reference.clone()?;
        let selections = &state.selections;

        let greeting = state
            .booker
            .as_ref()
            .map_or_else(|| "Hello".to_string(), |b| format!("Hello {}", b.full_name()));

        Some(Self {
            greeting,
            offsite_accommodation_required: reference.prefix() == "LON",
            reference,
            location: selections.location.clone(),
            service_type: selections.service_type.clone(),
            dates: selections.dates_display().to_string(),
            group: selections.group_display().to_string(),
            recipients: state.service_recipients.len(),
            arriving: arrival_display(selections.date_range(), settings.arrival_time),
            leaving: departure_display(selections.date_range(), settings.departure_time),
            price: PriceBreakdown::quote(
                selections.date_range(),
                &settings.rates,
                settings.deposit_percent,
            ),
        })
    }
}

impl fmt::Display for ConfirmationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BOOKING CONFIRMED!")?;
        writeln!(f, "Booking reference: {}", self.reference)?;
        writeln!(f)?;
        writeln!(f, "{}", self.greeting)?;
        writeln!(f, "Thanks for choosing our service!")?;
        writeln!(f)?;
        writeln!(f, "YOUR BOOKING")?;
        writeln!(f, "  Location:     {}", self.location)?;
        writeln!(f, "  Service type: {}", self.service_type)?;
        writeln!(f, "  Dates:        {}", self.dates)?;
        writeln!(f, "  Group:        {}", self.group)?;
        writeln!(f, "ARRIVING  {}", self.arriving)?;
        writeln!(f, "LEAVING   {}", self.leaving)?;

        if let Some(price) = &self.price {
            writeln!(f)?;
            writeln!(f, "Price breakdown")?;
            for (label, value) in price.rates.lines() {
                writeln!(f, "  {label:<16}{value}")?;
            }
            writeln!(f, "  {:<16}{} per day", "Total per day", price.per_day)?;
            writeln!(f, "  {:<16}{} days", "Duration", price.days)?;
            writeln!(f, "  {:<16}{}", "Total", price.total)?;
            writeln!(
                f,
                "  {:<16}{} ({}%, charged within the first 24 hours)",
                "Deposit", price.deposit, price.deposit_percent
            )?;
        }

        if self.offsite_accommodation_required {
            writeln!(f)?;
            writeln!(
                f,
                "London bookings: please provide off-site accommodation for our staff."
            )?;
        }
        Ok(())
    }
}
