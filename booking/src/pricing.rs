//! Price card and quotes.
//!
//! Amounts are whole pence. Daily rates are configurable; the defaults are
//! the published card (£220 day rate, £30 travel, £30 food, no
//! accommodation charge).

use crate::selections::DateRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of money in pence
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Zero pence
    pub const ZERO: Self = Self(0);

    /// From pence
    #[must_use]
    pub const fn from_pence(pence: u64) -> Self {
        Self(pence)
    }

    /// From whole pounds (saturating)
    #[must_use]
    pub const fn from_pounds(pounds: u64) -> Self {
        Self(pounds.saturating_mul(100))
    }

    /// The amount in pence
    #[must_use]
    pub const fn pence(&self) -> u64 {
        self.0
    }

    /// `self + other`, `None` on overflow
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(pence) => Some(Self(pence)),
            None => None,
        }
    }

    /// `self * times`, `None` on overflow
    #[must_use]
    pub const fn checked_mul(self, times: u64) -> Option<Self> {
        match self.0.checked_mul(times) {
            Some(pence) => Some(Self(pence)),
            None => None,
        }
    }

    /// `percent`% of this amount, rounded down to the penny
    #[must_use]
    pub const fn percent(self, percent: u8) -> Self {
        // u64::MAX * 100 would overflow; go through u128
        #[allow(clippy::cast_possible_truncation)]
        let pence = (self.0 as u128 * percent as u128 / 100) as u64;
        Self(pence)
    }
}

/// `£1,960.00`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pounds = (self.0 / 100).to_string();
        let mut grouped = String::with_capacity(pounds.len() + pounds.len() / 3);
        for (i, digit) in pounds.chars().enumerate() {
            if i > 0 && (pounds.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        write!(f, "£{grouped}.{:02}", self.0 % 100)
    }
}

/// What one day costs, line by line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRates {
    /// Service day rate
    pub day_rate: Money,
    /// Travel
    pub travel: Money,
    /// Accommodation; `None` when not charged
    pub accommodation: Option<Money>,
    /// Food allowance
    pub food: Money,
}

impl DailyRates {
    /// Sum of every line for one day
    #[must_use]
    pub fn per_day(&self) -> Money {
        [
            self.day_rate,
            self.travel,
            self.accommodation.unwrap_or(Money::ZERO),
            self.food,
        ]
        .into_iter()
        .try_fold(Money::ZERO, Money::checked_add)
        .unwrap_or(Money::from_pence(u64::MAX))
    }

    /// Label/value rows as shown on the price card
    #[must_use]
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Day Rate", format!("{} per day", self.day_rate)),
            ("Travel Cost", format!("{} per day", self.travel)),
            (
                "Accommodation",
                self.accommodation
                    .map_or_else(|| "N/A".to_string(), |m| format!("{m} per day")),
            ),
            ("Food Allowance", format!("{} per day", self.food)),
        ]
    }
}

impl Default for DailyRates {
    fn default() -> Self {
        Self {
            day_rate: Money::from_pounds(220),
            travel: Money::from_pounds(30),
            accommodation: None,
            food: Money::from_pounds(30),
        }
    }
}

/// A priced booking
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Rates the quote was made with
    pub rates: DailyRates,
    /// Days charged
    pub days: u32,
    /// All lines for one day
    pub per_day: Money,
    /// `per_day * days`
    pub total: Money,
    /// Share of the deposit, in percent
    pub deposit_percent: u8,
    /// Charged within the first 24 hours of booking
    pub deposit: Money,
}

impl PriceBreakdown {
    /// Price `range` at `rates`
    ///
    /// `None` until both dates are set, for reversed ranges, and if the
    /// total does not fit.
    #[must_use]
    pub fn quote(range: &DateRange, rates: &DailyRates, deposit_percent: u8) -> Option<Self> {
        let days = range.days()?;
        let per_day = rates.per_day();
        let total = per_day.checked_mul(u64::from(days))?;
        let deposit_percent = deposit_percent.min(100);

        Some(Self {
            rates: *rates,
            days,
            per_day,
            total,
            deposit_percent,
            deposit: total.percent(deposit_percent),
        })
    }

    /// Left to pay after the deposit
    #[must_use]
    pub const fn balance(&self) -> Money {
        Money::from_pence(self.total.pence() - self.deposit.pence())
    }
}
