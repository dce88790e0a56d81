//! Configuration from environment variables.
//!
//! | variable | default |
//! |---|---|
//! | `BOOKING_STEPS` | `Service,Pricing,Details,Payment,Confirmation` |
//! | `BOOKING_PARTY_CAPACITY` | `2` |
//! | `BOOKING_DAY_RATE_PENCE` | `22000` |
//! | `BOOKING_TRAVEL_RATE_PENCE` | `3000` |
//! | `BOOKING_ACCOMMODATION_RATE_PENCE` | unset (not charged) |
//! | `BOOKING_FOOD_RATE_PENCE` | `3000` |
//! | `BOOKING_DEPOSIT_PERCENT` | `50` |
//! | `BOOKING_ARRIVAL_TIME` | `11:00` |
//! | `BOOKING_DEPARTURE_TIME` | `18:00` |
//! | `BOOKING_SELECTIONS_STEP` | `Service` |
//! | `BOOKING_DETAILS_STEP` | `Details` |
//! | `BOOKING_PAYMENT_STEP` | `Payment` |
//! | `STORE_MAX_DISPATCH_DEPTH` | `32` |
//!
//! # Example
//!
//! ```
//! use booking_wizard::config::Config;
//!
//! # fn main() -> Result<(), booking_wizard::config::ConfigError> {
//! let config = Config::from_lookup(|name| match name {
//!     "BOOKING_PARTY_CAPACITY" => Some("4".to_string()),
//!     _ => None,
//! })?;
//!
//! assert_eq!(config.settings.party_capacity, 4);
//! assert_eq!(config.steps.len(), 5);
//! # Ok(())
//! # }
//! ```

use crate::pricing::{DailyRates, Money};
use crate::wizard::{WizardState, DEFAULT_STEPS};
use booking_wizard_runtime::StoreConfig;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but does not parse
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name
        name: String,
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Parsed values that do not work together
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

/// Names of the steps that collect each form
///
/// A form can only be submitted while its step is active. A flow without
/// one of these steps never takes that form, and does not wait for it
/// before confirming.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSteps {
    /// Location, service, dates and party
    pub selections: String,
    /// Booker and service recipients
    pub details: String,
    /// Card details
    pub payment: String,
}

impl Default for FormSteps {
    fn default() -> Self {
        Self {
            selections: "Service".to_string(),
            details: "Details".to_string(),
            payment: "Payment".to_string(),
        }
    }
}

/// Business rules the session reducer reads
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSettings {
    /// Most adults plus children in one booking
    pub party_capacity: u32,
    /// Price card
    pub rates: DailyRates,
    /// Deposit share of the total, in percent
    pub deposit_percent: u8,
    /// Earliest arrival on the first day
    pub arrival_time: NaiveTime,
    /// Latest departure on the last day
    pub departure_time: NaiveTime,
    /// Which step owns which form
    pub forms: FormSteps,
}

impl BookingSettings {
    /// Validate settings
    ///
    /// # Errors
    ///
    /// Returns error if settings are invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.party_capacity == 0 {
            return Err(ConfigError::Validation(
                "party_capacity must be > 0".to_string(),
            ));
        }
        if self.deposit_percent > 100 {
            return Err(ConfigError::Validation(
                "deposit_percent must be between 0 and 100".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            party_capacity: 2,
            rates: DailyRates::default(),
            deposit_percent: 50,
            arrival_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap_or(NaiveTime::MIN),
            departure_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
            forms: FormSteps::default(),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Step names, in order
    pub steps: Vec<String>,
    /// Business rules
    pub settings: BookingSettings,
    /// Store limits
    pub store: StoreConfig,
}

impl Config {
    /// Load from the process environment
    ///
    /// Unset variables take their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if a variable does not parse or the result is invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through `lookup`, which maps a variable name to its value
    ///
    /// # Errors
    ///
    /// Returns error if a variable does not parse or the result is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let rates = defaults.settings.rates;

        let steps = lookup("BOOKING_STEPS").map_or(defaults.steps, |raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(ToString::to_string)
                .collect()
        });

        let settings = BookingSettings {
            party_capacity: parse_or(&lookup, "BOOKING_PARTY_CAPACITY", defaults.settings.party_capacity)?,
            rates: DailyRates {
                day_rate: pence_or(&lookup, "BOOKING_DAY_RATE_PENCE", rates.day_rate)?,
                travel: pence_or(&lookup, "BOOKING_TRAVEL_RATE_PENCE", rates.travel)?,
                accommodation: lookup("BOOKING_ACCOMMODATION_RATE_PENCE")
                    .map(|raw| parse("BOOKING_ACCOMMODATION_RATE_PENCE", &raw).map(Money::from_pence))
                    .transpose()?,
                food: pence_or(&lookup, "BOOKING_FOOD_RATE_PENCE", rates.food)?,
            },
            deposit_percent: parse_or(&lookup, "BOOKING_DEPOSIT_PERCENT", defaults.settings.deposit_percent)?,
            arrival_time: time_or(&lookup, "BOOKING_ARRIVAL_TIME", defaults.settings.arrival_time)?,
            departure_time: time_or(&lookup, "BOOKING_DEPARTURE_TIME", defaults.settings.departure_time)?,
            forms: FormSteps {
                selections: name_or(&lookup, "BOOKING_SELECTIONS_STEP", defaults.settings.forms.selections),
                details: name_or(&lookup, "BOOKING_DETAILS_STEP", defaults.settings.forms.details),
                payment: name_or(&lookup, "BOOKING_PAYMENT_STEP", defaults.settings.forms.payment),
            },
        };

        let store = StoreConfig::new(parse_or(
            &lookup,
            "STORE_MAX_DISPATCH_DEPTH",
            defaults.store.max_actions_per_send,
        )?);

        let config = Self {
            steps,
            settings,
            store,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the whole configuration
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps.is_empty() {
            return Err(ConfigError::Validation(
                "BOOKING_STEPS must name at least one step".to_string(),
            ));
        }
        if self.store.max_actions_per_send == 0 {
            return Err(ConfigError::Validation(
                "STORE_MAX_DISPATCH_DEPTH must be > 0".to_string(),
            ));
        }
        self.settings.validate()
    }

    /// A fresh wizard over the configured steps
    ///
    /// # Errors
    ///
    /// Returns error if there are no steps
    pub fn wizard(&self) -> Result<WizardState, ConfigError> {
        WizardState::new(self.steps.iter().cloned())
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS.iter().map(ToString::to_string).collect(),
            settings: BookingSettings::default(),
            store: StoreConfig::default(),
        }
    }
}

fn parse<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        name: name.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_or<T, F>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name).map_or(Ok(default), |raw| parse(name, &raw))
}

fn name_or<F>(lookup: &F, name: &str, default: String) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .unwrap_or(default)
}

fn pence_or<F>(lookup: &F, name: &str, default: Money) -> Result<Money, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    parse_or(lookup, name, default.pence()).map(Money::from_pence)
}

fn time_or<F>(lookup: &F, name: &str, default: NaiveTime) -> Result<NaiveTime, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).map_or(Ok(default), |raw| {
        NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|e| ConfigError::InvalidValue {
            name: name.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        })
    })
}
