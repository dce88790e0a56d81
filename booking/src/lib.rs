//! Multi-step booking wizard.
//!
//! A booking moves through a fixed list of steps (by default Service,
//! Pricing, Details, Payment, Confirmation). Each step's form contributes
//! part of the booking; the session merges it and advances the wizard. On
//! the last step, once every form of the flow has been recorded, a booking
//! reference is issued and frozen.
//!
//! # Architecture
//!
//! ```text
//! SubmitSelections / SubmitDetails / SubmitPayment
//!          │
//!          ▼
//! ┌──────────────────┐  invalid  ┌──────────────────┐
//! │  BookingReducer  │─────────► │ ValidationFailed │
//! └────────┬─────────┘           └──────────────────┘
//!          │ valid: apply event
//!          ▼
//!   Effect::Dispatch(Continue)
//!          │
//!          ▼
//! ┌──────────────────┐
//! │  WizardReducer   │ (scoped to BookingState::wizard)
//! └────────┬─────────┘
//!          │ on the last step, every form recorded
//!          ▼
//!   ReferenceIssued
//! ```
//!
//! # Quick Start
//!
//! ```
//! use booking_wizard::{
//!     BookingAction, BookingEnvironment, BookingReducer, BookingSettings, BookingState,
//!     SelectionsPatch,
//! };
//! use booking_wizard_core::environment::{SystemClock, ThreadRandom};
//! use booking_wizard_runtime::Store;
//! use chrono::NaiveDate;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let env = BookingEnvironment::new(
//!     Arc::new(SystemClock),
//!     Arc::new(ThreadRandom),
//!     BookingSettings::default(),
//! );
//! let mut store = Store::new(BookingState::default(), BookingReducer::new(), env);
//!
//! let from = NaiveDate::from_ymd_opt(2024, 12, 1).ok_or("date")?;
//! let to = NaiveDate::from_ymd_opt(2024, 12, 7).ok_or("date")?;
//! store.send(BookingAction::SubmitSelections {
//!     patch: SelectionsPatch::new()
//!         .location("Leeds - City Centre")
//!         .service_type("Mentor/Companion")
//!         .dates(from, to)
//!         .party(1, 1),
//! })?;
//!
//! assert_eq!(store.state(|s| s.wizard.current_index()), 2);
//! assert_eq!(store.state(|s| s.selections.dates_display().to_string()), "1 Dec – 7 Dec");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod confirmation;
pub mod display;
pub mod error;
pub mod payment;
pub mod pricing;
pub mod recipient;
pub mod reference;
pub mod selections;
pub mod session;
pub mod wizard;

pub use config::{BookingSettings, Config, ConfigError, FormSteps};
pub use confirmation::ConfirmationSummary;
pub use display::{arrival_display, departure_display, derive_dates_display, derive_group_display};
pub use error::{ValidationError, ValidationErrors, WizardError};
pub use payment::{BillingAddress, PaymentDetails, PaymentRecord};
pub use pricing::{DailyRates, Money, PriceBreakdown};
pub use recipient::{RecipientDetails, RecipientRole};
pub use reference::{generate_booking_reference, reference_prefix, BookingReference};
pub use selections::{BookingSelections, DateRange, FieldUpdate, PartyComposition, SelectionsPatch};
pub use session::{BookingAction, BookingEnvironment, BookingReducer, BookingState};
pub use wizard::{Step, StepStatus, WizardAction, WizardReducer, WizardState};
