//! One booking session: the wizard plus everything collected along the way.
//!
//! Each step's form submits a command. The reducer checks that the form's
//! step (see [`FormSteps`]) is the active one, validates the data, applies
//! the resulting event and dispatches [`BookingAction::Continue`], so a
//! successful submission is always "merge, then advance". Navigation
//! commands are handed to the scoped [`WizardReducer`].
//!
//! The booking reference is issued once the wizard is on (or past) its last
//! step and every form the flow contains has been recorded. It is checked
//! after every command, so a single-step flow gets its reference on the
//! first one. Moving back before the last step or starting over discards it.

use crate::config::{BookingSettings, FormSteps};
use crate::error::{ValidationError, ValidationErrors};
use crate::payment::{PaymentDetails, PaymentRecord};
use crate::recipient::{RecipientDetails, RecipientRole};
use crate::reference::{generate_booking_reference, BookingReference};
use crate::selections::{BookingSelections, SelectionsPatch};
use crate::wizard::{WizardAction, WizardReducer, WizardState};
use booking_wizard_core::composition::{scope_reducer, ScopedReducer};
use booking_wizard_core::environment::{Clock, RandomSource};
use booking_wizard_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use booking_wizard_macros::Action;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// State of one booking flow
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingState {
    /// Step pointer and flags
    pub wizard: WizardState,
    /// Location, service, dates and party
    pub selections: BookingSelections,
    /// Person making the booking
    pub booker: Option<RecipientDetails>,
    /// People receiving the service
    pub service_recipients: Vec<RecipientDetails>,
    /// What is kept of the payment
    pub payment: Option<PaymentRecord>,
    /// Issued on entering the last step
    pub reference: Option<BookingReference>,
    /// When the reference was issued
    pub confirmed_at: Option<DateTime<Utc>>,
    /// Errors of the last rejected submission
    pub last_error: Option<ValidationErrors>,
}

impl BookingState {
    /// A fresh session over `wizard`
    #[must_use]
    pub fn new(wizard: WizardState) -> Self {
        Self {
            wizard,
            selections: BookingSelections::default(),
            booker: None,
            service_recipients: Vec::new(),
            payment: None,
            reference: None,
            confirmed_at: None,
            last_error: None,
        }
    }

    /// Forms whose step is part of the flow but which are not recorded yet
    #[must_use]
    pub fn missing_forms<'a>(&self, forms: &'a FormSteps) -> Vec<&'a str> {
        let recorded = [
            (forms.selections.as_str(), self.selections.is_complete()),
            (forms.details.as_str(), self.booker.is_some()),
            (forms.payment.as_str(), self.payment.is_some()),
        ];
        recorded
            .into_iter()
            .filter(|&(step, done)| !done && self.wizard.has_step(step))
            .map(|(step, _)| step)
            .collect()
    }

    /// Back to the initial state, keeping the configured steps
    pub fn start_over(&mut self) {
        self.wizard.reset();
        let wizard = std::mem::take(&mut self.wizard);
        *self = Self::new(wizard);
    }
}

impl Default for BookingState {
    fn default() -> Self {
        Self::new(WizardState::default())
    }
}

/// Actions for a booking session (commands and events)
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingAction {
    // ========== Commands ==========
    /// Command: Service step submitted
    #[command]
    SubmitSelections {
        /// Fields chosen on the step
        patch: SelectionsPatch,
    },

    /// Command: Details step submitted
    #[command]
    SubmitDetails {
        /// Person making the booking
        booker: RecipientDetails,
        /// People receiving the service
        recipients: Vec<RecipientDetails>,
    },

    /// Command: Payment step submitted
    #[command]
    SubmitPayment {
        /// Card details as typed in
        details: PaymentDetails,
    },

    /// Command: Move to the next step
    #[command]
    Continue,

    /// Command: Move to the previous step
    #[command]
    GoBack,

    /// Command: Discard everything and return to step 1
    #[command]
    StartOver,

    /// Command: Jump to a step, keeping collected data
    #[command]
    JumpTo {
        /// Target step id
        step_id: u32,
    },

    // ========== Events ==========
    /// Event: Selections were merged
    #[event]
    SelectionsMerged {
        /// Patch that was applied
        patch: SelectionsPatch,
    },

    /// Event: Booker and recipients were recorded
    #[event]
    RecipientsRecorded {
        /// Person making the booking
        booker: RecipientDetails,
        /// People receiving the service
        recipients: Vec<RecipientDetails>,
    },

    /// Event: Payment was recorded
    #[event]
    PaymentRecorded {
        /// Retained card data
        record: PaymentRecord,
    },

    /// Event: Booking reference was issued
    #[event]
    ReferenceIssued {
        /// The reference
        reference: BookingReference,
        /// When it was issued
        issued_at: DateTime<Utc>,
    },

    /// Event: A submission was rejected
    #[event]
    ValidationFailed {
        /// Everything that was wrong
        errors: ValidationErrors,
    },
}

impl BookingAction {
    /// The wizard transition a navigation command stands for
    #[must_use]
    pub const fn to_wizard(&self) -> Option<WizardAction> {
        match self {
            Self::Continue => Some(WizardAction::Advance),
            Self::GoBack => Some(WizardAction::Retreat),
            Self::StartOver => Some(WizardAction::Reset),
            Self::JumpTo { step_id } => Some(WizardAction::JumpTo(*step_id)),
            _ => None,
        }
    }

    /// The navigation command for a wizard transition
    #[must_use]
    pub const fn from_wizard(action: WizardAction) -> Self {
        match action {
            WizardAction::Advance => Self::Continue,
            WizardAction::Retreat => Self::GoBack,
            WizardAction::Reset => Self::StartOver,
            WizardAction::JumpTo(step_id) => Self::JumpTo { step_id },
        }
    }
}

/// Environment dependencies for the booking reducer
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Clock for timestamps and date checks
    pub clock: Arc<dyn Clock>,
    /// Randomness for booking references
    pub random: Arc<dyn RandomSource>,
    /// Business rules
    pub settings: BookingSettings,
}

impl BookingEnvironment {
    /// Creates a new `BookingEnvironment`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
        settings: BookingSettings,
    ) -> Self {
        Self {
            clock,
            random,
            settings,
        }
    }
}

type ScopedWizard = ScopedReducer<BookingState, BookingAction, WizardReducer<BookingEnvironment>>;

/// Reducer for a booking session
pub struct BookingReducer {
    wizard: ScopedWizard,
}

impl BookingReducer {
    /// Creates a new `BookingReducer`
    #[must_use]
    pub fn new() -> Self {
        Self {
            wizard: scope_reducer(
                WizardReducer::new(),
                |state: &mut BookingState| &mut state.wizard,
                BookingAction::to_wizard,
                BookingAction::from_wizard,
            ),
        }
    }

    /// Validates a `SubmitSelections` command against the merged result
    fn validate_selections(
        current: &BookingSelections,
        patch: &SelectionsPatch,
        settings: &BookingSettings,
    ) -> Result<(), ValidationErrors> {
        let merged = current.merged(patch.clone());
        let mut errors = ValidationErrors::new();

        errors.check(merged.location.trim().is_empty(), || {
            ValidationError::required("location")
        });
        errors.check(merged.service_type.trim().is_empty(), || {
            ValidationError::required("serviceType")
        });
        let range = merged.date_range();
        errors.check(range.from.is_none(), || ValidationError::required("dateFrom"));
        errors.check(range.to.is_none(), || ValidationError::required("dateTo"));
        if let (Some(from), Some(to)) = (range.from, range.to) {
            errors.check(to < from, || ValidationError::DateRangeReversed { from, to });
        }

        let requested = merged.party().total();
        errors.check(requested == 0, || ValidationError::required("party"));
        errors.check(requested > settings.party_capacity, || {
            ValidationError::PartyOverCapacity {
                requested,
                capacity: settings.party_capacity,
            }
        });

        errors.into_result()
    }

    /// Validates a `SubmitDetails` command
    fn validate_details(
        booker: &RecipientDetails,
        recipients: &[RecipientDetails],
        env: &BookingEnvironment,
    ) -> Result<(), ValidationErrors> {
        let today = env.clock.today();
        let mut errors = ValidationErrors::new();

        if let Err(e) = booker.validate(RecipientRole::Booker, today) {
            errors.extend(e);
        }

        if recipients.is_empty() {
            errors.push(ValidationError::required("recipientFirstName"));
        }
        let capacity = env.settings.party_capacity;
        if u32::try_from(recipients.len()).map_or(true, |n| n > capacity) {
            errors.push(ValidationError::invalid(
                "serviceRecipients",
                format!("at most {capacity} service recipients per booking"),
            ));
        }
        for recipient in recipients {
            if let Err(e) = recipient.validate(RecipientRole::ServiceRecipient, today) {
                errors.extend(e);
            }
        }

        errors.into_result()
    }

    /// Forms can only be submitted on their own step
    fn check_step(state: &BookingState, form_step: &str) -> Result<(), ValidationErrors> {
        match state.wizard.current_step() {
            Some(step) if step.name == form_step => Ok(()),
            active => Err(ValidationError::OutOfStep {
                form: form_step.to_string(),
                active: active.map_or_else(|| "none".to_string(), |step| step.name.clone()),
            }
            .into()),
        }
    }

    /// Issue or discard the reference after a command
    fn sync_reference(state: &mut BookingState, env: &BookingEnvironment) {
        if state.wizard.has_reached_last_step() {
            if state.reference.is_some() {
                return;
            }
            let missing = state.missing_forms(&env.settings.forms);
            if !missing.is_empty() {
                tracing::debug!(?missing, "booking incomplete, no reference yet");
                return;
            }
            let event = BookingAction::ReferenceIssued {
                reference: generate_booking_reference(
                    &state.selections.location,
                    env.random.as_ref(),
                ),
                issued_at: env.clock.now(),
            };
            Self::apply_event(state, &event);
        } else if state.reference.is_some() {
            tracing::debug!(
                step = state.wizard.current_index(),
                "left the last step, discarding booking reference"
            );
            state.reference = None;
            state.confirmed_at = None;
        }
    }

    /// Reject a command: record the errors, no effects
    fn reject(
        state: &mut BookingState,
        command: &str,
        errors: ValidationErrors,
    ) -> SmallVec<[Effect<BookingAction>; 4]> {
        tracing::warn!(command, %errors, "submission rejected");
        Self::apply_event(state, &BookingAction::ValidationFailed { errors });
        SmallVec::new()
    }

    /// Record an accepted submission and move on
    fn accept(state: &mut BookingState, event: &BookingAction) -> SmallVec<[Effect<BookingAction>; 4]> {
        tracing::debug!(event = event.event_type(), "submission accepted");
        Self::apply_event(state, event);
        smallvec![Effect::dispatch(BookingAction::Continue)]
    }

    /// Applies an event to state
    fn apply_event(state: &mut BookingState, action: &BookingAction) {
        match action {
            BookingAction::SelectionsMerged { patch } => {
                state.selections.merge(patch.clone());
                state.last_error = None;
            },
            BookingAction::RecipientsRecorded { booker, recipients } => {
                state.booker = Some(booker.clone().for_role(RecipientRole::Booker));
                state.service_recipients = recipients
                    .iter()
                    .cloned()
                    .map(|r| r.for_role(RecipientRole::ServiceRecipient))
                    .collect();
                state.last_error = None;
            },
            BookingAction::PaymentRecorded { record } => {
                state.payment = Some(record.clone());
                state.last_error = None;
            },
            BookingAction::ReferenceIssued {
                reference,
                issued_at,
            } => {
                tracing::info!(%reference, "booking reference issued");
                state.reference = Some(reference.clone());
                state.confirmed_at = Some(*issued_at);
            },
            BookingAction::ValidationFailed { errors } => {
                state.last_error = Some(errors.clone());
            },
            // Commands are not applied to state
            BookingAction::SubmitSelections { .. }
            | BookingAction::SubmitDetails { .. }
            | BookingAction::SubmitPayment { .. }
            | BookingAction::Continue
            | BookingAction::GoBack
            | BookingAction::StartOver
            | BookingAction::JumpTo { .. } => {},
        }
    }
}

impl Default for BookingReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if action.is_event() {
            Self::apply_event(state, &action);
            return SmallVec::new();
        }

        let command = action.variant_name();
        let forms = &env.settings.forms;
        let effects = match action {
            BookingAction::SubmitSelections { patch } => {
                match Self::check_step(state, &forms.selections).and_then(|()| {
                    Self::validate_selections(&state.selections, &patch, &env.settings)
                }) {
                    Ok(()) => Self::accept(state, &BookingAction::SelectionsMerged { patch }),
                    Err(errors) => Self::reject(state, command, errors),
                }
            },

            BookingAction::SubmitDetails { booker, recipients } => {
                match Self::check_step(state, &forms.details)
                    .and_then(|()| Self::validate_details(&booker, &recipients, env))
                {
                    Ok(()) => {
                        Self::accept(state, &BookingAction::RecipientsRecorded { booker, recipients })
                    },
                    Err(errors) => Self::reject(state, command, errors),
                }
            },

            BookingAction::SubmitPayment { details } => {
                match Self::check_step(state, &forms.payment)
                    .and_then(|()| details.validate(env.clock.today()))
                {
                    Ok(()) => {
                        let record = PaymentRecord::from(&details);
                        Self::accept(state, &BookingAction::PaymentRecorded { record })
                    },
                    Err(errors) => Self::reject(state, command, errors),
                }
            },

            BookingAction::StartOver => {
                let effects = self.wizard.reduce(state, BookingAction::StartOver, env);
                state.start_over();
                tracing::debug!("session started over");
                effects
            },

            BookingAction::Continue | BookingAction::GoBack | BookingAction::JumpTo { .. } => {
                self.wizard.reduce(state, action, env)
            },

            // Applied above
            BookingAction::SelectionsMerged { .. }
            | BookingAction::RecipientsRecorded { .. }
            | BookingAction::PaymentRecorded { .. }
            | BookingAction::ReferenceIssued { .. }
            | BookingAction::ValidationFailed { .. } => SmallVec::new(),
        };

        Self::sync_reference(state, env);
        effects
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use booking_wizard_testing::{assertions, test_clock, FixedRandom, ReducerTest, SequenceRandom};
    use chrono::NaiveDate;

    fn env() -> BookingEnvironment {
        BookingEnvironment::new(
            Arc::new(test_clock()),
            Arc::new(FixedRandom::new(4_217)),
            BookingSettings::default(),
        )
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, day).unwrap()
    }

    fn on_step(step_id: u32) -> BookingState {
        let mut state = BookingState::default();
        state.wizard.jump_to(step_id);
        state
    }

    /// Every form recorded, still on the Service step
    fn filled_in() -> BookingState {
        let mut state = BookingState::default();
        state.selections.merge(leeds_week());
        state.booker = Some(RecipientDetails::default());
        state.payment = Some(PaymentRecord::from(&PaymentDetails::default()));
        state
    }

    fn leeds_week() -> SelectionsPatch {
        SelectionsPatch::new()
            .location("Leeds - City Centre")
            .service_type("Mentor/Companion")
            .dates(date(1), date(7))
            .party(1, 1)
    }

    #[test]
    fn test_submit_selections_merges_then_continues() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(BookingState::default())
            .when_action(BookingAction::SubmitSelections {
                patch: leeds_week(),
            })
            .then_state(|state| {
                assert_eq!(state.selections.location, "Leeds - City Centre");
                assert_eq!(state.selections.dates_display(), "1 Dec – 7 Dec");
                assert_eq!(state.selections.group_display(), "1 Adult, 1 Child");
                // Continue is dispatched, not applied
                assert_eq!(state.wizard.current_index(), 1);
            })
            .then_effects(|effects| {
                assertions::assert_dispatches(effects, &[BookingAction::Continue]);
            })
            .run();
    }

    #[test]
    fn test_reversed_dates_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(BookingState::default())
            .when_action(BookingAction::SubmitSelections {
                patch: leeds_week().dates(date(7), date(1)),
            })
            .then_state(|state| {
                let errors = state.last_error.as_ref().unwrap();
                assert!(errors.has_field("dateTo"));
                assert_eq!(state.selections, BookingSelections::default());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_party_over_capacity_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(BookingState::default())
            .when_action(BookingAction::SubmitSelections {
                patch: leeds_week().party(2, 1),
            })
            .then_state(|state| {
                assert_eq!(
                    state.last_error,
                    Some(
                        ValidationError::PartyOverCapacity {
                            requested: 3,
                            capacity: 2
                        }
                        .into()
                    )
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_successful_submit_clears_last_error() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(BookingState::default())
            .when_actions([
                BookingAction::SubmitSelections {
                    patch: SelectionsPatch::new().location("Leeds"),
                },
                BookingAction::SubmitSelections {
                    patch: leeds_week(),
                },
            ])
            .then_state(|state| assert_eq!(state.last_error, None))
            .run();
    }

    #[test]
    fn test_form_for_another_step_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(on_step(2))
            .when_action(BookingAction::SubmitSelections {
                patch: leeds_week(),
            })
            .then_state(|state| {
                assert_eq!(
                    state.last_error,
                    Some(
                        ValidationError::OutOfStep {
                            form: "Service".to_string(),
                            active: "Pricing".to_string(),
                        }
                        .into()
                    )
                );
                assert_eq!(state.wizard.current_index(), 2);
                assert_eq!(state.selections, BookingSelections::default());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_form_steps_are_configurable() {
        let mut env = env();
        env.settings.forms.selections = "Pricing".to_string();

        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(on_step(2))
            .when_action(BookingAction::SubmitSelections {
                patch: leeds_week(),
            })
            .then_state(|state| {
                assert_eq!(state.last_error, None);
                assert_eq!(state.selections.location, "Leeds - City Centre");
            })
            .then_effects(|effects| {
                assertions::assert_dispatches(effects, &[BookingAction::Continue]);
            })
            .run();
    }

    #[test]
    fn test_incomplete_booking_gets_no_reference() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(BookingState::default())
            .when_actions([
                BookingAction::SelectionsMerged {
                    patch: leeds_week(),
                },
                BookingAction::JumpTo { step_id: 5 },
            ])
            .then_state(|state| {
                assert!(state.wizard.is_on_last_step());
                assert_eq!(state.reference, None);
                assert_eq!(
                    state.missing_forms(&BookingSettings::default().forms),
                    vec!["Details", "Payment"]
                );
            })
            .run();
    }

    #[test]
    fn test_single_step_flow_issues_reference_on_first_command() {
        let wizard = WizardState::new(["Confirmation"]).unwrap();
        let reducer = BookingReducer::new();
        let env = BookingEnvironment::new(
            Arc::new(test_clock()),
            Arc::new(SequenceRandom::new(7)),
            BookingSettings::default(),
        );
        let mut state = BookingState::new(wizard);
        assert!(state.wizard.is_on_last_step());

        reducer.reduce(&mut state, BookingAction::GoBack, &env);
        assert_eq!(state.reference.as_ref().map(BookingReference::as_str), Some("LHB000007"));

        reducer.reduce(&mut state, BookingAction::StartOver, &env);
        assert_eq!(state.reference.as_ref().map(BookingReference::as_str), Some("LHB000008"));

        reducer.reduce(&mut state, BookingAction::Continue, &env);
        assert!(state.wizard.is_overflow());
        assert_eq!(state.reference.as_ref().map(BookingReference::as_str), Some("LHB000008"));
    }

    #[test]
    fn test_reference_issued_on_last_step() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(filled_in())
            .when_actions([
                BookingAction::JumpTo { step_id: 4 },
                BookingAction::Continue,
            ])
            .then_state(|state| {
                assert!(state.wizard.is_on_last_step());
                assert_eq!(
                    state.reference.as_ref().map(BookingReference::as_str),
                    Some("LEE004217")
                );
                assert_eq!(state.confirmed_at, Some(test_clock().now()));
            })
            .run();
    }

    #[test]
    fn test_reference_kept_past_last_step_and_dropped_on_go_back() {
        let mut state = filled_in();
        let reducer = BookingReducer::new();
        let env = env();

        reducer.reduce(&mut state, BookingAction::JumpTo { step_id: 5 }, &env);
        assert!(state.reference.is_some());

        reducer.reduce(&mut state, BookingAction::Continue, &env);
        assert!(state.wizard.is_overflow());
        assert!(state.reference.is_some());

        reducer.reduce(&mut state, BookingAction::GoBack, &env);
        assert!(state.wizard.is_on_last_step());
        assert!(state.reference.is_some());

        reducer.reduce(&mut state, BookingAction::GoBack, &env);
        assert_eq!(state.wizard.current_index(), 4);
        assert_eq!(state.reference, None);
        assert_eq!(state.confirmed_at, None);
    }

    #[test]
    fn test_start_over_restores_initial_state() {
        let wizard = WizardState::new(["Service", "Payment"]).unwrap();

        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(BookingState::new(wizard.clone()))
            .when_actions([
                BookingAction::SelectionsMerged {
                    patch: leeds_week(),
                },
                BookingAction::Continue,
                BookingAction::StartOver,
            ])
            .then_state(move |state| {
                assert_eq!(*state, BookingState::new(wizard));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_jump_keeps_collected_data() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(BookingState::default())
            .when_actions([
                BookingAction::SelectionsMerged {
                    patch: leeds_week(),
                },
                BookingAction::JumpTo { step_id: 3 },
                BookingAction::JumpTo { step_id: 1 },
            ])
            .then_state(|state| {
                assert_eq!(state.wizard.current_index(), 1);
                assert_eq!(state.selections.location, "Leeds - City Centre");
            })
            .run();
    }

    #[test]
    fn test_payment_keeps_last_four_only() {
        let details = PaymentDetails {
            cardholder_name: "A Hart".to_string(),
            card_number: "4000056655665556".to_string(),
            expiry_month: 1,
            expiry_year: 2026,
            cvv: "123".to_string(),
            billing: crate::payment::BillingAddress::Current,
        };

        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(on_step(4))
            .when_action(BookingAction::SubmitPayment { details })
            .then_state(|state| {
                let record = state.payment.as_ref().unwrap();
                assert_eq!(record.card_last_four, "5556");
            })
            .then_effects(|effects| {
                assertions::assert_dispatches(effects, &[BookingAction::Continue]);
            })
            .run();
    }

    #[test]
    fn test_submit_details_requires_recipients() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env())
            .given_state(on_step(3))
            .when_action(BookingAction::SubmitDetails {
                booker: RecipientDetails::default(),
                recipients: Vec::new(),
            })
            .then_state(|state| {
                let errors = state.last_error.as_ref().unwrap();
                assert!(errors.has_field("firstName"));
                assert!(errors.has_field("recipientFirstName"));
                assert_eq!(state.booker, None);
            })
            .run();
    }

    #[test]
    fn test_action_kinds() {
        assert!(BookingAction::Continue.is_command());
        assert!(BookingAction::ValidationFailed {
            errors: ValidationErrors::new()
        }
        .is_event());
        assert_eq!(
            BookingAction::SelectionsMerged {
                patch: SelectionsPatch::new()
            }
            .event_type(),
            "SelectionsMerged.v1"
        );
        assert_eq!(BookingAction::to_wizard(&BookingAction::GoBack), Some(WizardAction::Retreat));
        assert_eq!(BookingAction::from_wizard(WizardAction::JumpTo(2)), BookingAction::JumpTo { step_id: 2 });
    }
}
