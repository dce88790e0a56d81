//! A whole booking session driven through the store.

#![allow(clippy::unwrap_used)]

use booking_wizard::recipient::{Gender, PhoneNumber, SupportNeeds, Title};
use booking_wizard::error::ValidationError;
use booking_wizard::{
    BillingAddress, BookingAction, BookingEnvironment, BookingReducer, BookingSettings,
    BookingState, ConfirmationSummary, PaymentDetails, RecipientDetails, SelectionsPatch,
    WizardState,
};
use booking_wizard_core::environment::{Clock, RandomSource};
use booking_wizard_runtime::{StoreConfig, error::StoreError, store::Store};
use booking_wizard_testing::helpers::init_test_tracing;
use booking_wizard_testing::{FixedRandom, SequenceRandom, test_clock};
use chrono::NaiveDate;
use std::sync::Arc;

type BookingStore = Store<BookingState, BookingAction, BookingEnvironment, BookingReducer>;

fn store_with(random: Arc<dyn RandomSource>, config: StoreConfig) -> BookingStore {
    init_test_tracing();
    let env = BookingEnvironment::new(Arc::new(test_clock()), random, BookingSettings::default());
    Store::with_config(BookingState::default(), BookingReducer::new(), env, config)
}

fn store() -> BookingStore {
    store_with(Arc::new(SequenceRandom::new(42)), StoreConfig::default())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn selections(location: &str) -> BookingAction {
    BookingAction::SubmitSelections {
        patch: SelectionsPatch::new()
            .location(location)
            .service_type("Mentor/Companion")
            .dates(date(2024, 12, 1), date(2024, 12, 7))
            .party(1, 1),
    }
}

fn support() -> SupportNeeds {
    SupportNeeds {
        has_disability: Some(false),
        has_special_educational_need: Some(false),
        has_allergy: Some(false),
        allergy_details: String::new(),
        has_dietary_requirement: Some(false),
    }
}

fn details() -> BookingAction {
    let booker = RecipientDetails {
        title: Some(Title::Mr),
        first_name: "Tomasz".to_string(),
        last_name: "Nowak".to_string(),
        email: "tomasz@example.com".to_string(),
        mobile: PhoneNumber::new("+44", "7700900456"),
        landline: PhoneNumber::default(),
        date_of_birth: Some(date(1979, 9, 30)),
        gender: Some(Gender::Male),
        nationality: "Poland".to_string(),
        postcode: "M1 1AE".to_string(),
        address_lines: ["3 Piccadilly".to_string(), String::new(), String::new()],
        support: support(),
        occupation: "Engineer".to_string(),
        relationship_to_recipient: "Parent".to_string(),
    };
    let child = RecipientDetails {
        title: None,
        first_name: "Zofia".to_string(),
        email: String::new(),
        mobile: PhoneNumber::default(),
        date_of_birth: Some(date(2013, 4, 2)),
        gender: Some(Gender::Female),
        // Dropped for recipients
        occupation: "Student".to_string(),
        ..booker.clone()
    };
    BookingAction::SubmitDetails {
        booker,
        recipients: vec![child],
    }
}

fn payment() -> BookingAction {
    BookingAction::SubmitPayment {
        details: PaymentDetails {
            cardholder_name: "T Nowak".to_string(),
            card_number: "5555 5555 5555 4444".to_string(),
            expiry_month: 3,
            expiry_year: 2027,
            cvv: "737".to_string(),
            billing: BillingAddress::Current,
        },
    }
}

fn index(store: &BookingStore) -> u32 {
    store.state(|s| s.wizard.current_index())
}

fn reference(store: &BookingStore) -> Option<String> {
    store.state(|s| s.reference.as_ref().map(ToString::to_string))
}

fn complete(store: &mut BookingStore, location: &str) {
    store.send(selections(location)).unwrap();
    store.send(BookingAction::Continue).unwrap();
    store.send(details()).unwrap();
    store.send(payment()).unwrap();
}

#[test]
fn full_booking_reaches_confirmation() {
    let mut store = store();

    let report = store.send(selections("Manchester")).unwrap();
    assert_eq!(report.actions_processed, 2);
    assert_eq!(index(&store), 2);

    store.send(BookingAction::Continue).unwrap();
    assert_eq!(index(&store), 3);

    store.send(details()).unwrap();
    assert_eq!(index(&store), 4);
    assert_eq!(reference(&store), None);

    store.send(payment()).unwrap();
    assert_eq!(index(&store), 5);
    assert_eq!(reference(&store).as_deref(), Some("MAN000042"));

    let state = store.into_state();
    assert_eq!(state.wizard.completed_count(), 4);
    assert_eq!(state.confirmed_at, Some(test_clock().now()));
    assert_eq!(state.service_recipients.len(), 1);
    assert_eq!(state.service_recipients[0].occupation, "");
    assert_eq!(state.booker.as_ref().map(|b| b.occupation.as_str()), Some("Engineer"));
    assert_eq!(state.payment.as_ref().map(|p| p.card_last_four.as_str()), Some("4444"));

    let summary = ConfirmationSummary::build(&state, &BookingSettings::default()).unwrap();
    assert_eq!(summary.greeting, "Hello Tomasz Nowak");
    assert_eq!(summary.group, "1 Adult, 1 Child");
    assert_eq!(summary.price.map(|p| p.days), Some(7));
}

#[test]
fn reference_is_frozen_on_the_last_step() {
    let mut store = store();
    complete(&mut store, "London - Chelsea");
    let issued = reference(&store).unwrap();
    assert!(issued.starts_with("LON"));

    // Past the last step
    store.send(BookingAction::Continue).unwrap();
    assert!(store.state(|s| s.wizard.is_overflow()));
    assert_eq!(reference(&store), Some(issued.clone()));

    store.send(BookingAction::GoBack).unwrap();
    assert_eq!(reference(&store), Some(issued));
}

#[test]
fn going_back_discards_the_reference() {
    let mut store = store();
    complete(&mut store, "Leeds");
    assert_eq!(reference(&store).as_deref(), Some("LEE000042"));

    store.send(BookingAction::GoBack).unwrap();
    assert_eq!(index(&store), 4);
    assert_eq!(reference(&store), None);

    // Re-entering draws a fresh one
    store.send(BookingAction::Continue).unwrap();
    assert_eq!(reference(&store).as_deref(), Some("LEE000043"));
}

#[test]
fn rejected_submission_does_not_advance() {
    let mut store = store();

    let report = store
        .send(BookingAction::SubmitSelections {
            patch: SelectionsPatch::new().location("Leeds"),
        })
        .unwrap();

    assert_eq!(report.actions_processed, 1);
    assert_eq!(index(&store), 1);
    let errors = store.state(|s| s.last_error.clone()).unwrap();
    assert!(errors.has_field("serviceType"));
    assert!(errors.has_field("dateFrom"));
    assert!(errors.has_field("party"));
    assert_eq!(store.state(|s| s.selections.location.clone()), "");

    store.send(selections("Leeds")).unwrap();
    assert_eq!(index(&store), 2);
    assert_eq!(store.state(|s| s.last_error.clone()), None);
}

#[test]
fn double_submit_does_not_skip_pricing() {
    let mut store = store();

    store.send(selections("Leeds")).unwrap();
    let report = store.send(selections("Leeds")).unwrap();

    assert_eq!(report.actions_processed, 1);
    assert_eq!(index(&store), 2);
    assert_eq!(
        store.state(|s| s.wizard.current_step().map(|step| step.name.clone())),
        Some("Pricing".to_string())
    );
    let errors = store.state(|s| s.last_error.clone()).unwrap();
    assert!(errors.iter().any(|e| matches!(e, ValidationError::OutOfStep { .. })));
}

#[test]
fn repeated_submits_never_reach_confirmation() {
    let mut store = store();

    for _ in 0..4 {
        store.send(selections("Leeds")).unwrap();
    }

    assert_eq!(index(&store), 2);
    assert_eq!(reference(&store), None);
    store.state(|s| {
        assert!(s.booker.is_none());
        assert!(s.payment.is_none());
    });
}

#[test]
fn skipping_forms_withholds_the_reference() {
    let mut store = store();
    store.send(selections("Leeds")).unwrap();
    for _ in 0..3 {
        store.send(BookingAction::Continue).unwrap();
    }

    assert!(store.state(|s| s.wizard.is_on_last_step()));
    assert_eq!(reference(&store), None);

    let state = store.into_state();
    assert_eq!(ConfirmationSummary::build(&state, &BookingSettings::default()), None);
}

#[test]
fn single_step_flow_is_confirmed_from_the_start() {
    init_test_tracing();
    let env = BookingEnvironment::new(
        Arc::new(test_clock()),
        Arc::new(FixedRandom::new(31)),
        BookingSettings::default(),
    );
    let wizard = WizardState::new(["Confirmation"]).unwrap();
    let mut store = Store::new(BookingState::new(wizard), BookingReducer::new(), env);

    // Nothing to collect, so the first command confirms
    store.send(BookingAction::GoBack).unwrap();
    assert_eq!(reference(&store).as_deref(), Some("LHB000031"));

    store.send(BookingAction::Continue).unwrap();
    assert!(store.state(|s| s.wizard.is_overflow()));
    assert_eq!(reference(&store).as_deref(), Some("LHB000031"));

    store.send(BookingAction::StartOver).unwrap();
    assert!(store.state(|s| s.wizard.is_on_last_step()));
    assert_eq!(reference(&store).as_deref(), Some("LHB000031"));
}

#[test]
fn expired_card_is_rejected() {
    let mut store = store();
    store.send(BookingAction::JumpTo { step_id: 4 }).unwrap();

    let BookingAction::SubmitPayment { mut details } = payment() else {
        unreachable!()
    };
    details.expiry_year = 2024;
    details.expiry_month = 10;
    store.send(BookingAction::SubmitPayment { details }).unwrap();

    assert_eq!(index(&store), 4);
    assert!(store.state(|s| s.last_error.as_ref().is_some_and(|e| e.has_field("expiryYear"))));
    assert_eq!(store.state(|s| s.payment.clone()), None);
}

#[test]
fn start_over_forgets_everything() {
    let mut store = store();
    complete(&mut store, "Leeds");

    store.send(BookingAction::StartOver).unwrap();

    store.state(|s| assert_eq!(*s, BookingState::default()));
}

#[test]
fn dispatch_limit_stops_the_feedback_loop() {
    let mut store = store_with(
        Arc::new(SequenceRandom::new(0)),
        StoreConfig::default().with_max_actions_per_send(1),
    );

    let result = store.send(selections("Leeds"));

    assert_eq!(result, Err(StoreError::FeedbackLimitExceeded { limit: 1 }));
    // The submission was applied; the dispatched Continue was dropped
    assert_eq!(store.state(|s| s.selections.location.clone()), "Leeds");
    assert_eq!(index(&store), 1);
}
