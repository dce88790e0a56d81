//! Command-line walk-through of a booking session.
//!
//! Loads configuration (and `.env`), then drives one booking through every
//! step with sample data, printing the progress bar as it goes, the
//! confirmation summary, and the final state as JSON.

use anyhow::Context;
use booking_wizard::{
    BillingAddress, BookingAction, BookingEnvironment, BookingReducer, BookingState, Config,
    ConfirmationSummary, PaymentDetails, RecipientDetails, SelectionsPatch,
};
use booking_wizard::recipient::{Gender, PhoneNumber, SupportNeeds, Title};
use booking_wizard_core::environment::{Clock, SystemClock, ThreadRandom};
use booking_wizard_runtime::Store;
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = Config::from_env().context("loading configuration")?;
    tracing::info!(steps = config.steps.len(), "configuration loaded");

    let clock = Arc::new(SystemClock);
    let today = clock.today();
    let env = BookingEnvironment::new(clock, Arc::new(ThreadRandom), config.settings.clone());
    let mut store = Store::with_config(
        BookingState::new(config.wizard()?),
        BookingReducer::new(),
        env,
        config.store,
    );

    println!("=== Booking Wizard ===\n");
    print_progress(&store);

    let from = date(2024, 12, 1)?;
    let to = date(2024, 12, 7)?;

    let script = [
        BookingAction::SubmitSelections {
            patch: SelectionsPatch::new()
                .location("Leeds - City Centre")
                .service_type("Mentor/Companion")
                .dates(from, to)
                .party(1, 1),
        },
        BookingAction::Continue,
        BookingAction::SubmitDetails {
            booker: sample_booker()?,
            recipients: vec![sample_recipient()?],
        },
        BookingAction::SubmitPayment {
            details: PaymentDetails {
                cardholder_name: "Kareemah Ross".to_string(),
                card_number: "4000 0566 5566 5556".to_string(),
                expiry_month: 12,
                expiry_year: today.year() + 2,
                cvv: "123".to_string(),
                billing: BillingAddress::Current,
            },
        },
    ];

    for action in script {
        let name = action.variant_name();
        let report = store.send(action).with_context(|| format!("sending {name}"))?;
        tracing::debug!(?report, "{name} processed");

        if let Some(errors) = store.state(|s| s.last_error.clone()) {
            anyhow::bail!("{name} was rejected: {errors}");
        }
        print_progress(&store);
    }

    let state = store.into_state();
    match ConfirmationSummary::build(&state, &config.settings) {
        Some(summary) => println!("\n{summary}"),
        None => println!("\nNo booking reference issued (the flow has no confirmation step)"),
    }

    println!("Final state:");
    println!("{}", serde_json::to_string_pretty(&state)?);

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booking_wizard=debug,booking_wizard_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn print_progress(store: &Store<BookingState, BookingAction, BookingEnvironment, BookingReducer>) {
    let (bar, title) = store.state(|s| {
        let title = s
            .wizard
            .current_step()
            .map_or_else(|| "Done".to_string(), |step| step.name.clone());
        (s.wizard.to_string(), title)
    });
    println!("{bar}\n  -> {title}");
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("invalid date {year}-{month}-{day}"))
}

fn sample_booker() -> anyhow::Result<RecipientDetails> {
    Ok(RecipientDetails {
        title: Some(Title::Ms),
        first_name: "Kareemah".to_string(),
        last_name: "Ross".to_string(),
        email: "kareemah.ross@example.co.uk".to_string(),
        mobile: PhoneNumber::new("+44", "7700 900123"),
        landline: PhoneNumber::default(),
        date_of_birth: Some(date(1984, 6, 9)?),
        gender: Some(Gender::Female),
        nationality: "United Kingdom".to_string(),
        postcode: "LS1 4DY".to_string(),
        address_lines: ["12 Park Row".to_string(), String::new(), String::new()],
        support: no_support_needs(),
        occupation: "Architect".to_string(),
        relationship_to_recipient: "Parent".to_string(),
    })
}

fn sample_recipient() -> anyhow::Result<RecipientDetails> {
    Ok(RecipientDetails {
        title: None,
        first_name: "Idris".to_string(),
        email: String::new(),
        mobile: PhoneNumber::default(),
        date_of_birth: Some(date(2015, 2, 21)?),
        gender: Some(Gender::Male),
        support: SupportNeeds {
            has_allergy: Some(true),
            allergy_details: "Tree nuts".to_string(),
            ..no_support_needs()
        },
        occupation: String::new(),
        relationship_to_recipient: String::new(),
        ..sample_booker()?
    })
}

fn no_support_needs() -> SupportNeeds {
    SupportNeeds {
        has_disability: Some(false),
        has_special_educational_need: Some(false),
        has_allergy: Some(false),
        allergy_details: String::new(),
        has_dietary_requirement: Some(false),
    }
}
