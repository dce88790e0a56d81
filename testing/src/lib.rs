//! # Booking Wizard Testing
//!
//! Testing utilities and helpers for the booking wizard.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - Given-When-Then reducer tests ([`ReducerTest`])
//! - Assertion helpers for effects
//! - proptest strategies for common inputs
//!
//! ## Example
//!
//! ```ignore
//! use booking_wizard_testing::{test_clock, FixedRandom, ReducerTest};
//!
//! ReducerTest::new(BookingReducer::new())
//!     .with_env(BookingEnvironment::new(Arc::new(test_clock()), Arc::new(FixedRandom::new(42)), settings))
//!     .given_state(BookingState::default())
//!     .when_action(BookingAction::Continue)
//!     .then_state(|state| assert_eq!(state.wizard.current_index(), 2))
//!     .run();
//! ```

use booking_wizard_core::environment::{Clock, RandomSource};
use chrono::{DateTime, Utc};


pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, RandomSource, Utc};
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use booking_wizard_testing::mocks::FixedClock;
    /// use booking_wizard_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2024-11-20 09:30:00 UTC)
    ///
    /// The date sits shortly before the sample December booking used
    /// throughout the test suites.
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2024-11-20T09:30:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Random source that always draws the same value
    ///
    /// The value is reduced modulo the requested bound.
    ///
    /// ```
    /// use booking_wizard_testing::mocks::FixedRandom;
    /// use booking_wizard_core::environment::RandomSource;
    ///
    /// let random = FixedRandom::new(42);
    /// assert_eq!(random.next_below(1_000_000), 42);
    /// assert_eq!(random.next_below(10), 2);
    /// ```
    #[derive(Debug, Clone, Copy)]
    pub struct FixedRandom {
        value: u32,
    }

    impl FixedRandom {
        /// Create a random source pinned to `value`
        #[must_use]
        pub const fn new(value: u32) -> Self {
            Self { value }
        }
    }

    impl RandomSource for FixedRandom {
        fn next_below(&self, upper: u32) -> u32 {
            if upper == 0 { 0 } else { self.value % upper }
        }
    }

    /// Random source yielding `start, start + 1, start + 2, ...`
    ///
    /// Useful to observe that a value was drawn again.
    #[derive(Debug)]
    pub struct SequenceRandom {
        next: AtomicU32,
    }

    impl SequenceRandom {
        /// Create a sequence starting at `start`
        #[must_use]
        pub const fn new(start: u32) -> Self {
            Self {
                next: AtomicU32::new(start),
            }
        }
    }

    impl RandomSource for SequenceRandom {
        fn next_below(&self, upper: u32) -> u32 {
            let value = self.next.fetch_add(1, Ordering::SeqCst);
            if upper == 0 { 0 } else { value % upper }
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Safe to call from every test; only the first call installs anything.
    /// Honours `RUST_LOG`, defaulting to `debug`.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "debug".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities
///
/// proptest strategies for inputs shared across the booking suites.
pub mod properties {
    use chrono::NaiveDate;
    use proptest::prelude::*;

    /// Any calendar date between 2020 and 2030
    pub fn any_date() -> impl Strategy<Value = NaiveDate> {
        // 2020-01-01 plus up to ~11 years of days
        (0i64..4_000).prop_map(|offset| {
            NaiveDate::from_ymd_opt(2020, 1, 1)
                .and_then(|start| start.checked_add_signed(chrono::Duration::days(offset)))
                .unwrap_or(NaiveDate::MIN)
        })
    }

    /// Location strings, biased towards the ones with known prefixes
    pub fn any_location() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("London - Chelsea".to_string()),
            Just("Manchester".to_string()),
            Just("Leeds - City Centre".to_string()),
            Just("York".to_string()),
            "[A-Za-z -]{0,24}",
        ]
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock, FixedRandom, SequenceRandom};
