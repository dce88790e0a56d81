//! # Booking Wizard Runtime
//!
//! Runtime implementation for the booking wizard.
//!
//! This crate provides the Store that coordinates reducer execution and
//! effect handling for a single booking session.
//!
//! ## Core Components
//!
//! - **Store**: Owns the session state, runs the reducer, executes effects
//! - **Effect Executor**: Flattens effect groups and queues dispatched actions
//! - **Feedback Loop**: action → reducer → effects → action, until quiet
//!
//! Everything happens synchronously inside [`Store::send`]. A session has
//! exactly one mutator, so the Store takes `&mut self` instead of locking.
//!
//! ## Example
//!
//! ```ignore
//! use booking_wizard_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action; dispatched follow-ups run before this returns
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use booking_wizard_core::{effect::Effect, reducer::Reducer};

/// Metric names recorded by the Store
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Dispatched actions kept producing more actions
        ///
        /// State changes made before the limit was hit are kept.
        #[error("Processed {limit} actions for a single send without settling")]
        FeedbackLimitExceeded {
            /// The configured limit
            limit: usize,
        },
    }
}

pub use error::StoreError;
pub use store::{SendReport, Store};

/// Store configuration
///
/// # Example
///
/// ```
/// use booking_wizard_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_actions_per_send(8);
/// assert_eq!(config.max_actions_per_send, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Upper bound on actions processed by one `send` (the sent action
    /// plus everything it dispatches, transitively)
    pub max_actions_per_send: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_actions_per_send: usize) -> Self {
        Self {
            max_actions_per_send,
        }
    }

    /// Set the dispatch limit
    #[must_use]
    pub const fn with_max_actions_per_send(mut self, limit: usize) -> Self {
        self.max_actions_per_send = limit;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_actions_per_send: 32,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Effect, Reducer, StoreConfig, StoreError};
    use crate::metrics::{
        counter, histogram, ACTIONS_TOTAL, EFFECTS_EXECUTED, FEEDBACK_LIMIT_EXCEEDED,
        REDUCER_DURATION,
    };
    use std::collections::VecDeque;

    /// Summary of one [`Store::send`] call
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SendReport {
        /// Actions processed, the sent action included
        pub actions_processed: usize,
        /// Effects executed (groups count once, plus their members)
        pub effects_executed: usize,
    }

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (owned, one session per store)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: std::fmt::Debug,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with a custom configuration
        #[must_use]
        pub const fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                config,
            }
        }

        /// Send an action to the store
        ///
        /// Runs the reducer, executes the returned effects, and keeps
        /// processing dispatched actions (first in, first out) until none
        /// remain.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackLimitExceeded`] if more than
        /// `max_actions_per_send` actions would be processed. Actions still
        /// queued at that point are dropped.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> Result<SendReport, StoreError> {
            let mut report = SendReport::default();
            let mut queue = VecDeque::from([action]);

            while let Some(action) = queue.pop_front() {
                if report.actions_processed >= self.config.max_actions_per_send {
                    let limit = self.config.max_actions_per_send;
                    tracing::warn!(
                        limit,
                        dropped = queue.len() + 1,
                        "Dispatch limit reached, dropping queued actions"
                    );
                    counter!(FEEDBACK_LIMIT_EXCEEDED).increment(1);
                    return Err(StoreError::FeedbackLimitExceeded { limit });
                }

                tracing::debug!(?action, "Processing action");
                counter!(ACTIONS_TOTAL).increment(1);
                report.actions_processed += 1;

                let effects = {
                    let span = tracing::debug_span!("reducer_execution");
                    let _enter = span.enter();

                    let start = std::time::Instant::now();
                    let effects = self.reducer.reduce(&mut self.state, action, &self.environment);
                    histogram!(REDUCER_DURATION).record(start.elapsed().as_secs_f64());

                    tracing::trace!("Reducer completed, returned {} effects", effects.len());
                    effects
                };

                for effect in effects {
                    Self::execute_effect(effect, &mut queue, &mut report);
                }
            }

            tracing::debug!(
                actions = report.actions_processed,
                effects = report.effects_executed,
                "Send completed"
            );
            Ok(report)
        }

        /// Execute one effect, queueing any dispatched action
        fn execute_effect(effect: Effect<A>, queue: &mut VecDeque<A>, report: &mut SendReport) {
            report.effects_executed += 1;
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                    counter!(EFFECTS_EXECUTED, "type" => "none").increment(1);
                },
                Effect::Parallel(effects) => {
                    tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                    counter!(EFFECTS_EXECUTED, "type" => "parallel").increment(1);
                    for effect in effects {
                        Self::execute_effect(effect, queue, report);
                    }
                },
                Effect::Sequential(effects) => {
                    tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                    counter!(EFFECTS_EXECUTED, "type" => "sequential").increment(1);
                    for effect in effects {
                        Self::execute_effect(effect, queue, report);
                    }
                },
                Effect::Dispatch(action) => {
                    tracing::trace!(?action, "Executing Effect::Dispatch");
                    counter!(EFFECTS_EXECUTED, "type" => "dispatch").increment(1);
                    queue.push_back(*action);
                },
            }
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let step = store.state(|s| s.wizard.current_index());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Borrow the injected environment
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// Consume the store, returning the final state
        pub fn into_state(self) -> S {
            self.state
        }
    }
}
