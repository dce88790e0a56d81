//! # Booking Wizard Core
//!
//! Core traits and types for the booking wizard.
//!
//! The booking flow is modelled with the Reducer pattern:
//!
//! - **State**: Domain state for one booking session
//! - **Action**: All possible inputs to a reducer (commands and events)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Descriptions of follow-up work (not execution)
//! - **Environment**: Injected dependencies via traits (clock, randomness)
//!
//! Everything in this crate is synchronous. A booking session has a single
//! mutator at a time, so effects never suspend: the only feedback an effect
//! can produce is another action dispatched into the same reducer.
//!
//! ## Example
//!
//! ```
//! use booking_wizard_core::{smallvec, Effect, Reducer, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct StepState {
//!     current: u32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum StepAction {
//!     Next,
//! }
//!
//! struct StepReducer;
//!
//! impl Reducer for StepReducer {
//!     type State = StepState;
//!     type Action = StepAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut StepState,
//!         action: StepAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<StepAction>; 4]> {
//!         match action {
//!             StepAction::Next => state.current += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = StepState::default();
//! let _ = StepReducer.reduce(&mut state, StepAction::Next, &());
//! assert_eq!(state.current, 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, NaiveDate, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

pub use effect::Effect;
pub use reducer::Reducer;

/// Reducer composition utilities
pub mod composition;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe follow-up work for the runtime. They are values (not
/// execution) and can be composed and inspected in tests.
pub mod effect {
    /// Effect type - describes follow-up work to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the Store.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run a group of effects; ordering between them carries no meaning
        Parallel(Vec<Effect<Action>>),

        /// Run effects strictly one after another
        Sequential(Vec<Effect<Action>>),

        /// Feed an action back into the reducer that produced this effect
        Dispatch(Box<Action>),
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run as a group
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Dispatch a follow-up action
        #[must_use]
        pub fn dispatch(action: Action) -> Effect<Action> {
            Effect::Dispatch(Box::new(action))
        }

        /// Returns true if this effect does nothing
        ///
        /// Empty groups count as no-ops.
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    effects.iter().all(Effect::is_none)
                },
                Effect::Dispatch(_) => false,
            }
        }

        /// Lift an effect into a parent action type
        ///
        /// Used when a child reducer runs inside a larger one: every action
        /// the child dispatches is wrapped into the parent's action type.
        #[must_use]
        pub fn map<B>(self, f: fn(Action) -> B) -> Effect<B> {
            match self {
                Effect::None => Effect::None,
                Effect::Parallel(effects) => {
                    Effect::Parallel(effects.into_iter().map(|e| e.map(f)).collect())
                },
                Effect::Sequential(effects) => {
                    Effect::Sequential(effects.into_iter().map(|e| e.map(f)).collect())
                },
                Effect::Dispatch(action) => Effect::Dispatch(Box::new(f(*action))),
            }
        }

        /// Collect every dispatched action, in execution order
        #[must_use]
        pub fn dispatched(&self) -> Vec<&Action> {
            match self {
                Effect::None => Vec::new(),
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    effects.iter().flat_map(Effect::dispatched).collect()
                },
                Effect::Dispatch(action) => vec![action.as_ref()],
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All sources of non-determinism are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, NaiveDate, Utc};
    use rand::Rng;

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_wizard_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// assert_eq!(clock.today(), clock.now().date_naive());
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;

        /// Get the current calendar date (UTC)
        fn today(&self) -> NaiveDate {
            self.now().date_naive()
        }
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of uniformly distributed integers
    ///
    /// Booking references carry a random suffix; tests swap in a
    /// deterministic source.
    pub trait RandomSource: Send + Sync {
        /// Draw a value in `0..upper`
        ///
        /// An `upper` of zero always yields zero.
        fn next_below(&self, upper: u32) -> u32;
    }

    /// Production randomness backed by the thread-local RNG
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ThreadRandom;

    impl RandomSource for ThreadRandom {
        fn next_below(&self, upper: u32) -> u32 {
            if upper == 0 {
                return 0;
            }
            rand::thread_rng().gen_range(0..upper)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use super::environment::{RandomSource, ThreadRandom};

    #[derive(Clone, Debug, PartialEq)]
    enum Child {
        Ping,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Parent {
        Child(Child),
    }

    #[test]
    fn test_effect_map_lifts_dispatches() {
        let effect = Effect::chain(vec![Effect::None, Effect::dispatch(Child::Ping)]);
        let lifted = effect.map(Parent::Child);

        assert_eq!(lifted.dispatched(), vec![&Parent::Child(Child::Ping)]);
    }

    #[test]
    fn test_effect_is_none() {
        assert!(Effect::<Child>::None.is_none());
        assert!(Effect::<Child>::merge(vec![Effect::None, Effect::None]).is_none());
        assert!(!Effect::dispatch(Child::Ping).is_none());
    }

    #[test]
    fn test_thread_random_stays_in_range() {
        let random = ThreadRandom;
        for _ in 0..1_000 {
            assert!(random.next_below(10) < 10);
        }
        assert_eq!(random.next_below(0), 0);
    }
}
