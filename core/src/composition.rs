//! Reducer composition utilities
//!
//! A feature reducer written against its own small state and action types
//! can be embedded into a larger reducer with [`scope_reducer`]:
//!
//! - the parent state exposes the child state through a projection
//! - the parent action type is narrowed to the child actions it carries
//! - child effects are lifted back into the parent action type
//!
//! # Examples
//!
//! ```
//! use booking_wizard_core::composition::scope_reducer;
//! use booking_wizard_core::{smallvec, Effect, Reducer, SmallVec};
//!
//! #[derive(Clone, Default)]
//! struct CounterState {
//!     count: i32,
//! }
//!
//! #[derive(Clone)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! #[derive(Clone, Default)]
//! struct AppState {
//!     counter: CounterState,
//!     title: String,
//! }
//!
//! #[derive(Clone)]
//! enum AppAction {
//!     Counter(CounterAction),
//!     Rename(String),
//! }
//!
//! let scoped = scope_reducer(
//!     CounterReducer,
//!     |app: &mut AppState| &mut app.counter,
//!     |action: &AppAction| match action {
//!         AppAction::Counter(inner) => Some(inner.clone()),
//!         AppAction::Rename(_) => None,
//!     },
//!     AppAction::Counter,
//! );
//!
//! let mut state = AppState::default();
//! let _ = scoped.reduce(&mut state, AppAction::Counter(CounterAction::Increment), &());
//! let _ = scoped.reduce(&mut state, AppAction::Rename("ignored".into()), &());
//! assert_eq!(state.counter.count, 1);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Scopes a child reducer to a sub-state and a subset of parent actions.
///
/// # Type Parameters
///
/// - `S`: The parent state type
/// - `A`: The parent action type
/// - `R`: The child reducer (its environment is shared with the parent)
///
/// # Arguments
///
/// - `reducer`: The child reducer
/// - `project`: Borrows the child state out of the parent state
/// - `extract`: Narrows a parent action to a child action, `None` to skip
/// - `embed`: Wraps a child action produced by an effect into a parent action
pub fn scope_reducer<S, A, R>(
    reducer: R,
    project: fn(&mut S) -> &mut R::State,
    extract: fn(&A) -> Option<R::Action>,
    embed: fn(R::Action) -> A,
) -> ScopedReducer<S, A, R>
where
    R: Reducer,
{
    ScopedReducer {
        reducer,
        project,
        extract,
        embed,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, A, R>
where
    R: Reducer,
{
    reducer: R,
    project: fn(&mut S) -> &mut R::State,
    extract: fn(&A) -> Option<R::Action>,
    embed: fn(R::Action) -> A,
}

impl<S, A, R> ScopedReducer<S, A, R>
where
    R: Reducer,
{
    /// Returns true if the child reducer handles this parent action
    #[must_use]
    pub fn handles(&self, action: &A) -> bool {
        (self.extract)(action).is_some()
    }
}

impl<S, A, R> Reducer for ScopedReducer<S, A, R>
where
    R: Reducer,
{
    type State = S;
    type Action = A;
    type Environment = R::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(child_action) = (self.extract)(&action) else {
            return SmallVec::new();
        };

        let child_state = (self.project)(state);

        self.reducer
            .reduce(child_state, child_action, env)
            .into_iter()
            .map(|effect| effect.map(self.embed))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smallvec;

    #[derive(Clone, Default)]
    struct SubState {
        value: i32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum SubAction {
        Add(i32),
        Echo,
    }

    struct SubReducer;

    impl Reducer for SubReducer {
        type State = SubState;
        type Action = SubAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                SubAction::Add(n) => {
                    state.value += n;
                    smallvec![Effect::None]
                },
                SubAction::Echo => smallvec![Effect::dispatch(SubAction::Add(1))],
            }
        }
    }

    #[derive(Clone, Default)]
    struct ParentState {
        sub: SubState,
        other: String,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum ParentAction {
        Sub(SubAction),
        Other,
    }

    fn scoped() -> ScopedReducer<ParentState, ParentAction, SubReducer> {
        scope_reducer(
            SubReducer,
            |parent: &mut ParentState| &mut parent.sub,
            |action: &ParentAction| match action {
                ParentAction::Sub(inner) => Some(inner.clone()),
                ParentAction::Other => None,
            },
            ParentAction::Sub,
        )
    }

    #[test]
    fn test_scope_reducer_updates_sub_state() {
        let scoped = scoped();
        let mut state = ParentState {
            sub: SubState { value: 5 },
            other: "test".to_string(),
        };

        let _ = scoped.reduce(&mut state, ParentAction::Sub(SubAction::Add(3)), &());
        assert_eq!(state.sub.value, 8);
        assert_eq!(state.other, "test");
    }

    #[test]
    fn test_scope_reducer_skips_foreign_actions() {
        let scoped = scoped();
        let mut state = ParentState::default();

        let effects = scoped.reduce(&mut state, ParentAction::Other, &());
        assert!(effects.is_empty());
        assert!(!scoped.handles(&ParentAction::Other));
        assert!(scoped.handles(&ParentAction::Sub(SubAction::Echo)));
    }

    #[test]
    fn test_scope_reducer_lifts_effects() {
        let scoped = scoped();
        let mut state = ParentState::default();

        let effects = scoped.reduce(&mut state, ParentAction::Sub(SubAction::Echo), &());
        assert_eq!(effects.len(), 1);
        assert_eq!(
            effects[0].dispatched(),
            vec![&ParentAction::Sub(SubAction::Add(1))]
        );
    }
}
