//! Metric names and descriptions for the Store.
//!
//! The Store records through the `metrics` facade only. Nothing is exported
//! unless the embedding application installs a recorder; without one every
//! call is a no-op.

use metrics::{describe_counter, describe_histogram, Unit};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Counter: actions processed by any Store (including dispatched ones)
pub const ACTIONS_TOTAL: &str = "store.actions.total";

/// Counter: effects executed, labelled by `type`
pub const EFFECTS_EXECUTED: &str = "store.effects.executed";

/// Counter: sends aborted because the dispatch limit was hit
pub const FEEDBACK_LIMIT_EXCEEDED: &str = "store.feedback_limit.exceeded";

/// Histogram: time spent inside `Reducer::reduce`
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";

/// Register descriptions for every Store metric.
///
/// Call once after installing a recorder so exporters can show help text.
pub fn register_metrics() {
    describe_counter!(
        ACTIONS_TOTAL,
        Unit::Count,
        "Actions processed by the store, including dispatched follow-ups"
    );
    describe_counter!(
        EFFECTS_EXECUTED,
        Unit::Count,
        "Effects executed by the store, labelled by effect type"
    );
    describe_counter!(
        FEEDBACK_LIMIT_EXCEEDED,
        Unit::Count,
        "Sends aborted because dispatched actions exceeded the configured limit"
    );
    describe_histogram!(
        REDUCER_DURATION,
        Unit::Seconds,
        "Time spent in the reducer for a single action"
    );
}
