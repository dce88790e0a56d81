//! The step wizard: an ordered, fixed list of steps and a pointer into it.
//!
//! The pointer is 1-based and may sit one past the last step. That overflow
//! position is a terminal display ("coming soon"), not an error; only
//! [`WizardState::jump_to`] and [`WizardState::reset`] leave it.
//!
//! Boundary transitions are silent no-ops. Every transition returns whether
//! it changed anything.

use crate::error::WizardError;
use booking_wizard_core::{effect::Effect, reducer::Reducer, SmallVec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Step names of the standard booking flow
pub const DEFAULT_STEPS: [&str; 5] = ["Service", "Pricing", "Details", "Payment", "Confirmation"];

/// One stage of the wizard
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Position in the flow, starting at 1
    pub id: u32,
    /// Display label
    pub name: String,
    /// The wizard has moved past this step
    pub completed: bool,
    /// This is the active step
    pub current: bool,
}

impl Step {
    fn new(id: u32, name: String) -> Self {
        Self {
            id,
            name,
            completed: false,
            current: id == 1,
        }
    }

    /// How a progress indicator should draw this step
    ///
    /// A completed mark wins over the current mark.
    #[must_use]
    pub const fn status(&self) -> StepStatus {
        if self.completed {
            StepStatus::Completed
        } else if self.current {
            StepStatus::Current
        } else {
            StepStatus::Upcoming
        }
    }
}

/// Visual state of a step in the progress indicator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    /// Already passed
    Completed,
    /// Active
    Current,
    /// Not reached yet
    Upcoming,
}

/// Wizard state: the steps and the active position
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    steps: Vec<Step>,
    current_index: u32,
}

impl WizardState {
    /// Create a wizard over `names`, in traversal order
    ///
    /// Step 1 starts current; nothing is completed.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NoSteps`] for an empty list and
    /// [`WizardError::TooManySteps`] if the ids would not fit in a `u32`.
    pub fn new<I, N>(names: I) -> Result<Self, WizardError>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let steps = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                u32::try_from(i + 1)
                    .map(|id| Step::new(id, name.into()))
                    .map_err(|_| WizardError::TooManySteps { count: i + 1 })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }

        Ok(Self {
            steps,
            current_index: 1,
        })
    }

    /// All steps in order
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The active position, `1..=step_count() + 1`
    #[must_use]
    pub const fn current_index(&self) -> u32 {
        self.current_index
    }

    /// Number of steps (N)
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // length checked in `new`
    pub fn step_count(&self) -> u32 {
        self.steps.len() as u32
    }

    /// The active step, `None` in the overflow position
    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        self.step(self.current_index)
    }

    /// Step by id
    #[must_use]
    pub fn step(&self, id: u32) -> Option<&Step> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.steps.get(index)
    }

    /// True if a step is called `name`
    #[must_use]
    pub fn has_step(&self, name: &str) -> bool {
        self.steps.iter().any(|step| step.name == name)
    }

    /// True once the wizard advanced past the last step
    #[must_use]
    pub fn is_overflow(&self) -> bool {
        self.current_index > self.step_count()
    }

    /// True while the last defined step is active
    #[must_use]
    pub fn is_on_last_step(&self) -> bool {
        self.current_index == self.step_count()
    }

    /// True on the last step or past it
    #[must_use]
    pub fn has_reached_last_step(&self) -> bool {
        self.current_index >= self.step_count()
    }

    /// Number of steps marked completed
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }

    /// Every step with how it should be drawn
    pub fn progress(&self) -> impl Iterator<Item = (&Step, StepStatus)> {
        self.steps.iter().map(|step| (step, step.status()))
    }

    fn step_mut(&mut self, id: u32) -> Option<&mut Step> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.steps.get_mut(index)
    }

    /// Complete the active step and move to the next one
    ///
    /// From the last step this moves into the overflow position, where no
    /// step is current. In the overflow position it does nothing.
    pub fn advance(&mut self) -> bool {
        if self.is_overflow() {
            tracing::debug!(current = self.current_index, "advance ignored: past the last step");
            return false;
        }

        let from = self.current_index;
        if let Some(step) = self.step_mut(from) {
            step.completed = true;
            step.current = false;
        }
        if let Some(next) = self.step_mut(from + 1) {
            next.current = true;
        }
        self.current_index = from + 1;

        tracing::debug!(from, to = self.current_index, "advanced");
        true
    }

    /// Move back one step
    ///
    /// Both the step being left and the step returned to lose their
    /// completed mark. Does nothing on step 1.
    pub fn retreat(&mut self) -> bool {
        if self.current_index <= 1 {
            tracing::debug!("retreat ignored: already on the first step");
            return false;
        }

        let from = self.current_index;
        if let Some(step) = self.step_mut(from) {
            step.completed = false;
            step.current = false;
        }
        if let Some(previous) = self.step_mut(from - 1) {
            previous.completed = false;
            previous.current = true;
        }
        self.current_index = from - 1;

        tracing::debug!(from, to = self.current_index, "retreated");
        true
    }

    /// Back to step 1 with nothing completed
    pub fn reset(&mut self) {
        for step in &mut self.steps {
            step.completed = false;
            step.current = step.id == 1;
        }
        self.current_index = 1;
        tracing::debug!("wizard reset");
    }

    /// Make `step_id` active
    ///
    /// Every earlier step becomes completed, every later one upcoming.
    /// Ids outside `1..=N` are ignored.
    pub fn jump_to(&mut self, step_id: u32) -> bool {
        if step_id == 0 || step_id > self.step_count() {
            tracing::debug!(step_id, "jump ignored: no such step");
            return false;
        }

        for step in &mut self.steps {
            step.current = step.id == step_id;
            step.completed = step.id < step_id;
        }
        let from = self.current_index;
        self.current_index = step_id;

        tracing::debug!(from, to = step_id, "jumped");
        true
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS
                .iter()
                .zip(1..)
                .map(|(name, id)| Step::new(id, (*name).to_string()))
                .collect(),
            current_index: 1,
        }
    }
}

/// Renders the progress bar: `[x] Service > [*] Pricing > [ ] Details`
impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (step, status)) in self.progress().enumerate() {
            if i > 0 {
                write!(f, " > ")?;
            }
            let mark = match status {
                StepStatus::Completed => 'x',
                StepStatus::Current => '*',
                StepStatus::Upcoming => ' ',
            };
            write!(f, "[{mark}] {}", step.name)?;
        }
        Ok(())
    }
}

/// Wizard transitions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardAction {
    /// Complete the active step and move forward
    Advance,
    /// Move back one step
    Retreat,
    /// Start over from step 1
    Reset,
    /// Jump straight to a step
    JumpTo(u32),
}

/// Reducer for [`WizardState`]
///
/// Needs nothing from its environment, so it fits into any parent reducer
/// whatever that parent injects.
pub struct WizardReducer<E> {
    _environment: PhantomData<fn(&E)>,
}

impl<E> WizardReducer<E> {
    /// Creates a new `WizardReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _environment: PhantomData,
        }
    }
}

impl<E> Default for WizardReducer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for WizardReducer<E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for WizardReducer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardReducer").finish()
    }
}

impl<E> Reducer for WizardReducer<E> {
    type State = WizardState;
    type Action = WizardAction;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            WizardAction::Advance => {
                state.advance();
            },
            WizardAction::Retreat => {
                state.retreat();
            },
            WizardAction::Reset => state.reset(),
            WizardAction::JumpTo(step_id) => {
                state.jump_to(step_id);
            },
        }
        SmallVec::new()
    }
}
