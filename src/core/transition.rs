//! Named transitions between states.

use super::guard::Guard;
use super::state::State;
use std::fmt;
use std::sync::Arc;

/// Side-effecting procedure run against the context after the state changed.
pub type Action<C> = Arc<dyn Fn(&mut C) + Send + Sync>;

/// A named, directed edge between two states.
///
/// Identity is by `name`. Guard and action are optional: a missing guard
/// always passes and a missing action does nothing.
pub struct Transition<S: State, C> {
    pub name: String,
    pub start: S,
    pub end: S,
    pub guard: Option<Guard<C>>,
    pub action: Option<Action<C>>,
}

impl<S: State, C> Transition<S, C> {
    /// Create a transition without guard or action.
    pub fn new(name: impl Into<String>, start: S, end: S) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            guard: None,
            action: None,
        }
    }

    /// Attach a guard, replacing any existing one.
    pub fn with_guard<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Attach an action, replacing any existing one.
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Check if this transition departs from `current`.
    pub fn is_from(&self, current: &S) -> bool {
        *current == self.start
    }

    /// Evaluate the guard against the context. No guard means allowed.
    pub fn allows(&self, context: &C) -> bool {
        self.guard.as_ref().is_none_or(|g| g.check(context))
    }

    /// Run the action, if any.
    pub fn run_action(&self, context: &mut C) {
        if let Some(action) = &self.action {
            action(context);
        }
    }
}

impl<S: State, C> Clone for Transition<S, C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
            guard: self.guard.clone(),
            action: self.action.as_ref().map(Arc::clone),
        }
    }
}

impl<S: State, C> fmt::Debug for Transition<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("name", &self.name)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("guarded", &self.guard.is_some())
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Start,
        Middle,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::Middle => "Middle",
            }
        }
    }

    #[test]
    fn is_from_matches_start_state() {
        let transition: Transition<TestState, u32> =
            Transition::new("advance", TestState::Start, TestState::Middle);

        assert!(transition.is_from(&TestState::Start));
        assert!(!transition.is_from(&TestState::Middle));
    }

    #[test]
    fn unguarded_transition_always_allows() {
        let transition: Transition<TestState, u32> =
            Transition::new("advance", TestState::Start, TestState::Middle);

        assert!(transition.allows(&0));
        assert!(transition.allows(&u32::MAX));
    }

    #[test]
    fn guard_is_evaluated_against_context() {
        let transition: Transition<TestState, u32> =
            Transition::new("advance", TestState::Start, TestState::Middle)
                .with_guard(|c| *c >= 10);

        assert!(!transition.allows(&9));
        assert!(transition.allows(&10));
    }

    #[test]
    fn run_action_mutates_context() {
        let transition: Transition<TestState, u32> =
            Transition::new("advance", TestState::Start, TestState::Middle)
                .with_action(|c| *c += 1);

        let mut context = 41;
        transition.run_action(&mut context);
        assert_eq!(context, 42);
    }

    #[test]
    fn run_action_without_action_is_noop() {
        let transition: Transition<TestState, u32> =
            Transition::new("advance", TestState::Start, TestState::Middle);

        let mut context = 7;
        transition.run_action(&mut context);
        assert_eq!(context, 7);
    }
}
