//! Core State trait for state machine states.
//!
//! States are supplied by the embedder. The machine only needs to compare
//! them, use them as map keys and render them as a stable string.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: the current state is handed out and stored in several indices
/// - `Eq` + `Hash`: states key the departing-transition and callback maps
/// - `Debug`: states must be debuggable for diagnostics
///
/// The string form returned by [`State::name`] is what schemas and snapshots
/// carry on the wire, so it must be stable for a given value.
///
/// # Example
///
/// ```rust
/// use turnstile::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum TaskState {
///     Pending,
///     Running,
///     Complete,
/// }
///
/// impl State for TaskState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Running => "Running",
///             Self::Complete => "Complete",
///         }
///     }
/// }
///
/// assert_eq!(TaskState::Running.name(), "Running");
/// ```
pub trait State: Clone + Eq + Hash + Debug {
    /// Get the state's string form for serialization and logging.
    fn name(&self) -> &str;
}

impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Processing => "Processing",
                Self::Complete => "Complete",
            }
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing.name(), "Processing");
        assert_eq!(TestState::Complete.name(), "Complete");
    }

    #[test]
    fn string_states_use_their_contents() {
        let state = String::from("OPEN");
        assert_eq!(state.name(), "OPEN");
    }

    #[test]
    fn states_work_as_set_members() {
        let mut states = HashSet::new();
        states.insert(TestState::Initial);
        states.insert(TestState::Initial);
        states.insert(TestState::Complete);

        assert_eq!(states.len(), 2);
        assert!(states.contains(&TestState::Initial));
        assert!(!states.contains(&TestState::Processing));
    }
}
