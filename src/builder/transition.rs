//! Builder for constructing a single named transition.

use crate::builder::error::BuildError;
use crate::core::{Action, Guard, State, Transition};
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
///
/// ```
/// use turnstile::builder::TransitionBuilder;
///
/// let open = TransitionBuilder::<String, u32>::new("open")
///     .from("AJAR".to_string())
///     .to("OPEN".to_string())
///     .when(|degree| *degree >= 99)
///     .action(|degree| *degree = 100)
///     .build()
///     .unwrap();
///
/// assert!(open.allows(&99));
/// assert!(!open.allows(&50));
/// ```
pub struct TransitionBuilder<S: State, C> {
    name: String,
    from: Option<S>,
    to: Option<S>,
    guard: Option<Guard<C>>,
    action: Option<Action<C>>,
}

impl<S: State, C> TransitionBuilder<S, C> {
    /// Create a new transition builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: None,
            to: None,
            guard: None,
            action: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<C>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Set the action run on the context after the state changes (optional).
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S, C>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(Transition {
            name: self.name,
            start: from,
            end: to,
            guard: self.guard,
            action: self.action,
        })
    }
}
