//! Observer callbacks fired after a transition changed the state.

use super::error::HookResult;
use crate::core::State;
use std::collections::HashMap;
use std::sync::Arc;

/// Callback keyed by transition name or destination state.
pub type Callback<C> = Arc<dyn Fn(&C) -> HookResult + Send + Sync>;

/// Callback run after every transition. Receives the transition name.
pub type TransitionCallback<C> = Arc<dyn Fn(&str, &C) -> HookResult + Send + Sync>;

/// Callback run after every state change. Receives the new state.
pub type StateCallback<S, C> = Arc<dyn Fn(&S, &C) -> HookResult + Send + Sync>;

/// The four callback registries.
///
/// Order within a registry is registration order. Dispatch runs
/// by-name, all-transitions, by-destination-state, all-states, and stops
/// at the first callback that fails.
pub struct Callbacks<S: State, C> {
    by_transition: HashMap<String, Vec<Callback<C>>>,
    all_transitions: Vec<TransitionCallback<C>>,
    by_state: HashMap<S, Vec<Callback<C>>>,
    all_states: Vec<StateCallback<S, C>>,
}

impl<S: State, C> Callbacks<S, C> {
    pub fn new() -> Self {
        Self {
            by_transition: HashMap::new(),
            all_transitions: Vec::new(),
            by_state: HashMap::new(),
            all_states: Vec::new(),
        }
    }

    pub fn on_transition<F>(&mut self, name: impl Into<String>, callback: F)
    where
        F: Fn(&C) -> HookResult + Send + Sync + 'static,
    {
        self.by_transition
            .entry(name.into())
            .or_default()
            .push(Arc::new(callback));
    }

    pub fn on_any_transition<F>(&mut self, callback: F)
    where
        F: Fn(&str, &C) -> HookResult + Send + Sync + 'static,
    {
        self.all_transitions.push(Arc::new(callback));
    }

    pub fn on_state<F>(&mut self, state: S, callback: F)
    where
        F: Fn(&C) -> HookResult + Send + Sync + 'static,
    {
        self.by_state
            .entry(state)
            .or_default()
            .push(Arc::new(callback));
    }

    pub fn on_any_state<F>(&mut self, callback: F)
    where
        F: Fn(&S, &C) -> HookResult + Send + Sync + 'static,
    {
        self.all_states.push(Arc::new(callback));
    }

    /// Total number of registered callbacks across all registries.
    pub fn len(&self) -> usize {
        self.by_transition.values().map(Vec::len).sum::<usize>()
            + self.all_transitions.len()
            + self.by_state.values().map(Vec::len).sum::<usize>()
            + self.all_states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Notify observers that `name` moved the machine into `state`.
    pub fn dispatch(&self, name: &str, state: &S, context: &C) -> HookResult {
        if let Some(callbacks) = self.by_transition.get(name) {
            for callback in callbacks {
                callback(context)?;
            }
        }

        for callback in &self.all_transitions {
            callback(name, context)?;
        }

        if let Some(callbacks) = self.by_state.get(state) {
            for callback in callbacks {
                callback(context)?;
            }
        }

        for callback in &self.all_states {
            callback(state, context)?;
        }

        Ok(())
    }
}

impl<S: State, C> Default for Callbacks<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, C> Clone for Callbacks<S, C> {
    fn clone(&self) -> Self {
        Self {
            by_transition: self.by_transition.clone(),
            all_transitions: self.all_transitions.clone(),
            by_state: self.by_state.clone(),
            all_states: self.all_states.clone(),
        }
    }
}
