//! Immutable transition table with name and start-state indices.

use super::state::State;
use super::transition::Transition;
use std::collections::HashMap;

/// Transitions in declaration order, indexed by name and by start state.
///
/// Built once; nothing mutates a table after construction. When two
/// transitions share a name the later one wins the name lookup, while the
/// start-state index keeps every declaration in order.
pub struct TransitionTable<S: State, C> {
    transitions: Vec<Transition<S, C>>,
    by_name: HashMap<String, usize>,
    by_start: HashMap<S, Vec<usize>>,
}

impl<S: State, C> TransitionTable<S, C> {
    pub fn new(transitions: Vec<Transition<S, C>>) -> Self {
        let mut by_name = HashMap::with_capacity(transitions.len());
        let mut by_start: HashMap<S, Vec<usize>> = HashMap::new();

        for (index, transition) in transitions.iter().enumerate() {
            by_name.insert(transition.name.clone(), index);
            by_start
                .entry(transition.start.clone())
                .or_default()
                .push(index);
        }

        Self {
            transitions,
            by_name,
            by_start,
        }
    }

    /// Look up a transition by name.
    pub fn get(&self, name: &str) -> Option<&Transition<S, C>> {
        self.by_name.get(name).map(|&i| &self.transitions[i])
    }

    /// Transitions departing `state`, in declaration order.
    pub fn departing<'a>(&'a self, state: &S) -> impl Iterator<Item = &'a Transition<S, C>> + 'a {
        self.by_start
            .get(state)
            .map(|indices| indices.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&i| &self.transitions[i])
    }

    /// All transitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Transition<S, C>> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Union of all transition endpoints, in first-seen order.
    pub fn states(&self) -> Vec<S> {
        let mut states: Vec<S> = Vec::new();
        for transition in &self.transitions {
            for state in [&transition.start, &transition.end] {
                if !states.contains(state) {
                    states.push(state.clone());
                }
            }
        }
        states
    }
}

impl<S: State, C> Clone for TransitionTable<S, C> {
    fn clone(&self) -> Self {
        Self {
            transitions: self.transitions.clone(),
            by_name: self.by_name.clone(),
            by_start: self.by_start.clone(),
        }
    }
}
