//! Interceptor pipeline wrapped around each fired transition.
//!
//! The chain is global interceptors (registration order), then the
//! interceptors registered for the fired name, then the guard. Each link
//! receives a one-shot [`Next`] continuation. A link that returns without
//! running its continuation vetoes the transition.

use super::error::TransitionError;
use crate::core::Guard;
use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Arc;

/// Interceptor registered for a single transition name.
pub type Interceptor<C> =
    Arc<dyn Fn(&mut C, Next<'_, C>) -> Result<(), TransitionError> + Send + Sync>;

/// Interceptor run for every fired transition. Receives the transition name.
pub type GlobalInterceptor<C> =
    Arc<dyn Fn(&str, &mut C, Next<'_, C>) -> Result<(), TransitionError> + Send + Sync>;

/// Continuation handed to an interceptor.
///
/// Consumed by [`Next::run`], so a link can proceed at most once. Each
/// `fire` builds a fresh chain; no iterator state is shared between calls.
pub struct Next<'a, C> {
    name: &'a str,
    global: &'a [GlobalInterceptor<C>],
    local: &'a [Interceptor<C>],
    guard: Option<&'a Guard<C>>,
    completed: &'a Cell<bool>,
}

impl<'a, C> Next<'a, C> {
    /// Name of the transition being fired.
    pub fn transition(&self) -> &str {
        self.name
    }

    /// Proceed to the next link of the chain.
    ///
    /// Returns `GuardRejected` if the chain reaches the guard and it fails.
    pub fn run(self, context: &mut C) -> Result<(), TransitionError> {
        if let Some((head, rest)) = self.global.split_first() {
            return head(
                self.name,
                context,
                Next {
                    global: rest,
                    ..self
                },
            );
        }

        if let Some((head, rest)) = self.local.split_first() {
            return head(
                context,
                Next {
                    local: rest,
                    ..self
                },
            );
        }

        if let Some(guard) = self.guard {
            if !guard.check(context) {
                tracing::debug!(transition = self.name, "guard rejected transition");
                return Err(TransitionError::GuardRejected {
                    name: self.name.to_string(),
                });
            }
        }

        self.completed.set(true);
        Ok(())
    }
}

/// Registered interceptors, global and per transition name.
pub struct Interceptors<C> {
    global: Vec<GlobalInterceptor<C>>,
    by_transition: HashMap<String, Vec<Interceptor<C>>>,
}

impl<C> Interceptors<C> {
    pub fn new() -> Self {
        Self {
            global: Vec::new(),
            by_transition: HashMap::new(),
        }
    }

    /// Append an interceptor for `name`.
    pub fn add<F>(&mut self, name: impl Into<String>, interceptor: F)
    where
        F: Fn(&mut C, Next<'_, C>) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.by_transition
            .entry(name.into())
            .or_default()
            .push(Arc::new(interceptor));
    }

    /// Append an interceptor run for every transition.
    pub fn add_global<F>(&mut self, interceptor: F)
    where
        F: Fn(&str, &mut C, Next<'_, C>) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.global.push(Arc::new(interceptor));
    }

    pub fn global(&self) -> &[GlobalInterceptor<C>] {
        &self.global
    }

    pub fn for_transition(&self, name: &str) -> &[Interceptor<C>] {
        self.by_transition
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.by_transition.values().all(Vec::is_empty)
    }

    /// Run the full chain for `name` ending in `guard`.
    ///
    /// `Ok(true)` means the guard was reached and passed, `Ok(false)` means an
    /// interceptor stopped the chain without an error.
    pub fn run(
        &self,
        name: &str,
        guard: Option<&Guard<C>>,
        context: &mut C,
    ) -> Result<bool, TransitionError> {
        let completed = Cell::new(false);
        let next = Next {
            name,
            global: &self.global,
            local: self.for_transition(name),
            guard,
            completed: &completed,
        };

        next.run(context)?;
        Ok(completed.get())
    }
}

impl<C> Default for Interceptors<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for Interceptors<C> {
    fn clone(&self) -> Self {
        Self {
            global: self.global.clone(),
            by_transition: self.by_transition.clone(),
        }
    }
}
