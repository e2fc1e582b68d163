//! State machine that executes named transitions.

use super::callbacks::Callbacks;
use super::error::TransitionError;
use super::pipeline::Interceptors;
use crate::builder::MachineParts;
use crate::core::{State, Transition, TransitionTable};
use crate::snapshot::{CodecError, ContextCodec, Schema, Snapshot};
use std::fmt;

/// Outcome of a [`StateMachine::fire`] call that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fired {
    /// The state changed and observers were notified
    Transitioned,

    /// An interceptor stopped the chain; nothing changed
    Vetoed,
}

/// A finite state machine: transition table, current state and context.
///
/// Construct one with [`crate::builder::StateMachineBuilder`] or, without
/// interceptors and callbacks, with [`StateMachine::new`].
///
/// The machine is synchronous and not reentrant. Hooks only ever see the
/// context, never the machine, so they cannot fire transitions themselves.
pub struct StateMachine<S: State, C> {
    table: TransitionTable<S, C>,
    start_state: S,
    states: Vec<S>,
    state: S,
    context: C,
    interceptors: Interceptors<C>,
    callbacks: Callbacks<S, C>,
    codec: Option<Box<dyn ContextCodec<C>>>,
    events_enabled: bool,
}

impl<S: State, C> StateMachine<S, C> {
    /// Create a machine in `start_state` with no hooks.
    ///
    /// The state set is the union of the transition endpoints.
    pub fn new(transitions: Vec<Transition<S, C>>, context: C, start_state: S) -> Self {
        let table = TransitionTable::new(transitions);
        let states = table.states();

        Self {
            table,
            state: start_state.clone(),
            start_state,
            states,
            context,
            interceptors: Interceptors::new(),
            callbacks: Callbacks::new(),
            codec: None,
            events_enabled: true,
        }
    }

    /// Assemble a machine from builder output. This is the default factory.
    pub fn from_parts(parts: MachineParts<S, C>) -> Self {
        Self {
            table: TransitionTable::new(parts.transitions),
            state: parts.start_state.clone(),
            start_state: parts.start_state,
            states: parts.states,
            context: parts.context,
            interceptors: parts.interceptors,
            callbacks: parts.callbacks,
            codec: parts.codec,
            events_enabled: parts.events_enabled,
        }
    }

    /// Get current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get the context
    pub fn context(&self) -> &C {
        &self.context
    }

    /// State the machine was built in.
    pub fn start_state(&self) -> &S {
        &self.start_state
    }

    /// Known states, in insertion order.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// The transition table, in declaration order.
    pub fn transitions(&self) -> &TransitionTable<S, C> {
        &self.table
    }

    /// Whether interceptors, guards and actions currently run.
    pub fn events_enabled(&self) -> bool {
        self.events_enabled
    }

    /// Re-enable interceptors, guards and actions.
    pub fn enable_events(&mut self) {
        self.events_enabled = true;
    }

    /// Disable interceptors, guards and actions.
    ///
    /// The guard runs at the end of the interceptor chain, so with events
    /// disabled a transition only checks its start state. Callbacks still run.
    pub fn disable_events(&mut self) {
        self.events_enabled = false;
    }

    /// Fire the transition called `name`.
    ///
    /// Runs global interceptors, then the interceptors for `name`, then the
    /// guard. If the chain completes the state changes, the action runs and
    /// callbacks fire. A failing callback is returned after the state has
    /// already changed; callbacks after it are skipped.
    pub fn fire(&mut self, name: &str) -> Result<Fired, TransitionError> {
        let fired = self.advance(name)?;
        if fired == Fired::Transitioned {
            self.callbacks.dispatch(name, &self.state, &self.context)?;
        }
        Ok(fired)
    }

    /// Everything `fire` does up to and including the action.
    fn advance(&mut self, name: &str) -> Result<Fired, TransitionError> {
        let Some(transition) = self.table.get(name) else {
            return Err(TransitionError::UnknownTransition {
                name: name.to_string(),
            });
        };

        if !transition.is_from(&self.state) {
            return Err(TransitionError::WrongStartState {
                name: name.to_string(),
                expected: transition.start.name().to_string(),
                actual: self.state.name().to_string(),
            });
        }

        if self.events_enabled {
            let completed = self
                .interceptors
                .run(name, transition.guard.as_ref(), &mut self.context)?;
            if !completed {
                tracing::trace!(transition = name, "interceptor stopped transition");
                return Ok(Fired::Vetoed);
            }
        }

        let from = std::mem::replace(&mut self.state, transition.end.clone());
        if self.events_enabled {
            transition.run_action(&mut self.context);
        }

        tracing::debug!(
            transition = name,
            from = from.name(),
            to = self.state.name(),
            "transition fired"
        );

        Ok(Fired::Transitioned)
    }

    /// Fire the first transition departing the current state that succeeds.
    ///
    /// Candidates are tried in declaration order and any failure before the
    /// state changes moves on to the next one. Once a transition has changed
    /// the state the scan stops: a failing callback is logged and the
    /// transition still counts as taken. Returns the name of the transition
    /// taken, or `None` if the state did not change.
    pub fn auto_transition(&mut self) -> Option<String> {
        let candidates: Vec<String> = self
            .table
            .departing(&self.state)
            .map(|t| t.name.clone())
            .collect();

        for name in candidates {
            match self.advance(&name) {
                Ok(Fired::Transitioned) => {
                    if let Err(err) = self.callbacks.dispatch(&name, &self.state, &self.context) {
                        tracing::warn!(transition = %name, error = %err, "callback failed");
                    }
                    tracing::debug!(transition = %name, "auto transition taken");
                    return Some(name);
                }
                Ok(Fired::Vetoed) => {
                    tracing::trace!(transition = %name, "auto transition vetoed");
                }
                Err(err) => {
                    tracing::trace!(transition = %name, error = %err, "auto transition skipped");
                }
            }
        }

        None
    }

    /// Check whether `name` departs the current state and its guard passes.
    ///
    /// Interceptors are not consulted. With events disabled only the start
    /// state is checked, matching [`StateMachine::fire`].
    pub fn can_fire(&self, name: &str) -> bool {
        self.table.get(name).is_some_and(|t| {
            t.is_from(&self.state) && (!self.events_enabled || t.allows(&self.context))
        })
    }

    /// Names of the transitions departing the current state, in declaration order.
    pub fn available_transitions(&self) -> Vec<&str> {
        self.table
            .departing(&self.state)
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Structure of this machine.
    pub fn schema(&self) -> Schema {
        Schema::describe(&self.states, &self.start_state, &self.table)
    }

    /// Structure of this machine as JSON.
    pub fn export_schema(&self) -> Result<String, CodecError> {
        self.schema().to_json()
    }

    /// Capture the current state and encoded context.
    pub fn snapshot(&self) -> Result<Snapshot, CodecError> {
        let codec = self.codec.as_ref().ok_or(CodecError::NoCodecConfigured)?;

        Ok(Snapshot {
            state: self.state.name().to_string(),
            context: codec.encode(&self.context)?,
        })
    }

    /// Capture the current state and encoded context as JSON.
    pub fn export_snapshot(&self) -> Result<String, CodecError> {
        self.snapshot()?.to_json()
    }

    /// Replace state and context with those from `snapshot`.
    ///
    /// Both are decoded before either is replaced. The restored state is not
    /// checked against the known state set.
    pub fn restore<P>(&mut self, snapshot: Snapshot, parser: P) -> Result<(), CodecError>
    where
        P: Fn(&str) -> Option<S>,
    {
        let codec = self.codec.as_ref().ok_or(CodecError::NoCodecConfigured)?;

        let Some(state) = parser(&snapshot.state) else {
            return Err(CodecError::UnknownState {
                name: snapshot.state,
            });
        };
        let context = codec.decode(&snapshot.context)?;

        tracing::debug!(
            from = self.state.name(),
            to = state.name(),
            "restored snapshot"
        );

        self.state = state;
        self.context = context;
        Ok(())
    }

    /// Replace state and context from a JSON snapshot.
    pub fn import_snapshot<P>(&mut self, payload: &str, parser: P) -> Result<(), CodecError>
    where
        P: Fn(&str) -> Option<S>,
    {
        self.restore(Snapshot::from_json(payload)?, parser)
    }
}

impl<S: State, C: fmt::Debug> fmt::Debug for StateMachine<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("state", &self.state)
            .field("context", &self.context)
            .field("transitions", &self.table.len())
            .field("events_enabled", &self.events_enabled)
            .finish()
    }
}
