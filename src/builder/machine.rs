//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Guard, State, Transition};
use crate::machine::{Callbacks, HookResult, Interceptors, Next, StateMachine, TransitionError};
use crate::snapshot::{ContextCodec, Schema};
use std::collections::HashMap;
use std::sync::Arc;

/// Everything a builder accumulated, handed to the factory by
/// [`StateMachineBuilder::build_with`].
pub struct MachineParts<S: State, C> {
    /// Transitions in first-declaration order
    pub transitions: Vec<Transition<S, C>>,

    /// Known states in insertion order
    pub states: Vec<S>,

    pub start_state: S,
    pub context: C,
    pub interceptors: Interceptors<C>,
    pub callbacks: Callbacks<S, C>,
    pub codec: Option<Box<dyn ContextCodec<C>>>,
    pub events_enabled: bool,
}

/// Builder for constructing state machines with a fluent API.
///
/// Transitions are keyed by name. Adding a name that already exists
/// replaces the definition in place, keeping its original position.
///
/// ```
/// use turnstile::builder::StateMachineBuilder;
///
/// let mut machine = StateMachineBuilder::new()
///     .add_transition("open", "CLOSED".to_string(), "OPEN".to_string())
///     .add_transition("close", "OPEN".to_string(), "CLOSED".to_string())
///     .context(())
///     .build()
///     .unwrap();
///
/// machine.fire("open").unwrap();
/// assert_eq!(machine.state(), "OPEN");
/// ```
pub struct StateMachineBuilder<S: State, C> {
    transitions: Vec<Transition<S, C>>,
    by_name: HashMap<String, usize>,
    states: Vec<S>,
    start_state: Option<S>,
    context: Option<C>,
    interceptors: Interceptors<C>,
    callbacks: Callbacks<S, C>,
    codec: Option<Box<dyn ContextCodec<C>>>,
    events_enabled: bool,
}

impl<S: State, C> StateMachineBuilder<S, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            by_name: HashMap::new(),
            states: Vec::new(),
            start_state: None,
            context: None,
            interceptors: Interceptors::new(),
            callbacks: Callbacks::new(),
            codec: None,
            events_enabled: true,
        }
    }

    fn insert(mut self, transition: Transition<S, C>) -> Self {
        self = self.add_state(transition.start.clone());
        self = self.add_state(transition.end.clone());

        match self.by_name.get(&transition.name) {
            Some(&index) => self.transitions[index] = transition,
            None => {
                self.by_name
                    .insert(transition.name.clone(), self.transitions.len());
                self.transitions.push(transition);
            }
        }
        self
    }

    fn find_mut(&mut self, name: &str) -> Result<&mut Transition<S, C>, BuildError> {
        match self.by_name.get(name) {
            Some(&index) => Ok(&mut self.transitions[index]),
            None => Err(BuildError::UnknownTransition {
                name: name.to_string(),
            }),
        }
    }

    /// Add a transition with no guard and no action.
    pub fn add_transition(self, name: impl Into<String>, start: S, end: S) -> Self {
        self.insert(Transition::new(name, start, end))
    }

    /// Add a transition with a guard and no action.
    pub fn add_guarded_transition<G>(
        self,
        name: impl Into<String>,
        start: S,
        end: S,
        guard: G,
    ) -> Self
    where
        G: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.insert(Transition::new(name, start, end).with_guard(guard))
    }

    /// Add a transition with an action and no guard.
    pub fn add_transition_with_action<A>(
        self,
        name: impl Into<String>,
        start: S,
        end: S,
        action: A,
    ) -> Self
    where
        A: Fn(&mut C) + Send + Sync + 'static,
    {
        self.insert(Transition::new(name, start, end).with_action(action))
    }

    /// Add a transition with both a guard and an action.
    pub fn add_transition_full<G, A>(
        self,
        name: impl Into<String>,
        start: S,
        end: S,
        guard: G,
        action: A,
    ) -> Self
    where
        G: Fn(&C) -> bool + Send + Sync + 'static,
        A: Fn(&mut C) + Send + Sync + 'static,
    {
        self.insert(
            Transition::new(name, start, end)
                .with_guard(guard)
                .with_action(action),
        )
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(self, builder: TransitionBuilder<S, C>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        Ok(self.insert(transition))
    }

    /// Register a state. Adding a known state again has no effect.
    pub fn add_state(mut self, state: S) -> Self {
        if !self.states.contains(&state) {
            self.states.push(state);
        }
        self
    }

    /// Replace the guard of an existing transition.
    pub fn set_transition_guard<G>(mut self, name: &str, guard: G) -> Result<Self, BuildError>
    where
        G: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.find_mut(name)?.guard = Some(Guard::new(guard));
        Ok(self)
    }

    /// Replace the action of an existing transition.
    pub fn set_transition_action<A>(mut self, name: &str, action: A) -> Result<Self, BuildError>
    where
        A: Fn(&mut C) + Send + Sync + 'static,
    {
        self.find_mut(name)?.action = Some(Arc::new(action));
        Ok(self)
    }

    /// Intercept the transition called `name`.
    pub fn intercept<F>(mut self, name: impl Into<String>, interceptor: F) -> Self
    where
        F: Fn(&mut C, Next<'_, C>) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.interceptors.add(name, interceptor);
        self
    }

    /// Intercept every transition.
    pub fn intercept_all<F>(mut self, interceptor: F) -> Self
    where
        F: Fn(&str, &mut C, Next<'_, C>) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.interceptors.add_global(interceptor);
        self
    }

    /// Register a callback run after each firing of transition `name`.
    pub fn on_transition<F>(mut self, name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&C) -> HookResult + Send + Sync + 'static,
    {
        self.callbacks.on_transition(name, callback);
        self
    }

    /// Register a callback run after every transition, given its name.
    pub fn on_any_transition<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, &C) -> HookResult + Send + Sync + 'static,
    {
        self.callbacks.on_any_transition(callback);
        self
    }

    /// Register a callback run after each entry into `state`.
    pub fn on_state<F>(mut self, state: S, callback: F) -> Self
    where
        F: Fn(&C) -> HookResult + Send + Sync + 'static,
    {
        self.callbacks.on_state(state, callback);
        self
    }

    /// Register a callback run after entering any state.
    pub fn on_any_state<F>(mut self, callback: F) -> Self
    where
        F: Fn(&S, &C) -> HookResult + Send + Sync + 'static,
    {
        self.callbacks.on_any_state(callback);
        self
    }

    /// Set the start state. Defaults to the start of the first transition.
    pub fn start_state(mut self, state: S) -> Self {
        self.start_state = Some(state);
        self
    }

    /// Set the context (required).
    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    /// Set the codec used by snapshot export and import.
    pub fn codec(mut self, codec: impl ContextCodec<C> + 'static) -> Self {
        self.codec = Some(Box::new(codec));
        self
    }

    /// Whether interceptors, guards and actions run on the built machine.
    pub fn events_enabled(mut self, enabled: bool) -> Self {
        self.events_enabled = enabled;
        self
    }

    /// Load states, transitions and start state from an exported schema.
    ///
    /// Transitions come back without guards or actions; attach them with
    /// [`set_transition_guard`](Self::set_transition_guard) and
    /// [`set_transition_action`](Self::set_transition_action). A schema
    /// transition replaces any existing transition with the same name.
    pub fn from_schema<P>(mut self, json: &str, parser: P) -> Result<Self, BuildError>
    where
        P: Fn(&str) -> Option<S>,
    {
        let schema: Schema = serde_json::from_str(json)?;
        let parsed = schema
            .parse(parser)
            .map_err(|names| BuildError::UnparsedStates { names })?;

        for state in parsed.states {
            self = self.add_state(state);
        }
        for (name, start, end) in parsed.transitions {
            self = self.add_transition(name, start, end);
        }
        Ok(self.start_state(parsed.start_state))
    }

    /// Freeze the accumulated configuration and hand it to `factory`.
    pub fn build_with<M, F>(self, factory: F) -> Result<M, BuildError>
    where
        F: FnOnce(MachineParts<S, C>) -> M,
    {
        let context = self.context.ok_or(BuildError::MissingContext)?;
        let start_state = match self.start_state {
            Some(state) => state,
            None => self
                .transitions
                .first()
                .map(|t| t.start.clone())
                .ok_or(BuildError::MissingStartState)?,
        };

        if self.transitions.is_empty() {
            tracing::warn!("building state machine without transitions");
        }
        tracing::debug!(
            transitions = self.transitions.len(),
            states = self.states.len(),
            start = start_state.name(),
            "building state machine"
        );

        Ok(factory(MachineParts {
            transitions: self.transitions,
            states: self.states,
            start_state,
            context,
            interceptors: self.interceptors,
            callbacks: self.callbacks,
            codec: self.codec,
            events_enabled: self.events_enabled,
        }))
    }

    /// Build a [`StateMachine`].
    pub fn build(self) -> Result<StateMachine<S, C>, BuildError> {
        self.build_with(StateMachine::from_parts)
    }
}

impl<S: State, C> Default for StateMachineBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Fired;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Order {
        Placed,
        Paid,
        Shipped,
        Cancelled,
    }

    impl State for Order {
        fn name(&self) -> &str {
            match self {
                Self::Placed => "Placed",
                Self::Paid => "Paid",
                Self::Shipped => "Shipped",
                Self::Cancelled => "Cancelled",
            }
        }
    }

    fn parse_order(name: &str) -> Option<Order> {
        match name {
            "Placed" => Some(Order::Placed),
            "Paid" => Some(Order::Paid),
            "Shipped" => Some(Order::Shipped),
            "Cancelled" => Some(Order::Cancelled),
            _ => None,
        }
    }

    fn orders() -> StateMachineBuilder<Order, u32> {
        StateMachineBuilder::new()
            .add_transition("pay", Order::Placed, Order::Paid)
            .add_transition("ship", Order::Paid, Order::Shipped)
            .add_transition("cancel", Order::Placed, Order::Cancelled)
    }

    #[test]
    fn builder_requires_context() {
        let result = orders().build();

        assert!(matches!(result, Err(BuildError::MissingContext)));
    }

    #[test]
    fn builder_requires_a_start_state_source() {
        let result = StateMachineBuilder::<Order, u32>::new().context(0).build();

        assert!(matches!(result, Err(BuildError::MissingStartState)));
    }

    #[test]
    fn empty_table_builds_with_explicit_start() {
        let machine = StateMachineBuilder::<Order, u32>::new()
            .start_state(Order::Placed)
            .context(0)
            .build()
            .unwrap();

        assert_eq!(machine.state(), &Order::Placed);
        assert!(machine.transitions().is_empty());
    }

    #[test]
    fn start_state_defaults_to_first_transition() {
        let machine = orders().context(0).build().unwrap();

        assert_eq!(machine.state(), &Order::Placed);
        assert_eq!(
            machine.states(),
            &[Order::Placed, Order::Paid, Order::Shipped, Order::Cancelled]
        );
    }

    #[test]
    fn redefining_a_name_replaces_in_place() {
        let machine = orders()
            .add_transition("pay", Order::Placed, Order::Cancelled)
            .context(0)
            .build()
            .unwrap();

        let names: Vec<&str> = machine
            .transitions()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["pay", "ship", "cancel"]);
        assert_eq!(
            machine.transitions().get("pay").map(|t| t.end),
            Some(Order::Cancelled)
        );
    }

    #[test]
    fn set_guard_and_action_require_known_name() {
        let result = orders().set_transition_guard("refund", |_| true);
        assert!(matches!(
            result,
            Err(BuildError::UnknownTransition { name }) if name == "refund"
        ));

        let result = orders().set_transition_action("refund", |_| {});
        assert!(matches!(result, Err(BuildError::UnknownTransition { .. })));
    }

    #[test]
    fn set_guard_and_action_keep_endpoints() {
        let mut machine = orders()
            .set_transition_guard("pay", |amount| *amount > 0)
            .unwrap()
            .set_transition_action("pay", |amount| *amount = 0)
            .unwrap()
            .context(0)
            .build()
            .unwrap();

        assert!(machine.fire("pay").is_err());

        let mut paid = orders()
            .set_transition_guard("pay", |amount| *amount > 0)
            .unwrap()
            .set_transition_action("pay", |amount| *amount = 0)
            .unwrap()
            .context(25)
            .build()
            .unwrap();

        assert_eq!(paid.fire("pay"), Ok(Fired::Transitioned));
        assert_eq!(paid.state(), &Order::Paid);
        assert_eq!(*paid.context(), 0);
        assert_eq!(machine.state(), &Order::Placed);
    }

    #[test]
    fn transition_builder_is_accepted() {
        let machine = StateMachineBuilder::new()
            .transition(
                TransitionBuilder::new("pay")
                    .from(Order::Placed)
                    .to(Order::Paid)
                    .when(|amount: &u32| *amount > 0),
            )
            .unwrap()
            .context(10u32)
            .build()
            .unwrap();

        assert!(machine.can_fire("pay"));

        let result = StateMachineBuilder::<Order, u32>::new()
            .transition(TransitionBuilder::new("pay").from(Order::Placed));
        assert!(matches!(result, Err(BuildError::MissingToState)));
    }

    #[test]
    fn factory_receives_frozen_parts() {
        let (count, start, events) = orders()
            .start_state(Order::Paid)
            .events_enabled(false)
            .context(0)
            .build_with(|parts| {
                (
                    parts.transitions.len(),
                    parts.start_state,
                    parts.events_enabled,
                )
            })
            .unwrap();

        assert_eq!(count, 3);
        assert_eq!(start, Order::Paid);
        assert!(!events);
    }

    #[test]
    fn schema_import_restores_structure() {
        let original = orders()
            .start_state(Order::Paid)
            .context(0)
            .build()
            .unwrap();
        let exported = original.export_schema().unwrap();

        let rebuilt = StateMachineBuilder::<Order, u32>::new()
            .from_schema(&exported, parse_order)
            .unwrap()
            .context(0)
            .build()
            .unwrap();

        assert_eq!(rebuilt.state(), &Order::Paid);
        assert_eq!(rebuilt.export_schema().unwrap(), exported);
    }

    #[test]
    fn schema_import_reports_every_unknown_state() {
        let json =
            r#"{"states":["Lost","Placed","Stolen"],"startState":"Placed","transitions":[]}"#;

        let result = StateMachineBuilder::<Order, u32>::new()
            .from_schema(json, parse_order);

        assert!(matches!(
            result,
            Err(BuildError::UnparsedStates { names }) if names == vec!["Lost", "Stolen"]
        ));
    }

    #[test]
    fn malformed_schema_is_rejected() {
        let result = StateMachineBuilder::<Order, u32>::new()
            .from_schema("{", parse_order);

        assert!(matches!(result, Err(BuildError::InvalidSchema(_))));
    }
}
