//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and macros for creating state machines
//! with minimal boilerplate while maintaining type safety.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::{MachineParts, StateMachineBuilder};
pub use transition::TransitionBuilder;

use crate::core::{State, Transition};

/// Create a transition with no guard and no action.
///
/// # Example
///
/// ```
/// use turnstile::builder::simple_transition;
/// use turnstile::state_enum;
///
/// state_enum! {
///     enum Door {
///         Open,
///         Closed,
///     }
/// }
///
/// let transition = simple_transition::<Door, ()>("close", Door::Open, Door::Closed);
/// assert!(transition.is_from(&Door::Open));
/// ```
pub fn simple_transition<S, C>(name: impl Into<String>, from: S, to: S) -> Transition<S, C>
where
    S: State,
{
    Transition::new(name, from, to)
}

/// Create a transition with a guard predicate over the context.
///
/// # Example
///
/// ```
/// use turnstile::builder::guarded_transition;
/// use turnstile::state_enum;
///
/// state_enum! {
///     enum Door {
///         Open,
///         Closed,
///     }
/// }
///
/// let transition = guarded_transition("close", Door::Open, Door::Closed, |people: &u32| {
///     *people == 0
/// });
///
/// assert!(transition.allows(&0));
/// assert!(!transition.allows(&2));
/// ```
pub fn guarded_transition<S, C, F>(
    name: impl Into<String>,
    from: S,
    to: S,
    guard: F,
) -> Transition<S, C>
where
    S: State,
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    Transition::new(name, from, to).with_guard(guard)
}
