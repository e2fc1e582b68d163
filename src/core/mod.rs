//! Core state machine types.
//!
//! This module contains the static shape of a machine:
//! - State identifiers via the `State` trait
//! - Guard predicates over the context
//! - Named transitions and the immutable transition table
//!
//! Nothing here executes a transition; that lives in [`crate::machine`].

mod guard;
mod state;
mod table;
mod transition;

pub use guard::Guard;
pub use state::State;
pub use table::TransitionTable;
pub use transition::{Action, Transition};
