//! Transition execution: interceptor chain, guard, action and callbacks.
//!
//! Firing a transition runs, in order:
//!
//! 1. the start-state check
//! 2. global interceptors, then interceptors registered for the name
//! 3. the guard, as the last link of the chain
//! 4. the state change and the action
//! 5. callbacks by name, all transitions, by state, all states
//!
//! Steps 2, 3 and the action are skipped while events are disabled.

pub mod callbacks;
pub mod engine;
pub mod error;
pub mod fsm;
pub mod pipeline;

pub use callbacks::Callbacks;
pub use engine::{Fired, StateMachine};
pub use error::{HookError, HookResult, TransitionError};
pub use fsm::Fsm;
pub use pipeline::{GlobalInterceptor, Interceptor, Interceptors, Next};
