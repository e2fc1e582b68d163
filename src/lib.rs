//! Turnstile: a finite state machine runtime with named transitions.
//!
//! A machine holds a current state, a context value and a table of named
//! transitions. Firing a transition runs it through a chain of interceptors
//! that ends in the transition's guard, changes the state, runs the
//! transition's action against the context and finally notifies callbacks.
//!
//! # Core Concepts
//!
//! - **State**: any `Clone + Eq + Hash + Debug` type with a stable name, see [`State`]
//! - **Transition**: a named edge with an optional guard and action over the context
//! - **Interceptors**: middleware around every transition or around one name
//! - **Callbacks**: observers keyed by transition name or destination state
//! - **Schema / Snapshot**: the machine's structure, and its state plus context
//!
//! # Example
//!
//! ```rust
//! use turnstile::builder::StateMachineBuilder;
//! use turnstile::machine::Fired;
//! use turnstile::snapshot::JsonCodec;
//! use turnstile::state_enum;
//!
//! state_enum! {
//!     enum Door {
//!         Open,
//!         Ajar,
//!         Closed,
//!     }
//! }
//!
//! let mut door = StateMachineBuilder::new()
//!     .add_transition_with_action("push", Door::Closed, Door::Ajar, |deg: &mut u32| *deg = 1)
//!     .add_transition_full(
//!         "open",
//!         Door::Ajar,
//!         Door::Open,
//!         |deg| *deg >= 1,
//!         |deg| *deg = 100,
//!     )
//!     .intercept("open", |deg, next| {
//!         *deg = 99;
//!         next.run(deg)
//!     })
//!     .context(0u32)
//!     .codec(JsonCodec::new())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(door.fire("push"), Ok(Fired::Transitioned));
//! assert_eq!(door.fire("open"), Ok(Fired::Transitioned));
//! assert_eq!(door.state(), &Door::Open);
//! assert_eq!(*door.context(), 100);
//!
//! let saved = door.export_snapshot().unwrap();
//! assert_eq!(saved, r#"{"state":"Open","context":"100"}"#);
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod snapshot;

// Re-export commonly used types
pub use crate::builder::{BuildError, StateMachineBuilder};
pub use crate::core::{Guard, State, Transition};
pub use crate::machine::{Fired, Fsm, HookError, StateMachine, TransitionError};
pub use crate::snapshot::{CodecError, ContextCodec, JsonCodec, Schema, Snapshot};
