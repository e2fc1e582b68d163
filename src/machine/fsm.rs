//! Capability trait for types that wrap a [`StateMachine`].
//!
//! A typed wrapper (for example a `DoorMachine` produced by a builder
//! factory) implements the two required methods and gets every machine
//! operation for free, then adds its own convenience methods on top.

use super::engine::{Fired, StateMachine};
use super::error::TransitionError;
use crate::core::State;
use crate::snapshot::CodecError;

/// Operations shared by every machine and machine wrapper.
pub trait Fsm<S: State + 'static, C: 'static> {
    fn machine(&self) -> &StateMachine<S, C>;

    fn machine_mut(&mut self) -> &mut StateMachine<S, C>;

    fn state(&self) -> &S {
        self.machine().state()
    }

    fn context(&self) -> &C {
        self.machine().context()
    }

    fn fire(&mut self, name: &str) -> Result<Fired, TransitionError> {
        self.machine_mut().fire(name)
    }

    fn auto_transition(&mut self) -> Option<String> {
        self.machine_mut().auto_transition()
    }

    fn can_fire(&self, name: &str) -> bool {
        self.machine().can_fire(name)
    }

    fn enable_events(&mut self) {
        self.machine_mut().enable_events();
    }

    fn disable_events(&mut self) {
        self.machine_mut().disable_events();
    }

    fn export_schema(&self) -> Result<String, CodecError> {
        self.machine().export_schema()
    }

    fn export_snapshot(&self) -> Result<String, CodecError> {
        self.machine().export_snapshot()
    }

    fn import_snapshot<P>(&mut self, payload: &str, parser: P) -> Result<(), CodecError>
    where
        P: Fn(&str) -> Option<S>,
    {
        self.machine_mut().import_snapshot(payload, parser)
    }
}

impl<S: State + 'static, C: 'static> Fsm<S, C> for StateMachine<S, C> {
    fn machine(&self) -> &StateMachine<S, C> {
        self
    }

    fn machine_mut(&mut self) -> &mut StateMachine<S, C> {
        self
    }
}
