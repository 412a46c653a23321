//! A single activation record.

use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::value::{Name, Value};

use super::Procedure;

type Table<V> = IndexMap<Name, V, FxBuildHasher>;

/// One frame: local variables, local procedures, and the result-slot
/// state of the call protocol.
///
/// `awaiting` is the name of the variable the *next callee's* result
/// should land in; `result` is the value this frame's own procedure
/// stored. The stack reconciles the two when the frame closes.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    variables: Table<Value>,
    procedures: Table<Rc<Procedure>>,
    awaiting: Option<Name>,
    result: Option<Value>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(&Name::new(name))
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(&Name::new(name))
    }

    pub fn set_variable(&mut self, name: &str, value: Value) {
        self.variables.insert(Name::new(name), value);
    }

    pub fn variable_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.variables.get_mut(&Name::new(name))
    }

    pub fn has_procedure(&self, name: &str) -> bool {
        self.procedures.contains_key(&Name::new(name))
    }

    pub fn procedure(&self, name: &str) -> Option<Rc<Procedure>> {
        self.procedures.get(&Name::new(name)).cloned()
    }

    pub fn set_procedure(&mut self, name: &str, procedure: Rc<Procedure>) {
        self.procedures.insert(Name::new(name), procedure);
    }

    /// Record the value this frame's procedure returns.
    pub fn store_result(&mut self, value: Value) {
        self.result = Some(value);
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    pub(super) fn take_result(&mut self) -> Option<Value> {
        self.result.take()
    }

    /// Route the next callee's result into the variable `name`.
    pub fn await_result_in(&mut self, name: &str) {
        self.awaiting = Some(Name::new(name));
    }

    pub fn is_awaiting(&self) -> bool {
        self.awaiting.is_some()
    }

    pub(super) fn take_awaiting(&mut self) -> Option<Name> {
        self.awaiting.take()
    }

    /// Drop every binding and reset the result state.
    pub fn clear(&mut self) {
        self.variables.clear();
        self.procedures.clear();
        self.awaiting = None;
        self.result = None;
    }
}
