//! The built-in procedure set.
//!
//! Each submodule registers one area into the global frame:
//! arithmetic functions, data constructors/selectors/predicates,
//! I/O, memory management, control, and turtle graphics. Bodies are
//! plain functions over the interpreter, which hands them the
//! current frame's arguments and takes their results.

mod arithmetic;
mod comm;
mod control;
mod data;
mod graphics;
mod memory;

use crate::memory::{Builtin, Procedure, Stack};
use crate::value::Value;

/// Register the whole built-in set.
pub fn register(stack: &mut Stack) {
    arithmetic::register(stack);
    data::register(stack);
    comm::register(stack);
    memory::register(stack);
    control::register(stack);
    graphics::register(stack);
}

/// Register one pure procedure under one or more names.
pub(crate) fn procedure(
    stack: &mut Stack,
    names: &[&str],
    arity: usize,
    body: crate::memory::BuiltinFn,
) {
    for name in names {
        stack.set_procedure(name, Procedure::Builtin(Builtin::procedure(arity, body)));
    }
}

/// Register one function (value-returning) under one or more names.
pub(crate) fn function(
    stack: &mut Stack,
    names: &[&str],
    arity: usize,
    body: crate::memory::BuiltinFn,
) {
    for name in names {
        stack.set_procedure(name, Procedure::Builtin(Builtin::function(arity, body)));
    }
}

/// Store a function result on the current frame.
pub(crate) fn output(interp: &mut crate::interp::Interpreter, value: Value) {
    interp.stack_mut().store_result(value);
}
