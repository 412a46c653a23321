//! Memory management procedures.

use crate::error::Result;
use crate::interp::Interpreter;
use crate::memory::Stack;
use crate::value::Value;

use super::{function, output, procedure};

pub(super) fn register(stack: &mut Stack) {
    procedure(stack, &["make"], 2, make);
    procedure(stack, &["name"], 2, name);
    procedure(stack, &["local"], 1, local);
    procedure(stack, &["localmake"], 2, localmake);
    procedure(stack, &["global"], 1, global);
    function(stack, &["thing"], 1, thing);

    stack.set_variable("startup", Value::list(Vec::new()), true);
}

/// `make "name value` — update where the variable lives, create it
/// on the global frame otherwise.
fn make(interp: &mut Interpreter) -> Result<()> {
    let var = interp.stack().argument(0)?.as_word()?.to_string();
    let value = interp.stack().argument(1)?.clone();
    interp.stack_mut().set_variable(&var, value, false);
    Ok(())
}

/// `name value "name` — `make` with the arguments swapped.
fn name(interp: &mut Interpreter) -> Result<()> {
    let value = interp.stack().argument(0)?.clone();
    let var = interp.stack().argument(1)?.as_word()?.to_string();
    interp.stack_mut().set_variable(&var, value, false);
    Ok(())
}

/// `local "name` — an empty binding on the calling frame.
fn local(interp: &mut Interpreter) -> Result<()> {
    let var = interp.stack().argument(0)?.as_word()?.to_string();
    interp
        .stack_mut()
        .caller_frame_mut()
        .set_variable(&var, Value::empty());
    Ok(())
}

/// `localmake "name value`.
fn localmake(interp: &mut Interpreter) -> Result<()> {
    let var = interp.stack().argument(0)?.as_word()?.to_string();
    let value = interp.stack().argument(1)?.clone();
    interp
        .stack_mut()
        .caller_frame_mut()
        .set_variable(&var, value);
    Ok(())
}

/// `global "name` — an empty binding on the global frame.
fn global(interp: &mut Interpreter) -> Result<()> {
    let var = interp.stack().argument(0)?.as_word()?.to_string();
    interp.stack_mut().set_variable(&var, Value::empty(), true);
    Ok(())
}

/// `thing "name` — the variable's value, through the frame scan.
fn thing(interp: &mut Interpreter) -> Result<()> {
    let var = interp.stack().argument(0)?.as_word()?.to_string();
    let value = interp.stack().variable(&var)?.clone();
    output(interp, value);
    Ok(())
}
