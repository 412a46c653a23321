//! Control procedures.

use crate::ast;
use crate::error::Result;
use crate::interp::Interpreter;
use crate::memory::{REPCOUNT, Stack};
use crate::parser::parse;
use crate::value::Value;

use super::{function, output, procedure};

pub(super) fn register(stack: &mut Stack) {
    procedure(stack, &["repeat"], 2, repeat);
    function(stack, &["repcount"], 0, repcount);
}

/// `repeat n [body]` — run the deferred body n times. The body is a
/// list literal, re-rendered to source and re-parsed on every
/// iteration so it sees current definitions and the fresh
/// `__REPCOUNT__` published on repeat's own frame.
fn repeat(interp: &mut Interpreter) -> Result<()> {
    let count = interp.stack().argument(0)?.as_unsigned()?;
    let body = interp.stack().argument(1)?.clone();
    body.as_list()?;
    let line = body.to_string();

    for index in 0..count {
        interp
            .stack_mut()
            .local(REPCOUNT, Value::number(index as f64));
        let stmt = parse(&line, interp.stack())?;
        if stmt.is_empty() {
            continue;
        }
        let tree = ast::build(&stmt, interp.stack())?;
        tree.apply(interp)?;
    }
    Ok(())
}

/// `repcount` — the 0-based index of the innermost repeat.
fn repcount(interp: &mut Interpreter) -> Result<()> {
    let value = interp.stack().variable(REPCOUNT)?.clone();
    output(interp, value);
    Ok(())
}
