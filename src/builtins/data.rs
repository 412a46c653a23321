//! Data constructors, selectors, mutators and predicates.

use crate::error::Result;
use crate::interp::Interpreter;
use crate::memory::Stack;
use crate::value::Value;

use super::{function, output, procedure};

pub(super) fn register(stack: &mut Stack) {
    // Constructors
    function(stack, &["word"], 2, word);
    function(stack, &["sentence"], 2, sentence);
    function(stack, &["list"], 2, list);
    function(stack, &["fput"], 2, fput);
    function(stack, &["lput"], 2, lput);

    // Selectors
    function(stack, &["first"], 1, first);
    function(stack, &["last"], 1, last);
    function(stack, &["butfirst"], 1, butfirst);
    function(stack, &["butlast"], 1, butlast);
    function(stack, &["item"], 2, item);

    // Mutators
    procedure(stack, &["setitem", ".setitem"], 3, setitem);
    procedure(stack, &["setfirst", ".setfirst"], 2, setfirst);

    // Predicates
    function(stack, &["wordp", "word?"], 1, wordp);
    function(stack, &["listp", "list?"], 1, listp);
    function(stack, &["emptyp", "empty?"], 1, emptyp);
    function(stack, &["equalp", "equal?", ".eq"], 2, equalp);
    function(stack, &["notequalp", "notequal?"], 2, notequalp);
    function(stack, &["beforep", "before?"], 2, beforep);
    function(stack, &["memberp", "member?"], 2, memberp);
    function(stack, &["substringp"], 2, substringp);
    function(stack, &["numberp", "number?"], 1, numberp);
}

fn arg(interp: &Interpreter, index: usize) -> Result<Value> {
    interp.stack().argument(index).cloned()
}

/// `word a b` — the two words joined into one.
fn word(interp: &mut Interpreter) -> Result<()> {
    let a = arg(interp, 0)?;
    let b = arg(interp, 1)?;
    a.as_word()?;
    b.as_word()?;
    output(interp, a.combine(b));
    Ok(())
}

/// `sentence a b` — a flat list of both arguments' elements.
fn sentence(interp: &mut Interpreter) -> Result<()> {
    let mut items = Vec::new();
    for index in 0..2 {
        match arg(interp, index)? {
            Value::List(elements) => items.extend(elements),
            word => items.push(word),
        }
    }
    output(interp, Value::list(items));
    Ok(())
}

/// `list a b` — the two arguments as a two-element list.
fn list(interp: &mut Interpreter) -> Result<()> {
    let items = vec![arg(interp, 0)?, arg(interp, 1)?];
    output(interp, Value::list(items));
    Ok(())
}

/// `fput thing target` — prepend to a list, or join words.
fn fput(interp: &mut Interpreter) -> Result<()> {
    let thing = arg(interp, 0)?;
    let target = arg(interp, 1)?;
    let combined = match target {
        Value::List(mut items) => {
            items.insert(0, thing);
            Value::List(items)
        }
        word => thing.combine(word),
    };
    output(interp, combined);
    Ok(())
}

/// `lput thing target` — append to a list, or join words.
fn lput(interp: &mut Interpreter) -> Result<()> {
    let thing = arg(interp, 0)?;
    let target = arg(interp, 1)?;
    let combined = match target {
        Value::List(mut items) => {
            items.push(thing);
            Value::List(items)
        }
        word => word.combine(thing),
    };
    output(interp, combined);
    Ok(())
}

fn first(interp: &mut Interpreter) -> Result<()> {
    let value = arg(interp, 0)?.front()?;
    output(interp, value);
    Ok(())
}

fn last(interp: &mut Interpreter) -> Result<()> {
    let value = arg(interp, 0)?.back()?;
    output(interp, value);
    Ok(())
}

fn butfirst(interp: &mut Interpreter) -> Result<()> {
    let value = arg(interp, 0)?.but_first()?;
    output(interp, value);
    Ok(())
}

fn butlast(interp: &mut Interpreter) -> Result<()> {
    let value = arg(interp, 0)?.but_last()?;
    output(interp, value);
    Ok(())
}

/// `item i thing` — zero-based positional access.
fn item(interp: &mut Interpreter) -> Result<()> {
    let index = arg(interp, 0)?.as_unsigned()?;
    let value = arg(interp, 1)?.at(index)?;
    output(interp, value);
    Ok(())
}

/// `setitem i thing value` — replace element `i` in place.
fn setitem(interp: &mut Interpreter) -> Result<()> {
    let index = arg(interp, 0)?.as_unsigned()?;
    let value = arg(interp, 2)?;
    interp.stack_mut().argument_mut(1)?.set(index, value)
}

fn setfirst(interp: &mut Interpreter) -> Result<()> {
    let value = arg(interp, 1)?;
    interp.stack_mut().argument_mut(0)?.set(0, value)
}

fn wordp(interp: &mut Interpreter) -> Result<()> {
    let answer = arg(interp, 0)?.is_word();
    output(interp, Value::boolean(answer));
    Ok(())
}

fn listp(interp: &mut Interpreter) -> Result<()> {
    let answer = arg(interp, 0)?.is_list();
    output(interp, Value::boolean(answer));
    Ok(())
}

fn emptyp(interp: &mut Interpreter) -> Result<()> {
    let answer = arg(interp, 0)?.is_empty();
    output(interp, Value::boolean(answer));
    Ok(())
}

fn equalp(interp: &mut Interpreter) -> Result<()> {
    let answer = arg(interp, 0)? == arg(interp, 1)?;
    output(interp, Value::boolean(answer));
    Ok(())
}

fn notequalp(interp: &mut Interpreter) -> Result<()> {
    let answer = arg(interp, 0)? != arg(interp, 1)?;
    output(interp, Value::boolean(answer));
    Ok(())
}

fn beforep(interp: &mut Interpreter) -> Result<()> {
    let answer = arg(interp, 0)? < arg(interp, 1)?;
    output(interp, Value::boolean(answer));
    Ok(())
}

/// `memberp thing container`.
fn memberp(interp: &mut Interpreter) -> Result<()> {
    let thing = arg(interp, 0)?;
    let container = arg(interp, 1)?;
    output(interp, Value::boolean(container.contains(&thing)));
    Ok(())
}

/// `substringp small big` — word containment only.
fn substringp(interp: &mut Interpreter) -> Result<()> {
    let small = arg(interp, 0)?;
    let big = arg(interp, 1)?;
    let answer = small.is_word() && big.is_word() && big.contains(&small);
    output(interp, Value::boolean(answer));
    Ok(())
}

fn numberp(interp: &mut Interpreter) -> Result<()> {
    let answer = arg(interp, 0)?.as_double().is_ok();
    output(interp, Value::boolean(answer));
    Ok(())
}
