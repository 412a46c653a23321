//! Procedure representations.

use crate::error::Result;
use crate::interp::Interpreter;
use crate::parser::ProcedureDef;

/// The native body of a built-in: a plain function over the
/// interpreter, which owns the stack, the turtle and the streams.
pub type BuiltinFn = fn(&mut Interpreter) -> Result<()>;

/// A built-in procedure: declared arity, whether it returns a value,
/// and its native body.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub arity: usize,
    pub is_function: bool,
    pub body: BuiltinFn,
}

impl Builtin {
    /// A pure procedure (no return value).
    pub fn procedure(arity: usize, body: BuiltinFn) -> Self {
        Self {
            arity,
            is_function: false,
            body,
        }
    }

    /// A function: callers must route its result somewhere.
    pub fn function(arity: usize, body: BuiltinFn) -> Self {
        Self {
            arity,
            is_function: true,
            body,
        }
    }
}

/// A callable: native built-in or user definition.
#[derive(Debug, Clone)]
pub enum Procedure {
    Builtin(Builtin),
    /// Raw body lines, re-parsed at call time so forward references
    /// resolve against whatever is defined by then.
    UserDefined(ProcedureDef),
}

impl Procedure {
    pub fn arity(&self) -> usize {
        match self {
            Procedure::Builtin(b) => b.arity,
            Procedure::UserDefined(def) => def.arity(),
        }
    }

    /// User definitions have no way to produce a value, so only
    /// built-ins can be functions.
    pub fn is_function(&self) -> bool {
        match self {
            Procedure::Builtin(b) => b.is_function,
            Procedure::UserDefined(_) => false,
        }
    }
}
