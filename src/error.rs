//! Interpreter-wide error type.
//!
//! One enum covers the whole taxonomy the front-end has to report:
//! parse-time failures, lookup misses, coercion failures, the
//! result-slot protocol mismatches, and renderer failures. Focused
//! sub-enums ([`GeometryError`], [`RenderError`], [`SyntaxError`])
//! convert into it with `#[from]`.

use thiserror::Error;

use crate::geometry::GeometryError;
use crate::parser::SyntaxError;
use crate::turtle::RenderError;
use crate::value::Value;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Parse-time failure, with the offending line and byte offset.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Structurally valid parse that is still illegal (`TO` without a
    /// name, `TO` outside the interactive loop, nested definitions).
    #[error("invalid statement: {0}")]
    InvalidStatement(String),

    /// Name not found in any frame's procedure map at call time.
    #[error("procedure `{name}` is undefined")]
    UndefinedProcedure { name: String },

    /// Name not found in any frame's variable map at lookup time.
    #[error("variable `{name}` is undefined")]
    UndefinedVariable { name: String },

    /// Word-to-number or word-to-bool coercion failure.
    #[error("expected {expected}, got `{got}`")]
    Type { expected: &'static str, got: String },

    /// A callee stored a result but no slot on the caller awaits one.
    #[error("procedure cannot return a value to none")]
    InvalidReturnValue,

    /// The caller awaits a result but the callee stored none.
    #[error("expected a function, found a procedure instead")]
    ExpectedReturnValue,

    /// Top-level evaluation produced a value nobody consumes.
    #[error("you don't say what to do with {0}")]
    UnusedResult(Value),

    /// Attempt to close the global frame.
    #[error("the global frame cannot be closed")]
    UnclosableFrame,

    /// A definition that cannot be stored (missing name, reserved
    /// name, definition of a definition).
    #[error("invalid procedure body: {0}")]
    InvalidProcedureBody(String),

    /// Actual-argument count does not match the declared arity.
    #[error("`{name}` expects {expected} arguments, got {got}")]
    ArgumentCount {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// Stream failure while reading input or writing output.
    #[error("i/o error: {0}")]
    Io(String),
}

impl Error {
    /// Coercion failure for `value`, wanted as `expected`.
    pub fn type_error(expected: &'static str, value: &Value) -> Self {
        Self::Type {
            expected,
            got: value.to_string(),
        }
    }

    pub fn undefined_procedure(name: impl Into<String>) -> Self {
        Self::UndefinedProcedure { name: name.into() }
    }

    pub fn undefined_variable(name: impl Into<String>) -> Self {
        Self::UndefinedVariable { name: name.into() }
    }

    pub fn io(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
