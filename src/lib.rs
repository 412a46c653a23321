//! # tortuga
//!
//! Core library for Logo parsing, evaluation, and turtle graphics.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! interp    → line-level driver (one-shot, definitions, loop)
//!   ↓
//! builtins  → the built-in procedure set
//!   ↓
//! ast       → arity-driven tree builder and evaluator
//!   ↓
//! parser    → logos lexer, statement/expression grammar, TO…END
//!   ↓
//! memory    → frames, stack, procedure table, call protocol
//!   ↓
//! turtle    → boundary-mode state machine over a Renderer seam
//!   ↓
//! geometry  → angles, frames, points, paths, straight lines
//!   ↓
//! value     → the word-or-list datum and case-folded names
//!   ↓
//! base      → primitives (byte-offset spans)
//! ```

/// Foundation types: byte-offset spans
pub mod base;

/// The word-or-list datum, coercions, rendering, identifier keys
pub mod value;

/// Angles, reference frames, points, paths, straight lines
pub mod geometry;

/// Lexer, statement/expression grammar, procedure definitions
pub mod parser;

/// The evaluable tree and its arity-driven builder
pub mod ast;

/// Frames, the stack, procedures, the result-slot protocol
pub mod memory;

/// The turtle state machine and the rendering seam
pub mod turtle;

/// The built-in procedure set
pub mod builtins;

/// The interpreter front-end
pub mod interp;

/// Crate-wide error type
pub mod error;

// Re-export the types an embedder touches first
pub use error::{Error, Result};
pub use interp::{Interpreter, Outcome};
pub use value::{Name, Value};
