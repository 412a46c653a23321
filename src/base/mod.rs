//! Foundation types shared by the lexer and the diagnostics.
//!
//! This module has no dependencies on other tortuga modules.

mod position;

pub use position::Span;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
