//! The call-stack memory model.
//!
//! - [`Frame`] — one activation record: variables, procedures, and the
//!   result-slot state the call protocol threads through
//! - [`Stack`] — the frame stack; index 0 is the global frame, lookup
//!   scans from the current frame toward it (dynamic scope)
//! - [`Procedure`] — a built-in (native body) or a user definition
//!   (raw lines, re-parsed at call time)
//!
//! All identifier tables key on [`Name`](crate::value::Name), so
//! lookup folds case and iteration order stays deterministic.

mod frame;
mod procedure;
mod stack;

pub use frame::Frame;
pub use procedure::{Builtin, BuiltinFn, Procedure};
pub use stack::{ARGUMENT_PREFIX, INTERNAL_RESULT, REPCOUNT, Stack};
