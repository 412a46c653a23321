//! The frame stack and its lookup rules.

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::parser::{ArityLookup, ProcedureDef};
use crate::value::Value;

use super::{Frame, Procedure};

/// Prefix of the positional argument bindings: `_p0`, `_p1`, ...
pub const ARGUMENT_PREFIX: &str = "_p";

/// Slot used when a caller does not name one explicitly.
pub const INTERNAL_RESULT: &str = "__internal__returned__value__captured__";

/// Where `repeat` publishes the 0-based iteration index.
pub const REPCOUNT: &str = "__REPCOUNT__";

/// The ordered frame stack. Index 0 is the global frame and is never
/// closed; the last frame is the current one.
///
/// Frames live inside a growable vector, so holding a frame reference
/// across `open_frame`/`close_frame` is not possible here: every
/// lookup walks the stack afresh.
#[derive(Debug, Clone)]
pub struct Stack {
    frames: Vec<Frame>,
}

impl Stack {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new()],
        }
    }

    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn global_frame(&self) -> &Frame {
        &self.frames[0]
    }

    pub fn global_frame_mut(&mut self) -> &mut Frame {
        &mut self.frames[0]
    }

    pub fn current_frame(&self) -> &Frame {
        self.frames.last().expect("the global frame always exists")
    }

    pub fn current_frame_mut(&mut self) -> &mut Frame {
        self.frames
            .last_mut()
            .expect("the global frame always exists")
    }

    /// The frame below the current one: the caller of whatever is
    /// running now (the global frame at top level). Built-ins that
    /// create bindings on behalf of their caller use this.
    pub fn caller_frame_mut(&mut self) -> &mut Frame {
        let index = self.frames.len().saturating_sub(2);
        &mut self.frames[index]
    }

    pub fn open_frame(&mut self) {
        self.frames.push(Frame::new());
        tracing::trace!(depth = self.frames.len(), "frame opened");
    }

    /// Close the current frame, reconciling the result protocol: a
    /// stored result must meet an awaiting slot on the parent, and an
    /// awaiting slot must be fed. The frame is gone either way.
    pub fn close_frame(&mut self) -> Result<()> {
        if self.frames.len() <= 1 {
            return Err(Error::UnclosableFrame);
        }
        let mut child = self.frames.pop().expect("length just checked");
        tracing::trace!(depth = self.frames.len(), "frame closed");
        let parent = self.frames.last_mut().expect("length just checked");

        match (child.take_result(), parent.take_awaiting()) {
            (Some(value), Some(slot)) => {
                parent.set_variable(slot.as_str(), value);
                Ok(())
            }
            (Some(_), None) => Err(Error::InvalidReturnValue),
            (None, Some(_)) => Err(Error::ExpectedReturnValue),
            (None, None) => Ok(()),
        }
    }

    /// Drop the current frame without running the result protocol.
    /// Used when an error is already unwinding through it.
    pub fn abandon_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
            tracing::trace!(depth = self.frames.len(), "frame abandoned");
        }
    }

    /// Drop any result routing recorded on the current frame, so a
    /// failed call does not leave a slot waiting for the next one.
    pub fn cancel_awaiting(&mut self) {
        self.current_frame_mut().take_awaiting();
    }

    /// Variable lookup: scan from the current frame toward the global
    /// one, first hit wins.
    pub fn variable(&self, name: &str) -> Result<&Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.variable(name))
            .ok_or_else(|| Error::undefined_variable(name))
    }

    pub fn variable_mut(&mut self, name: &str) -> Result<&mut Value> {
        self.frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.variable_mut(name))
            .ok_or_else(|| Error::undefined_variable(name))
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.frames.iter().any(|frame| frame.has_variable(name))
    }

    /// Assignment rule of `make` and `name`: update the variable in
    /// the innermost frame that has it; create it on the global frame
    /// otherwise. `force_global` skips the scan.
    pub fn set_variable(&mut self, name: &str, value: Value, force_global: bool) {
        if !force_global {
            if let Some(frame) = self
                .frames
                .iter_mut()
                .rev()
                .find(|frame| frame.has_variable(name))
            {
                frame.set_variable(name, value);
                return;
            }
        }
        self.global_frame_mut().set_variable(name, value);
    }

    /// Create (or overwrite) a variable on the current frame.
    pub fn local(&mut self, name: &str, value: Value) {
        self.current_frame_mut().set_variable(name, value);
    }

    /// Procedure lookup: same scan as variables.
    pub fn procedure(&self, name: &str) -> Result<Rc<Procedure>> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.procedure(name))
            .ok_or_else(|| Error::undefined_procedure(name))
    }

    pub fn has_procedure(&self, name: &str) -> bool {
        self.frames.iter().any(|frame| frame.has_procedure(name))
    }

    pub fn procedure_arity(&self, name: &str) -> Result<usize> {
        Ok(self.procedure(name)?.arity())
    }

    /// Register a procedure on the global frame.
    pub fn set_procedure(&mut self, name: &str, procedure: Procedure) {
        self.global_frame_mut()
            .set_procedure(name, Rc::new(procedure));
    }

    /// Register a procedure on the current frame.
    pub fn set_local_procedure(&mut self, name: &str, procedure: Procedure) {
        self.current_frame_mut()
            .set_procedure(name, Rc::new(procedure));
    }

    /// Commit a completed user definition to the global table.
    pub fn define_user(&mut self, def: ProcedureDef) -> Result<()> {
        let name = def.name().to_string();
        if name.is_empty() {
            return Err(Error::InvalidProcedureBody("missing name".into()));
        }
        if name.eq_ignore_ascii_case("TO") || name.eq_ignore_ascii_case("END") {
            return Err(Error::InvalidProcedureBody(format!(
                "`{name}` is reserved"
            )));
        }
        tracing::debug!(name = %name, arity = def.arity(), "procedure recorded");
        self.set_procedure(&name, Procedure::UserDefined(def));
        Ok(())
    }

    /// The canonical name of positional argument `index`.
    pub fn argument_name(index: usize) -> String {
        format!("{ARGUMENT_PREFIX}{index}")
    }

    /// The `index`-th actual argument of the current call.
    pub fn argument(&self, index: usize) -> Result<&Value> {
        self.current_frame()
            .variable(&Self::argument_name(index))
            .ok_or_else(|| Error::undefined_variable(Self::argument_name(index)))
    }

    pub fn argument_mut(&mut self, index: usize) -> Result<&mut Value> {
        self.current_frame_mut()
            .variable_mut(&Self::argument_name(index))
            .ok_or_else(|| Error::undefined_variable(Self::argument_name(index)))
    }

    /// Store the current procedure's return value.
    pub fn store_result(&mut self, value: Value) {
        self.current_frame_mut().store_result(value);
    }

    /// Reset to a single, empty global frame.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.frames.push(Frame::new());
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl ArityLookup for Stack {
    fn arity(&self, name: &str) -> Option<usize> {
        self.procedure(name).ok().map(|p| p.arity())
    }
}
