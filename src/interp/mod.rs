//! The line-level interpreter front-end.
//!
//! An [`Interpreter`] owns the one stack, the one turtle and the
//! output/error streams, and drives them a line at a time: ordinary
//! lines are parsed, built into an AST and applied; `TO` opens a
//! multi-line definition collected until `END`; `bye` leaves the
//! loop. Every error is reported on the error stream and the loop
//! carries on with the next line.

use std::io::{BufRead, Write};

use crate::ast;
use crate::builtins;
use crate::error::{Error, Result};
use crate::memory::{INTERNAL_RESULT, Procedure, Stack};
use crate::parser::{ProcedureDef, SyntaxError, parse};
use crate::turtle::{NullRenderer, Renderer, Turtle};
use crate::value::Value;

/// What feeding one line did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The line was evaluated (or blank).
    Evaluated,
    /// The line opened or extended a procedure definition.
    Collecting,
    /// The line was `END` and the definition is now committed.
    Recorded,
}

/// The interpreter: stack, turtle, streams, and definition state.
pub struct Interpreter {
    stack: Stack,
    turtle: Turtle,
    output: Box<dyn Write>,
    errors: Box<dyn Write>,
    pending: Option<ProcedureDef>,
    show_prompt: bool,
}

impl Interpreter {
    /// A ready interpreter: built-ins registered, no renderer, the
    /// process streams.
    pub fn new() -> Self {
        let mut interp = Self::bare();
        builtins::register(&mut interp.stack);
        interp
    }

    /// An interpreter with an empty procedure table, for embedders
    /// and tests that seed their own.
    pub fn bare() -> Self {
        Self {
            stack: Stack::new(),
            turtle: Turtle::new(Box::new(NullRenderer)),
            output: Box::new(std::io::stdout()),
            errors: Box::new(std::io::stderr()),
            pending: None,
            show_prompt: false,
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.turtle = Turtle::new(renderer);
        self
    }

    pub fn with_output(mut self, output: Box<dyn Write>) -> Self {
        self.output = output;
        self
    }

    pub fn with_error_output(mut self, errors: Box<dyn Write>) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_prompt(mut self, show: bool) -> Self {
        self.show_prompt = show;
        self
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    pub fn turtle(&self) -> &Turtle {
        &self.turtle
    }

    pub fn turtle_mut(&mut self) -> &mut Turtle {
        &mut self.turtle
    }

    /// The configured output stream, for the I/O built-ins.
    pub fn output_mut(&mut self) -> &mut dyn Write {
        self.output.as_mut()
    }

    /// Evaluate a single statement line. Definitions are not allowed
    /// here; use [`feed`](Self::feed) for the full line protocol.
    pub fn one(&mut self, line: &str) -> Result<()> {
        let stmt = parse(line, &self.stack)?;
        if stmt.is_empty() {
            return Ok(());
        }
        if stmt.is_start_procedure() {
            return Err(Error::InvalidStatement(
                "a definition cannot complete in a single statement".into(),
            ));
        }
        if stmt.is_end_procedure() {
            return Err(SyntaxError::new(line, 0).into());
        }
        let ast = ast::build(&stmt, &self.stack)?;
        ast.apply(self)
    }

    /// Feed one line of the interactive protocol: collect definition
    /// bodies when one is open, otherwise evaluate.
    pub fn feed(&mut self, line: &str) -> Result<Outcome> {
        if let Some(def) = self.pending.as_mut() {
            let done = def.add_line(line, &self.stack)?;
            if !done {
                return Ok(Outcome::Collecting);
            }
            let def = self.pending.take().expect("a definition is open");
            self.stack.define_user(def)?;
            return Ok(Outcome::Recorded);
        }

        let stmt = parse(line, &self.stack)?;
        if stmt.is_empty() {
            return Ok(Outcome::Evaluated);
        }
        if stmt.is_start_procedure() {
            self.pending = Some(ProcedureDef::new(stmt)?);
            return Ok(Outcome::Collecting);
        }
        if stmt.is_end_procedure() {
            return Err(SyntaxError::new(line, 0).into());
        }
        let ast = ast::build(&stmt, &self.stack)?;
        ast.apply(self)?;
        Ok(Outcome::Evaluated)
    }

    /// The interactive loop: read lines until EOF or `bye`, reporting
    /// every error on the error stream and carrying on.
    pub fn run(&mut self, input: &mut dyn BufRead) -> Result<()> {
        let mut line = String::new();
        loop {
            self.prompt()?;
            line.clear();
            let read = input.read_line(&mut line).map_err(Error::io)?;
            if read == 0 {
                break;
            }
            let line = line.trim_end_matches(['\n', '\r']);
            if line.trim().eq_ignore_ascii_case("bye") {
                break;
            }
            match self.feed(line) {
                Ok(Outcome::Recorded) => {
                    writeln!(self.errors, "Procedure recorded.").map_err(Error::io)?;
                }
                Ok(_) => {}
                Err(err) => {
                    writeln!(self.errors, "I don't know how to {line} ({err})")
                        .map_err(Error::io)?;
                }
            }
        }
        self.output.flush().map_err(Error::io)?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        if self.show_prompt {
            write!(self.errors, "? ").map_err(Error::io)?;
            self.errors.flush().map_err(Error::io)?;
        }
        Ok(())
    }

    /// Call a procedure and capture whatever it returns through the
    /// internal result slot (the empty word for pure procedures).
    pub fn call_capture(&mut self, name: &str, actuals: Vec<Value>) -> Result<Value> {
        self.stack
            .current_frame_mut()
            .set_variable(INTERNAL_RESULT, Value::empty());
        self.call_procedure(name, actuals, Some(INTERNAL_RESULT))?;
        self.stack.variable(INTERNAL_RESULT).cloned()
    }

    /// The call protocol: resolve, arity-check, route the result
    /// slot, bind `_p0..`, run the body, close the frame.
    pub fn call_procedure(
        &mut self,
        name: &str,
        actuals: Vec<Value>,
        return_into: Option<&str>,
    ) -> Result<()> {
        let procedure = self.stack.procedure(name)?;
        if procedure.arity() != actuals.len() {
            return Err(Error::ArgumentCount {
                name: name.to_string(),
                expected: procedure.arity(),
                got: actuals.len(),
            });
        }
        tracing::debug!(name, arity = procedure.arity(), "call");

        if procedure.is_function() {
            if let Some(slot) = return_into {
                self.stack.current_frame_mut().await_result_in(slot);
            }
        }

        self.stack.open_frame();
        for (index, actual) in actuals.into_iter().enumerate() {
            self.stack.local(&Stack::argument_name(index), actual);
        }

        let outcome = match procedure.as_ref() {
            Procedure::Builtin(builtin) => (builtin.body)(self),
            Procedure::UserDefined(def) => self.run_body(def),
        };

        match outcome {
            Ok(()) => self.stack.close_frame(),
            Err(err) => {
                // The error is already unwinding; drop the frame and
                // any routing recorded on the caller.
                self.stack.abandon_frame();
                self.stack.cancel_awaiting();
                Err(err)
            }
        }
    }

    /// Run a user definition's body, one line at a time. Bodies are
    /// re-parsed here so procedures defined after this one resolve.
    fn run_body(&mut self, def: &ProcedureDef) -> Result<()> {
        // Give the positional bindings their declared names.
        for (index, param) in def.params().iter().enumerate() {
            let actual = self.stack.argument(index)?.clone();
            self.stack.local(param, actual);
        }
        for line in def.lines() {
            let stmt = parse(line, &self.stack)?;
            if stmt.is_empty() {
                continue;
            }
            if stmt.is_start_procedure() {
                return Err(Error::InvalidStatement(
                    "definitions do not nest".into(),
                ));
            }
            let ast = ast::build(&stmt, &self.stack)?;
            ast.apply(self)?;
        }
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("frames", &self.stack.n_frames())
            .field("turtle", &self.turtle)
            .field("defining", &self.pending.is_some())
            .finish()
    }
}
