//! Multi-line procedure definitions.
//!
//! `TO name :params...` opens a definition; following lines are
//! collected as raw text (each one parse-checked on entry) until a
//! lone `END`. Bodies are re-parsed at call time, which is what makes
//! forward references between user procedures work.

use std::fmt;

use crate::error::{Error, Result};

use super::parser::{Argument, Statement, parse};
use super::{ArityLookup, Expression};

/// A user procedure under definition (and, once committed, its body).
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDef {
    name: String,
    params: Vec<String>,
    lines: Vec<String>,
}

impl ProcedureDef {
    /// Start a definition from a parsed `TO` statement.
    pub fn new(stmt: Statement) -> Result<Self> {
        if !stmt.is_start_procedure() {
            return Err(Error::InvalidProcedureBody(format!(
                "`{}` does not start a definition",
                stmt.name
            )));
        }

        let mut args = stmt.args.into_iter();
        let name = match args.next() {
            Some(Argument::ProcName(name)) => name,
            Some(_) => {
                return Err(Error::InvalidStatement(
                    "TO must be followed by a procedure name".into(),
                ));
            }
            None => {
                return Err(Error::InvalidStatement(
                    "TO requires a procedure name".into(),
                ));
            }
        };

        let mut params = Vec::new();
        for arg in args {
            match arg {
                Argument::Expression(Expression::Variable(param)) => params.push(param),
                _ => {
                    return Err(Error::InvalidStatement(
                        "TO parameters must be variables".into(),
                    ));
                }
            }
        }

        Ok(Self {
            name,
            params,
            lines: Vec::new(),
        })
    }

    /// Add one body line. Returns true when the line was `END` and the
    /// definition is complete. Lines are parse-checked now but stored
    /// raw; evaluation re-parses them at call time.
    pub fn add_line(&mut self, line: &str, procs: &dyn ArityLookup) -> Result<bool> {
        let stmt = parse(line, procs)?;
        if stmt.is_end_procedure() {
            return Ok(true);
        }
        if stmt.is_start_procedure() {
            return Err(Error::InvalidStatement(
                "definitions do not nest".into(),
            ));
        }
        self.lines.push(line.to_string());
        Ok(false)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for ProcedureDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TO {}", self.name)?;
        for param in &self.params {
            write!(f, " :{param}")?;
        }
        for line in &self.lines {
            write!(f, "\n{line}")?;
        }
        write!(f, "\nEND")
    }
}
