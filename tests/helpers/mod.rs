//! Shared support for the integration suites.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use tortuga::interp::Outcome;
use tortuga::{Interpreter, Result};

/// A Write sink that stays readable after being boxed away.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// A ready interpreter with captured output and error streams.
pub struct Session {
    pub interp: Interpreter,
    out: SharedBuffer,
    err: SharedBuffer,
}

impl Session {
    pub fn new() -> Self {
        let out = SharedBuffer::new();
        let err = SharedBuffer::new();
        let interp = Interpreter::new()
            .with_output(Box::new(out.clone()))
            .with_error_output(Box::new(err.clone()));
        Self { interp, out, err }
    }

    /// Evaluate one statement line.
    pub fn one(&mut self, line: &str) -> Result<()> {
        self.interp.one(line)
    }

    /// Feed one line of the interactive protocol.
    pub fn feed(&mut self, line: &str) -> Result<Outcome> {
        self.interp.feed(line)
    }

    /// Evaluate a line and return everything printed so far.
    pub fn run(&mut self, line: &str) -> String {
        self.one(line).expect("line should evaluate");
        self.output()
    }

    /// Evaluate a line and return only what it printed.
    pub fn capture(&mut self, line: &str) -> String {
        self.out.clear();
        self.run(line)
    }

    pub fn output(&self) -> String {
        self.out.contents()
    }

    pub fn errors(&self) -> String {
        self.err.contents()
    }
}
