//! The evaluable tree and its arity-driven builder.
//!
//! The parser leaves a statement's arguments flat; this module nests
//! them. Walking the argument sequence left to right, every procedure
//! name opens a call node that consumes the next `arity` nodes, and a
//! completed call closes back up to the nearest ancestor that still
//! wants arguments. A second procedure name at top level starts a new
//! sibling tree, so one line can hold several statements.

use crate::error::{Error, Result};
use crate::interp::Interpreter;
use crate::parser::{Argument, ArityLookup, Expression, Statement, SyntaxError};
use crate::value::Value;

/// One node of the evaluable tree.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// A procedure call; `children.len()` equals the declared arity.
    Call {
        name: String,
        children: Vec<AstNode>,
    },
    /// A variable reference, resolved through the stack at eval time.
    Variable(String),
    /// A constant word (numbers included).
    Const(Value),
    /// A list literal, carried verbatim for deferred interpretation.
    List(Value),
}

impl AstNode {
    /// Evaluate this node to a value. Pure procedures yield the empty
    /// word; functions yield whatever lands in the caller's slot.
    pub fn eval(&self, interp: &mut Interpreter) -> Result<Value> {
        match self {
            AstNode::Const(value) | AstNode::List(value) => Ok(value.clone()),
            AstNode::Variable(name) => interp.stack().variable(name).cloned(),
            AstNode::Call { name, children } => {
                let mut actuals = Vec::with_capacity(children.len());
                for child in children {
                    actuals.push(child.eval(interp)?);
                }
                interp.call_capture(name, actuals)
            }
        }
    }
}

/// An ordered sequence of top-level call trees.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ast {
    nodes: Vec<AstNode>,
}

impl Ast {
    /// Evaluate every top-level tree in order. Any tree producing a
    /// non-empty value at top level is an error: nothing consumes it.
    pub fn apply(&self, interp: &mut Interpreter) -> Result<()> {
        for node in &self.nodes {
            let value = node.eval(interp)?;
            if !value.is_empty() {
                return Err(Error::UnusedResult(value));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[AstNode] {
        &self.nodes
    }
}

/// Build the evaluable tree for a parsed statement.
pub fn build(stmt: &Statement, procs: &dyn ArityLookup) -> Result<Ast> {
    let mut builder = Builder::new(stmt, procs);
    builder.push_call(&stmt.name)?;
    for arg in &stmt.args {
        builder.push_argument(arg)?;
    }
    builder.finish()
}

/// An open call still collecting arguments.
struct OpenCall {
    name: String,
    arity: usize,
    children: Vec<AstNode>,
}

struct Builder<'a> {
    procs: &'a dyn ArityLookup,
    stmt: &'a Statement,
    roots: Vec<AstNode>,
    open: Vec<OpenCall>,
}

impl<'a> Builder<'a> {
    fn new(stmt: &'a Statement, procs: &'a dyn ArityLookup) -> Self {
        Self {
            procs,
            stmt,
            roots: Vec::new(),
            open: Vec::new(),
        }
    }

    fn push_argument(&mut self, arg: &Argument) -> Result<()> {
        match arg {
            Argument::Word(w) => self.push_leaf(AstNode::Const(Value::word(w))),
            Argument::List(list) => {
                let items = list.elements().iter().map(Value::word).collect();
                self.push_leaf(AstNode::List(Value::list(items)))
            }
            Argument::ProcName(name) => self.push_call(name),
            Argument::Expression(e) => self.push_expression(e),
        }
    }

    fn push_expression(&mut self, e: &Expression) -> Result<()> {
        match e {
            Expression::Number(text) => self.push_leaf(AstNode::Const(Value::word(text))),
            Expression::Variable(name) => self.push_leaf(AstNode::Variable(name.clone())),
            Expression::Minus(inner) => {
                self.push_call("minus")?;
                self.push_expression(inner)
            }
            Expression::Binary { op, lhs, rhs } => {
                self.push_call(op.procedure_name())?;
                self.push_expression(lhs)?;
                self.push_expression(rhs)
            }
            Expression::Call(stmt) => {
                self.push_call(&stmt.name)?;
                for arg in &stmt.args {
                    self.push_argument(arg)?;
                }
                Ok(())
            }
        }
    }

    fn push_call(&mut self, name: &str) -> Result<()> {
        self.close_completed();
        let arity = self
            .procs
            .arity(name)
            .ok_or_else(|| Error::undefined_procedure(name))?;
        self.open.push(OpenCall {
            name: name.to_string(),
            arity,
            children: Vec::with_capacity(arity),
        });
        Ok(())
    }

    fn push_leaf(&mut self, node: AstNode) -> Result<()> {
        self.close_completed();
        match self.open.last_mut() {
            Some(call) => {
                call.children.push(node);
                Ok(())
            }
            // A bare value at top level has no call to feed.
            None => Err(Error::InvalidStatement(format!(
                "nothing consumes the extra argument in `{}`",
                self.stmt
            ))),
        }
    }

    /// Close every completed call, attaching it to its parent or the
    /// root list.
    fn close_completed(&mut self) {
        while let Some(top) = self.open.last() {
            if top.children.len() < top.arity {
                break;
            }
            let done = self.open.pop().expect("just peeked");
            let node = AstNode::Call {
                name: done.name,
                children: done.children,
            };
            match self.open.last_mut() {
                Some(parent) => parent.children.push(node),
                None => self.roots.push(node),
            }
        }
    }

    fn finish(mut self) -> Result<Ast> {
        self.close_completed();
        if let Some(unfinished) = self.open.last() {
            // Missing arguments at end of line.
            let rendered = self.stmt.to_string();
            tracing::debug!(call = %unfinished.name, "statement ended mid-call");
            return Err(SyntaxError::new(rendered.clone(), rendered.len()).into());
        }
        Ok(Ast { nodes: self.roots })
    }
}
