//! Recursive-descent statement parser.
//!
//! A statement is a procedure name followed by arguments. An argument
//! is a quoted word, a list literal, a bare procedure name (left for
//! the AST builder to nest by arity), or an infix expression. The
//! reserved names `TO` and `END` get their own shapes, validated here
//! so misuse is reported with the exact offending position.

use std::fmt;

use crate::base::Span;
use crate::error::{Error, Result};

use super::expression::{self, Expression};
use super::lexer::{Lexer, Token, TokenKind};
use super::{ArityLookup, SyntaxError};

/// A parsed statement: procedure name plus raw argument sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statement {
    pub name: String,
    pub args: Vec<Argument>,
}

impl Statement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Blank or comment-only lines parse to the empty statement.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Does this statement open a procedure definition?
    pub fn is_start_procedure(&self) -> bool {
        self.name.eq_ignore_ascii_case("TO")
    }

    /// Does this statement close a procedure definition?
    pub fn is_end_procedure(&self) -> bool {
        self.name.eq_ignore_ascii_case("END")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// One raw argument of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// `"word` with the quote stripped.
    Word(String),
    /// `[ ... ]` captured verbatim.
    List(ListLiteral),
    /// A bare procedure name; the AST builder gives it its arguments.
    ProcName(String),
    /// An infix expression (also covers lone numbers and variables).
    Expression(Expression),
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Word(w) => write!(f, "\"{w}"),
            Argument::List(list) => write!(f, "{list}"),
            Argument::ProcName(name) => write!(f, "{name}"),
            Argument::Expression(e) => write!(f, "{e}"),
        }
    }
}

/// A list literal: verbatim whitespace-separated elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListLiteral(pub Vec<String>);

impl ListLiteral {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn elements(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ListLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(" "))
    }
}

/// Parse one source line into a statement.
///
/// The procedure table decides how many expression arguments a
/// function call consumes, so the parser takes an [`ArityLookup`].
pub fn parse(line: &str, procs: &dyn ArityLookup) -> Result<Statement> {
    let mut parser = Parser::new(line, procs);
    let statement = parser.statement()?;
    tracing::trace!(line, %statement, "parsed");
    Ok(statement)
}

pub(super) struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    line: &'a str,
    procs: &'a dyn ArityLookup,
}

impl<'a> Parser<'a> {
    fn new(line: &'a str, procs: &'a dyn ArityLookup) -> Self {
        Self {
            tokens: Lexer::new(line).collect(),
            pos: 0,
            line,
            procs,
        }
    }

    pub(super) fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    pub(super) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub(super) fn bump(&mut self) -> Token<'a> {
        let token = self.tokens[self.pos];
        self.pos += 1;
        token
    }

    pub(super) fn arity_of(&self, name: &str) -> Option<usize> {
        self.procs.arity(name)
    }

    /// Syntax error at the current token (or at end of line).
    pub(super) fn error_here(&self) -> Error {
        let position = self
            .peek()
            .map(|t| t.span.start())
            .unwrap_or(self.line.len());
        SyntaxError::new(self.line, position).into()
    }

    pub(super) fn error_at(&self, span: Span) -> Error {
        SyntaxError::new(self.line, span.start()).into()
    }

    fn statement(&mut self) -> Result<Statement> {
        if self.peek().is_none() {
            return Ok(Statement::default());
        }

        let name = match self.peek_kind() {
            Some(TokenKind::ProcName) => self.bump().text.to_string(),
            _ => return Err(self.error_here()),
        };

        if name.eq_ignore_ascii_case("TO") {
            return self.to_statement(name);
        }
        if name.eq_ignore_ascii_case("END") {
            return self.end_statement(name);
        }

        let mut args = Vec::new();
        while self.peek().is_some() {
            args.push(self.argument()?);
        }
        Ok(Statement { name, args })
    }

    /// `TO name :param ...` — the name must be a procedure name, every
    /// following token a variable.
    fn to_statement(&mut self, name: String) -> Result<Statement> {
        let mut args = Vec::new();
        if self.peek().is_some() {
            match self.peek_kind() {
                Some(TokenKind::ProcName) => {
                    args.push(Argument::ProcName(self.bump().text.to_string()));
                }
                _ => return Err(self.error_here()),
            }
            while self.peek().is_some() {
                match self.peek_kind() {
                    Some(TokenKind::Variable) => {
                        let text = self.bump().text;
                        args.push(Argument::Expression(Expression::Variable(
                            text[1..].to_string(),
                        )));
                    }
                    _ => return Err(self.error_here()),
                }
            }
        }
        Ok(Statement { name, args })
    }

    /// `END` takes no arguments.
    fn end_statement(&mut self, name: String) -> Result<Statement> {
        if self.peek().is_some() {
            return Err(self.error_here());
        }
        Ok(Statement { name, args: Vec::new() })
    }

    /// One statement-level argument.
    pub(super) fn argument(&mut self) -> Result<Argument> {
        let token = self.peek().ok_or_else(|| self.error_here())?;
        match token.kind {
            TokenKind::Word => {
                let text = self.bump().text;
                Ok(Argument::Word(text[1..].to_string()))
            }
            TokenKind::LBracket => Ok(Argument::List(self.list()?)),
            TokenKind::ProcName => Ok(Argument::ProcName(self.bump().text.to_string())),
            TokenKind::Number
            | TokenKind::Variable
            | TokenKind::LParen
            | TokenKind::Minus => Ok(Argument::Expression(expression::parse(self)?)),
            _ => Err(self.error_here()),
        }
    }

    /// A list literal. Brackets do not nest at parse time: the
    /// contents are captured verbatim for deferred interpretation.
    fn list(&mut self) -> Result<ListLiteral> {
        let open = self.bump();
        debug_assert_eq!(open.kind, TokenKind::LBracket);

        let mut elements = Vec::new();
        loop {
            match self.peek_kind() {
                Some(TokenKind::ListElement) => {
                    elements.push(self.bump().text.to_string());
                }
                Some(TokenKind::RBracket) => {
                    self.bump();
                    return Ok(ListLiteral(elements));
                }
                // A nested `[`, or the line ran out before `]`.
                Some(_) => return Err(self.error_here()),
                None => return Err(self.error_at(open.span)),
            }
        }
    }

    /// The flat statement form allowed inside parentheses: a name and
    /// ordinary arguments up to the closing `)`.
    pub(super) fn paren_statement(&mut self) -> Result<Statement> {
        let name = self.bump().text.to_string();
        let mut args = Vec::new();
        while let Some(token) = self.peek() {
            if token.kind == TokenKind::RParen {
                break;
            }
            args.push(self.argument()?);
        }
        Ok(Statement { name, args })
    }
}
