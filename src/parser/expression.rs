//! Infix expression parsing.
//!
//! The precedence chain, loosest first:
//!
//! ```text
//! expression → equality → additive → multiplicative → unary → primary
//! ```
//!
//! Primaries are numbers, variables, parenthesized groups, and
//! function calls. A call in operand position consumes as many
//! expression arguments as the procedure's declared arity; inside
//! parentheses a leading procedure name switches to the flat statement
//! grammar instead, and the AST builder nests it later.

use std::fmt;

use crate::error::{Error, Result};

use super::lexer::TokenKind;
use super::parser::{Argument, Parser, Statement};

/// A parsed infix expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A numeric literal, kept as written.
    Number(String),
    /// `:name` with the colon stripped.
    Variable(String),
    /// Unary minus.
    Minus(Box<Expression>),
    /// A binary operator application.
    Binary {
        op: InfixOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    /// A function-call sub-statement.
    Call(Box<Statement>),
}

impl Expression {
    pub fn binary(op: InfixOp, lhs: Expression, rhs: Expression) -> Self {
        Expression::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn call(stmt: Statement) -> Self {
        Expression::Call(Box::new(stmt))
    }

    fn precedence(&self) -> u8 {
        match self {
            Expression::Binary { op, .. } => op.precedence(),
            Expression::Call(_) => 0,
            _ => 4,
        }
    }

    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, parent: u8) -> fmt::Result {
        let needs_parens = self.precedence() < parent;
        if needs_parens {
            write!(f, "(")?;
        }
        match self {
            Expression::Number(text) => write!(f, "{text}")?,
            Expression::Variable(name) => write!(f, ":{name}")?,
            Expression::Minus(inner) => {
                write!(f, "-")?;
                inner.fmt_prec(f, 4)?;
            }
            Expression::Binary { op, lhs, rhs } => {
                lhs.fmt_prec(f, op.precedence())?;
                write!(f, " {} ", op.symbol())?;
                rhs.fmt_prec(f, op.precedence() + 1)?;
            }
            Expression::Call(stmt) => write!(f, "{stmt}")?,
        }
        if needs_parens {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}

/// The supported infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Sum,
    Difference,
    Product,
    Quotient,
    Equal,
}

impl InfixOp {
    /// Recognize an operator character. Anything else (`~`, `!`, `%`,
    /// ...) is a syntax error at expression construction time.
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            '+' => Ok(InfixOp::Sum),
            '-' => Ok(InfixOp::Difference),
            '*' => Ok(InfixOp::Product),
            '/' => Ok(InfixOp::Quotient),
            '=' => Ok(InfixOp::Equal),
            _ => Err(Error::Syntax(super::SyntaxError::new(c.to_string(), 0))),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            InfixOp::Sum => '+',
            InfixOp::Difference => '-',
            InfixOp::Product => '*',
            InfixOp::Quotient => '/',
            InfixOp::Equal => '=',
        }
    }

    /// The procedure the operator lowers to in the AST.
    pub fn procedure_name(&self) -> &'static str {
        match self {
            InfixOp::Sum => "sum",
            InfixOp::Difference => "difference",
            InfixOp::Product => "product",
            InfixOp::Quotient => "quotient",
            InfixOp::Equal => "equalp",
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            InfixOp::Equal => 1,
            InfixOp::Sum | InfixOp::Difference => 2,
            InfixOp::Product | InfixOp::Quotient => 3,
        }
    }
}

/// Parse an expression at the loosest precedence level.
pub(super) fn parse(p: &mut Parser<'_>) -> Result<Expression> {
    equality(p)
}

/// `equality → additive ('=' additive)*`
fn equality(p: &mut Parser<'_>) -> Result<Expression> {
    let mut lhs = additive(p)?;
    while p.at(TokenKind::Equals) {
        p.bump();
        let rhs = additive(p)?;
        lhs = Expression::binary(InfixOp::Equal, lhs, rhs);
    }
    Ok(lhs)
}

/// `additive → multiplicative (('+' | '-') multiplicative)*`
fn additive(p: &mut Parser<'_>) -> Result<Expression> {
    let mut lhs = multiplicative(p)?;
    loop {
        let op = match p.peek_kind() {
            Some(TokenKind::Plus) => InfixOp::Sum,
            Some(TokenKind::Minus) => InfixOp::Difference,
            _ => break,
        };
        p.bump();
        let rhs = multiplicative(p)?;
        lhs = Expression::binary(op, lhs, rhs);
    }
    Ok(lhs)
}

/// `multiplicative → unary (('*' | '/') unary)*`
fn multiplicative(p: &mut Parser<'_>) -> Result<Expression> {
    let mut lhs = unary(p)?;
    loop {
        let op = match p.peek_kind() {
            Some(TokenKind::Star) => InfixOp::Product,
            Some(TokenKind::Slash) => InfixOp::Quotient,
            _ => break,
        };
        p.bump();
        let rhs = unary(p)?;
        lhs = Expression::binary(op, lhs, rhs);
    }
    Ok(lhs)
}

/// `unary → '-' unary | primary`
fn unary(p: &mut Parser<'_>) -> Result<Expression> {
    if p.at(TokenKind::Minus) {
        p.bump();
        return Ok(Expression::Minus(Box::new(unary(p)?)));
    }
    primary(p)
}

/// `primary → number | variable | '(' group ')' | call`
fn primary(p: &mut Parser<'_>) -> Result<Expression> {
    match p.peek_kind() {
        Some(TokenKind::Number) => Ok(Expression::Number(p.bump().text.to_string())),
        Some(TokenKind::Variable) => {
            let text = p.bump().text;
            Ok(Expression::Variable(text[1..].to_string()))
        }
        Some(TokenKind::LParen) => {
            p.bump();
            // A leading procedure name switches to the flat statement
            // grammar; anything else is a grouped expression.
            let inner = if p.at(TokenKind::ProcName) {
                Expression::call(p.paren_statement()?)
            } else {
                parse(p)?
            };
            if !p.at(TokenKind::RParen) {
                return Err(p.error_here());
            }
            p.bump();
            Ok(inner)
        }
        Some(TokenKind::ProcName) => call(p),
        _ => Err(p.error_here()),
    }
}

/// A function call in operand position: the declared arity decides
/// how many expression arguments follow the name.
fn call(p: &mut Parser<'_>) -> Result<Expression> {
    let name = p.bump().text.to_string();
    let arity = p
        .arity_of(&name)
        .ok_or_else(|| Error::undefined_procedure(&name))?;

    let mut args = Vec::with_capacity(arity);
    for _ in 0..arity {
        args.push(Argument::Expression(parse(p)?));
    }
    Ok(Expression::call(Statement { name, args }))
}
