//! Arithmetic functions.

use rand::Rng;

use crate::error::Result;
use crate::geometry::Angle;
use crate::interp::Interpreter;
use crate::memory::Stack;
use crate::value::Value;

use super::{function, output};

pub(super) fn register(stack: &mut Stack) {
    function(stack, &["sum"], 2, sum);
    function(stack, &["difference"], 2, difference);
    function(stack, &["minus"], 1, minus);
    function(stack, &["product"], 2, product);
    function(stack, &["quotient"], 2, quotient);
    // `remainder` and `module` are deliberately the same operation.
    function(stack, &["remainder", "module"], 2, remainder);
    function(stack, &["int"], 1, int);
    function(stack, &["round"], 1, round);
    function(stack, &["sqrt"], 1, sqrt);
    function(stack, &["power"], 2, power);
    function(stack, &["exp"], 1, exp);
    function(stack, &["log10"], 1, log10);
    function(stack, &["ln"], 1, ln);
    function(stack, &["sin"], 1, sin);
    function(stack, &["radsin"], 1, radsin);
    function(stack, &["cos"], 1, cos);
    function(stack, &["radcos"], 1, radcos);
    function(stack, &["arctan"], 1, arctan);
    function(stack, &["radarctan"], 1, radarctan);
    function(stack, &["random"], 1, random);
}

/// Two numeric arguments in, one formatted number out.
fn binary(interp: &mut Interpreter, op: fn(f64, f64) -> f64) -> Result<()> {
    let a = interp.stack().argument(0)?.as_double()?;
    let b = interp.stack().argument(1)?.as_double()?;
    output(interp, Value::number(op(a, b)));
    Ok(())
}

fn unary(interp: &mut Interpreter, op: fn(f64) -> f64) -> Result<()> {
    let a = interp.stack().argument(0)?.as_double()?;
    output(interp, Value::number(op(a)));
    Ok(())
}

fn sum(interp: &mut Interpreter) -> Result<()> {
    binary(interp, |a, b| a + b)
}

fn difference(interp: &mut Interpreter) -> Result<()> {
    binary(interp, |a, b| a - b)
}

fn minus(interp: &mut Interpreter) -> Result<()> {
    unary(interp, |a| -a)
}

fn product(interp: &mut Interpreter) -> Result<()> {
    binary(interp, |a, b| a * b)
}

fn quotient(interp: &mut Interpreter) -> Result<()> {
    binary(interp, |a, b| a / b)
}

fn remainder(interp: &mut Interpreter) -> Result<()> {
    let a = interp.stack().argument(0)?.as_integer()?;
    let b = interp.stack().argument(1)?.as_integer()?;
    if b == 0 {
        return Err(crate::error::Error::Type {
            expected: "a nonzero divisor",
            got: "0".into(),
        });
    }
    output(interp, Value::number((a % b) as f64));
    Ok(())
}

fn int(interp: &mut Interpreter) -> Result<()> {
    unary(interp, f64::trunc)
}

fn round(interp: &mut Interpreter) -> Result<()> {
    unary(interp, f64::round)
}

fn sqrt(interp: &mut Interpreter) -> Result<()> {
    unary(interp, f64::sqrt)
}

fn power(interp: &mut Interpreter) -> Result<()> {
    binary(interp, f64::powf)
}

fn exp(interp: &mut Interpreter) -> Result<()> {
    unary(interp, f64::exp)
}

fn log10(interp: &mut Interpreter) -> Result<()> {
    unary(interp, f64::log10)
}

fn ln(interp: &mut Interpreter) -> Result<()> {
    unary(interp, f64::ln)
}

fn sin(interp: &mut Interpreter) -> Result<()> {
    unary(interp, |a| Angle::degrees(a).sin())
}

fn radsin(interp: &mut Interpreter) -> Result<()> {
    unary(interp, |a| Angle::radians(a).sin())
}

fn cos(interp: &mut Interpreter) -> Result<()> {
    unary(interp, |a| Angle::degrees(a).cos())
}

fn radcos(interp: &mut Interpreter) -> Result<()> {
    unary(interp, |a| Angle::radians(a).cos())
}

fn arctan(interp: &mut Interpreter) -> Result<()> {
    unary(interp, |t| Angle::arctan(t).as_degrees())
}

fn radarctan(interp: &mut Interpreter) -> Result<()> {
    unary(interp, |t| Angle::arctan(t).as_radians())
}

/// A uniform integer in [0, n).
fn random(interp: &mut Interpreter) -> Result<()> {
    let n = interp.stack().argument(0)?.as_integer()?;
    let drawn = if n <= 0 {
        0
    } else {
        rand::thread_rng().gen_range(0..n)
    };
    output(interp, Value::number(drawn as f64));
    Ok(())
}
