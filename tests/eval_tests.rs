//! Evaluation of arity-nested trees against a seeded procedure
//! table, without the full built-in set in the way.

use tortuga::ast;
use tortuga::memory::{Builtin, Procedure};
use tortuga::parser::parse;
use tortuga::value::Value;
use tortuga::{Error, Interpreter, Result};

/// `eNop x` — record the argument in the global `__test__` variable.
fn enop(interp: &mut Interpreter) -> Result<()> {
    let value = interp.stack().argument(0)?.clone();
    interp.stack_mut().set_variable("__test__", value, true);
    Ok(())
}

fn binary(interp: &mut Interpreter, op: fn(f64, f64) -> f64) -> Result<()> {
    let a = interp.stack().argument(0)?.as_double()?;
    let b = interp.stack().argument(1)?.as_double()?;
    interp.stack_mut().store_result(Value::number(op(a, b)));
    Ok(())
}

fn sum(interp: &mut Interpreter) -> Result<()> {
    binary(interp, |a, b| a + b)
}

fn product(interp: &mut Interpreter) -> Result<()> {
    binary(interp, |a, b| a * b)
}

fn difference(interp: &mut Interpreter) -> Result<()> {
    binary(interp, |a, b| a - b)
}

fn quotient(interp: &mut Interpreter) -> Result<()> {
    binary(interp, |a, b| a / b)
}

fn max(interp: &mut Interpreter) -> Result<()> {
    binary(interp, f64::max)
}

fn minus(interp: &mut Interpreter) -> Result<()> {
    let a = interp.stack().argument(0)?.as_double()?;
    interp.stack_mut().store_result(Value::number(-a));
    Ok(())
}

/// A function that breaks the protocol: it never stores a result.
fn hollow(interp: &mut Interpreter) -> Result<()> {
    let _ = interp;
    Ok(())
}

fn interpreter() -> Interpreter {
    let mut interp = Interpreter::bare();
    let stack = interp.stack_mut();
    stack.set_procedure("eNop", Procedure::Builtin(Builtin::procedure(1, enop)));
    stack.set_procedure("eSum", Procedure::Builtin(Builtin::function(2, sum)));
    stack.set_procedure("sum", Procedure::Builtin(Builtin::function(2, sum)));
    stack.set_procedure("product", Procedure::Builtin(Builtin::function(2, product)));
    stack.set_procedure(
        "difference",
        Procedure::Builtin(Builtin::function(2, difference)),
    );
    stack.set_procedure(
        "quotient",
        Procedure::Builtin(Builtin::function(2, quotient)),
    );
    stack.set_procedure("max", Procedure::Builtin(Builtin::function(2, max)));
    stack.set_procedure("minus", Procedure::Builtin(Builtin::function(1, minus)));
    stack.set_procedure("hollow", Procedure::Builtin(Builtin::function(0, hollow)));
    stack.set_variable("a_num", Value::word("123"), true);
    interp
}

fn eval(interp: &mut Interpreter, line: &str) -> Result<()> {
    let stmt = parse(line, interp.stack())?;
    let tree = ast::build(&stmt, interp.stack())?;
    tree.apply(interp)
}

fn test_value(interp: &Interpreter) -> i64 {
    interp
        .stack()
        .variable("__test__")
        .expect("eNop should have recorded a value")
        .as_integer()
        .expect("recorded value should be numeric")
}

#[track_caller]
fn assert_eval(interp: &mut Interpreter, line: &str, expected: i64) {
    eval(interp, line).unwrap_or_else(|err| panic!("{line}: {err}"));
    assert_eq!(test_value(interp), expected, "line: {line}");
}

#[test]
fn test_nested_call_evaluation() {
    let mut interp = interpreter();
    assert_eval(&mut interp, "eNop eSum 1 2", 3);
    assert_eval(&mut interp, "eNop eSum 1 eSum 2 3", 6);
    assert_eval(&mut interp, "eNop eSum eSum 2 3 1", 6);
    assert_eval(&mut interp, "eNop eSum eSum 2 3 eSum 4 5", 14);
    assert_eval(&mut interp, "eNop eSum eSum eSum 2 1 3 eSum 4 5", 15);
    assert_eval(&mut interp, "eNop eSum eSum eSum 2 1 3 eSum 4 eSum 5 6", 21);
    assert_eval(
        &mut interp,
        "eNop eSum eSum eSum 2 1 eSum 3 7 eSum 4 eSum 5 6",
        28,
    );
}

#[test]
fn test_sibling_trees_run_in_order() {
    let mut interp = interpreter();
    assert_eval(&mut interp, "eNop 2 eNop eSum 5 6", 11);
    assert_eval(
        &mut interp,
        "eNop sum 2 sum 2 sum 2 2 eNop eSum eSum eSum 2 1 eSum 3 7 eSum 4 eSum 5 6",
        28,
    );
}

#[test]
fn test_case_insensitive_resolution() {
    let mut interp = interpreter();
    assert_eval(&mut interp, "ENOP ESUM 1 2", 3);
}

#[test]
fn test_unused_result_at_top_level() {
    let mut interp = interpreter();
    let stmt = parse("eNop eSum 4 5 eSum 6 7", interp.stack()).unwrap();
    let tree = ast::build(&stmt, interp.stack()).unwrap();
    assert_eq!(tree.len(), 2);
    assert!(matches!(tree.apply(&mut interp), Err(Error::UnusedResult(_))));
}

#[test]
fn test_expression_evaluation() {
    let mut interp = interpreter();
    assert_eval(&mut interp, "eNop 1+2", 3);
    assert_eval(&mut interp, "eNop 1 +2", 3);
    assert_eval(&mut interp, "eNop 1 + 2", 3);
    assert_eval(&mut interp, "eNop 1+2*3", 7);
    assert_eval(&mut interp, "eNop 2*3+1", 7);
    assert_eval(&mut interp, "eNop 2*(3+1)/2+1", 5);
    assert_eval(&mut interp, "eNop 2*5+(3+1)/2+1", 13);
    assert_eval(&mut interp, "eNop 2*5+(3-1)/2-1", 10);
}

#[test]
fn test_expressions_with_calls() {
    let mut interp = interpreter();
    assert_eval(&mut interp, "eNop max 5 9", 9);
    assert_eval(&mut interp, "eNop max 5 + 2 9", 9);
    assert_eval(&mut interp, "eNop max 5 2 *9", 18);
    assert_eval(&mut interp, "eNop 2 * max 5 2 *9", 36);
    assert_eval(&mut interp, "eNop 2 + (max 5 2 *9) * 2", 38);
}

#[test]
fn test_expressions_with_variables() {
    let mut interp = interpreter();
    assert_eval(&mut interp, "eNop :a_num + (max 5 2 *9) * 2", 159);
    assert_eval(&mut interp, "eNop 1 + max :a_num 2 *9", 124);
}

#[test]
fn test_undefined_variable() {
    let mut interp = interpreter();
    assert!(matches!(
        eval(&mut interp, "eNop :missing"),
        Err(Error::UndefinedVariable { .. })
    ));
}

#[test]
fn test_function_that_stores_nothing() {
    let mut interp = interpreter();
    assert!(matches!(
        eval(&mut interp, "eNop hollow"),
        Err(Error::ExpectedReturnValue)
    ));
}

#[test]
fn test_argument_count_is_enforced() {
    let mut interp = interpreter();
    let err = interp
        .call_procedure("eSum", vec![Value::word("1")], None)
        .unwrap_err();
    assert!(matches!(err, Error::ArgumentCount { expected: 2, got: 1, .. }));
}

#[test]
fn test_call_depth_recovers_after_errors() {
    let mut interp = interpreter();
    assert_eq!(interp.stack().n_frames(), 1);
    let _ = eval(&mut interp, "eNop hollow");
    assert_eq!(interp.stack().n_frames(), 1);
}
