//! Turtle graphics procedures.

use crate::error::{Error, Result};
use crate::interp::Interpreter;
use crate::memory::Stack;
use crate::turtle::BoundaryMode;
use crate::value::Value;

use super::{function, output, procedure};

pub(super) fn register(stack: &mut Stack) {
    procedure(stack, &["forward", "fd"], 1, forward);
    procedure(stack, &["back", "bk", "backward"], 1, back);
    procedure(stack, &["right", "rt"], 1, right);
    procedure(stack, &["left", "lt"], 1, left);
    procedure(stack, &["home"], 0, home);
    procedure(stack, &["clean"], 0, clean);
    procedure(stack, &["clearscreen", "cs"], 0, clearscreen);
    procedure(stack, &["setpos"], 1, setpos);
    procedure(stack, &["setxy"], 2, setxy);
    procedure(stack, &["setx"], 1, setx);
    procedure(stack, &["sety"], 1, sety);
    procedure(stack, &["setheading", "seth"], 1, setheading);
    function(stack, &["pos"], 0, pos);
    function(stack, &["xcor"], 0, xcor);
    function(stack, &["ycor"], 0, ycor);
    function(stack, &["heading"], 0, heading);
    function(stack, &["towards"], 1, towards);
    function(stack, &["scrunch"], 0, scrunch);
    procedure(stack, &["setscrunch"], 2, setscrunch);
    procedure(stack, &["showturtle", "st"], 0, showturtle);
    procedure(stack, &["hideturtle", "ht"], 0, hideturtle);
    procedure(stack, &["window"], 0, window);
    procedure(stack, &["fence"], 0, fence);
    procedure(stack, &["wrap"], 0, wrap);
    function(stack, &["turtlemode"], 0, turtlemode);
    function(stack, &["shownp", "shown?"], 0, shownp);
    procedure(stack, &["penup", "pu"], 0, penup);
    procedure(stack, &["pendown", "pd"], 0, pendown);
}

fn forward(interp: &mut Interpreter) -> Result<()> {
    let steps = interp.stack().argument(0)?.as_integer()? as i32;
    interp.turtle_mut().forward(steps)
}

fn back(interp: &mut Interpreter) -> Result<()> {
    let steps = interp.stack().argument(0)?.as_integer()? as i32;
    interp.turtle_mut().forward(-steps)
}

fn right(interp: &mut Interpreter) -> Result<()> {
    let degrees = interp.stack().argument(0)?.as_double()?;
    interp.turtle_mut().right(degrees)
}

fn left(interp: &mut Interpreter) -> Result<()> {
    let degrees = interp.stack().argument(0)?.as_double()?;
    interp.turtle_mut().right(-degrees)
}

fn home(interp: &mut Interpreter) -> Result<()> {
    interp.turtle_mut().home()
}

fn clean(interp: &mut Interpreter) -> Result<()> {
    interp.turtle_mut().clean()
}

fn clearscreen(interp: &mut Interpreter) -> Result<()> {
    interp.turtle_mut().home()?;
    interp.turtle_mut().clean()
}

/// The `[x y]` pair a position argument must carry.
fn coordinates(value: &Value) -> Result<(i32, i32)> {
    let items = value.as_list()?;
    if items.len() != 2 {
        return Err(Error::type_error("X,Y coordinates", value));
    }
    Ok((
        items[0].as_integer()? as i32,
        items[1].as_integer()? as i32,
    ))
}

fn setpos(interp: &mut Interpreter) -> Result<()> {
    let target = interp.stack().argument(0)?.clone();
    let (x, y) = coordinates(&target)?;
    interp.turtle_mut().set_position(x, y)
}

fn setxy(interp: &mut Interpreter) -> Result<()> {
    let x = interp.stack().argument(0)?.as_integer()? as i32;
    let y = interp.stack().argument(1)?.as_integer()? as i32;
    interp.turtle_mut().set_position(x, y)
}

fn setx(interp: &mut Interpreter) -> Result<()> {
    let x = interp.stack().argument(0)?.as_integer()? as i32;
    interp.turtle_mut().set_x(x)
}

fn sety(interp: &mut Interpreter) -> Result<()> {
    let y = interp.stack().argument(0)?.as_integer()? as i32;
    interp.turtle_mut().set_y(y)
}

fn setheading(interp: &mut Interpreter) -> Result<()> {
    let degrees = interp.stack().argument(0)?.as_double()?;
    interp.turtle_mut().set_heading(degrees)
}

fn pos(interp: &mut Interpreter) -> Result<()> {
    let (x, y) = interp.turtle().position();
    let value = Value::list(vec![
        Value::number(x as f64),
        Value::number(y as f64),
    ]);
    output(interp, value);
    Ok(())
}

fn xcor(interp: &mut Interpreter) -> Result<()> {
    let (x, _) = interp.turtle().position();
    output(interp, Value::number(x as f64));
    Ok(())
}

fn ycor(interp: &mut Interpreter) -> Result<()> {
    let (_, y) = interp.turtle().position();
    output(interp, Value::number(y as f64));
    Ok(())
}

fn heading(interp: &mut Interpreter) -> Result<()> {
    let value = Value::number(interp.turtle().heading());
    output(interp, value);
    Ok(())
}

/// `towards [x y]` — the bearing to a point, without moving.
fn towards(interp: &mut Interpreter) -> Result<()> {
    let target = interp.stack().argument(0)?.clone();
    let (x, y) = coordinates(&target)?;
    let value = Value::number(interp.turtle().towards(x, y));
    output(interp, value);
    Ok(())
}

fn scrunch(interp: &mut Interpreter) -> Result<()> {
    let (x, y) = interp.turtle().scrunch();
    let value = Value::list(vec![Value::number(x), Value::number(y)]);
    output(interp, value);
    Ok(())
}

fn setscrunch(interp: &mut Interpreter) -> Result<()> {
    let x = interp.stack().argument(0)?.as_double()?;
    let y = interp.stack().argument(1)?.as_double()?;
    interp.turtle_mut().set_scrunch(x, y);
    Ok(())
}

fn showturtle(interp: &mut Interpreter) -> Result<()> {
    interp.turtle_mut().show()
}

fn hideturtle(interp: &mut Interpreter) -> Result<()> {
    interp.turtle_mut().hide()
}

fn window(interp: &mut Interpreter) -> Result<()> {
    interp.turtle_mut().set_mode(BoundaryMode::Window);
    Ok(())
}

fn fence(interp: &mut Interpreter) -> Result<()> {
    interp.turtle_mut().set_mode(BoundaryMode::Fence);
    Ok(())
}

fn wrap(interp: &mut Interpreter) -> Result<()> {
    interp.turtle_mut().set_mode(BoundaryMode::Wrap);
    Ok(())
}

fn turtlemode(interp: &mut Interpreter) -> Result<()> {
    let value = Value::word(interp.turtle().mode().to_string());
    output(interp, value);
    Ok(())
}

fn shownp(interp: &mut Interpreter) -> Result<()> {
    let value = Value::boolean(interp.turtle().shown());
    output(interp, value);
    Ok(())
}

fn penup(interp: &mut Interpreter) -> Result<()> {
    interp.turtle_mut().pen_up();
    Ok(())
}

fn pendown(interp: &mut Interpreter) -> Result<()> {
    interp.turtle_mut().pen_down();
    Ok(())
}
