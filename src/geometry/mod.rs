//! Plane geometry for the turtle.
//!
//! - [`Angle`] — normalized angles with degree/radian views
//! - [`Reference`] — affine reference frames (the turtle's frame puts
//!   +y up and the origin at the screen center)
//! - [`Point`], [`Path`] — integer-coordinate points and polylines
//! - [`StraightLine`] — slope/intercept lines with a vertical sentinel,
//!   used to intersect turtle motion with the viewport edges

mod angle;
mod line;
mod path;
mod point;

pub use angle::Angle;
pub use line::StraightLine;
pub use path::Path;
pub use point::{Point, Reference};

use thiserror::Error;

/// Tolerance for angle and slope comparisons.
pub(crate) const EPSILON: f64 = 1e-5;

/// Slopes beyond this magnitude are treated as vertical.
pub(crate) const SLOPE_LIMIT: f64 = 1e4;

pub(crate) fn is_zero(v: f64) -> bool {
    v.abs() < EPSILON
}

pub(crate) fn is_infinite(v: f64) -> bool {
    v.abs() > SLOPE_LIMIT
}

/// Round to the nearest integer coordinate, halves away from zero.
pub(crate) fn round_coord(v: f64) -> i32 {
    v.round() as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("tangent of a right angle is undefined")]
    TangentUndefined,

    #[error("line is vertical, y cannot be computed from x")]
    VerticalLine,

    #[error("line is horizontal, x cannot be computed from y")]
    HorizontalLine,

    #[error("lines are parallel")]
    ParallelLines,

    #[error("operands belong to different reference systems")]
    MixedFrames,
}
