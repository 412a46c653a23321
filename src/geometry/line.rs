//! Straight lines in slope/intercept form.
//!
//! Vertical lines cannot be written as y = mx + q, so they carry a
//! sentinel slope (any |m| > 1e4 counts) and reuse q as the constant
//! x. That keeps one representation for the viewport-intersection
//! math the turtle's FENCE and WRAP modes depend on.

use std::f64::consts::FRAC_PI_2;

use super::{Angle, GeometryError, Point, Reference, is_infinite, is_zero, round_coord};

#[derive(Debug, Clone, Copy)]
pub struct StraightLine {
    m: f64,
    q: f64,
    frame: Reference,
}

impl StraightLine {
    /// The sentinel slope of vertical lines.
    pub fn vertical_slope() -> f64 {
        FRAC_PI_2.tan()
    }

    pub fn new(m: f64, q: f64) -> Self {
        Self::in_frame(m, q, Reference::global())
    }

    pub fn in_frame(m: f64, q: f64, frame: Reference) -> Self {
        Self { m, q, frame }
    }

    /// Line at `angle` with intercept `q`; right angles go vertical.
    pub fn from_angle(angle: Angle, q: f64, frame: Reference) -> Self {
        let m = angle.tan().unwrap_or_else(|_| Self::vertical_slope());
        Self { m, q, frame }
    }

    /// The line through two points of the same frame.
    pub fn through(a: Point, b: Point) -> Result<Self, GeometryError> {
        if a.frame != b.frame {
            return Err(GeometryError::MixedFrames);
        }
        let dx = b.x - a.x;
        if dx == 0 {
            return Ok(Self::in_frame(Self::vertical_slope(), b.x as f64, a.frame));
        }
        let m = (b.y - a.y) as f64 / dx as f64;
        let q = b.y as f64 - m * b.x as f64;
        Ok(Self::in_frame(m, q, a.frame))
    }

    /// The line of slope `m` through `p`.
    pub fn with_slope(m: f64, p: Point) -> Self {
        Self::in_frame(m, p.y as f64 - m * p.x as f64, p.frame)
    }

    pub fn angle(&self) -> Angle {
        Angle::radians(self.m.atan())
    }

    pub fn slope(&self) -> f64 {
        self.m
    }

    pub fn intercept(&self) -> f64 {
        self.q
    }

    /// The point of the line at abscissa `x`.
    pub fn when_x(&self, x: i32) -> Result<Point, GeometryError> {
        if self.is_vertical() {
            return Err(GeometryError::VerticalLine);
        }
        Ok(Point::in_frame(
            x,
            round_coord(self.m * x as f64 + self.q),
            self.frame,
        ))
    }

    /// The point of the line at ordinate `y`.
    pub fn when_y(&self, y: i32) -> Result<Point, GeometryError> {
        if self.is_horizontal() {
            return Err(GeometryError::HorizontalLine);
        }
        if self.is_vertical() {
            return Ok(Point::in_frame(round_coord(self.q), y, self.frame));
        }
        Ok(Point::in_frame(
            round_coord((y as f64 - self.q) / self.m),
            y,
            self.frame,
        ))
    }

    /// The intersection with `other`.
    pub fn intersection(&self, other: &StraightLine) -> Result<Point, GeometryError> {
        if self.frame != other.frame {
            return Err(GeometryError::MixedFrames);
        }
        if self.parallel(other) {
            return Err(GeometryError::ParallelLines);
        }
        if self.is_vertical() {
            return other.when_x(round_coord(self.q));
        }
        if other.is_vertical() {
            return self.when_x(round_coord(other.q));
        }
        self.when_x(round_coord((self.q - other.q) / (other.m - self.m)))
    }

    /// Incidence test; `p` is first brought into the line's frame.
    pub fn contains(&self, p: &Point) -> bool {
        let local = self.frame.from_gps(p.to_gps());
        if self.is_vertical() {
            return is_zero(self.q - local.x as f64);
        }
        round_coord(self.m * local.x as f64 + self.q) == local.y
    }

    /// Equal slopes within tolerance.
    pub fn parallel(&self, other: &StraightLine) -> bool {
        is_zero(self.m - other.m)
    }

    /// The parallel line with intercept `q`.
    pub fn parallel_through(&self, q: f64) -> StraightLine {
        Self::in_frame(self.m, q, self.frame)
    }

    pub fn is_vertical(&self) -> bool {
        is_infinite(self.m)
    }

    pub fn is_horizontal(&self) -> bool {
        is_zero(self.m)
    }
}

impl PartialEq for StraightLine {
    fn eq(&self, other: &Self) -> bool {
        self.frame == other.frame && is_zero(self.m - other.m) && is_zero(self.q - other.q)
    }
}

impl std::fmt::Display for StraightLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_vertical() {
            write!(f, "x = {}", self.q)
        } else {
            write!(f, "y = {}x + {}", self.m, self.q)
        }
    }
}
