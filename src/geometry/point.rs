//! Reference frames and integer-coordinate points.

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Sub};

use super::{Angle, round_coord};

/// An affine map between a local frame and screen ("GPS") space.
///
/// A local point (x, y) sits at screen (x / kx + ox, y / ky + oy).
/// The turtle's frame is {kx: 1, ox: w/2, ky: -1, oy: h/2}, which
/// centers the origin and points +y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reference {
    kx: f64,
    ox: i32,
    ky: f64,
    oy: i32,
}

impl Reference {
    pub fn new(kx: f64, ox: i32, ky: f64, oy: i32) -> Self {
        Self { kx, ox, ky, oy }
    }

    /// The identity frame: screen space itself.
    pub fn global() -> Self {
        Self::new(1.0, 0, 1.0, 0)
    }

    pub fn is_global(&self) -> bool {
        *self == Self::global()
    }

    /// Map a point of this frame into screen space.
    pub fn to_gps(&self, p: Point) -> Point {
        Point::new(
            (p.x as f64 / self.kx + self.ox as f64) as i32,
            (p.y as f64 / self.ky + self.oy as f64) as i32,
        )
    }

    /// Map a screen-space point into this frame.
    pub fn from_gps(&self, p: Point) -> Point {
        Point::in_frame(
            (self.kx * (p.x - self.ox) as f64) as i32,
            (self.ky * (p.y - self.oy) as f64) as i32,
            *self,
        )
    }
}

impl Default for Reference {
    fn default() -> Self {
        Self::global()
    }
}

/// An integer point carrying its reference frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub frame: Reference,
}

impl Point {
    /// A point in the global (screen) frame.
    pub fn new(x: i32, y: i32) -> Self {
        Self::in_frame(x, y, Reference::global())
    }

    pub fn in_frame(x: i32, y: i32, frame: Reference) -> Self {
        Self { x, y, frame }
    }

    /// Same physical location, regardless of frames.
    pub fn same(&self, other: &Point) -> bool {
        self.to_gps() == other.to_gps()
    }

    pub fn to_gps(&self) -> Point {
        self.frame.to_gps(*self)
    }

    /// Rotate around the frame origin, rounding to integer coordinates.
    pub fn rotate(&self, a: Angle) -> Point {
        let (sin, cos) = (a.sin(), a.cos());
        Point::in_frame(
            round_coord(self.x as f64 * cos - self.y as f64 * sin),
            round_coord(self.x as f64 * sin + self.y as f64 * cos),
            self.frame,
        )
    }

    /// Componentwise scaling, truncating to integers.
    pub fn scale(&self, a: f64, b: f64) -> Point {
        Point::in_frame(
            (self.x as f64 * a) as i32,
            (self.y as f64 * b) as i32,
            self.frame,
        )
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl PartialOrd for Point {
    /// Lexicographic (x, then y) ordering within one frame; points of
    /// different frames are incomparable, so every ordering predicate
    /// between them is false.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.frame != other.frame {
            return None;
        }
        Some((self.x, self.y).cmp(&(other.x, other.y)))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::in_frame(self.x + rhs.x, self.y + rhs.y, self.frame)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::in_frame(self.x - rhs.x, self.y - rhs.y, self.frame)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, k: f64) -> Point {
        self.scale(k, k)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, k: f64) -> Point {
        Point::in_frame(
            (self.x as f64 / k) as i32,
            (self.y as f64 / k) as i32,
            self.frame,
        )
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turtle_frame() -> Reference {
        Reference::new(1.0, 320, -1.0, 240)
    }

    #[test]
    fn test_global_reference() {
        assert!(Reference::global().is_global());
        assert!(!turtle_frame().is_global());
        assert_eq!(Reference::global(), Reference::new(1.0, 0, 1.0, 0));
        assert_ne!(Reference::global(), Reference::new(1.0, 0, -1.0, 0));
    }

    #[test]
    fn test_turtle_frame_mapping() {
        let frame = turtle_frame();

        let p = frame.to_gps(Point::in_frame(0, 0, frame));
        assert_eq!((p.x, p.y), (320, 240));
        assert!(p.frame.is_global());

        let p = frame.to_gps(Point::in_frame(10, 10, frame));
        assert_eq!((p.x, p.y), (330, 230));

        let p = frame.from_gps(Point::new(310, 250));
        assert_eq!((p.x, p.y), (-10, -10));
        assert_eq!(p.frame, frame);

        let p = frame.from_gps(Point::new(330, 250));
        assert_eq!((p.x, p.y), (10, -10));
    }

    #[test]
    fn test_scaled_frame_mapping() {
        let frame = Reference::new(0.5, -50, -0.5, 100);

        let p = frame.to_gps(Point::in_frame(10, 10, frame));
        assert_eq!((p.x, p.y), (-30, 80));

        let p = frame.to_gps(Point::in_frame(-10, -10, frame));
        assert_eq!((p.x, p.y), (-70, 120));

        let p = frame.from_gps(Point::new(-30, 120));
        assert_eq!((p.x, p.y), (10, -10));
    }

    #[test]
    fn test_same_crosses_frames() {
        let local = Point::in_frame(0, 0, turtle_frame());
        let global = Point::new(320, 240);
        assert!(local.same(&global));
        assert!(global.same(&local));
        assert_ne!(local, global);
    }

    #[test]
    fn test_ordering_within_frame() {
        let p1 = Point::new(100, 200);
        let p2 = Point::new(320, 240);
        let p3 = Point::new(320, -200);
        assert!(p1 < p2);
        assert!(p3 <= p2);
        assert!(p2 > p3);
        assert!(Point::new(-100, 0) < p1);
    }

    #[test]
    fn test_cross_frame_ordering_is_false() {
        let local = Point::in_frame(0, 0, turtle_frame());
        let global = Point::new(320, 240);
        assert!(!(local < global));
        assert!(!(local <= global));
        assert!(!(local > global));
        assert!(!(local >= global));
    }

    #[test]
    fn test_arithmetic() {
        let t = Point::new(100, 200) - Point::new(-50, 100);
        assert_eq!((t.x, t.y), (150, 100));

        let t = t + Point::new(50, 50);
        assert_eq!((t.x, t.y), (200, 150));

        let t = t * 2.0;
        assert_eq!((t.x, t.y), (400, 300));

        let t = t / 2.0;
        assert_eq!((t.x, t.y), (200, 150));

        // Division truncates toward zero, like the coordinates it feeds.
        let t = Point::new(-25, 5) / 2.0;
        assert_eq!((t.x, t.y), (-12, 2));
    }

    #[test]
    fn test_rotation_round_trip() {
        let frame = turtle_frame();
        let p = Point::in_frame(8, 0, frame);

        let quarter = p.rotate(Angle::degrees(90.0));
        assert_eq!((quarter.x, quarter.y), (0, 8));

        let eighth = quarter.rotate(Angle::degrees(-45.0));
        assert_eq!((eighth.x, eighth.y), (6, 6));

        let back = eighth.rotate(Angle::degrees(-45.0));
        assert_eq!((back.x, back.y), (8, 0));
    }

    #[test]
    fn test_distance() {
        assert!((Point::new(1, 0).distance(&Point::new(0, 1)) - 2f64.sqrt()).abs() < 1e-9);
        assert!((Point::new(1, 1).distance(&Point::new(0, 1)) - 1.0).abs() < 1e-9);
        assert!((Point::new(1, 0).distance(&Point::new(-1, 0)) - 2.0).abs() < 1e-9);
    }
}
