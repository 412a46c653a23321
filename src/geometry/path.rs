//! Polylines traced by the turtle.

use super::{Angle, Point, Reference};

/// An ordered sequence of points in one frame. A path always holds at
/// least one point; it only becomes drawable with two or more.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Point>,
    frame: Reference,
}

impl Path {
    pub fn new(frame: Reference, x: i32, y: i32) -> Self {
        Self {
            points: vec![Point::in_frame(x, y, frame)],
            frame,
        }
    }

    pub fn from_point(p: Point) -> Self {
        Self {
            points: vec![p],
            frame: p.frame,
        }
    }

    pub fn push(&mut self, x: i32, y: i32) {
        self.points.push(Point::in_frame(x, y, self.frame));
    }

    pub fn push_point(&mut self, p: Point) {
        self.points.push(p);
    }

    /// Append a point offset from the current last one.
    pub fn push_from_last(&mut self, dx: i32, dy: i32) {
        let next = self.last() + Point::in_frame(dx, dy, self.frame);
        self.points.push(next);
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Path {
        let delta = Point::in_frame(dx, dy, self.frame);
        Path {
            points: self.points.iter().map(|p| *p + delta).collect(),
            frame: self.frame,
        }
    }

    pub fn translate_to(&self, p: Point) -> Path {
        self.translate(p.x, p.y)
    }

    pub fn rotate(&self, a: Angle) -> Path {
        Path {
            points: self.points.iter().map(|p| p.rotate(a)).collect(),
            frame: self.frame,
        }
    }

    pub fn last(&self) -> Point {
        *self.points.last().expect("a path always has a point")
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A single point is a pen position, not a line.
    pub fn drawable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turtle_frame() -> Reference {
        Reference::new(1.0, 320, -1.0, 240)
    }

    fn shape() -> Path {
        let mut path = Path::new(turtle_frame(), 8, 0);
        path.push(-8, 5);
        path.push(-8, -5);
        path.push(8, 0);
        path
    }

    #[test]
    fn test_growth_and_drawability() {
        let mut path = Path::new(turtle_frame(), 8, 0);
        assert_eq!(path.len(), 1);
        assert!(!path.drawable());

        path.push(-8, 5);
        assert_eq!(path.len(), 2);
        assert!(path.drawable());
        assert_eq!(path.last(), Point::in_frame(-8, 5, turtle_frame()));

        path.push_from_last(1, 1);
        assert_eq!(path.last(), Point::in_frame(-7, 6, turtle_frame()));
    }

    #[test]
    fn test_rotate_is_pure() {
        let original = shape();
        let turned = original.rotate(Angle::degrees(90.0));

        let coords: Vec<_> = turned.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords, [(0, 8), (-5, -8), (5, -8), (0, 8)]);

        let kept: Vec<_> = original.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(kept, [(8, 0), (-8, 5), (-8, -5), (8, 0)]);
    }

    #[test]
    fn test_translate_round_trip() {
        let path = shape();
        let moved = path.translate(100, 0).translate(0, 100).translate(-100, -100);
        assert_eq!(moved, path);

        let coords: Vec<_> = path.translate(100, 100).iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords, [(108, 100), (92, 105), (92, 95), (108, 100)]);
    }

    #[test]
    fn test_rotate_then_translate() {
        let turned = shape().rotate(Angle::degrees(30.0));
        let coords: Vec<_> = turned.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords, [(7, 4), (-9, 0), (-4, -8), (7, 4)]);

        let moved = turned.translate(100, 100);
        let coords: Vec<_> = moved.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords, [(107, 104), (91, 100), (96, 92), (107, 104)]);
    }
}
