//! The turtle state machine.
//!
//! Position and heading live in the turtle frame (origin at screen
//! center, +y up). The user-visible heading is clockwise-positive
//! from north, the internal angle counter-clockwise-positive, so the
//! two are negations of each other.
//!
//! A motion is a straight walk from the current position to a target
//! point; what happens at the viewport edge depends on the boundary
//! mode: WINDOW draws on an infinite canvas, FENCE stops at the edge,
//! WRAP re-enters from the opposite edge and keeps walking the
//! remaining displacement (recursively, so one `forward` may wrap
//! several times).

mod renderer;

use std::fmt;

use crate::error::{Error, Result};
use crate::geometry::{Angle, Path, Point, Reference, StraightLine};

pub use renderer::{NullRenderer, RecordingRenderer, RenderError, RenderLog, Renderer, Rgba};

pub const SCREEN_WIDTH: i32 = 640;
pub const SCREEN_HEIGHT: i32 = 480;

const TURTLE_BASE: i32 = 10;
const TURTLE_HEIGHT: i32 = 10;

/// Policy at the viewport edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryMode {
    Window,
    Fence,
    Wrap,
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoundaryMode::Window => "WINDOW",
            BoundaryMode::Fence => "FENCE",
            BoundaryMode::Wrap => "WRAP",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenState {
    Up,
    Down,
}

/// The process-wide turtle: position, heading, pen, accumulated
/// paths, and the renderer handle it draws through.
pub struct Turtle {
    frame: Reference,
    angle: Angle,
    position: Point,
    paths: Vec<Path>,
    shape: Path,
    x_scrunch: f64,
    y_scrunch: f64,
    visible: bool,
    pen: PenState,
    mode: BoundaryMode,
    top_left: Point,
    bottom_right: Point,
    wrap_offsets: Point,
    renderer: Box<dyn Renderer>,
}

impl Turtle {
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        let frame = Reference::new(
            1.0,
            SCREEN_WIDTH / 2,
            -1.0,
            SCREEN_HEIGHT / 2,
        );
        let origin = Point::in_frame(0, 0, frame);
        Self {
            frame,
            angle: Angle::degrees(0.0),
            position: origin,
            paths: vec![Path::from_point(origin)],
            shape: turtle_shape(frame),
            x_scrunch: 1.0,
            y_scrunch: 1.0,
            visible: true,
            pen: PenState::Down,
            mode: BoundaryMode::Wrap,
            top_left: frame.from_gps(Point::new(0, 0)),
            bottom_right: frame.from_gps(Point::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
            wrap_offsets: Point::in_frame(SCREEN_WIDTH, SCREEN_HEIGHT, frame),
            renderer,
        }
    }

    /// The turtle's coordinate frame.
    pub fn frame(&self) -> Reference {
        self.frame
    }

    pub fn position(&self) -> (i32, i32) {
        (self.position.x, self.position.y)
    }

    /// User-visible heading: degrees clockwise from north, [0, 360).
    pub fn heading(&self) -> f64 {
        (-self.angle.as_degrees()).rem_euclid(360.0)
    }

    pub fn mode(&self) -> BoundaryMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: BoundaryMode) {
        self.mode = mode;
    }

    pub fn pen(&self) -> PenState {
        self.pen
    }

    pub fn pen_up(&mut self) {
        self.pen = PenState::Up;
    }

    pub fn pen_down(&mut self) {
        self.pen = PenState::Down;
    }

    pub fn shown(&self) -> bool {
        self.visible
    }

    pub fn scrunch(&self) -> (f64, f64) {
        (self.x_scrunch, self.y_scrunch)
    }

    pub fn set_scrunch(&mut self, x: f64, y: f64) {
        self.x_scrunch = x;
        self.y_scrunch = y;
    }

    /// The accumulated paths, in drawing order.
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Reset heading and position, starting a fresh path at origin.
    pub fn home(&mut self) -> Result<()> {
        self.angle = Angle::degrees(0.0);
        self.position = Point::in_frame(0, 0, self.frame);
        self.paths.push(Path::from_point(self.position));
        self.render()
    }

    /// Drop the accumulated paths; position and heading stay put.
    pub fn clean(&mut self) -> Result<()> {
        self.paths.clear();
        self.paths.push(Path::from_point(self.position));
        self.render()
    }

    /// Walk `steps` along the current heading (negative walks back).
    pub fn forward(&mut self, steps: i32) -> Result<()> {
        let displacement = Point::in_frame(0, steps, self.frame)
            .rotate(self.angle)
            .scale(self.x_scrunch, self.y_scrunch);
        let target = self.position + displacement;
        tracing::trace!(steps, ?target, mode = %self.mode, "walk");
        self.walk_to(target)?;
        self.render()
    }

    /// Rotate clockwise by `degrees` (negative rotates left).
    pub fn right(&mut self, degrees: f64) -> Result<()> {
        self.angle = self.angle - Angle::degrees(degrees);
        self.render()
    }

    /// Move to an absolute position, honoring pen and boundary mode.
    pub fn set_position(&mut self, x: i32, y: i32) -> Result<()> {
        let target = Point::in_frame(x, y, self.frame);
        self.walk_to(target)?;
        self.render()
    }

    pub fn set_x(&mut self, x: i32) -> Result<()> {
        let y = self.position.y;
        self.set_position(x, y)
    }

    pub fn set_y(&mut self, y: i32) -> Result<()> {
        let x = self.position.x;
        self.set_position(x, y)
    }

    /// Point the turtle at `heading` degrees clockwise from north.
    pub fn set_heading(&mut self, heading: f64) -> Result<()> {
        self.angle = Angle::degrees(-heading);
        self.render()
    }

    /// The bearing from the current position to (x, y), as a
    /// user-visible heading. The turtle does not move.
    pub fn towards(&self, x: i32, y: i32) -> f64 {
        let dx = (x - self.position.x) as f64;
        let dy = (y - self.position.y) as f64;
        dx.atan2(dy).to_degrees().rem_euclid(360.0)
    }

    pub fn show(&mut self) -> Result<()> {
        self.visible = true;
        self.render()
    }

    pub fn hide(&mut self) -> Result<()> {
        self.visible = false;
        self.render()
    }

    fn walk_to(&mut self, target: Point) -> Result<()> {
        match self.mode {
            BoundaryMode::Window => {
                self.extend_path(target);
                self.position = target;
                Ok(())
            }
            BoundaryMode::Fence => {
                let stop = self.boundary_hit(target)?.unwrap_or(target);
                self.extend_path(stop);
                self.position = stop;
                Ok(())
            }
            BoundaryMode::Wrap => self.wrap_to(target),
        }
    }

    /// WRAP walk: draw to the boundary, teleport across it, shift the
    /// remaining target by a screen's worth, and keep walking.
    fn wrap_to(&mut self, target: Point) -> Result<()> {
        let next = self.boundary_hit(target)?.unwrap_or(target);
        self.extend_path(next);
        self.position = next;

        if next == target {
            return Ok(());
        }

        let mut shifted = target;
        if self.position.x == self.top_left.x {
            self.position.x = self.bottom_right.x;
            shifted.x += self.wrap_offsets.x;
        } else if self.position.x == self.bottom_right.x {
            self.position.x = self.top_left.x;
            shifted.x -= self.wrap_offsets.x;
        }
        if self.position.y == self.top_left.y {
            self.position.y = self.bottom_right.y;
            shifted.y -= self.wrap_offsets.y;
        } else if self.position.y == self.bottom_right.y {
            self.position.y = self.top_left.y;
            shifted.y += self.wrap_offsets.y;
        }

        self.paths.push(Path::from_point(self.position));
        self.wrap_to(shifted)
    }

    /// Where the segment toward `target` crosses the viewport edge,
    /// if the target lies outside. When a corner is crossed the
    /// horizontal-edge intersection wins.
    fn boundary_hit(&self, target: Point) -> Result<Option<Point>> {
        if target == self.position {
            return Ok(None);
        }
        let line = StraightLine::through(self.position, target)?;
        let mut hit = None;

        if target.x < self.top_left.x {
            if let Ok(p) = line.when_x(self.top_left.x) {
                if p.y <= self.top_left.y && p.y >= self.bottom_right.y {
                    hit = Some(p);
                }
            }
        } else if target.x > self.bottom_right.x {
            if let Ok(p) = line.when_x(self.bottom_right.x) {
                if p.y <= self.top_left.y && p.y >= self.bottom_right.y {
                    hit = Some(p);
                }
            }
        }

        if target.y > self.top_left.y {
            if let Ok(p) = line.when_y(self.top_left.y) {
                if p.x >= self.top_left.x && p.x <= self.bottom_right.x {
                    hit = Some(p);
                }
            }
        } else if target.y < self.bottom_right.y {
            if let Ok(p) = line.when_y(self.bottom_right.y) {
                if p.x >= self.top_left.x && p.x <= self.bottom_right.x {
                    hit = Some(p);
                }
            }
        }

        Ok(hit)
    }

    /// Pen down extends the current path; pen up starts a fresh
    /// single-point path at the destination.
    fn extend_path(&mut self, p: Point) {
        match self.pen {
            PenState::Down => self
                .paths
                .last_mut()
                .expect("the turtle always has a path")
                .push_point(p),
            PenState::Up => self.paths.push(Path::from_point(p)),
        }
    }

    /// Redraw the whole scene: paths first, then the turtle shape.
    pub fn render(&mut self) -> Result<()> {
        self.renderer.clear().map_err(Error::from)?;
        self.renderer.set_color(Rgba::WHITE).map_err(Error::from)?;

        for path in &self.paths {
            if !path.drawable() {
                continue;
            }
            let points: Vec<(i32, i32)> = path
                .iter()
                .map(|p| {
                    let gps = p.to_gps();
                    (gps.x, gps.y)
                })
                .collect();
            self.renderer.draw_polyline(&points).map_err(Error::from)?;
        }

        if self.visible {
            let shape = self
                .shape
                .rotate(self.angle)
                .translate(self.position.x, self.position.y);
            let points: Vec<(i32, i32)> = shape
                .iter()
                .map(|p| {
                    let gps = p.to_gps();
                    (gps.x, gps.y)
                })
                .collect();
            self.renderer.draw_polyline(&points).map_err(Error::from)?;
        }

        self.renderer.present().map_err(Error::from)
    }
}

impl fmt::Debug for Turtle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Turtle")
            .field("position", &(self.position.x, self.position.y))
            .field("heading", &self.heading())
            .field("mode", &self.mode)
            .field("pen", &self.pen)
            .field("paths", &self.paths.len())
            .finish()
    }
}

/// The triangle drawn at the turtle's position.
fn turtle_shape(frame: Reference) -> Path {
    let mut shape = Path::new(frame, 0, TURTLE_HEIGHT / 2);
    shape.push(TURTLE_BASE / 2, -TURTLE_HEIGHT / 2);
    shape.push(-TURTLE_BASE / 2, -TURTLE_HEIGHT / 2);
    shape.push(0, TURTLE_HEIGHT / 2);
    shape
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turtle() -> Turtle {
        Turtle::new(Box::new(NullRenderer))
    }

    #[track_caller]
    fn assert_heading(t: &Turtle, expected: f64) {
        let diff = (t.heading() - expected).rem_euclid(360.0);
        assert!(
            diff < 1e-6 || diff > 360.0 - 1e-6,
            "heading {} != {expected}",
            t.heading()
        );
    }

    #[test]
    fn test_initial_state() {
        let t = turtle();
        assert_eq!(t.position(), (0, 0));
        assert_eq!(t.heading(), 0.0);
        assert_eq!(t.mode(), BoundaryMode::Wrap);
        assert_eq!(t.pen(), PenState::Down);
        assert!(t.shown());
        assert_eq!(t.scrunch(), (1.0, 1.0));
    }

    #[test]
    fn test_forward_moves_north() {
        let mut t = turtle();
        t.forward(100).unwrap();
        assert_eq!(t.position(), (0, 100));
    }

    #[test]
    fn test_right_turns_clockwise() {
        let mut t = turtle();
        t.right(90.0).unwrap();
        assert_heading(&t, 90.0);
        t.forward(50).unwrap();
        assert_eq!(t.position(), (50, 0));

        t.right(-90.0).unwrap();
        assert_heading(&t, 0.0);
    }

    #[test]
    fn test_square_closes() {
        let mut t = turtle();
        for _ in 0..4 {
            t.forward(50).unwrap();
            t.right(90.0).unwrap();
        }
        assert_eq!(t.position(), (0, 0));
        assert_heading(&t, 0.0);
    }

    #[test]
    fn test_set_heading_matches_reader() {
        let mut t = turtle();
        t.set_heading(90.0).unwrap();
        assert_heading(&t, 90.0);
        t.forward(10).unwrap();
        assert_eq!(t.position(), (10, 0));

        t.set_heading(0.0).unwrap();
        assert_heading(&t, 0.0);
    }

    #[test]
    fn test_towards() {
        let t = turtle();
        for (x, y, expected) in [(0, 10, 0.0), (10, 0, 90.0), (0, -10, 180.0), (-10, 0, 270.0)] {
            let bearing = t.towards(x, y);
            let diff = (bearing - expected).rem_euclid(360.0);
            assert!(diff < 1e-6 || diff > 360.0 - 1e-6, "towards {bearing}");
        }
    }

    #[test]
    fn test_fence_stops_at_boundary() {
        let mut t = turtle();
        t.set_mode(BoundaryMode::Fence);
        t.forward(10_000).unwrap();
        assert_eq!(t.position(), (0, 240));
    }

    #[test]
    fn test_window_ignores_boundary() {
        let mut t = turtle();
        t.set_mode(BoundaryMode::Window);
        t.forward(10_000).unwrap();
        assert_eq!(t.position(), (0, 10_000));
    }

    #[test]
    fn test_wrap_conserves_walked_distance() {
        let mut t = turtle();
        t.forward(1000).unwrap();
        // 240 up to the edge, a full screen height, then the rest.
        let drawn: i32 = t
            .paths()
            .iter()
            .filter(|p| p.drawable())
            .map(|p| {
                let points: Vec<_> = p.iter().collect();
                points
                    .windows(2)
                    .map(|w| w[0].distance(w[1]).round() as i32)
                    .sum::<i32>()
            })
            .sum();
        assert_eq!(drawn, 1000);
        assert_eq!(t.position(), (0, 40));
    }

    #[test]
    fn test_wrap_teleports_across_edge() {
        let mut t = turtle();
        t.right(90.0).unwrap();
        t.forward(400).unwrap();
        // 320 to the right edge, re-enter on the left, 80 more.
        assert_eq!(t.position(), (-240, 0));
        assert_eq!(t.paths().iter().filter(|p| p.drawable()).count(), 2);
    }

    #[test]
    fn test_pen_up_paths_are_not_drawable() {
        let mut t = turtle();
        t.pen_up();
        t.forward(50).unwrap();
        assert_eq!(t.position(), (0, 50));
        assert!(t.paths().iter().all(|p| !p.drawable()));

        t.pen_down();
        t.forward(50).unwrap();
        assert_eq!(t.paths().iter().filter(|p| p.drawable()).count(), 1);
    }

    #[test]
    fn test_home_and_clean() {
        let mut t = turtle();
        t.forward(50).unwrap();
        t.right(45.0).unwrap();
        t.home().unwrap();
        assert_eq!(t.position(), (0, 0));
        assert_heading(&t, 0.0);
        // Paths are kept by home...
        assert!(t.paths().iter().any(|p| p.drawable()));

        // ...and dropped by clean, which keeps the position.
        t.forward(30).unwrap();
        t.clean().unwrap();
        assert_eq!(t.position(), (0, 30));
        assert!(t.paths().iter().all(|p| !p.drawable()));
    }

    #[test]
    fn test_scrunch_scales_displacement() {
        let mut t = turtle();
        t.set_scrunch(1.0, 0.5);
        t.forward(100).unwrap();
        assert_eq!(t.position(), (0, 50));
    }

    #[test]
    fn test_render_order_paths_then_shape() {
        let recorder = RecordingRenderer::new();
        let log = recorder.log();
        let mut t = Turtle::new(Box::new(recorder));
        t.forward(10).unwrap();

        let log = log.borrow();
        assert!(log.presents >= 1);
        // One drawable path plus the turtle shape.
        assert_eq!(log.polylines.len(), 2);
        // The walked segment, in screen coordinates.
        assert_eq!(log.polylines[0], vec![(320, 240), (320, 230)]);
        // The shape polyline is drawn last.
        assert_eq!(log.polylines[1].len(), 4);
    }

    #[test]
    fn test_set_position_draws_like_a_walk() {
        let mut t = turtle();
        t.set_position(30, 40).unwrap();
        assert_eq!(t.position(), (30, 40));
        assert!(t.paths().iter().any(|p| p.drawable()));

        t.set_x(0).unwrap();
        assert_eq!(t.position(), (0, 40));
        t.set_y(0).unwrap();
        assert_eq!(t.position(), (0, 0));
    }
}
