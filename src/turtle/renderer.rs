//! The rendering seam.
//!
//! The turtle only knows this trait: clear, set a color, draw a
//! polyline of screen-coordinate points, present. Backends live with
//! the embedding program (the bundled binary draws into a terminal
//! grid); the library ships a no-op backend and a recording one for
//! tests.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

/// A drawing failure reported by the back-end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("render failure: {0}")]
pub struct RenderError(pub String);

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A 2D canvas the turtle draws on. Points are screen-coordinate
/// integer pairs; the back-end owns orientation and clipping.
pub trait Renderer {
    fn clear(&mut self) -> Result<(), RenderError>;
    fn set_color(&mut self, color: Rgba) -> Result<(), RenderError>;
    fn draw_polyline(&mut self, points: &[(i32, i32)]) -> Result<(), RenderError>;
    fn present(&mut self) -> Result<(), RenderError>;
}

/// A back-end that draws nothing. Default for embedders that only
/// care about the turtle's state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn clear(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    fn set_color(&mut self, _color: Rgba) -> Result<(), RenderError> {
        Ok(())
    }

    fn draw_polyline(&mut self, _points: &[(i32, i32)]) -> Result<(), RenderError> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// What a [`RecordingRenderer`] saw since construction.
#[derive(Debug, Default, Clone)]
pub struct RenderLog {
    /// Polylines drawn by the most recent frame (reset on clear).
    pub polylines: Vec<Vec<(i32, i32)>>,
    pub clears: usize,
    pub presents: usize,
}

/// A back-end that records draw calls for inspection in tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    log: Rc<RefCell<RenderLog>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared handle to the log; clone it before handing the
    /// renderer to the turtle.
    pub fn log(&self) -> Rc<RefCell<RenderLog>> {
        Rc::clone(&self.log)
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) -> Result<(), RenderError> {
        let mut log = self.log.borrow_mut();
        log.clears += 1;
        log.polylines.clear();
        Ok(())
    }

    fn set_color(&mut self, _color: Rgba) -> Result<(), RenderError> {
        Ok(())
    }

    fn draw_polyline(&mut self, points: &[(i32, i32)]) -> Result<(), RenderError> {
        self.log.borrow_mut().polylines.push(points.to_vec());
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.log.borrow_mut().presents += 1;
        Ok(())
    }
}
