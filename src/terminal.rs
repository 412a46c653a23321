//! A character-cell turtle canvas for the terminal.
//!
//! The 640×480 screen is downsampled onto a fixed grid of cells;
//! polylines are rasterized with Bresenham steps and presented by
//! repainting the alternate screen through crossterm.

use std::io::{Stdout, Write, stdout};

use crossterm::{cursor, queue, style, terminal};

use tortuga::turtle::{RenderError, Renderer, Rgba, SCREEN_HEIGHT, SCREEN_WIDTH};

const GRID_WIDTH: usize = 80;
const GRID_HEIGHT: usize = 30;

pub struct TerminalRenderer {
    cells: Vec<bool>,
    out: Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut out = stdout();
        queue!(out, terminal::EnterAlternateScreen, cursor::Hide).map_err(io_error)?;
        out.flush().map_err(io_error)?;
        Ok(Self {
            cells: vec![false; GRID_WIDTH * GRID_HEIGHT],
            out,
        })
    }

    fn plot(&mut self, x: i32, y: i32) {
        let cx = x * GRID_WIDTH as i32 / SCREEN_WIDTH;
        let cy = y * GRID_HEIGHT as i32 / SCREEN_HEIGHT;
        if (0..GRID_WIDTH as i32).contains(&cx) && (0..GRID_HEIGHT as i32).contains(&cy) {
            self.cells[cy as usize * GRID_WIDTH + cx as usize] = true;
        }
    }

    fn line(&mut self, from: (i32, i32), to: (i32, i32)) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.plot(x, y);
            if (x, y) == to {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += sx;
            }
            if doubled <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

impl Renderer for TerminalRenderer {
    fn clear(&mut self) -> Result<(), RenderError> {
        self.cells.fill(false);
        Ok(())
    }

    fn set_color(&mut self, _color: Rgba) -> Result<(), RenderError> {
        // One pen color on a character grid.
        Ok(())
    }

    fn draw_polyline(&mut self, points: &[(i32, i32)]) -> Result<(), RenderError> {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1]);
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        queue!(self.out, cursor::MoveTo(0, 0)).map_err(io_error)?;
        for row in 0..GRID_HEIGHT {
            let text: String = (0..GRID_WIDTH)
                .map(|col| {
                    if self.cells[row * GRID_WIDTH + col] {
                        '#'
                    } else {
                        ' '
                    }
                })
                .collect();
            queue!(
                self.out,
                cursor::MoveTo(0, row as u16),
                style::Print(text)
            )
            .map_err(io_error)?;
        }
        self.out.flush().map_err(io_error)
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = queue!(self.out, terminal::LeaveAlternateScreen, cursor::Show);
        let _ = self.out.flush();
    }
}

fn io_error(err: std::io::Error) -> RenderError {
    RenderError::new(err.to_string())
}
