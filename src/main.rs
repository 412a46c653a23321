//! tortuga entrypoint: the interactive Logo interpreter with a
//! terminal turtle canvas.

mod terminal;

use std::fs::File;
use std::io::{BufRead, BufReader, IsTerminal};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tortuga::Interpreter;
use tortuga::turtle::{NullRenderer, Renderer};

use crate::terminal::TerminalRenderer;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let script = std::env::args().nth(1);
    let interactive = script.is_none() && std::io::stdin().is_terminal();

    // Draw only where there is a terminal to draw on.
    let renderer: Box<dyn Renderer> = if interactive {
        match TerminalRenderer::new() {
            Ok(renderer) => Box::new(renderer),
            Err(err) => {
                info!(%err, "terminal canvas unavailable, drawing disabled");
                Box::new(NullRenderer)
            }
        }
    } else {
        Box::new(NullRenderer)
    };

    let mut interpreter = Interpreter::new()
        .with_renderer(renderer)
        .with_prompt(interactive);

    let mut input: Box<dyn BufRead> = match &script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("cannot open {path}"))?,
        )),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    interpreter
        .run(&mut input)
        .context("interpreter loop failed")?;
    Ok(())
}
