//! I/O procedures.

use std::io::Write;

use crate::error::{Error, Result};
use crate::interp::Interpreter;
use crate::memory::Stack;

use super::procedure;

pub(super) fn register(stack: &mut Stack) {
    procedure(stack, &["print", "pr"], 1, print);
    procedure(stack, &["type"], 1, type_out);
    procedure(stack, &["show"], 1, show);
    procedure(stack, &["form"], 3, form);
    procedure(stack, &["format"], 2, format_out);
}

/// `print thing` — raw rendering plus a newline.
fn print(interp: &mut Interpreter) -> Result<()> {
    let text = interp.stack().argument(0)?.to_string();
    writeln!(interp.output_mut(), "{text}").map_err(Error::io)
}

/// `type thing` — raw rendering, no newline, flushed.
fn type_out(interp: &mut Interpreter) -> Result<()> {
    let text = interp.stack().argument(0)?.to_string();
    let out = interp.output_mut();
    write!(out, "{text}").map_err(Error::io)?;
    out.flush().map_err(Error::io)
}

/// `show thing` — lists keep their brackets.
fn show(interp: &mut Interpreter) -> Result<()> {
    let text = interp.stack().argument(0)?.show();
    writeln!(interp.output_mut(), "{text}").map_err(Error::io)
}

/// `form value width precision` — `value` with `precision`
/// significant digits, right-aligned into at least `width` columns.
fn form(interp: &mut Interpreter) -> Result<()> {
    let value = interp.stack().argument(0)?.as_double()?;
    let width = interp.stack().argument(1)?.as_unsigned()?;
    let precision = interp.stack().argument(2)?.as_unsigned()?;
    let text = significant(value, precision);
    writeln!(interp.output_mut(), "{text:>width$}").map_err(Error::io)
}

/// `format n fmt` — C-style integer formatting.
fn format_out(interp: &mut Interpreter) -> Result<()> {
    let n = interp.stack().argument(0)?.as_integer()?;
    let spec = interp.stack().argument(1)?.to_string();
    let Some(text) = printf_integer(&spec, n) else {
        return Err(Error::Type {
            expected: "a printf-style format",
            got: spec,
        });
    };
    writeln!(interp.output_mut(), "{text}").map_err(Error::io)
}

/// Render with a number of significant digits, trimming trailing
/// zeros, the way default iostream formatting does.
fn significant(value: f64, digits: usize) -> String {
    if digits == 0 {
        return format!("{value}");
    }
    let magnitude = if value == 0.0 {
        0
    } else {
        value.abs().log10().floor() as i32
    };
    let decimals = (digits as i32 - magnitude - 1).clamp(0, 17) as usize;
    let mut text = format!("{value:.decimals$}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

/// A printf subset for one integer argument: flags `0` and width,
/// conversions `d`, `i`, `u`, `x`, `X`, `o`, `c`, and `%%`.
fn printf_integer(spec: &str, n: i64) -> Option<String> {
    let mut out = String::new();
    let mut chars = spec.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        let zero_pad = chars.peek() == Some(&'0');
        if zero_pad {
            chars.next();
        }
        let mut width = 0usize;
        while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
            width = width * 10 + d as usize;
            chars.next();
        }

        let converted = match chars.next()? {
            'd' | 'i' => n.to_string(),
            'u' => (n as u64).to_string(),
            'x' => format!("{n:x}"),
            'X' => format!("{n:X}"),
            'o' => format!("{n:o}"),
            'c' => char::from_u32(n as u32)?.to_string(),
            _ => return None,
        };
        if zero_pad && converted.len() < width {
            out.extend(std::iter::repeat_n('0', width - converted.len()));
        } else if converted.len() < width {
            out.extend(std::iter::repeat_n(' ', width - converted.len()));
        }
        out.push_str(&converted);
    }
    Some(out)
}
