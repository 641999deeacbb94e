//! One-shot output: the graph as ANSI half-block characters on stdout.

use anyhow::Result;
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use std::io::{self, Write};
use tracing::debug;

use super::{describe, render_graph};
use crate::complex::ComplexValue;
use crate::config::Config;
use crate::renderer::Canvas;

pub fn run(config: &Config, value: ComplexValue) -> Result<()> {
    let (cols, rows) = output_size(config);
    debug!("Printing {}x{} cells", cols, rows);

    let mut canvas = Canvas::new(cols as usize, rows as usize * 2);
    render_graph(&mut canvas, value, config);

    let mut stdout = io::stdout().lock();
    write_half_blocks(&mut stdout, &canvas)?;
    writeln!(stdout, "{}", describe(&value))?;
    stdout.flush()?;
    Ok(())
}

/// Configured size, falling back to the terminal size minus the summary line.
fn output_size(config: &Config) -> (u16, u16) {
    let (term_w, term_h) = terminal::size().unwrap_or((80, 24));
    let cols = config.display.width.unwrap_or(term_w).max(1);
    let rows = config
        .display
        .height
        .unwrap_or_else(|| term_h.saturating_sub(1))
        .max(1);
    (cols, rows)
}

/// Two canvas rows per line: upper pixel as `▀` foreground, lower as background.
pub fn write_half_blocks(out: &mut impl Write, canvas: &Canvas) -> Result<()> {
    for row in 0..canvas.height.div_ceil(2) {
        for col in 0..canvas.width {
            let ((tr, tg, tb), (br, bg, bb)) = canvas.half_block(col, row);
            queue!(
                out,
                SetForegroundColor(Color::Rgb { r: tr, g: tg, b: tb }),
                SetBackgroundColor(Color::Rgb { r: br, g: bg, b: bb }),
                Print('▀')
            )?;
        }
        queue!(out, ResetColor, Print('\n'))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_per_pixel_pair() {
        let mut canvas = Canvas::new(3, 4);
        canvas.put_pixel(0, 0, (255, 0, 0));
        let mut out = Vec::new();
        write_half_blocks(&mut out, &canvas).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches('▀').count(), 6);
        assert_eq!(text.matches('\n').count(), 2);
        assert!(text.contains("38;2;255;0;0"));
    }

    #[test]
    fn odd_height_keeps_last_row() {
        let canvas = Canvas::new(2, 3);
        let mut out = Vec::new();
        write_half_blocks(&mut out, &canvas).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('\n').count(), 2);
    }
}
