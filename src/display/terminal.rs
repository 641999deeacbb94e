use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::{describe, render_graph};
use crate::color::Theme;
use crate::complex::ComplexValue;
use crate::config::{save_theme, Config};
use crate::renderer::Canvas;

/// Show the graph full screen until the user quits. Every terminal event
/// (resize included) triggers a fresh render pass.
pub fn run(config: Config, value: ComplexValue, config_path: Option<PathBuf>) -> Result<()> {
    let initial_theme = config.colors.theme;

    // Setup terminal
    enable_raw_mode()?;
    let mut terminal = rollback_on_error(
        || {
            let mut stdout = stdout();
            execute!(stdout, EnterAlternateScreen)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
            terminal.clear()?;
            Ok(terminal)
        },
        || {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            disable_raw_mode()
        },
    )?;

    let result = run_app(&mut terminal, config, value);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let theme = result?;
    if theme != initial_theme {
        match config_path {
            Some(path) => match save_theme(&path, theme) {
                Ok(()) => info!("Saved theme '{}' to {}", theme.name(), path.display()),
                Err(e) => warn!("Failed to save theme: {:#}", e),
            },
            None => warn!("No config directory, theme '{}' not saved", theme.name()),
        }
    }

    Ok(())
}

/// Run `setup`, undoing the terminal changes with `rollback` if it fails.
fn rollback_on_error<T>(
    setup: impl FnOnce() -> Result<T>,
    rollback: impl FnOnce() -> io::Result<()>,
) -> Result<T> {
    setup().inspect_err(|_| {
        if let Err(e) = rollback() {
            warn!("Failed to restore terminal: {}", e);
        }
    })
}

/// Event loop; returns the theme in use when the user quits.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut config: Config,
    value: ComplexValue,
) -> Result<Theme> {
    let mut canvas = Canvas::new(0, 0);

    loop {
        terminal.draw(|frame| draw_frame(frame, &mut canvas, &config, value))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key {
                KeyEvent {
                    code: KeyCode::Char('q') | KeyCode::Esc,
                    ..
                }
                | KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                } => {
                    break;
                }
                KeyEvent {
                    code: KeyCode::Char('t'),
                    ..
                } => {
                    config.colors.theme = config.colors.theme.next();
                    debug!("Theme switched to {}", config.colors.theme.name());
                }
                _ => {}
            },
            Event::Resize(width, height) => {
                debug!("Terminal resized to {}x{}", width, height);
            }
            _ => {}
        }
    }

    Ok(config.colors.theme)
}

fn draw_frame(frame: &mut Frame, canvas: &mut Canvas, config: &Config, value: ComplexValue) {
    let area = frame.area();
    if area.height < 2 || area.width == 0 {
        return;
    }

    // Status line on top, graph below at two pixels per cell.
    let plot = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
    canvas.resize(plot.width as usize, plot.height as usize * 2);
    render_graph(canvas, value, config);

    let buffer = frame.buffer_mut();
    for row in 0..plot.height {
        for col in 0..plot.width {
            let ((tr, tg, tb), (br, bg, bb)) = canvas.half_block(col as usize, row as usize);
            if let Some(cell) = buffer.cell_mut((plot.x + col, plot.y + row)) {
                cell.set_char('▀');
                cell.set_fg(Color::Rgb(tr, tg, tb));
                cell.set_bg(Color::Rgb(br, bg, bb));
            }
        }
    }

    render_status(frame, area, value, config.colors.theme);
}

fn render_status(frame: &mut Frame, area: Rect, value: ComplexValue, theme: Theme) {
    let status = format!(" {} | [t]heme: {} | [q]uit ", describe(&value), theme.name());

    for (i, ch) in status.chars().enumerate() {
        if i < area.width as usize {
            let cell = frame.buffer_mut().cell_mut((area.x + i as u16, area.y));
            if let Some(cell) = cell {
                cell.set_char(ch);
                cell.set_fg(Color::DarkGray);
            }
        }
    }
}
