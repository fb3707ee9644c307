use crate::flower::{Animator, Rgb};
use crate::render::{render_frame, Canvas, CanvasGeometry};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Rows reserved below the canvas for the status line.
const STATUS_ROWS: u16 = 1;

#[derive(Debug, Clone, Copy)]
pub(crate) struct TerminalOptions {
    pub(crate) palette: [Rgb; 8],
    pub(crate) fps: u32,
    /// Begin the growth phase immediately instead of waiting for the start
    /// key.
    pub(crate) autostart: bool,
}

/// Run the interactive animation until the user quits. Puts the terminal
/// into raw mode on an alternate screen and restores it on the way out,
/// error paths included.
pub(crate) fn run(options: TerminalOptions) -> io::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
    let result = event_loop(&mut stdout, &options);
    let restore = execute!(stdout, ResetColor, cursor::Show, LeaveAlternateScreen);
    terminal::disable_raw_mode()?;
    result.and(restore)
}

fn event_loop(stdout: &mut io::Stdout, options: &TerminalOptions) -> io::Result<()> {
    let (columns, rows) = terminal::size()?;
    let mut viewport = Viewport::new(columns, rows);
    let mut animator = Animator::new(options.palette);
    // Milliseconds since the start trigger are measured from this instant;
    // cleared on reset
    let mut clock: Option<Instant> = None;
    if options.autostart && animator.start() {
        clock = Some(Instant::now());
    }
    let frame_interval = Duration::from_millis(1000 / options.fps.max(1) as u64);
    let mut next_frame = Instant::now();

    execute!(stdout, Clear(ClearType::All))?;
    loop {
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('s') | KeyCode::Enter => {
                        if animator.start() {
                            clock = Some(Instant::now());
                        }
                    }
                    KeyCode::Char('r') => {
                        animator.reset();
                        clock = None;
                    }
                    _ => {}
                },
                Event::Resize(new_columns, new_rows) => {
                    viewport = Viewport::new(new_columns, new_rows);
                    execute!(stdout, Clear(ClearType::All))?;
                }
                _ => {}
            }
            // Drain further input before spending time on a frame
            continue;
        }

        let now_ms = clock.map(|started| started.elapsed().as_millis() as u64).unwrap_or(0);
        animator.advance(now_ms);
        let frame = animator.snapshot(now_ms);
        render_frame(&mut viewport.canvas, &frame, &viewport.geometry);
        present(stdout, &viewport, &animator)?;
        next_frame = Instant::now() + frame_interval;
    }
    Ok(())
}

/// The canvas fitted and centered inside the current cell grid.
struct Viewport {
    columns: u16,
    rows: u16,
    geometry: CanvasGeometry,
    canvas: Canvas,
    column_offset: u16,
    row_offset: u16,
}

impl Viewport {
    fn new(columns: u16, rows: u16) -> Self {
        let (width, height) = pixel_container(columns, rows);
        let geometry = CanvasGeometry::fit(width, height);
        let canvas = Canvas::new(geometry.size, geometry.size);
        let cell_rows = (geometry.size.div_ceil(2)) as u16;
        let column_offset = (columns.saturating_sub(geometry.size as u16)) / 2;
        let row_offset = rows.saturating_sub(STATUS_ROWS).saturating_sub(cell_rows) / 2;
        Self { columns, rows, geometry, canvas, column_offset, row_offset }
    }
}

/// Pixel dimensions a cell grid can hold: each column is one pixel wide and
/// each row carries two vertically stacked half-block pixels, minus the
/// status line.
fn pixel_container(columns: u16, rows: u16) -> (u32, u32) {
    let drawable_rows = rows.saturating_sub(STATUS_ROWS) as u32;
    (columns as u32, drawable_rows * 2)
}

/// Push the rendered canvas to the terminal as half-block cells, then the
/// status line.
fn present(stdout: &mut io::Stdout, viewport: &Viewport, animator: &Animator) -> io::Result<()> {
    let size = viewport.geometry.size;
    for row in 0..size.div_ceil(2) {
        queue!(
            stdout,
            cursor::MoveTo(viewport.column_offset, viewport.row_offset + row as u16)
        )?;
        // Upper pixel on the foreground, lower pixel on the background;
        // repeat the color codes only when they change
        let mut colors: Option<(Rgb, Rgb)> = None;
        for x in 0..size {
            let top = viewport.canvas.pixel(x, row * 2);
            let bottom = if row * 2 + 1 < size {
                viewport.canvas.pixel(x, row * 2 + 1)
            } else {
                Rgb::BLACK
            };
            if colors != Some((top, bottom)) {
                queue!(stdout, SetForegroundColor(to_term(top)), SetBackgroundColor(to_term(bottom)))?;
                colors = Some((top, bottom));
            }
            queue!(stdout, Print('▀'))?;
        }
    }

    queue!(stdout, ResetColor, cursor::MoveTo(0, viewport.rows.saturating_sub(1)))?;
    let width = viewport.columns as usize;
    let mut status = status_line(animator);
    status.truncate(width);
    queue!(stdout, Print(format!("{status:<width$}")))?;
    stdout.flush()
}

fn status_line(animator: &Animator) -> String {
    let indicator = if animator.is_growing() { "   drawing..." } else { "" };
    format!(" s start   r reset   q quit   [{}]{indicator}", animator.phase())
}

fn to_term(color: Rgb) -> Color {
    Color::Rgb { r: color.r, g: color.g, b: color.b }
}
