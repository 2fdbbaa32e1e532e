use anyhow::{bail, Result};
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use grayscott_canvas::{Rgba, Surface};
use std::io::{self, Stdout, Write};

/// Rows at the top reserved for the status line.
pub(crate) const HUD_ROWS: u16 = 1;

// Upper half block: fg paints the top pixel, bg the bottom one.
const HALF_BLOCK: char = '▀';

/// One terminal character cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Glyph {
    ch: char,
    fg: Color,
    bg: Color,
}

const BLANK: Glyph = Glyph {
    ch: ' ',
    fg: Color::White,
    bg: Color::Black,
};

/// Row-major grid of glyphs covering the whole terminal.
pub(crate) struct Screen {
    cols: usize,
    glyphs: Vec<Glyph>,
}

impl Screen {
    pub(crate) fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: cols as usize,
            glyphs: vec![BLANK; cols as usize * rows as usize],
        }
    }

    fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.glyphs.chunks_exact(self.cols.max(1))
    }

    fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Glyph]> {
        self.glyphs.chunks_exact_mut(self.cols.max(1))
    }
}

fn to_color(p: Rgba) -> Color {
    let (r, g, b) = p.to_rgb8();
    Color::Rgb { r, g, b }
}

/// Packs two surface rows into each terminal row below the HUD. Anything
/// past the screen's right or bottom edge is dropped.
pub(crate) fn paint_surface(surface: &Surface, screen: &mut Screen) {
    for (ty, row) in screen.rows_mut().skip(HUD_ROWS as usize).enumerate() {
        if ty * 2 >= surface.height() {
            break;
        }
        for (x, g) in row.iter_mut().take(surface.width()).enumerate() {
            *g = Glyph {
                ch: HALF_BLOCK,
                fg: to_color(surface.get(x, ty * 2).unwrap_or_default()),
                bg: to_color(surface.get(x, ty * 2 + 1).unwrap_or_default()),
            };
        }
    }
}

/// Writes `text` on row `y`, padding the rest of the row with blanks.
pub(crate) fn draw_line(screen: &mut Screen, y: u16, text: &str, fg: Color, bg: Color) {
    let Some(row) = screen.rows_mut().nth(y as usize) else {
        return;
    };
    let mut chars = text.chars();
    for g in row {
        let ch = chars.next().unwrap_or(' ');
        *g = Glyph { ch, fg, bg };
    }
}

/// Queues the glyphs of `cur` that differ from `prev` (all of them when
/// `full`). The cursor only moves at the start of each run of changes.
fn write_diff(out: &mut impl Write, prev: &Screen, cur: &Screen, full: bool) -> io::Result<()> {
    let mut colors = None;
    for (y, (now, was)) in cur.rows().zip(prev.rows()).enumerate() {
        let mut at = None;
        for (x, (g, old)) in now.iter().zip(was).enumerate() {
            if !full && g == old {
                continue;
            }
            if at != Some(x) {
                queue!(out, cursor::MoveTo(x as u16, y as u16))?;
            }
            if colors != Some((g.fg, g.bg)) {
                queue!(out, SetForegroundColor(g.fg), SetBackgroundColor(g.bg))?;
                colors = Some((g.fg, g.bg));
            }
            queue!(out, Print(g.ch))?;
            at = Some(x + 1);
        }
    }
    if colors.is_some() {
        queue!(out, ResetColor)?;
    }
    Ok(())
}

/// Runs `undo` on drop unless disarmed. Covers the setup steps between
/// entering raw mode and owning a `Terminal` that restores it.
struct Rollback<F: FnOnce()> {
    undo: Option<F>,
}

impl<F: FnOnce()> Rollback<F> {
    fn new(undo: F) -> Self {
        Self { undo: Some(undo) }
    }

    fn disarm(mut self) {
        self.undo = None;
    }
}

impl<F: FnOnce()> Drop for Rollback<F> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            undo();
        }
    }
}

pub(crate) struct Terminal {
    out: Stdout,
    cols: u16,
    rows: u16,
    prev: Screen,
    pub(crate) cur: Screen,
    full_redraw: bool,
    active: bool,
}

impl Terminal {
    pub(crate) fn begin() -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        if cols == 0 || rows <= HUD_ROWS {
            bail!("terminal of {cols}x{rows} is too small to draw into");
        }

        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        let raw = Rollback::new(|| {
            let _ = terminal::disable_raw_mode();
        });
        execute!(
            out,
            EnterAlternateScreen,
            DisableLineWrap,
            cursor::Hide,
            Clear(ClearType::All)
        )?;
        raw.disarm();

        Ok(Self {
            out,
            cols,
            rows,
            prev: Screen::new(cols, rows),
            cur: Screen::new(cols, rows),
            full_redraw: true,
            active: true,
        })
    }

    /// Pixel dimensions available below the HUD. Queried once; no resize.
    pub(crate) fn pixel_size(&self) -> (usize, usize) {
        (self.cols as usize, (self.rows - HUD_ROWS) as usize * 2)
    }

    pub(crate) fn present(&mut self) -> Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;
        write_diff(&mut self.out, &self.prev, &self.cur, self.full_redraw)?;
        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.glyphs.clone_from(&self.cur.glyphs);
        self.full_redraw = false;
        Ok(())
    }

    pub(crate) fn end(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.end();
    }
}
