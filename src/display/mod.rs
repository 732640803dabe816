//! Terminal rendering surface — all terminal output lives here.
//!
//! The 505×606 logical canvas is mapped onto a 50×30 cell grid.  Drawing
//! calls paint into an off-screen cell buffer; `present` writes the whole
//! buffer to the terminal in one flush and starts the next frame blank.
mod glyphs;

pub use glyphs::{Glyph, GlyphSheet};

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    QueueableCommand,
};
use key_crossing::error::GameError;
use key_crossing::render::{Font, Rgb, Surface};

// ── Canvas → cell mapping ─────────────────────────────────────────────────────

/// Logical pixels per terminal cell (one tile = 10 × 4 cells).
const CELL_WIDTH: f32 = 10.1;
const CELL_HEIGHT: f32 = 20.75;

pub const COLS: usize = 50;
pub const ROWS: usize = 30;

/// Share of the font size that sits above the baseline.
const ASCENT: f32 = 0.75;

fn col_of(x: f32) -> i32 {
    (x / CELL_WIDTH).floor() as i32
}

fn row_of(y: f32) -> i32 {
    (y / CELL_HEIGHT).floor() as i32
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
    bold: bool,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::White,
    bg: Color::Black,
    bold: false,
};

// ── Surface ───────────────────────────────────────────────────────────────────

pub struct TerminalSurface<W: Write> {
    out: W,
    cells: Vec<Cell>,
    fill: Color,
    stroke: Color,
    line_width: f32,
    font: Font,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cells: vec![BLANK; COLS * ROWS],
            fill: Color::White,
            stroke: Color::Black,
            line_width: 1.0,
            font: Font::arial(10),
        }
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col as usize >= COLS || row as usize >= ROWS {
            return None;
        }
        self.cells.get_mut(row as usize * COLS + col as usize)
    }

    /// Top-left cell of text whose baseline sits at `y`.
    fn text_origin(&self, x: f32, y: f32) -> (i32, i32) {
        let top = y - f32::from(self.font.size_px) * ASCENT;
        (col_of(x), row_of(top))
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    type Handle = Glyph;

    fn draw_image(&mut self, image: &Glyph, x: f32, y: f32) -> Result<(), GameError> {
        let left = col_of(x + image.offset.0);
        let top = row_of(y + image.offset.1);

        for (dy, line) in image.art.iter().enumerate() {
            for (dx, ch) in line.chars().enumerate() {
                let Some(cell) = self.cell_mut(left + dx as i32, top + dy as i32) else {
                    continue;
                };
                match (ch, image.bg) {
                    (' ', None) => {}
                    (' ', Some(bg)) => *cell = Cell { ch, fg: image.fg, bg, bold: false },
                    (_, bg) => {
                        *cell = Cell {
                            ch,
                            fg: image.fg,
                            bg: bg.unwrap_or(cell.bg),
                            bold: false,
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<(), GameError> {
        let fill = self.fill;
        let cols = col_of(x)..((x + width) / CELL_WIDTH).ceil() as i32;
        let rows = row_of(y)..((y + height) / CELL_HEIGHT).ceil() as i32;
        for row in rows {
            for col in cols.clone() {
                if let Some(cell) = self.cell_mut(col, row) {
                    *cell = Cell {
                        ch: ' ',
                        fg: fill,
                        bg: fill,
                        bold: false,
                    };
                }
            }
        }
        Ok(())
    }

    fn set_fill_style(&mut self, color: Rgb) {
        self.fill = to_color(color);
    }

    fn set_stroke_style(&mut self, color: Rgb) {
        self.stroke = to_color(color);
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> Result<(), GameError> {
        let (col, row) = self.text_origin(x, y);
        let fill = self.fill;
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(col + i as i32, row) {
                cell.ch = ch;
                cell.fg = fill;
            }
        }
        Ok(())
    }

    /// Cells can't be outlined, so stroked text turns bold on a backdrop of
    /// the stroke colour.
    fn stroke_text(&mut self, text: &str, x: f32, y: f32) -> Result<(), GameError> {
        if self.line_width <= 0.0 {
            return Ok(());
        }
        let (col, row) = self.text_origin(x, y);
        let stroke = self.stroke;
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(col + i as i32, row) {
                cell.ch = ch;
                cell.bg = stroke;
                cell.bold = true;
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), GameError> {
        let mut last: Option<Cell> = None;

        for (row, line) in self.cells.chunks(COLS).enumerate() {
            self.out.queue(cursor::MoveTo(0, row as u16))?;
            for cell in line {
                // Only emit styling when it differs from the previous cell
                if last.map_or(true, |l| l.fg != cell.fg) {
                    self.out.queue(style::SetForegroundColor(cell.fg))?;
                }
                if last.map_or(true, |l| l.bg != cell.bg) {
                    self.out.queue(style::SetBackgroundColor(cell.bg))?;
                }
                if last.map_or(true, |l| l.bold != cell.bold) {
                    let weight = if cell.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    };
                    self.out.queue(style::SetAttribute(weight))?;
                }
                self.out.queue(Print(cell.ch))?;
                last = Some(*cell);
            }
        }

        // Park cursor below the canvas and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(style::SetAttribute(Attribute::Reset))?;
        self.out.queue(cursor::MoveTo(0, ROWS as u16))?;
        self.out.flush()?;

        self.cells.fill(BLANK);
        Ok(())
    }
}
