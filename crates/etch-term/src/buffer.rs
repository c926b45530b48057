// SPDX-License-Identifier: MIT
//
// FrameBuffer: the 2D cell grid every frame is painted into.
//
// The app paints the sketch grid, the palette and the controls here; the
// diff renderer then compares the frame against the previous one and emits
// escape sequences only for what changed.
//
// Flat `Vec<Cell>`, row-major (`index = y * width + x`), so a row is a
// contiguous slice and the renderer can compare whole rows at once.
//
// All paint operations clip silently to the buffer: painting off-screen is
// a no-op, never a panic. That keeps layout code free of bounds checks when
// the terminal is smaller than the UI wants.

use unicode_width::UnicodeWidthChar;

use crate::cell::{Attr, Cell};
use crate::color::CellColor;

// ─── FrameBuffer ────────────────────────────────────────────────────────────────

/// A 2D buffer of terminal cells.
///
/// # Examples
///
/// ```
/// use etch_term::buffer::FrameBuffer;
/// use etch_term::cell::Cell;
///
/// let mut buf = FrameBuffer::new(80, 24);
/// buf.set(5, 3, Cell::new('X'));
/// assert_eq!(buf.get(5, 3).map(|c| c.ch), Some('X'));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// A buffer of empty cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; size],
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// One full row as a slice.
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let start = self.index(0, y);
            Some(&self.cells[start..start + usize::from(self.width)])
        } else {
            None
        }
    }

    /// Reset every cell to [`Cell::EMPTY`].
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Resize, clearing all content.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let size = usize::from(width) * usize::from(height);
        self.cells.clear();
        self.cells.resize(size, Cell::EMPTY);
    }

    /// Copy another buffer's cells into this one. Sizes must match.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        self.cells.copy_from_slice(&other.cells);
    }

    // ─── Painting ────────────────────────────────────────────────────────

    /// Write one cell. Returns `true` if the position was in bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        true
    }

    /// Fill a rectangle with spaces on `bg`. Clipped to the buffer.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, bg: CellColor) {
        let x2 = x.saturating_add(width).min(self.width);
        let y2 = y.saturating_add(height).min(self.height);
        if x >= x2 || y >= y2 {
            return;
        }

        let fill = Cell::EMPTY.with_bg(bg);
        for row in y..y2 {
            let start = self.index(x, row);
            let end = self.index(x2, row);
            self.cells[start..end].fill(fill);
        }
    }

    /// Paint text left to right from `(x, y)`, clipped at the right edge.
    ///
    /// Wide characters take two columns (the second is a continuation
    /// cell); one that would straddle the edge becomes a space. Zero-width
    /// characters are dropped.
    ///
    /// Returns the number of columns consumed.
    pub fn paint_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: CellColor,
        bg: CellColor,
        attrs: Attr,
    ) -> u16 {
        if y >= self.height {
            return 0;
        }

        let style = Cell {
            ch: ' ',
            fg,
            bg,
            attrs,
        };
        let mut col = x;

        for ch in text.chars() {
            if col >= self.width {
                break;
            }

            match char_width(ch) {
                0 => {}
                1 => {
                    self.set(col, y, Cell { ch, ..style });
                    col += 1;
                }
                _ if col + 1 >= self.width => {
                    self.set(col, y, style);
                    col += 1;
                    break;
                }
                _ => {
                    self.set(col, y, Cell { ch, ..style });
                    self.set(col + 1, y, Cell::continuation(fg, bg, attrs));
                    col += 2;
                }
            }
        }

        col - x
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameBuffer({}x{})", self.width, self.height)
    }
}

// ─── Text Width ─────────────────────────────────────────────────────────────────

/// Display width of a character in terminal columns (0, 1 or 2).
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Display width of a string in terminal columns.
///
/// ```
/// use etch_term::buffer::string_width;
///
/// assert_eq!(string_width("16 x 16"), 7);
/// assert_eq!(string_width("中文"), 4);
/// ```
#[must_use]
pub fn string_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

// ─── Tests ──────────────────────────────────────────────────────────────────────
