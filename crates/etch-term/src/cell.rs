// SPDX-License-Identifier: MIT
//
// Cell: one character position on screen.
//
// A cell holds a character, a foreground and a background color, and a few
// attribute bits. The sketch grid is drawn with the upper half block `▀`:
// the foreground paints the top pixel and the background the bottom one, so
// one terminal cell shows two grid rows.
//
// Wide characters occupy two columns. The first cell holds the character;
// the second is a continuation cell (`ch == '\0'`) that the renderer fills
// with background only.

use bitflags::bitflags;

use crate::color::CellColor;

// ─── Attributes ──────────────────────────────────────────────────────────────

bitflags! {
    /// Text attributes, one SGR code each.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        const BOLD      = 0b0000_0001;
        const DIM       = 0b0000_0010;
        const UNDERLINE = 0b0000_0100;
        const REVERSE   = 0b0000_1000;
    }
}

// ─── Cell ────────────────────────────────────────────────────────────────────

/// A single terminal cell.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Character to display. `'\0'` marks a continuation cell.
    pub ch: char,
    pub fg: CellColor,
    pub bg: CellColor,
    pub attrs: Attr,
}

/// Upper half block: top half in the foreground color, bottom half in the
/// background color.
pub const UPPER_HALF: char = '▀';

const CONTINUATION: char = '\0';

impl Cell {
    /// Space, default colors, no attributes.
    pub const EMPTY: Self = Self {
        ch: ' ',
        fg: CellColor::Default,
        bg: CellColor::Default,
        attrs: Attr::empty(),
    };

    #[inline]
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            fg: CellColor::Default,
            bg: CellColor::Default,
            attrs: Attr::empty(),
        }
    }

    /// Two vertically stacked pixels in one cell.
    #[inline]
    #[must_use]
    pub const fn half_blocks(top: CellColor, bottom: CellColor) -> Self {
        Self {
            ch: UPPER_HALF,
            fg: top,
            bg: bottom,
            attrs: Attr::empty(),
        }
    }

    /// The second column of a wide character.
    #[inline]
    #[must_use]
    pub const fn continuation(fg: CellColor, bg: CellColor, attrs: Attr) -> Self {
        Self {
            ch: CONTINUATION,
            fg,
            bg,
            attrs,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_continuation(self) -> bool {
        self.ch == CONTINUATION
    }

    #[inline]
    #[must_use]
    pub const fn with_bg(self, bg: CellColor) -> Self {
        Self { bg, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn with_attrs(self, attrs: Attr) -> Self {
        Self { attrs, ..self }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_continuation() {
            write!(f, "Cell(cont, fg={}, bg={})", self.fg, self.bg)
        } else {
            write!(f, "Cell({:?}, fg={}, bg={}", self.ch, self.fg, self.bg)?;
            if !self.attrs.is_empty() {
                write!(f, ", {:?}", self.attrs)?;
            }
            write!(f, ")")
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_default_space() {
        assert_eq!(Cell::default(), Cell::EMPTY);
        assert_eq!(Cell::EMPTY.ch, ' ');
        assert!(Cell::EMPTY.fg.is_default());
        assert!(Cell::EMPTY.attrs.is_empty());
    }

    #[test]
    fn half_blocks_put_top_in_fg() {
        let c = Cell::half_blocks(CellColor::Rgb(1, 0, 0), CellColor::Rgb(0, 0, 1));
        assert_eq!(c.ch, UPPER_HALF);
        assert_eq!(c.fg, CellColor::Rgb(1, 0, 0));
        assert_eq!(c.bg, CellColor::Rgb(0, 0, 1));
    }

    #[test]
    fn builders_replace_one_field() {
        let c = Cell::new('x')
            .with_bg(CellColor::Rgb(1, 1, 1))
            .with_attrs(Attr::BOLD | Attr::REVERSE);
        assert_eq!(c.ch, 'x');
        assert_eq!(c.fg, CellColor::Default);
        assert_eq!(c.bg, CellColor::Rgb(1, 1, 1));
        assert!(c.attrs.contains(Attr::REVERSE));
    }

    #[test]
    fn continuation_detection() {
        let c = Cell::continuation(CellColor::Default, CellColor::Default, Attr::empty());
        assert!(c.is_continuation());
        assert!(!Cell::new('a').is_continuation());
    }

    #[test]
    fn debug_format() {
        let s = format!("{:?}", Cell::new('a').with_attrs(Attr::BOLD));
        assert!(s.contains("'a'"));
        assert!(s.contains("BOLD"));
    }
}
