// SPDX-License-Identifier: MIT
//
// Cell colors.
//
// The sketch pad only ever paints exact 24-bit colors, so a cell color is
// either a truecolor triple or "whatever the terminal's default is". The
// richer color type lives in `etch-color`; this is the compact form the
// frame buffer stores and the diff renderer compares in its hot loop.

use std::fmt;

use etch_color::Rgb;

/// Compact color for terminal cell storage.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),

    /// Terminal default color (inherits from terminal settings).
    #[default]
    Default,
}

impl CellColor {
    /// The RGB triple, or `None` for [`CellColor::Default`].
    #[must_use]
    pub const fn to_rgb(self) -> Option<Rgb> {
        match self {
            Self::Rgb(r, g, b) => Some(Rgb::new(r, g, b)),
            Self::Default => None,
        }
    }

    /// Whether this is the terminal default color.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }

    /// Black or white, whichever reads better on top of `self`.
    ///
    /// Used for labels drawn over swatches. The default color is assumed
    /// dark.
    #[must_use]
    pub fn contrast(self) -> Self {
        match self.to_rgb() {
            Some(rgb) if rgb.is_light() => Self::from(Rgb::BLACK),
            _ => Self::from(Rgb::WHITE),
        }
    }
}

impl From<Rgb> for CellColor {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
