//! The grid together with everything a stroke needs.

use etch_color::Rgb;
use tracing::debug;

use crate::brush::Brush;
use crate::grid::Grid;
use crate::palette::{Palette, Xorshift32};
use crate::state::UiState;

/// How the pointer arrived at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    /// The button went down on this cell. Always paints.
    Press,
    /// The pointer moved onto this cell. Paints only while the button is
    /// held.
    Enter,
}

/// The drawing surface plus palette, brush and random source.
#[derive(Debug, Clone)]
pub struct Canvas {
    grid: Grid,
    palette: Palette,
    brush: Brush,
    rng: Xorshift32,
}

impl Canvas {
    #[must_use]
    pub fn new(size: u16, palette: Palette, brush: Brush, seed: u32) -> Self {
        Self {
            grid: Grid::new(size),
            palette,
            brush,
            rng: Xorshift32::new(seed),
        }
    }

    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    #[must_use]
    pub const fn brush(&self) -> &Brush {
        &self.brush
    }

    /// Apply a stroke at `(row, col)`.
    ///
    /// Returns the color painted, or `None` when nothing changed (an
    /// `Enter` with the button up, or a cell outside the grid).
    pub fn stroke(&mut self, state: &UiState, row: u16, col: u16, stroke: Stroke) -> Option<Rgb> {
        if stroke == Stroke::Enter && !state.pressed {
            return None;
        }
        if !self.grid.contains(row, col) {
            return None;
        }

        let current = self.grid.painted(row, col);
        let color = self
            .brush
            .color_for(state, current, &self.palette, &mut self.rng);
        self.grid.set(row, col, color);
        Some(color)
    }

    /// Replace the grid with a blank one of `size` cells per edge.
    pub fn rebuild(&mut self, size: u16) {
        debug!(
            from = self.grid.size(),
            to = size,
            painted = self.grid.painted_count(),
            "rebuilding grid"
        );
        self.grid = Grid::new(size);
    }
}
