//! The drawing surface: a square grid of cells.
//!
//! Cells start out blank (`None`) and become `Some(color)` once painted.
//! Blank is not a color: the renderer shows it as [`BLANK`], and the
//! brightness modes start from [`BLANK`] when they touch a blank cell, but
//! the grid itself remembers that nobody has painted there yet.

use etch_color::Rgb;

/// Smallest grid edge (the slider's left end).
pub const MIN_SIZE: u16 = 1;
/// Largest grid edge (the slider's right end).
pub const MAX_SIZE: u16 = 100;
/// Edge of the grid at startup.
pub const DEFAULT_SIZE: u16 = 16;

/// How a never-painted cell looks: `#d5e4de`, a pale gray-green.
pub const BLANK: Rgb = Rgb::new(0xd5, 0xe4, 0xde);

/// Clamp a requested edge length into `MIN_SIZE..=MAX_SIZE`.
#[inline]
#[must_use]
pub fn clamp_size(size: u16) -> u16 {
    size.clamp(MIN_SIZE, MAX_SIZE)
}

/// A `size × size` grid of optional colors, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: u16,
    cells: Vec<Option<Rgb>>,
}

impl Grid {
    /// A blank grid. `size` is clamped into `MIN_SIZE..=MAX_SIZE`.
    #[must_use]
    pub fn new(size: u16) -> Self {
        let size = clamp_size(size);
        let edge = usize::from(size);
        Self {
            size,
            cells: vec![None; edge * edge],
        }
    }

    /// Edge length in cells.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> u16 {
        self.size
    }

    #[inline]
    #[must_use]
    pub const fn contains(&self, row: u16, col: u16) -> bool {
        row < self.size && col < self.size
    }

    #[inline]
    fn index(&self, row: u16, col: u16) -> Option<usize> {
        self.contains(row, col)
            .then(|| usize::from(row) * usize::from(self.size) + usize::from(col))
    }

    /// What was painted at `(row, col)`. `None` for blank or out of range.
    #[must_use]
    pub fn painted(&self, row: u16, col: u16) -> Option<Rgb> {
        self.index(row, col).and_then(|i| self.cells[i])
    }

    /// The color to show at `(row, col)`, substituting `blank` for
    /// unpainted cells. `None` only when out of range.
    #[must_use]
    pub fn color_or(&self, row: u16, col: u16, blank: Rgb) -> Option<Rgb> {
        self.index(row, col).map(|i| self.cells[i].unwrap_or(blank))
    }

    /// Paint one cell. Returns `false` (and does nothing) when out of range.
    pub fn set(&mut self, row: u16, col: u16, color: Rgb) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = Some(color);
                true
            }
            None => false,
        }
    }

    /// Make every cell blank again, keeping the size.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Number of cells that have been painted.
    #[must_use]
    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// One row of cells, left to right.
    #[must_use]
    pub fn row(&self, row: u16) -> Option<&[Option<Rgb>]> {
        (row < self.size).then(|| {
            let edge = usize::from(self.size);
            let start = usize::from(row) * edge;
            &self.cells[start..start + edge]
        })
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_blank() {
        let g = Grid::new(4);
        assert_eq!(g.size(), 4);
        assert_eq!(g.painted_count(), 0);
        assert_eq!(g.painted(0, 0), None);
        assert_eq!(g.color_or(3, 3, BLANK), Some(BLANK));
    }

    #[test]
    fn size_is_clamped() {
        assert_eq!(Grid::new(0).size(), MIN_SIZE);
        assert_eq!(Grid::new(500).size(), MAX_SIZE);
        assert_eq!(Grid::default().size(), DEFAULT_SIZE);
    }

    #[test]
    fn set_and_read_back() {
        let mut g = Grid::new(3);
        assert!(g.set(1, 2, Rgb::WHITE));
        assert_eq!(g.painted(1, 2), Some(Rgb::WHITE));
        assert_eq!(g.painted(2, 1), None);
        assert_eq!(g.painted_count(), 1);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut g = Grid::new(3);
        assert!(!g.set(3, 0, Rgb::WHITE));
        assert!(!g.set(0, 3, Rgb::WHITE));
        assert_eq!(g.painted_count(), 0);
        assert_eq!(g.color_or(3, 0, BLANK), None);
        assert!(g.row(3).is_none());
    }

    #[test]
    fn clear_blanks_everything() {
        let mut g = Grid::new(2);
        g.set(0, 0, Rgb::BLACK);
        g.set(1, 1, Rgb::BLACK);
        g.clear();
        assert_eq!(g.painted_count(), 0);
        assert_eq!(g.size(), 2);
    }

    #[test]
    fn rows_are_row_major() {
        let mut g = Grid::new(3);
        g.set(1, 0, Rgb::WHITE);
        let row = g.row(1).unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row[0], Some(Rgb::WHITE));
        assert_eq!(g.row(0).unwrap()[0], None);
    }

    #[test]
    fn clamp_size_bounds() {
        assert_eq!(clamp_size(0), 1);
        assert_eq!(clamp_size(16), 16);
        assert_eq!(clamp_size(101), 100);
    }
}
