// SPDX-License-Identifier: MIT
//
// Screen geometry and hit testing.
//
//   ┌───────────────────────────────┬────────────────────────┐
//   │                               │ etch-a-sketch          │
//   │                               │ color ██ #000000       │
//   │      grid (half blocks,       │                        │
//   │      integer scale,           │ ▒▒▒▒▒ ▒▒▒▒▒ ▒▒▒▒▒ ▒▒▒▒▒ │  palette, 4 per row
//   │      centered)                │ ...                    │
//   │                               │ [ Go Crazy        g ]  │
//   │                               │ [ Lighten         l ]  │
//   │                               │ [ Darken          d ]  │
//   │                               │ [ Clear           c ]  │
//   │                               │ 16 x 16                │
//   │                               │ ─────█──────────────   │  slider
//   │                               │ key help               │
//   └───────────────────────────────┴────────────────────────┘
//
// One grid pixel is one column wide and half a row tall, so pixels come
// out roughly square. A terminal cell therefore covers up to two grid rows,
// and a click on it reaches both (see `Pixel`).

use etch_canvas::{MAX_SIZE, MIN_SIZE, Mode};
use etch_term::terminal::Size;

pub const PANEL_WIDTH: u16 = 24;
/// Columns between the grid area and the panel.
const GAP: u16 = 2;
pub const SWATCHES_PER_ROW: u16 = 4;
pub const SWATCH_WIDTH: u16 = 5;
/// Swatch plus the one-column gap after it.
const SWATCH_PITCH: u16 = SWATCH_WIDTH + 1;
pub const BUTTON_WIDTH: u16 = 20;
pub const SLIDER_WIDTH: u16 = 20;

// ─── Rect ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    #[must_use]
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    #[must_use]
    pub const fn contains(self, x: u16, y: u16) -> bool {
        x >= self.x && x - self.x < self.w && y >= self.y && y - self.y < self.h
    }

    /// First column past the right edge.
    #[must_use]
    pub const fn right(self) -> u16 {
        self.x.saturating_add(self.w)
    }
}

// ─── Targets ─────────────────────────────────────────────────────────────────

/// The grid cells under one terminal cell: column `col`, rows
/// `top..=bottom`. `top == bottom` when both halves fall in the same row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub col: u16,
    pub top: u16,
    pub bottom: u16,
}

impl Pixel {
    pub fn rows(self) -> impl Iterator<Item = u16> {
        self.top..=self.bottom
    }

    #[must_use]
    pub const fn covers(self, row: u16, col: u16) -> bool {
        col == self.col && row >= self.top && row <= self.bottom
    }
}

/// What a mouse position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Pixel(Pixel),
    Swatch(usize),
    Mode(Mode),
    Clear,
    /// The slider, with the size at that column.
    Slider(u16),
}

// ─── Layout ──────────────────────────────────────────────────────────────────

/// Where everything goes for one screen size, grid size and palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Terminal cells covered by the grid.
    pub grid: Rect,
    /// Pixels per grid cell edge.
    pub scale: u16,
    pub grid_size: u16,
    pub panel: Rect,
    pub title_y: u16,
    pub color_y: u16,
    /// Bounding box of the swatches.
    pub palette: Rect,
    palette_len: usize,
    pub modes: [(Mode, Rect); 3],
    pub clear: Rect,
    pub size_label_y: u16,
    pub slider: Rect,
    pub help_y: u16,
}

impl Layout {
    #[must_use]
    pub fn new(screen: Size, grid_size: u16, palette_len: usize) -> Self {
        let panel_x = screen.cols.saturating_sub(PANEL_WIDTH);
        let panel = Rect::new(panel_x, 0, screen.cols - panel_x, screen.rows);

        let area = Rect::new(1, 0, panel_x.saturating_sub(GAP + 1), screen.rows);
        let n = u32::from(grid_size.max(1));
        let scale = (u32::from(area.w) / n)
            .min(u32::from(area.h) * 2 / n)
            .max(1);
        let w = narrow((n * scale).min(u32::from(area.w)));
        let h = narrow((n * scale).div_ceil(2).min(u32::from(area.h)));
        let grid = Rect::new(area.x + (area.w - w) / 2, (area.h - h) / 2, w, h);

        let title_y = 0;
        let color_y = 1;
        let palette_rows = narrow(
            u32::try_from(palette_len)
                .unwrap_or(u32::MAX)
                .div_ceil(u32::from(SWATCHES_PER_ROW)),
        );
        let palette = Rect::new(
            panel_x,
            color_y + 2,
            SWATCHES_PER_ROW * SWATCH_PITCH - 1,
            palette_rows,
        );

        let modes_y = palette.y.saturating_add(palette_rows.saturating_add(1));
        let modes = [0u16, 1, 2].map(|i| {
            (
                Mode::TOGGLES[usize::from(i)],
                Rect::new(panel_x, modes_y.saturating_add(i), BUTTON_WIDTH, 1),
            )
        });
        let clear = Rect::new(panel_x, modes_y.saturating_add(4), BUTTON_WIDTH, 1);
        let size_label_y = clear.y.saturating_add(2);
        let slider = Rect::new(panel_x, size_label_y.saturating_add(1), SLIDER_WIDTH, 1);
        let help_y = slider.y.saturating_add(2);

        Self {
            grid,
            scale: narrow(scale),
            grid_size: grid_size.max(1),
            panel,
            title_y,
            color_y,
            palette,
            palette_len,
            modes,
            clear,
            size_label_y,
            slider,
            help_y,
        }
    }

    /// Grid row shown in the top (`lower == false`) or bottom half of
    /// grid-relative terminal row `dy`.
    #[must_use]
    pub fn pixel_row(&self, dy: u16, lower: bool) -> Option<u16> {
        let py = u32::from(dy) * 2 + u32::from(lower);
        let row = narrow(py / u32::from(self.scale));
        (row < self.grid_size).then_some(row)
    }

    /// Grid column shown at grid-relative terminal column `dx`.
    #[must_use]
    pub fn pixel_col(&self, dx: u16) -> Option<u16> {
        let col = dx / self.scale;
        (col < self.grid_size).then_some(col)
    }

    #[must_use]
    pub fn pixel_at(&self, x: u16, y: u16) -> Option<Pixel> {
        if !self.grid.contains(x, y) {
            return None;
        }
        let dy = y - self.grid.y;
        let col = self.pixel_col(x - self.grid.x)?;
        let top = self.pixel_row(dy, false)?;
        let bottom = self.pixel_row(dy, true).unwrap_or(top);
        Some(Pixel { col, top, bottom })
    }

    /// Rect of swatch `index`.
    #[must_use]
    pub fn swatch_rect(&self, index: usize) -> Rect {
        let per_row = usize::from(SWATCHES_PER_ROW);
        Rect::new(
            self.panel.x + narrow_usize(index % per_row) * SWATCH_PITCH,
            self.palette.y.saturating_add(narrow_usize(index / per_row)),
            SWATCH_WIDTH,
            1,
        )
    }

    #[must_use]
    pub fn swatch_at(&self, x: u16, y: u16) -> Option<usize> {
        if !self.palette.contains(x, y) {
            return None;
        }
        let dx = x - self.palette.x;
        if dx % SWATCH_PITCH == SWATCH_WIDTH {
            return None;
        }
        let index = usize::from(y - self.palette.y) * usize::from(SWATCHES_PER_ROW)
            + usize::from(dx / SWATCH_PITCH);
        (index < self.palette_len).then_some(index)
    }

    /// Size under column `x` of the slider. Columns outside the track
    /// clamp to its ends, so a drag past either end pins the value.
    #[must_use]
    pub fn slider_value(&self, x: u16) -> u16 {
        let last = self.slider.w.saturating_sub(1);
        let dx = u32::from(x.saturating_sub(self.slider.x).min(last));
        let span = u32::from(MAX_SIZE - MIN_SIZE);
        let last = u32::from(last).max(1);
        MIN_SIZE + narrow((dx * span + last / 2) / last)
    }

    /// Column of the slider knob for `size`.
    #[must_use]
    pub fn slider_knob(&self, size: u16) -> u16 {
        let size = size.clamp(MIN_SIZE, MAX_SIZE);
        let last = u32::from(self.slider.w.saturating_sub(1));
        let span = u32::from(MAX_SIZE - MIN_SIZE);
        self.slider.x + narrow((u32::from(size - MIN_SIZE) * last + span / 2) / span)
    }

    /// The slider track or its label: where the scroll wheel changes size.
    #[must_use]
    pub const fn over_slider(&self, x: u16, y: u16) -> bool {
        Rect::new(self.slider.x, self.size_label_y, self.slider.w, 2).contains(x, y)
    }

    #[must_use]
    pub fn hit(&self, x: u16, y: u16) -> Option<Target> {
        if let Some(pixel) = self.pixel_at(x, y) {
            return Some(Target::Pixel(pixel));
        }
        if let Some(index) = self.swatch_at(x, y) {
            return Some(Target::Swatch(index));
        }
        if let Some(&(mode, _)) = self.modes.iter().find(|(_, r)| r.contains(x, y)) {
            return Some(Target::Mode(mode));
        }
        if self.clear.contains(x, y) {
            return Some(Target::Clear);
        }
        self.slider
            .contains(x, y)
            .then(|| Target::Slider(self.slider_value(x)))
    }
}

fn narrow(v: u32) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

fn narrow_usize(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCREEN: Size = Size { cols: 80, rows: 24 };

    fn layout() -> Layout {
        Layout::new(SCREEN, 16, 16)
    }

    #[test]
    fn grid_is_scaled_and_centered() {
        let l = layout();
        assert_eq!(l.scale, 3);
        assert_eq!(l.grid, Rect::new(3, 0, 48, 24));
        assert_eq!(l.panel, Rect::new(56, 0, 24, 24));
    }

    #[test]
    fn big_grid_on_small_screen_is_clipped() {
        let l = Layout::new(SCREEN, 100, 16);
        assert_eq!(l.scale, 1);
        assert_eq!(l.grid.w, 53);
        assert_eq!(l.grid.h, 24);
        assert_eq!(l.pixel_col(52), Some(52));
    }

    #[test]
    fn tiny_screen_has_no_grid() {
        let l = Layout::new(Size { cols: 10, rows: 5 }, 16, 16);
        assert_eq!(l.grid.w, 0);
        assert_eq!(l.pixel_at(0, 0), None);
        assert_eq!(l.panel.x, 0);
    }

    #[test]
    fn neighbouring_rows_share_a_grid_row() {
        let l = layout();
        let upper = l.pixel_at(3, 1).unwrap();
        let lower = l.pixel_at(3, 2).unwrap();
        assert!(upper.covers(1, 0));
        assert!(lower.covers(1, 0));
        assert!(!lower.covers(0, 0));
        assert!(!upper.covers(1, 1));
    }

    #[test]
    fn pixels_cover_both_halves() {
        let l = layout();
        assert_eq!(l.pixel_at(3, 0), Some(Pixel { col: 0, top: 0, bottom: 0 }));
        assert_eq!(l.pixel_at(3, 1), Some(Pixel { col: 0, top: 0, bottom: 1 }));
        assert_eq!(l.pixel_at(50, 23), Some(Pixel { col: 15, top: 15, bottom: 15 }));
        assert_eq!(l.pixel_at(2, 0), None);
        assert_eq!(l.pixel_at(51, 0), None);
    }

    #[test]
    fn unscaled_pixel_spans_two_rows() {
        let l = Layout::new(Size { cols: 60, rows: 10 }, 20, 16);
        assert_eq!(l.scale, 1);
        let p = l.pixel_at(l.grid.x, l.grid.y).unwrap();
        assert_eq!(p, Pixel { col: 0, top: 0, bottom: 1 });
        assert_eq!(p.rows().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn odd_grid_bottom_half_is_empty() {
        // 5 rows at scale 3 is 15 pixel rows: the last terminal row shows
        // row 4 over nothing.
        let l = Layout::new(Size { cols: 60, rows: 8 }, 5, 16);
        assert_eq!(l.scale, 3);
        assert_eq!(l.grid.h, 8);
        assert_eq!(l.pixel_row(7, false), Some(4));
        assert_eq!(l.pixel_row(7, true), None);
        assert_eq!(
            l.pixel_at(l.grid.x, l.grid.y + 7),
            Some(Pixel { col: 0, top: 4, bottom: 4 })
        );
    }

    #[test]
    fn swatches() {
        let l = layout();
        assert_eq!(l.palette, Rect::new(56, 3, 23, 4));
        assert_eq!(l.swatch_at(56, 3), Some(0));
        assert_eq!(l.swatch_at(60, 3), Some(0));
        assert_eq!(l.swatch_at(61, 3), None);
        assert_eq!(l.swatch_at(62, 3), Some(1));
        assert_eq!(l.swatch_at(56, 4), Some(4));
        assert_eq!(l.swatch_at(74, 6), Some(15));
        assert_eq!(l.swatch_rect(5), Rect::new(62, 4, 5, 1));
    }

    #[test]
    fn partial_last_palette_row() {
        let l = Layout::new(SCREEN, 16, 5);
        assert_eq!(l.palette.h, 2);
        assert_eq!(l.swatch_at(56, 4), Some(4));
        assert_eq!(l.swatch_at(62, 4), None);
    }

    #[test]
    fn buttons_and_slider() {
        let l = layout();
        assert_eq!(l.hit(56, 8), Some(Target::Mode(Mode::GoCrazy)));
        assert_eq!(l.hit(60, 9), Some(Target::Mode(Mode::Lighten)));
        assert_eq!(l.hit(75, 10), Some(Target::Mode(Mode::Darken)));
        assert_eq!(l.hit(56, 11), None);
        assert_eq!(l.hit(56, 12), Some(Target::Clear));
        assert_eq!(l.size_label_y, 14);
        assert_eq!(l.hit(56, 15), Some(Target::Slider(1)));
        assert_eq!(l.hit(75, 15), Some(Target::Slider(100)));
        assert_eq!(l.hit(76, 15), None);
        assert_eq!(l.help_y, 17);
    }

    #[test]
    fn slider_is_monotonic_and_clamps() {
        let l = layout();
        let values: Vec<u16> = (50..80).map(|x| l.slider_value(x)).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(l.slider_value(0), 1);
        assert_eq!(l.slider_value(79), 100);
    }

    #[test]
    fn knob_tracks_value() {
        let l = layout();
        assert_eq!(l.slider_knob(1), 56);
        assert_eq!(l.slider_knob(100), 75);
        for x in 56..76 {
            assert_eq!(l.slider_knob(l.slider_value(x)), x);
        }
    }

    #[test]
    fn scroll_zone() {
        let l = layout();
        assert!(l.over_slider(60, 14));
        assert!(l.over_slider(60, 15));
        assert!(!l.over_slider(60, 16));
        assert!(!l.over_slider(10, 15));
    }
}
