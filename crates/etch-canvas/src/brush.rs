//! What color a stroke leaves behind.

use etch_color::{BrightnessDelta, Rgb};

use crate::grid::BLANK;
use crate::mode::Mode;
use crate::palette::{Palette, Xorshift32};
use crate::state::UiState;

/// Per-session brush settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    /// Color a never-painted cell is treated as.
    pub blank: Rgb,
    /// One lighten step. Darken uses the same step reversed.
    pub step: BrightnessDelta,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            blank: BLANK,
            step: BrightnessDelta::LIGHTEN,
        }
    }
}

impl Brush {
    /// The new color for a cell currently holding `current`.
    ///
    /// Only `GoCrazy` draws from `rng`.
    pub fn color_for(
        &self,
        state: &UiState,
        current: Option<Rgb>,
        palette: &Palette,
        rng: &mut Xorshift32,
    ) -> Rgb {
        match state.mode {
            Mode::Normal => state.color,
            Mode::GoCrazy => palette.random(rng),
            Mode::Darken => current
                .unwrap_or(self.blank)
                .adjust_brightness(self.step.reversed()),
            Mode::Lighten => current.unwrap_or(self.blank).adjust_brightness(self.step),
        }
    }
}
