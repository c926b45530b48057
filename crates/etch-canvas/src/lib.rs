//! # etch-canvas: the drawing core of etch
//!
//! Everything between "the user did something" and "this cell is now this
//! color", with no terminal in sight.
//!
//! - [`mode`]: the four paint modes and the toggle rule
//! - [`state`]: `UiState`, the `Msg` it reacts to, and the pure reducer
//! - [`palette`]: swatches, the default sixteen, and the Go Crazy RNG
//! - [`grid`]: the square cell grid and its size limits
//! - [`brush`]: the color a stroke leaves in a cell
//! - [`canvas`]: grid + palette + brush, the thing strokes land on
//!
//! A typical step in the application looks like:
//!
//! ```
//! use etch_canvas::{Canvas, Effect, Msg, Stroke, UiState};
//!
//! let mut canvas = Canvas::new(16, Default::default(), Default::default(), 1);
//! let (state, effect) = UiState::default().update(&Msg::ButtonDown);
//! assert_eq!(effect, Effect::None);
//! canvas.stroke(&state, 0, 0, Stroke::Press);
//! canvas.stroke(&state, 0, 1, Stroke::Enter);
//! assert_eq!(canvas.grid().painted_count(), 2);
//! ```

pub mod brush;
pub mod canvas;
pub mod grid;
pub mod mode;
pub mod palette;
pub mod state;

pub use brush::Brush;
pub use canvas::{Canvas, Stroke};
pub use grid::{BLANK, DEFAULT_SIZE, Grid, MAX_SIZE, MIN_SIZE};
pub use mode::Mode;
pub use palette::{Palette, PaletteError, Swatch, Xorshift32};
pub use state::{Effect, Msg, UiState};
