//! UI state and the reducer that drives it.
//!
//! Every user action becomes a [`Msg`]. [`UiState::update`] folds a message
//! into a new state and says whether the grid must be rebuilt. Nothing in
//! here touches the grid or the terminal; the caller applies the [`Effect`].

use etch_color::Rgb;

use crate::grid::{DEFAULT_SIZE, clamp_size};
use crate::mode::Mode;

/// Everything the controls know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiState {
    /// Primary button held down over the pad.
    pub pressed: bool,
    /// Active palette color for `Normal` strokes.
    pub color: Rgb,
    pub mode: Mode,
    /// Edge of the grid currently on screen.
    pub size: u16,
    /// Edge shown on the slider; applied on commit or clear.
    pub pending_size: u16,
}

impl Default for UiState {
    fn default() -> Self {
        Self::with_size(DEFAULT_SIZE)
    }
}

impl UiState {
    /// Initial state for a grid of `size` cells per edge (clamped).
    #[must_use]
    pub fn with_size(size: u16) -> Self {
        let size = clamp_size(size);
        Self {
            pressed: false,
            color: Rgb::BLACK,
            mode: Mode::Normal,
            size,
            pending_size: size,
        }
    }

    /// True while the slider shows a size that is not on screen yet.
    #[inline]
    #[must_use]
    pub const fn size_pending(&self) -> bool {
        self.size != self.pending_size
    }

    /// Apply one message.
    #[must_use]
    pub fn update(self, msg: &Msg) -> (Self, Effect) {
        let mut next = self;
        let effect = match *msg {
            Msg::ButtonDown => {
                next.pressed = true;
                Effect::None
            }
            Msg::ButtonUp => {
                next.pressed = false;
                Effect::None
            }
            Msg::PickColor(color) => {
                next.color = color;
                next.mode = Mode::Normal;
                Effect::None
            }
            Msg::ToggleMode(target) => {
                next.mode = self.mode.toggle(target);
                Effect::None
            }
            Msg::SizeInput(n) => {
                next.pending_size = clamp_size(n);
                Effect::None
            }
            Msg::SizeCommit | Msg::Clear => {
                next.size = next.pending_size;
                Effect::Rebuild(next.size)
            }
        };
        (next, effect)
    }
}

/// A user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    ButtonDown,
    ButtonUp,
    /// A palette swatch was chosen. Also leaves any special mode.
    PickColor(Rgb),
    /// A mode button was pressed.
    ToggleMode(Mode),
    /// The slider moved; takes effect on [`Msg::SizeCommit`].
    SizeInput(u16),
    SizeCommit,
    Clear,
}

/// What the caller must do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Throw the grid away and start a blank one with this edge.
    Rebuild(u16),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(state: UiState, msgs: &[Msg]) -> (UiState, Vec<Effect>) {
        msgs.iter().fold((state, Vec::new()), |(s, mut effects), m| {
            let (s, e) = s.update(m);
            effects.push(e);
            (s, effects)
        })
    }

    #[test]
    fn initial_state() {
        let s = UiState::default();
        assert!(!s.pressed);
        assert_eq!(s.color, Rgb::BLACK);
        assert_eq!(s.mode, Mode::Normal);
        assert_eq!((s.size, s.pending_size), (16, 16));
        assert!(!s.size_pending());
    }

    #[test]
    fn with_size_clamps() {
        assert_eq!(UiState::with_size(0).size, 1);
        assert_eq!(UiState::with_size(250).pending_size, 100);
    }

    #[test]
    fn button_tracks_pressed() {
        let (s, e) = UiState::default().update(&Msg::ButtonDown);
        assert!(s.pressed);
        assert_eq!(e, Effect::None);
        let (s, _) = s.update(&Msg::ButtonUp);
        assert!(!s.pressed);
    }

    #[test]
    fn pick_color_resets_mode() {
        let start = UiState {
            mode: Mode::GoCrazy,
            ..UiState::default()
        };
        let red = Rgb::new(255, 0, 0);
        let (s, e) = start.update(&Msg::PickColor(red));
        assert_eq!(s.color, red);
        assert_eq!(s.mode, Mode::Normal);
        assert_eq!(e, Effect::None);
    }

    #[test]
    fn toggles_are_exclusive() {
        let (s, _) = run(
            UiState::default(),
            &[Msg::ToggleMode(Mode::Darken), Msg::ToggleMode(Mode::Lighten)],
        );
        assert_eq!(s.mode, Mode::Lighten);
    }

    #[test]
    fn toggle_twice_is_off() {
        let (s, _) = run(
            UiState::default(),
            &[Msg::ToggleMode(Mode::GoCrazy), Msg::ToggleMode(Mode::GoCrazy)],
        );
        assert_eq!(s.mode, Mode::Normal);
    }

    #[test]
    fn toggling_keeps_the_color() {
        let blue = Rgb::new(0, 0, 255);
        let (s, _) = run(
            UiState::default(),
            &[Msg::PickColor(blue), Msg::ToggleMode(Mode::Darken)],
        );
        assert_eq!(s.color, blue);
    }

    #[test]
    fn slider_input_is_pending_until_commit() {
        let (s, effects) = run(UiState::default(), &[Msg::SizeInput(40), Msg::SizeInput(32)]);
        assert_eq!(s.size, 16);
        assert_eq!(s.pending_size, 32);
        assert!(s.size_pending());
        assert_eq!(effects, vec![Effect::None, Effect::None]);

        let (s, e) = s.update(&Msg::SizeCommit);
        assert_eq!(s.size, 32);
        assert!(!s.size_pending());
        assert_eq!(e, Effect::Rebuild(32));
    }

    #[test]
    fn slider_input_is_clamped() {
        let (s, _) = UiState::default().update(&Msg::SizeInput(0));
        assert_eq!(s.pending_size, 1);
        let (s, _) = s.update(&Msg::SizeInput(1000));
        assert_eq!(s.pending_size, 100);
    }

    #[test]
    fn clear_rebuilds_at_pending_size() {
        let (s, effects) = run(UiState::default(), &[Msg::SizeInput(8), Msg::Clear]);
        assert_eq!(s.size, 8);
        assert_eq!(effects.last(), Some(&Effect::Rebuild(8)));
    }

    #[test]
    fn clear_keeps_mode_and_color() {
        let pink = Rgb::new(0xff, 0xc0, 0xcb);
        let (s, effects) = run(
            UiState::default(),
            &[Msg::PickColor(pink), Msg::ToggleMode(Mode::Lighten), Msg::Clear],
        );
        assert_eq!(s.color, pink);
        assert_eq!(s.mode, Mode::Lighten);
        assert_eq!(effects.last(), Some(&Effect::Rebuild(16)));
    }
}
