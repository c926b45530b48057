//! Paint modes.
//!
//! The sketch pad is always in exactly one [`Mode`]. The mode decides what
//! a brush stroke does to the cell under the pointer:
//!
//! | Mode      | Button label | Stroke result                        |
//! |-----------|--------------|--------------------------------------|
//! | Normal    | (none)       | the selected palette color           |
//! | GoCrazy   | Go Crazy     | a random palette color per cell      |
//! | Darken    | Darken       | the cell's own color, 10% darker     |
//! | Lighten   | Lighten      | the cell's own color, 10% lighter    |
//!
//! Being an enum, two modes can never be on at once. Turning one on turns
//! the others off by construction.

use std::fmt;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// The current paint mode.
///
/// Pure data: what happens on a stroke lives in [`crate::brush`], and the
/// rules for switching live in [`crate::state`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Paint with the selected palette color.
    #[default]
    Normal,
    /// Paint every cell with a random palette color.
    GoCrazy,
    /// Darken whatever is already in the cell.
    Darken,
    /// Lighten whatever is already in the cell.
    Lighten,
}

impl Mode {
    /// The modes that have a toggle button, in panel order.
    pub const TOGGLES: [Self; 3] = [Self::GoCrazy, Self::Lighten, Self::Darken];

    /// Human-readable name for the status line.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::GoCrazy => "GO CRAZY",
            Self::Darken => "DARKEN",
            Self::Lighten => "LIGHTEN",
        }
    }

    /// Text on the mode's toggle button. `Normal` has no button.
    #[must_use]
    pub const fn button_label(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::GoCrazy => Some("Go Crazy"),
            Self::Darken => Some("Darken"),
            Self::Lighten => Some("Lighten"),
        }
    }

    /// Press the button for `target`.
    ///
    /// Pressing the button of the active mode switches it off (back to
    /// `Normal`); pressing any other button makes that mode the only one.
    #[must_use]
    pub fn toggle(self, target: Self) -> Self {
        if self == target { Self::Normal } else { target }
    }

    /// True for the modes that read the cell's existing color.
    #[inline]
    #[must_use]
    pub const fn is_brightness(self) -> bool {
        matches!(self, Self::Darken | Self::Lighten)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Mode; 4] = [Mode::Normal, Mode::GoCrazy, Mode::Darken, Mode::Lighten];

    #[test]
    fn default_is_normal() {
        assert_eq!(Mode::default(), Mode::Normal);
    }

    #[test]
    fn toggle_activates_target_from_any_other_mode() {
        for from in ALL {
            for target in Mode::TOGGLES {
                if from != target {
                    assert_eq!(from.toggle(target), target, "{from} → {target}");
                }
            }
        }
    }

    #[test]
    fn toggle_same_mode_returns_to_normal() {
        for m in Mode::TOGGLES {
            assert_eq!(m.toggle(m), Mode::Normal);
        }
    }

    #[test]
    fn toggle_normal_is_normal() {
        assert_eq!(Mode::Darken.toggle(Mode::Normal), Mode::Normal);
        assert_eq!(Mode::Normal.toggle(Mode::Normal), Mode::Normal);
    }

    #[test]
    fn darken_then_lighten_leaves_only_lighten() {
        let m = Mode::Normal.toggle(Mode::Darken).toggle(Mode::Lighten);
        assert_eq!(m, Mode::Lighten);
        assert!(m.is_brightness());
    }

    #[test]
    fn only_toggle_modes_have_buttons() {
        assert_eq!(Mode::Normal.button_label(), None);
        for m in Mode::TOGGLES {
            assert!(m.button_label().is_some());
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(Mode::GoCrazy.to_string(), "GO CRAZY");
        assert_eq!(format!("{}", Mode::Normal), "NORMAL");
    }

    #[test]
    fn brightness_modes() {
        assert!(Mode::Darken.is_brightness());
        assert!(Mode::Lighten.is_brightness());
        assert!(!Mode::GoCrazy.is_brightness());
        assert!(!Mode::Normal.is_brightness());
    }
}
