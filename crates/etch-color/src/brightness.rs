//! Percentage brightness shifts.
//!
//! Each channel moves independently and multiplicatively:
//!
//! ```text
//! c' = clamp(floor(c + c · p / 100), 0, 255)
//! ```
//!
//! So `p = -10` takes 10% off every channel and `p = +10` adds 10%. Black
//! stays black under any `p` (0 scaled is 0). Repeated calls keep moving in
//! the same direction; there is no fixed point short of 0 or 255, which is
//! what makes drag-darkening feel continuous.
//!
//! The floor is computed exactly as `(c · (100 + p)).div_euclid(100)` in
//! `i64`, which matches the real-valued formula for every integer `p`
//! without float rounding surprises.

use crate::rgb::Rgb;

// ─── BrightnessDelta ─────────────────────────────────────────────────────────

/// A signed brightness change in percent.
///
/// Meaningful values lie in (-100, 100]; anything is accepted, and the
/// channel clamp keeps results in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BrightnessDelta(i32);

impl BrightnessDelta {
    /// One darkening step: -10%.
    pub const DARKEN: Self = Self(-10);
    /// One lightening step: +10%.
    pub const LIGHTEN: Self = Self(10);

    #[inline]
    #[must_use]
    pub const fn new(percent: i32) -> Self {
        Self(percent)
    }

    #[inline]
    #[must_use]
    pub const fn percent(self) -> i32 {
        self.0
    }

    /// The same magnitude in the opposite direction.
    #[inline]
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl From<i32> for BrightnessDelta {
    fn from(percent: i32) -> Self {
        Self(percent)
    }
}

// ─── Adjustment ──────────────────────────────────────────────────────────────

/// Shift one channel.
#[must_use]
pub fn adjust_channel(c: u8, delta: BrightnessDelta) -> u8 {
    let scaled = i64::from(c) * (100 + i64::from(delta.0));
    let shifted = scaled.div_euclid(100).clamp(0, i64::from(u8::MAX));
    // Clamped to 0..=255 above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let channel = shifted as u8;
    channel
}

/// Shift a hex color's brightness by `percent`.
///
/// Takes `#RRGGBB` (or `RRGGBB`, or `#RGB`); channels that are not valid
/// hex read as 0. Returns lowercase `#rrggbb`.
///
/// # Examples
///
/// ```
/// use etch_color::adjust_brightness;
///
/// assert_eq!(adjust_brightness("#646464", 10), "#6e6e6e");
/// assert_eq!(adjust_brightness("#646464", -10), "#5a5a5a");
/// assert_eq!(adjust_brightness("#000000", -10), "#000000");
/// ```
#[must_use]
pub fn adjust_brightness(color: &str, percent: i32) -> String {
    Rgb::from_hex_lossy(color)
        .adjust_brightness(BrightnessDelta::new(percent))
        .to_hex()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
