//! The 8-bit RGB triple and its hex encodings.

use std::fmt;
use std::str::FromStr;

use crate::brightness::{self, BrightnessDelta};
use crate::error::{ColorError, Result};
use crate::named;

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// A color as three 8-bit sRGB channels.
///
/// This is what a grid cell stores. Channels are `u8`, so the [0, 255]
/// clamp is enforced by the type; arithmetic that can leave the range goes
/// through `i64` and clamps on the way back.
///
/// # Examples
///
/// ```
/// use etch_color::Rgb;
///
/// let pale: Rgb = "rgb(213, 228, 222)".parse().unwrap();
/// assert_eq!(pale.to_hex(), "#d5e4de");
/// assert_eq!(Rgb::from_hex_lossy("#E0F"), Rgb::new(0xee, 0x00, 0xff));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels in `[r, g, b]` order.
    #[inline]
    #[must_use]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    #[must_use]
    pub const fn from_channels([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }

    /// Decode a hex color the forgiving way.
    ///
    /// Surrounding whitespace and one leading `#` are stripped, 3-digit
    /// shorthand is expanded (`E0F` → `EE00FF`), then each channel is read
    /// from its two-character slot. A slot that is missing or does not start
    /// with a hex digit reads as 0; a slot like `5g` reads as its valid
    /// prefix (`5`). Never fails.
    #[must_use]
    pub fn from_hex_lossy(s: &str) -> Self {
        let digits = strip_hex_prefix(s);
        let expanded;
        let bytes = if digits.len() == 3 {
            expanded = expand_shorthand(digits.as_bytes());
            &expanded[..]
        } else {
            digits.as_bytes()
        };

        let slot = |i: usize| {
            let start = (i * 2).min(bytes.len());
            let end = (i * 2 + 2).min(bytes.len());
            parse_hex_prefix(&bytes[start..end])
        };

        Self::new(slot(0), slot(1), slot(2))
    }

    /// Canonical `#rrggbb`, lowercase, zero-padded.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Shift every channel by a percentage. See [`brightness`].
    #[must_use]
    pub fn adjust_brightness(self, delta: BrightnessDelta) -> Self {
        Self::from_channels(self.channels().map(|c| brightness::adjust_channel(c, delta)))
    }

    /// Perceived brightness on a 0–255 scale (ITU-R BT.601 weights).
    ///
    /// Used to pick a readable marker color on top of a swatch.
    #[must_use]
    pub fn luma(self) -> u8 {
        let y = 299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b);
        // Max is 255 * 1000 / 1000, fits in u8.
        #[allow(clippy::cast_possible_truncation)]
        let luma = (y / 1000) as u8;
        luma
    }

    /// Whether dark text reads better than light text on this color.
    #[inline]
    #[must_use]
    pub fn is_light(self) -> bool {
        self.luma() >= 128
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(channels: [u8; 3]) -> Self {
        Self::from_channels(channels)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> Self {
        rgb.channels()
    }
}

// ─── Strict Parsing ──────────────────────────────────────────────────────────

impl FromStr for Rgb {
    type Err = ColorError;

    /// Parse `#RGB`, `#RRGGBB` (`#` optional), `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)` or a CSS basic color name.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorError::Empty);
        }

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex_strict(hex);
        }
        if looks_like_bare_hex(s) {
            return parse_hex_strict(s);
        }
        if let Some(args) = function_args(s) {
            return parse_function_strict(s, args);
        }

        named::lookup(s).ok_or_else(|| ColorError::UnknownName(s.to_owned()))
    }
}

fn parse_hex_strict(digits: &str) -> Result<Rgb> {
    let bytes = digits.as_bytes();
    if !bytes.iter().all(u8::is_ascii_hexdigit) {
        return Err(ColorError::InvalidHex(format!("#{digits}")));
    }

    match bytes.len() {
        3 => Ok(Rgb::from_hex_lossy(digits)),
        6 => Ok(Rgb::new(
            parse_hex_prefix(&bytes[0..2]),
            parse_hex_prefix(&bytes[2..4]),
            parse_hex_prefix(&bytes[4..6]),
        )),
        n => Err(ColorError::InvalidLength(n)),
    }
}

fn parse_function_strict(original: &str, args: &str) -> Result<Rgb> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    if !(3..=4).contains(&parts.len()) {
        return Err(ColorError::InvalidFunction(original.to_owned()));
    }

    let mut channels = [0u8; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        if !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ColorError::InvalidFunction(original.to_owned()));
        }
        let value: u32 = part
            .parse()
            .map_err(|_| ColorError::InvalidFunction(original.to_owned()))?;
        *slot = u8::try_from(value).map_err(|_| ColorError::OutOfRange(value))?;
    }

    Ok(Rgb::from_channels(channels))
}

/// The text between `rgb(`/`rgba(` and the closing `)`, if `s` has that shape.
fn function_args(s: &str) -> Option<&str> {
    let open = s.find('(')?;
    let name = &s[..open];
    if !(name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba")) {
        return None;
    }
    s[open + 1..].strip_suffix(')')
}

// ─── Hex Helpers ─────────────────────────────────────────────────────────────

/// Strip surrounding whitespace and one leading `#`.
pub(crate) fn strip_hex_prefix(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix('#').unwrap_or(s)
}

/// `true` for 3 or 6 hex digits with no `#`.
pub(crate) fn looks_like_bare_hex(s: &str) -> bool {
    matches!(s.len(), 3 | 6) && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// `abc` → `aabbcc`, byte-wise.
pub(crate) fn expand_shorthand(digits: &[u8]) -> Vec<u8> {
    digits.iter().flat_map(|&d| [d, d]).collect()
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Read the leading hex digits of a slot of at most two bytes.
///
/// `"6e"` → 0x6e, `"5g"` → 5, `"g5"` → 0, `""` → 0.
fn parse_hex_prefix(slot: &[u8]) -> u8 {
    slot.iter()
        .map_while(|&b| parse_hex_digit(b))
        .fold(0u8, |acc, d| acc << 4 | d)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Lossy hex ───────────────────────────────────────────────────────

    #[test]
    fn lossy_six_digits() {
        assert_eq!(Rgb::from_hex_lossy("#d5e4de"), Rgb::new(0xd5, 0xe4, 0xde));
    }

    #[test]
    fn lossy_shorthand_expands_each_digit() {
        assert_eq!(Rgb::from_hex_lossy("E0F"), Rgb::new(0xee, 0x00, 0xff));
    }

    #[test]
    fn lossy_strips_whitespace_and_hash() {
        assert_eq!(Rgb::from_hex_lossy("  #646464 \n"), Rgb::new(100, 100, 100));
    }

    #[test]
    fn lossy_bad_channel_reads_zero() {
        assert_eq!(Rgb::from_hex_lossy("#zz8000"), Rgb::new(0, 0x80, 0));
    }

    #[test]
    fn lossy_partial_slot_reads_prefix() {
        assert_eq!(Rgb::from_hex_lossy("#ff5g00"), Rgb::new(0xff, 5, 0));
    }

    #[test]
    fn lossy_short_input_pads_with_zero() {
        assert_eq!(Rgb::from_hex_lossy("#12345"), Rgb::new(0x12, 0x34, 5));
        assert_eq!(Rgb::from_hex_lossy(""), Rgb::BLACK);
    }

    #[test]
    fn lossy_does_not_panic_on_multibyte() {
        let _ = Rgb::from_hex_lossy("#ü1234");
        let _ = Rgb::from_hex_lossy("日本");
    }

    // ── Formatting ──────────────────────────────────────────────────────

    #[test]
    fn to_hex_zero_pads_lowercase() {
        assert_eq!(Rgb::new(1, 2, 3).to_hex(), "#010203");
        assert_eq!(Rgb::new(0xAB, 0xCD, 0xEF).to_hex(), "#abcdef");
    }

    #[test]
    fn display_matches_to_hex() {
        let c = Rgb::new(0x8b, 0x45, 0x13);
        assert_eq!(c.to_string(), c.to_hex());
    }

    // ── Strict parsing ──────────────────────────────────────────────────

    #[test]
    fn strict_hex_forms() {
        assert_eq!("#FFA500".parse::<Rgb>(), Ok(Rgb::new(0xff, 0xa5, 0)));
        assert_eq!("ffa500".parse::<Rgb>(), Ok(Rgb::new(0xff, 0xa5, 0)));
        assert_eq!("#fff".parse::<Rgb>(), Ok(Rgb::WHITE));
    }

    #[test]
    fn strict_rejects_bad_hex() {
        assert_eq!(
            "#ggg".parse::<Rgb>(),
            Err(ColorError::InvalidHex("#ggg".into()))
        );
        assert_eq!("#abcd".parse::<Rgb>(), Err(ColorError::InvalidLength(4)));
    }

    #[test]
    fn strict_functional_forms() {
        assert_eq!("rgb(213, 228, 222)".parse::<Rgb>(), Ok(Rgb::new(213, 228, 222)));
        assert_eq!("RGBA(1,2,3,0.5)".parse::<Rgb>(), Ok(Rgb::new(1, 2, 3)));
        assert_eq!("rgb(1 2 3 / 50)".parse::<Rgb>(), Ok(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn strict_rejects_bad_functional() {
        assert!(matches!(
            "rgb(1, 2)".parse::<Rgb>(),
            Err(ColorError::InvalidFunction(_))
        ));
        assert!(matches!(
            "rgb(1, x, 3)".parse::<Rgb>(),
            Err(ColorError::InvalidFunction(_))
        ));
        assert_eq!("rgb(1, 2, 300)".parse::<Rgb>(), Err(ColorError::OutOfRange(300)));
    }

    #[test]
    fn strict_names() {
        assert_eq!("black".parse::<Rgb>(), Ok(Rgb::BLACK));
        assert_eq!(
            "burnt sienna".parse::<Rgb>(),
            Err(ColorError::UnknownName("burnt sienna".into()))
        );
    }

    #[test]
    fn strict_empty() {
        assert_eq!("   ".parse::<Rgb>(), Err(ColorError::Empty));
    }

    // ── Luma ────────────────────────────────────────────────────────────

    #[test]
    fn luma_extremes() {
        assert_eq!(Rgb::BLACK.luma(), 0);
        assert_eq!(Rgb::WHITE.luma(), 255);
        assert!(Rgb::new(0xff, 0xff, 0).is_light());
        assert!(!Rgb::new(0, 0, 0x80).is_light());
    }
}
