//! Color format normalization.
//!
//! The UI reads a cell's current color back in whatever notation it was
//! stored or reported in. Brightness adjustment wants `#RRGGBB`. This
//! module bridges the two and never fails: anything it cannot make sense
//! of becomes black.

use std::sync::LazyLock;

use regex::Regex;

use crate::rgb::{self, Rgb};

/// Fallback for functional input with fewer than three numbers.
pub const FALLBACK: &str = "#000000";

/// Runs of decimal digits, as found inside `rgb(...)` / `rgba(...)`.
static NUMBERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit-run pattern is valid"));

/// Normalize a color string to canonical `#RRGGBB`.
///
/// - **Hex input** (`#RRGGBB`, `#RGB`, or a bare 3/6-digit hex string,
///   with surrounding whitespace allowed): shorthand is expanded by
///   doubling each digit and the `#` is re-added. The digits keep their
///   case, so canonical input comes back unchanged. Hex input that is not
///   six clean digits after expansion is decoded lossily (bad channels
///   read as 0) and re-encoded in lowercase.
/// - **Functional input** (`rgb(r, g, b)`, `rgba(r, g, b, a)`, or any
///   text holding numbers): the first three digit runs become R, G, B;
///   alpha is ignored. Values above 255 clamp to 255.
/// - **Anything else**: fewer than three numbers yields [`FALLBACK`].
///
/// # Examples
///
/// ```
/// use etch_color::normalize;
///
/// assert_eq!(normalize("#E0F"), "#EE00FF");
/// assert_eq!(normalize("rgb(1, 2, 3)"), "#010203");
/// assert_eq!(normalize("not-a-color"), "#000000");
/// ```
#[must_use]
pub fn normalize(color: &str) -> String {
    let trimmed = color.trim();

    if trimmed.starts_with('#') || rgb::looks_like_bare_hex(trimmed) {
        return normalize_hex(trimmed);
    }

    normalize_functional(trimmed)
}

fn normalize_hex(color: &str) -> String {
    let digits = rgb::strip_hex_prefix(color).as_bytes();

    let expanded = if digits.len() == 3 {
        rgb::expand_shorthand(digits)
    } else {
        digits.to_vec()
    };

    if expanded.len() == 6 && expanded.iter().all(u8::is_ascii_hexdigit) {
        // All ASCII, so this is valid UTF-8.
        let mut out = String::with_capacity(7);
        out.push('#');
        out.extend(expanded.iter().map(|&b| char::from(b)));
        return out;
    }

    Rgb::from_hex_lossy(color).to_hex()
}

fn normalize_functional(color: &str) -> String {
    let mut channels = [0u8; 3];
    let mut found = 0;

    for (slot, m) in channels.iter_mut().zip(NUMBERS.find_iter(color)) {
        *slot = clamp_channel(m.as_str());
        found += 1;
    }

    if found < 3 {
        return FALLBACK.to_owned();
    }

    Rgb::from_channels(channels).to_hex()
}

/// Decimal digit run → channel, saturating at 255.
fn clamp_channel(digits: &str) -> u8 {
    digits
        .parse::<u32>()
        .ok()
        .and_then(|v| u8::try_from(v).ok())
        .unwrap_or(u8::MAX)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Hex input ───────────────────────────────────────────────────────

    #[test]
    fn shorthand_expands() {
        assert_eq!(normalize("#E0F"), "#EE00FF");
    }

    #[test]
    fn shorthand_without_hash() {
        assert_eq!(normalize("e0f"), "#ee00ff");
    }

    #[test]
    fn canonical_hex_is_unchanged() {
        for hex in ["#000000", "#FFFFFF", "#d5e4de", "#8B4513", "#6e6e6e"] {
            assert_eq!(normalize(hex), hex);
        }
    }

    #[test]
    fn surrounding_whitespace_is_stripped() {
        assert_eq!(normalize("  #646464\t"), "#646464");
        assert_eq!(normalize(" 646464 "), "#646464");
    }

    #[test]
    fn dirty_hex_is_reencoded_lossily() {
        assert_eq!(normalize("#zz8000"), "#008000");
        assert_eq!(normalize("#12345"), "#123405");
    }

    // ── Functional input ────────────────────────────────────────────────

    #[test]
    fn rgb_function() {
        assert_eq!(normalize("rgb(1, 2, 3)"), "#010203");
        assert_eq!(normalize("rgb(213, 228, 222)"), "#d5e4de");
    }

    #[test]
    fn rgba_ignores_alpha() {
        assert_eq!(normalize("rgba(255, 0, 128, 0.5)"), "#ff0080");
    }

    #[test]
    fn channel_above_255_clamps() {
        assert_eq!(normalize("rgb(300, 0, 99999999999)"), "#ff00ff");
    }

    #[test]
    fn sign_is_not_part_of_a_number() {
        assert_eq!(normalize("rgb(-5, 2, 3)"), "#050203");
    }

    // ── Fallback ────────────────────────────────────────────────────────

    #[test]
    fn unparseable_is_black() {
        assert_eq!(normalize("not-a-color"), FALLBACK);
        assert_eq!(normalize(""), FALLBACK);
        assert_eq!(normalize("rgb(1, 2)"), FALLBACK);
    }

    #[test]
    fn output_always_has_hash_and_six_digits() {
        for input in ["#E0F", "rgb(1,2,3)", "junk", "#zz", "  abc  ", "rgb(9, 9, 9, 9)"] {
            let out = normalize(input);
            assert!(out.starts_with('#'), "{input:?} → {out:?}");
            assert_eq!(out.len(), 7, "{input:?} → {out:?}");
            assert!(out[1..].bytes().all(|b| b.is_ascii_hexdigit()));
        }
    }
}
