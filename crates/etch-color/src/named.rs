//! CSS basic color keywords.
//!
//! Only the names a palette is likely to use. Lookup is ASCII
//! case-insensitive.

use crate::rgb::Rgb;

const NAMES: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0x00, 0x00, 0x00)),
    ("silver", Rgb::new(0xc0, 0xc0, 0xc0)),
    ("gray", Rgb::new(0x80, 0x80, 0x80)),
    ("grey", Rgb::new(0x80, 0x80, 0x80)),
    ("white", Rgb::new(0xff, 0xff, 0xff)),
    ("maroon", Rgb::new(0x80, 0x00, 0x00)),
    ("red", Rgb::new(0xff, 0x00, 0x00)),
    ("purple", Rgb::new(0x80, 0x00, 0x80)),
    ("fuchsia", Rgb::new(0xff, 0x00, 0xff)),
    ("magenta", Rgb::new(0xff, 0x00, 0xff)),
    ("green", Rgb::new(0x00, 0x80, 0x00)),
    ("lime", Rgb::new(0x00, 0xff, 0x00)),
    ("olive", Rgb::new(0x80, 0x80, 0x00)),
    ("yellow", Rgb::new(0xff, 0xff, 0x00)),
    ("navy", Rgb::new(0x00, 0x00, 0x80)),
    ("blue", Rgb::new(0x00, 0x00, 0xff)),
    ("teal", Rgb::new(0x00, 0x80, 0x80)),
    ("aqua", Rgb::new(0x00, 0xff, 0xff)),
    ("cyan", Rgb::new(0x00, 0xff, 0xff)),
    ("orange", Rgb::new(0xff, 0xa5, 0x00)),
    ("pink", Rgb::new(0xff, 0xc0, 0xcb)),
    ("brown", Rgb::new(0xa5, 0x2a, 0x2a)),
    ("saddlebrown", Rgb::new(0x8b, 0x45, 0x13)),
];

/// Look up a color keyword.
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn lookup(name: &str) -> Option<Rgb> {
    NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, rgb)| rgb)
}
