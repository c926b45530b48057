//! The color palette and the random picks behind "Go Crazy".
//!
//! A [`Palette`] is a fixed, ordered, non-empty list of [`Swatch`]es built
//! once at startup, either the sixteen defaults or entries from the config
//! file. Order matters: it is the order of the buttons in the side panel and
//! of the `1`–`0` shortcuts.

use etch_color::{ColorError, Rgb};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Xorshift32: a minimal deterministic PRNG
// ---------------------------------------------------------------------------

/// Minimal deterministic PRNG. Plenty for picking crayons.
#[derive(Debug, Clone)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Seed the generator. A zero seed would stick at zero, so it is bumped
    /// to one.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub const fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Uniform-ish index in `0..len`. `len` must be non-zero.
    pub fn below(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        usize::try_from(self.next_u32()).unwrap_or_default() % len
    }
}

// ---------------------------------------------------------------------------
// Swatch / Palette
// ---------------------------------------------------------------------------

/// One palette entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch {
    /// Label shown in the panel and the log.
    pub name: String,
    pub color: Rgb,
}

impl Swatch {
    #[must_use]
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Why a list of palette entries was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette must contain at least one color")]
    Empty,

    #[error("palette entry {index} ({entry:?}): {source}")]
    Color {
        index: usize,
        entry: String,
        #[source]
        source: ColorError,
    },
}

/// Default palette: name and hex, in button order.
const DEFAULT: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0x00, 0x00, 0x00)),
    ("white", Rgb::new(0xff, 0xff, 0xff)),
    ("pale gray", Rgb::new(0xd5, 0xe4, 0xde)),
    ("brown", Rgb::new(0x8b, 0x45, 0x13)),
    ("maroon", Rgb::new(0x80, 0x00, 0x00)),
    ("red", Rgb::new(0xff, 0x00, 0x00)),
    ("orange", Rgb::new(0xff, 0xa5, 0x00)),
    ("yellow", Rgb::new(0xff, 0xff, 0x00)),
    ("lime", Rgb::new(0x00, 0xff, 0x00)),
    ("green", Rgb::new(0x00, 0x80, 0x00)),
    ("cyan", Rgb::new(0x00, 0xff, 0xff)),
    ("blue", Rgb::new(0x00, 0x00, 0xff)),
    ("navy", Rgb::new(0x00, 0x00, 0x80)),
    ("purple", Rgb::new(0x80, 0x00, 0x80)),
    ("magenta", Rgb::new(0xff, 0x00, 0xff)),
    ("pink", Rgb::new(0xff, 0xc0, 0xcb)),
];

/// An ordered, non-empty list of swatches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    swatches: Vec<Swatch>,
}

impl Palette {
    /// Build a palette from color strings (hex, `rgb()`, or CSS names).
    ///
    /// Each swatch is labelled with its entry text, trimmed.
    ///
    /// # Errors
    ///
    /// [`PaletteError::Empty`] for an empty list, [`PaletteError::Color`]
    /// naming the first entry that does not parse.
    pub fn parse<I, S>(entries: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let swatches = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let entry = entry.as_ref().trim();
                entry
                    .parse::<Rgb>()
                    .map(|color| Swatch::new(entry, color))
                    .map_err(|source| PaletteError::Color {
                        index,
                        entry: entry.to_owned(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if swatches.is_empty() {
            return Err(PaletteError::Empty);
        }

        Ok(Self { swatches })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Swatch> {
        self.swatches.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Swatch> {
        self.swatches.iter()
    }

    /// Index of the first swatch with exactly this color.
    #[must_use]
    pub fn position(&self, color: Rgb) -> Option<usize> {
        self.swatches.iter().position(|s| s.color == color)
    }

    /// A uniformly random swatch color.
    pub fn random(&self, rng: &mut Xorshift32) -> Rgb {
        self.swatches[rng.below(self.swatches.len())].color
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            swatches: DEFAULT
                .iter()
                .map(|&(name, color)| Swatch::new(name, color))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
