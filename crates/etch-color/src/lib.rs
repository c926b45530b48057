//! # etch-color: the color core of etch
//!
//! Every color the sketch pad touches passes through here. Cells store an
//! [`Rgb`] triple; the UI layer hands us whatever string it has at hand
//! (`#E0F`, `rgb(213, 228, 222)`, `#6e6e6e`) and gets back a canonical
//! `#rrggbb` string or a shifted one.
//!
//! # Pipeline
//!
//! ```text
//! "rgb(213, 228, 222)" / "#E0F" / " d5e4de "
//!     │
//!     ▼
//! normalize.rs:  canonical "#RRGGBB" (never fails, black fallback)
//!     │
//!     ▼
//! rgb.rs:        Rgb { r, g, b } (lossy hex decode, bad channel = 0)
//!     │
//!     ▼
//! brightness.rs: c' = floor(c + c·p/100), clamped to [0, 255]
//!     │
//!     ▼
//! "#rrggbb"
//! ```
//!
//! The strict parser ([`Rgb::from_str`](std::str::FromStr)) is separate: it
//! rejects what [`normalize`] forgives, and also understands the CSS basic
//! color names. Configuration uses it so a typo in a palette entry is
//! reported instead of silently painting black.

pub mod brightness;
pub mod error;
pub mod named;
pub mod normalize;
pub mod rgb;

pub use brightness::{BrightnessDelta, adjust_brightness};
pub use error::ColorError;
pub use normalize::normalize;
pub use rgb::Rgb;
