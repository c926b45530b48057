//! Errors from strict color parsing.

use thiserror::Error;

/// Why a color string was rejected by [`Rgb::from_str`](std::str::FromStr).
///
/// The lenient entry points ([`normalize`](crate::normalize),
/// [`adjust_brightness`](crate::adjust_brightness)) never produce these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Nothing but whitespace.
    #[error("empty color string")]
    Empty,

    /// A `#` form whose digit count is neither 3 nor 6.
    #[error("hex color must have 3 or 6 digits, got {0}")]
    InvalidLength(usize),

    /// A `#` form containing a non-hex character.
    #[error("invalid hex digit in {0:?}")]
    InvalidHex(String),

    /// An `rgb(...)` / `rgba(...)` form that does not hold three integers.
    #[error("malformed rgb() color {0:?}")]
    InvalidFunction(String),

    /// An `rgb(...)` channel above 255.
    #[error("channel value {0} is out of range 0-255")]
    OutOfRange(u32),

    /// Not hex, not functional, not a known color name.
    #[error("unknown color name {0:?}")]
    UnknownName(String),
}

/// Result alias for strict color parsing.
pub type Result<T> = std::result::Result<T, ColorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        assert_eq!(
            ColorError::InvalidHex("#gg0000".into()).to_string(),
            "invalid hex digit in \"#gg0000\""
        );
        assert_eq!(
            ColorError::InvalidLength(4).to_string(),
            "hex color must have 3 or 6 digits, got 4"
        );
        assert_eq!(
            ColorError::UnknownName("chartreuse".into()).to_string(),
            "unknown color name \"chartreuse\""
        );
    }
}
