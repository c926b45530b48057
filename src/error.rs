// SPDX-License-Identifier: MIT
//
// Errors that stop etch before or after the UI runs. Everything inside the
// event loop is an `io::Result` from etch-term and arrives here as `Io`.

use std::io;

use etch_canvas::PaletteError;
use etch_color::ColorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtchError {
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The config file parsed as JSON but a field has the wrong type.
    #[error("config: {0}")]
    Json(#[from] serde_json::Error),

    /// A config value is out of range.
    #[error("config: {0}")]
    Config(String),

    #[error("config: {entry:?}: {source}")]
    Color {
        entry: String,
        #[source]
        source: ColorError,
    },

    #[error("config: {0}")]
    Palette(#[from] PaletteError),

    /// Bad command line. The message is shown above the usage text.
    #[error("{0}")]
    Usage(String),
}

impl EtchError {
    /// Exit status for `main`: 2 for usage errors, 1 for everything else.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtchError>;
