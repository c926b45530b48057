// SPDX-License-Identifier: MIT
//
// Startup configuration.
//
// The file is JSON and every field is optional:
//
//   {
//     "grid_size": 32,
//     "palette": ["black", "#ff0000", "rgb(0, 128, 255)"],
//     "blank_color": "#d5e4de",
//     "brightness_step": 10,
//     "tick_hz": 60,
//     "seed": 42
//   }
//
// A missing file means defaults. A file that is not JSON at all is logged
// and ignored. A file that is JSON but says something impossible (a size of
// 0, a color that does not parse) is an error: silently drawing with the
// wrong palette is worse than refusing to start.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use etch_canvas::{Brush, MAX_SIZE, MIN_SIZE, Palette};
use etch_color::{BrightnessDelta, Rgb};
use etch_term::event_loop::LoopConfig;
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use tracing::{info, warn};

use crate::error::{EtchError, Result};

const FILE_NAME: &str = "config.json";

/// The config file as written by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub grid_size: u16,
    /// Color strings; `None` keeps the built-in sixteen.
    pub palette: Option<Vec<String>>,
    pub blank_color: String,
    /// Lighten/darken step in percent.
    pub brightness_step: i32,
    pub tick_hz: u32,
    /// Seed for "Go Crazy". `None` seeds from the clock.
    pub seed: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: etch_canvas::DEFAULT_SIZE,
            palette: None,
            blank_color: etch_canvas::BLANK.to_hex(),
            brightness_step: BrightnessDelta::LIGHTEN.percent(),
            tick_hz: 60,
            seed: None,
        }
    }
}

/// A validated [`Config`], in the types the rest of etch uses.
#[derive(Debug, Clone)]
pub struct Settings {
    pub grid_size: u16,
    pub palette: Palette,
    pub brush: Brush,
    pub loop_config: LoopConfig,
    pub seed: u32,
}

impl Config {
    /// Read and parse `path`.
    ///
    /// # Errors
    ///
    /// I/O errors (including a missing file), and JSON that parses but does
    /// not fit the schema. Malformed JSON is logged and yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;

        match serde_json::from_str(&text) {
            Ok(config) => {
                info!(path = %path.display(), "config loaded");
                Ok(config)
            }
            Err(e) if matches!(e.classify(), Category::Syntax | Category::Eof) => {
                warn!(path = %path.display(), error = %e, "malformed config, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Check every field and convert to [`Settings`].
    ///
    /// # Errors
    ///
    /// The first field that is out of range or does not parse.
    pub fn validate(&self) -> Result<Settings> {
        let grid_size = check_size(self.grid_size)?;

        let palette = match &self.palette {
            Some(entries) => Palette::parse(entries)?,
            None => Palette::default(),
        };

        let blank = self
            .blank_color
            .parse::<Rgb>()
            .map_err(|source| EtchError::Color {
                entry: self.blank_color.clone(),
                source,
            })?;

        if !(1..=100).contains(&self.brightness_step) {
            return Err(EtchError::Config(format!(
                "brightness_step {} is out of range 1-100",
                self.brightness_step
            )));
        }

        if !(1..=1000).contains(&self.tick_hz) {
            return Err(EtchError::Config(format!(
                "tick_hz {} is out of range 1-1000",
                self.tick_hz
            )));
        }

        Ok(Settings {
            grid_size,
            palette,
            brush: Brush {
                blank,
                step: BrightnessDelta::new(self.brightness_step),
            },
            loop_config: LoopConfig::from_hz(self.tick_hz),
            seed: self.seed.unwrap_or_else(clock_seed),
        })
    }
}

/// Accept a grid edge in `MIN_SIZE..=MAX_SIZE`.
///
/// # Errors
///
/// [`EtchError::Config`] naming the value.
pub fn check_size(size: u16) -> Result<u16> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(EtchError::Config(format!(
            "grid_size {size} is out of range {MIN_SIZE}-{MAX_SIZE}"
        )))
    }
}

/// `$XDG_CONFIG_HOME/etch/config.json`, else `~/.config/etch/config.json`.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    config_path_from(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn config_path_from(xdg: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let base = match xdg.filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(home.filter(|v| !v.is_empty())?).join(".config"),
    };
    Some(base.join("etch").join(FILE_NAME))
}

#[allow(clippy::cast_possible_truncation)]
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(1, |d| d.subsec_nanos() ^ (d.as_secs() as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(text: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(text.as_bytes()).unwrap();
        f
    }

    #[test]
    fn defaults_validate() {
        let s = Config::default().validate().unwrap();
        assert_eq!(s.grid_size, 16);
        assert_eq!(s.palette, Palette::default());
        assert_eq!(s.brush, Brush::default());
        assert_eq!(s.loop_config, LoopConfig::from_hz(60));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let f = file_with(r#"{ "grid_size": 32, "seed": 7 }"#);
        let c = Config::load(f.path()).unwrap();
        assert_eq!(
            c,
            Config {
                grid_size: 32,
                seed: Some(7),
                ..Config::default()
            }
        );
        assert_eq!(c.validate().unwrap().seed, 7);
    }

    #[test]
    fn palette_and_blank_from_file() {
        let f = file_with(
            r##"{ "palette": ["navy", "#f00", "rgb(0, 128, 255)"], "blank_color": "white" }"##,
        );
        let s = Config::load(f.path()).unwrap().validate().unwrap();
        let colors: Vec<Rgb> = s.palette.iter().map(|sw| sw.color).collect();
        assert_eq!(
            colors,
            vec![
                Rgb::new(0, 0, 0x80),
                Rgb::new(0xff, 0, 0),
                Rgb::new(0, 128, 255)
            ]
        );
        assert_eq!(s.brush.blank, Rgb::WHITE);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(Config::load(&path), Err(EtchError::Io(_))));
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
    }

    #[test]
    fn malformed_json_falls_back() {
        for text in ["{ grid_size: 3", "", "not json"] {
            let f = file_with(text);
            assert_eq!(Config::load(f.path()).unwrap(), Config::default(), "{text:?}");
        }
    }

    #[test]
    fn wrong_types_are_errors() {
        let f = file_with(r#"{ "grid_size": "big" }"#);
        assert!(matches!(Config::load(f.path()), Err(EtchError::Json(_))));

        let f = file_with(r#"{ "colour": "red" }"#);
        assert!(matches!(Config::load(f.path()), Err(EtchError::Json(_))));
    }

    #[test]
    fn out_of_range_values() {
        for config in [
            Config { grid_size: 0, ..Config::default() },
            Config { grid_size: 101, ..Config::default() },
            Config { brightness_step: 0, ..Config::default() },
            Config { brightness_step: 150, ..Config::default() },
            Config { tick_hz: 0, ..Config::default() },
        ] {
            assert!(
                matches!(config.validate(), Err(EtchError::Config(_))),
                "{config:?}"
            );
        }
    }

    #[test]
    fn bad_colors() {
        let c = Config {
            blank_color: "#12".into(),
            ..Config::default()
        };
        assert!(matches!(c.validate(), Err(EtchError::Color { .. })));

        let c = Config {
            palette: Some(vec!["red".into(), "blurple".into()]),
            ..Config::default()
        };
        assert!(matches!(c.validate(), Err(EtchError::Palette(_))));

        let c = Config {
            palette: Some(Vec::new()),
            ..Config::default()
        };
        assert!(matches!(c.validate(), Err(EtchError::Palette(_))));
    }

    #[test]
    fn check_size_bounds() {
        assert_eq!(check_size(1).unwrap(), 1);
        assert_eq!(check_size(100).unwrap(), 100);
        assert!(check_size(0).is_err());
        assert!(check_size(101).is_err());
    }

    #[test]
    fn path_resolution() {
        assert_eq!(
            config_path_from(Some("/xdg".into()), Some("/home/u".into())),
            Some(PathBuf::from("/xdg/etch/config.json"))
        );
        assert_eq!(
            config_path_from(Some("".into()), Some("/home/u".into())),
            Some(PathBuf::from("/home/u/.config/etch/config.json"))
        );
        assert_eq!(config_path_from(None, None), None);
    }

    #[test]
    fn round_trips_through_serde() {
        let c = Config {
            grid_size: 40,
            palette: Some(vec!["black".into(), "#ffffff".into()]),
            seed: Some(3),
            ..Config::default()
        };
        let text = serde_json::to_string_pretty(&c).unwrap();
        assert_eq!(serde_json::from_str::<Config>(&text).unwrap(), c);
    }
}
