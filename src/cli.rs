// SPDX-License-Identifier: MIT
//
// Command line: etch [--config PATH] [--size N] [--help] [--version]

use std::path::PathBuf;

use crate::error::{EtchError, Result};

pub const USAGE: &str = "\
usage: etch [options]

options:
  -c, --config PATH   read settings from PATH
                      (default: $XDG_CONFIG_HOME/etch/config.json)
  -s, --size N        start with an N x N grid (1-100)
  -h, --help          show this help
  -V, --version       show the version
";

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub size: Option<u16>,
}

/// Parse arguments, not including the program name.
///
/// # Errors
///
/// [`EtchError::Usage`] for unknown flags, missing values, or a size that
/// is not a number.
pub fn parse<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_owned(), Some(value.to_owned())),
            _ => (arg, None),
        };

        match flag.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-c" | "--config" => {
                let value = value_for(&flag, inline, &mut args)?;
                options.config = Some(PathBuf::from(value));
            }
            "-s" | "--size" => {
                let value = value_for(&flag, inline, &mut args)?;
                let size = value
                    .parse()
                    .map_err(|_| EtchError::Usage(format!("{flag}: not a number: {value:?}")))?;
                options.size = Some(size);
            }
            other => return Err(EtchError::Usage(format!("unknown argument: {other}"))),
        }
    }

    Ok(Command::Run(options))
}

fn value_for(
    flag: &str,
    inline: Option<String>,
    rest: &mut impl Iterator<Item = String>,
) -> Result<String> {
    inline
        .or_else(|| rest.next())
        .ok_or_else(|| EtchError::Usage(format!("{flag} needs a value")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(args: &[&str]) -> Result<Command> {
        parse(args.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn no_args_runs_with_defaults() {
        assert_eq!(run(&[]).unwrap(), Command::Run(Options::default()));
    }

    #[test]
    fn config_and_size() {
        assert_eq!(
            run(&["--config", "/tmp/e.json", "-s", "32"]).unwrap(),
            Command::Run(Options {
                config: Some(PathBuf::from("/tmp/e.json")),
                size: Some(32),
            })
        );
        assert_eq!(
            run(&["--size=8", "-c", "x.json"]).unwrap(),
            Command::Run(Options {
                config: Some(PathBuf::from("x.json")),
                size: Some(8),
            })
        );
    }

    #[test]
    fn help_and_version_win() {
        assert_eq!(run(&["--size", "4", "--help"]).unwrap(), Command::Help);
        assert_eq!(run(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn usage_errors() {
        for args in [
            &["--size"][..],
            &["--size", "huge"],
            &["--size", "-3"],
            &["--config"],
            &["--frobnicate"],
            &["drawing.png"],
        ] {
            assert!(matches!(run(args), Err(EtchError::Usage(_))), "{args:?}");
        }
    }

    #[test]
    fn size_range_is_checked_later() {
        // 500 is a valid u16; the range check happens with the config.
        assert_eq!(
            run(&["-s", "500"]).unwrap(),
            Command::Run(Options {
                config: None,
                size: Some(500),
            })
        );
    }
}
