// SPDX-License-Identifier: MIT
//
// etch: an Etch-a-Sketch for the terminal.
//
// This is the binary that wires the crates together:
//
//   etch-color  → hex / rgb() parsing and percentage brightness steps
//   etch-canvas → modes, the UI state reducer, palette, grid and brush
//   etch-term   → raw mode, mouse input, frame buffer, event loop
//
// `Sketch` implements etch-term's `App`. Each mouse report flows through:
//
//   stdin → parser → on_event → hit test → Msg / stroke → canvas
//   paint → half blocks + side panel → framebuffer → diff renderer
//
// Startup: command line, then logging, then the config file (an explicit
// `--config` must exist; the default location may not), then the UI.

mod cli;
mod config;
mod error;
mod layout;
mod logging;
mod sketch;

use std::env;
use std::io;
use std::process;

use etch_term::event_loop::EventLoop;
use etch_term::terminal;
use tracing::{error, info};

use crate::cli::{Command, Options, USAGE};
use crate::config::Config;
use crate::error::{EtchError, Result};
use crate::sketch::Sketch;

fn run(options: &Options) -> Result<()> {
    let config = match &options.config {
        Some(path) => Config::load(path)?,
        None => match config::default_path() {
            Some(path) => Config::load_or_default(&path)?,
            None => Config::default(),
        },
    };

    let mut settings = config.validate()?;
    if let Some(size) = options.size {
        settings.grid_size = config::check_size(size)?;
    }

    if !terminal::is_tty() {
        return Err(io::Error::other("stdin is not a terminal").into());
    }

    info!(
        grid_size = settings.grid_size,
        palette = settings.palette.len(),
        seed = settings.seed,
        "starting"
    );

    let loop_config = settings.loop_config;
    let mut sketch = Sketch::new(settings);
    let mut event_loop = EventLoop::new(loop_config);
    event_loop.run(&mut sketch)?;

    info!(
        size = sketch.state().size,
        painted = sketch.canvas().grid().painted_count(),
        "bye"
    );
    Ok(())
}

fn main() {
    let options = match cli::parse(env::args().skip(1)) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            print!("{USAGE}");
            return;
        }
        Ok(Command::Version) => {
            println!("etch {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Err(e) => {
            eprintln!("etch: {e}\n\n{USAGE}");
            process::exit(e.exit_code());
        }
    };

    let logging = logging::init();

    let code = match run(&options) {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %e, "exiting");
            eprintln!("etch: {e}");
            if let (EtchError::Io(_), Some(guard)) = (&e, &logging) {
                eprintln!("etch: log in {}", guard.log_dir().display());
            }
            e.exit_code()
        }
    };

    // Flush the log writer; `process::exit` skips destructors.
    drop(logging);
    if code != 0 {
        process::exit(code);
    }
}
