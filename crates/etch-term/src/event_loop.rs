// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop: stdin bytes come in from the reader thread, get parsed into
// events, the app handles them and paints a frame, and the diff renderer
// writes what changed.
//
// The loop blocks on the reader channel with a timeout. Input wakes it
// immediately; with no input it sleeps until the timeout, which is also
// when a pending lone ESC is flushed as an Escape key and when `on_tick`
// runs. A frame is painted only when something marked it dirty.
//
// Resize arrives as SIGWINCH. The handler only sets an atomic flag; the
// loop picks it up on its next iteration.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use tracing::{debug, error, info};

use crate::buffer::FrameBuffer;
use crate::diff::DiffRenderer;
use crate::input::{Event, Parser};
use crate::reader::StdinReader;
use crate::terminal::{Size, Terminal};

// ─── SIGWINCH ────────────────────────────────────────────────────────────────

static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_sigwinch_handler() {}

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// A terminal application driven by [`EventLoop`].
///
/// Per iteration the loop calls [`on_event`](App::on_event) for each
/// parsed event, [`on_resize`](App::on_resize) if the terminal changed
/// size, [`on_tick`](App::on_tick), and [`paint`](App::paint) if anything
/// asked for a redraw. Only `paint` is required.
pub trait App {
    /// Handle one input event. Return [`Action::Quit`] to stop the loop.
    fn on_event(&mut self, _event: &Event) -> Action {
        Action::Continue
    }

    /// The terminal was resized. The frame buffer already has the new size.
    fn on_resize(&mut self, _size: Size) {}

    /// Called every iteration. Return `true` to request a repaint.
    fn on_tick(&mut self) -> bool {
        false
    }

    /// Paint the whole UI. The buffer has been cleared.
    fn paint(&mut self, buf: &mut FrameBuffer);
}

// ─── LoopConfig ──────────────────────────────────────────────────────────────

/// Event loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// `recv_timeout` interval in microseconds: the tick period and the
    /// escape-key timeout.
    pub tick_interval_us: u64,
}

impl LoopConfig {
    /// Timing for `hz` ticks per second. Zero is treated as one.
    #[must_use]
    pub fn from_hz(hz: u32) -> Self {
        Self {
            tick_interval_us: 1_000_000 / u64::from(hz.max(1)),
        }
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self::from_hz(60)
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// Owns the terminal, parser and renderer. [`run`](Self::run) returns when
/// the app quits or stdin closes.
pub struct EventLoop {
    terminal: Terminal,
    parser: Parser,
    renderer: DiffRenderer,
    config: LoopConfig,
}

impl EventLoop {
    #[must_use]
    pub fn new(config: LoopConfig) -> Self {
        Self {
            terminal: Terminal::new(),
            parser: Parser::new(),
            renderer: DiffRenderer::new(),
            config,
        }
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    /// Enter the terminal, run until quit, and restore the terminal even
    /// if the loop fails.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup, rendering, or restore fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        install_sigwinch_handler();

        let result = match StdinReader::spawn() {
            Ok((mut reader, rx)) => {
                info!(tick_us = self.config.tick_interval_us, "event loop started");
                let result = self.run_inner(app, &rx);
                reader.stop();
                result
            }
            Err(e) => Err(e),
        };

        let left = self.terminal.leave();
        info!("event loop stopped");
        first_error(result, left)
    }

    fn run_inner(&mut self, app: &mut impl App, rx: &Receiver<Vec<u8>>) -> io::Result<()> {
        let size = self.terminal.size();
        let mut frame = FrameBuffer::new(size.cols, size.rows);
        app.on_resize(size);
        let mut dirty = true;
        let timeout = Duration::from_micros(self.config.tick_interval_us);

        loop {
            let events = match rx.recv_timeout(timeout) {
                Ok(bytes) => self.parser.advance(&bytes),
                Err(RecvTimeoutError::Timeout) if self.parser.has_pending() => self.parser.flush(),
                Err(RecvTimeoutError::Timeout) => Vec::new(),
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("input channel closed");
                    return Ok(());
                }
            };

            if dispatch(app, &events) == Action::Quit {
                return Ok(());
            }
            dirty |= !events.is_empty();

            if SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed) {
                let new_size = self.terminal.refresh_size();
                debug!(cols = new_size.cols, rows = new_size.rows, "resize");
                frame.resize(new_size.cols, new_size.rows);
                self.renderer.force_redraw();
                app.on_resize(new_size);
                dirty = true;
            }

            dirty |= app.on_tick();

            if dirty {
                frame.clear();
                app.paint(&mut frame);
                self.renderer.render(&frame);
                self.renderer.flush()?;
                dirty = false;
            }
        }
    }
}

/// The loop's own error wins; a failed restore after it is only logged.
fn first_error(run: io::Result<()>, leave: io::Result<()>) -> io::Result<()> {
    match (run, leave) {
        (Err(e), Err(restore)) => {
            error!(error = %restore, "terminal restore failed");
            Err(e)
        }
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Ok(()), Ok(())) => Ok(()),
    }
}

/// Feed events to the app, stopping at the first quit.
fn dispatch(app: &mut impl App, events: &[Event]) -> Action {
    for event in events {
        if app.on_event(event) == Action::Quit {
            return Action::Quit;
        }
    }
    Action::Continue
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyCode, KeyEvent, Modifiers};

    struct Recorder {
        seen: Vec<Event>,
    }

    impl App for Recorder {
        fn on_event(&mut self, event: &Event) -> Action {
            self.seen.push(*event);
            match event {
                Event::Key(KeyEvent {
                    code: KeyCode::Char('q'),
                    ..
                }) => Action::Quit,
                _ => Action::Continue,
            }
        }

        fn paint(&mut self, _buf: &mut FrameBuffer) {}
    }

    struct MinimalApp;
    impl App for MinimalApp {
        fn paint(&mut self, _buf: &mut FrameBuffer) {}
    }

    #[test]
    fn config_from_hz() {
        assert_eq!(LoopConfig::from_hz(60).tick_interval_us, 16_666);
        assert_eq!(LoopConfig::from_hz(120).tick_interval_us, 8_333);
        assert_eq!(LoopConfig::from_hz(0).tick_interval_us, 1_000_000);
        assert_eq!(LoopConfig::default(), LoopConfig::from_hz(60));
    }

    #[test]
    fn dispatch_stops_at_quit() {
        let mut app = Recorder { seen: Vec::new() };
        let events = Parser::new().advance(b"aqb");
        assert_eq!(dispatch(&mut app, &events), Action::Quit);
        assert_eq!(app.seen.len(), 2);
    }

    #[test]
    fn loop_error_outranks_restore_error() {
        let run = || Err(io::Error::other("read"));
        let leave = || Err(io::Error::other("restore"));

        let err = first_error(run(), leave()).unwrap_err();
        assert_eq!(err.to_string(), "read");
        let err = first_error(Ok(()), leave()).unwrap_err();
        assert_eq!(err.to_string(), "restore");
        let err = first_error(run(), Ok(())).unwrap_err();
        assert_eq!(err.to_string(), "read");
        assert!(first_error(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn dispatch_continues_without_quit() {
        let mut app = Recorder { seen: Vec::new() };
        let events = Parser::new().advance(b"ab");
        assert_eq!(dispatch(&mut app, &events), Action::Continue);
        assert_eq!(app.seen.len(), 2);
    }

    #[test]
    fn app_defaults() {
        let mut app = MinimalApp;
        let event = Event::Key(KeyEvent {
            code: KeyCode::Enter,
            modifiers: Modifiers::empty(),
        });
        assert_eq!(app.on_event(&event), Action::Continue);
        assert!(!app.on_tick());
        app.on_resize(Size { cols: 100, rows: 50 });
    }

    #[test]
    fn sigwinch_flag_swap() {
        SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
        assert!(SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed));
        assert!(!SIGWINCH_RECEIVED.load(Ordering::Relaxed));
    }

    #[test]
    fn new_has_size() {
        let event_loop = EventLoop::new(LoopConfig::default());
        assert!(event_loop.size().cols > 0);
    }
}
