// SPDX-License-Identifier: MIT
//
// etch-term: terminal engine for etch.
//
// Raw mode and the alternate screen, SGR mouse input, a frame buffer of
// truecolor cells, and a differential renderer that only rewrites the
// cells a stroke touched. The sketch pad plugs in through the `App` trait
// and `EventLoop` drives it.
//
// Direct termios and ANSI, no TUI framework in between.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod diff;
pub mod event_loop;
pub mod input;
pub mod output;
pub mod reader;
pub mod terminal;
