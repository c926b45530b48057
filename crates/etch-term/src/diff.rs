// SPDX-License-Identifier: MIT
//
// Differential renderer.
//
// Each frame is compared against the previous one and only changed cells
// are written. A drag stroke touches a handful of half-block cells, so a
// typical frame is a few dozen bytes instead of a full repaint.
//
//   1. The app paints a FrameBuffer.
//   2. render() compares it with the stored previous frame, row by row.
//   3. Changed cells go through CellWriter into the OutputBuffer.
//   4. flush() writes the frame in one syscall.
//
// Unchanged rows are skipped with a single slice comparison. The frame is
// wrapped in synchronized output so it never shows half drawn.

use std::io::{self, Write};

use crate::ansi;
use crate::buffer::FrameBuffer;
use crate::output::{CellWriter, OutputBuffer};

// ─── RenderStats ─────────────────────────────────────────────────────────────

/// What a render pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub cells_rendered: usize,
    pub cells_skipped: usize,
    pub bytes_written: usize,
}

// ─── DiffRenderer ────────────────────────────────────────────────────────────

/// Emits escape sequences only for cells that changed since the last frame.
///
/// ```
/// use etch_term::buffer::FrameBuffer;
/// use etch_term::diff::DiffRenderer;
///
/// let mut renderer = DiffRenderer::new();
/// let frame = FrameBuffer::new(10, 4);
/// let first = renderer.render(&frame);
/// assert_eq!(first.cells_rendered, 40);
/// let second = renderer.render(&frame);
/// assert_eq!(second.cells_rendered, 0);
/// ```
pub struct DiffRenderer {
    output: OutputBuffer,
    writer: CellWriter,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    /// No previous frame: the first render draws everything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
            writer: CellWriter::new(),
            previous: None,
        }
    }

    /// Diff `current` against the previous frame into the output buffer.
    pub fn render(&mut self, current: &FrameBuffer) -> RenderStats {
        self.output.clear();
        self.writer.reset_state();

        let width = current.width();
        let height = current.height();
        let mut stats = RenderStats::default();

        if width == 0 || height == 0 {
            self.store_frame(current);
            return stats;
        }

        ansi::begin_sync(&mut self.output).ok();

        let previous = self
            .previous
            .take()
            .filter(|prev| prev.width() == width && prev.height() == height);

        if previous.is_none() {
            ansi::clear_screen(&mut self.output).ok();
        }

        for y in 0..height {
            let (Some(row), prev_row) = (
                current.row(y),
                previous.as_ref().and_then(|p| p.row(y)),
            ) else {
                continue;
            };

            if prev_row == Some(row) {
                stats.cells_skipped += usize::from(width);
                continue;
            }

            for (x, cell) in (0..width).zip(row) {
                let unchanged = prev_row.is_some_and(|prev| prev[usize::from(x)] == *cell);
                if unchanged {
                    stats.cells_skipped += 1;
                } else {
                    self.writer.render_cell(&mut self.output, x, y, cell);
                    stats.cells_rendered += 1;
                }
            }
        }

        ansi::reset(&mut self.output).ok();
        ansi::end_sync(&mut self.output).ok();
        stats.bytes_written = self.output.len();

        self.previous = previous;
        self.store_frame(current);

        stats
    }

    /// The bytes produced by the last render.
    #[must_use]
    pub fn output_bytes(&self) -> &[u8] {
        self.output.as_bytes()
    }

    /// Write the last render to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush_stdout()
    }

    /// Write the last render to `w`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        self.output.flush_to(w)
    }

    /// Forget the previous frame so the next render repaints everything.
    pub fn force_redraw(&mut self) {
        self.previous = None;
    }

    fn store_frame(&mut self, current: &FrameBuffer) {
        match &mut self.previous {
            Some(prev)
                if prev.width() == current.width() && prev.height() == current.height() =>
            {
                prev.copy_from(current);
            }
            _ => self.previous = Some(current.clone()),
        }
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::color::CellColor;
    use pretty_assertions::assert_eq;

    fn output(r: &DiffRenderer) -> String {
        String::from_utf8(r.output_bytes().to_vec()).unwrap()
    }

    #[test]
    fn first_render_is_full_and_clears() {
        let mut r = DiffRenderer::new();
        let stats = r.render(&FrameBuffer::new(8, 3));
        assert_eq!(stats.cells_rendered, 24);
        assert_eq!(stats.cells_skipped, 0);
        let s = output(&r);
        assert!(s.starts_with("\x1b[?2026h\x1b[2J"));
        assert!(s.ends_with("\x1b[0m\x1b[?2026l"));
    }

    #[test]
    fn unchanged_rows_are_skipped() {
        let mut r = DiffRenderer::new();
        let mut frame = FrameBuffer::new(8, 3);
        r.render(&frame);

        frame.set(4, 1, Cell::half_blocks(CellColor::Rgb(0, 0, 0), CellColor::Rgb(9, 9, 9)));
        let stats = r.render(&frame);
        assert_eq!(stats.cells_rendered, 1);
        assert_eq!(stats.cells_skipped, 23);

        let s = output(&r);
        assert!(!s.contains("\x1b[2J"));
        assert!(s.contains("\x1b[2;5H"));
    }

    #[test]
    fn identical_frame_renders_nothing() {
        let mut r = DiffRenderer::new();
        let frame = FrameBuffer::new(5, 5);
        r.render(&frame);
        let stats = r.render(&frame);
        assert_eq!(stats.cells_rendered, 0);
        assert_eq!(output(&r), "\x1b[?2026h\x1b[0m\x1b[?2026l");
    }

    #[test]
    fn size_change_forces_full_redraw() {
        let mut r = DiffRenderer::new();
        r.render(&FrameBuffer::new(4, 4));
        let stats = r.render(&FrameBuffer::new(5, 4));
        assert_eq!(stats.cells_rendered, 20);
        assert!(output(&r).contains("\x1b[2J"));
    }

    #[test]
    fn force_redraw_repaints() {
        let mut r = DiffRenderer::new();
        let frame = FrameBuffer::new(3, 3);
        r.render(&frame);
        r.force_redraw();
        assert_eq!(r.render(&frame).cells_rendered, 9);
    }

    #[test]
    fn zero_size_renders_nothing() {
        let mut r = DiffRenderer::new();
        let stats = r.render(&FrameBuffer::new(0, 10));
        assert_eq!(stats, RenderStats::default());
        assert!(r.output_bytes().is_empty());
    }

    #[test]
    fn flush_to_drains() {
        let mut r = DiffRenderer::new();
        r.render(&FrameBuffer::new(2, 1));
        let mut sink = Vec::new();
        r.flush_to(&mut sink).unwrap();
        assert!(!sink.is_empty());
        assert!(r.output_bytes().is_empty());
    }
}
