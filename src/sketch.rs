// SPDX-License-Identifier: MIT
//
// Sketch: the etch-term `App`.
//
// Input flows one way:
//
//   mouse / key → Msg → UiState::update → Effect (rebuild) → Canvas
//                      └──────────── strokes ───────────────→ Canvas
//
// Controls only ever produce messages. Strokes go straight to the canvas
// with the current state, since they depend on `pressed` and the mode but
// never change them.

use etch_canvas::{Canvas, Effect, MAX_SIZE, MIN_SIZE, Mode, Msg, Stroke, UiState};
use etch_term::buffer::FrameBuffer;
use etch_term::cell::{Attr, Cell};
use etch_term::color::CellColor;
use etch_term::event_loop::{Action, App};
use etch_term::input::{Event, KeyCode, KeyEvent, Modifiers, MouseEvent, MouseEventKind};
use etch_term::terminal::Size;
use tracing::debug;

use crate::config::Settings;
use crate::layout::{Layout, Pixel, Rect, Target};

const BUTTON_BG: CellColor = CellColor::Rgb(0x3a, 0x3f, 0x44);
const ACTIVE_BG: CellColor = CellColor::Rgb(0xd5, 0xe4, 0xde);
const CLEAR_BG: CellColor = CellColor::Rgb(0x80, 0x20, 0x20);
const TEXT: CellColor = CellColor::Default;

const HELP: &[&str] = &[
    "drag     paint",
    "g l d    modes  n off",
    "[ ] { }  size",
    "enter    apply size",
    "1-0 tab  colors",
    "c clear  q quit",
];

pub struct Sketch {
    state: UiState,
    canvas: Canvas,
    screen: Size,
    layout: Layout,
    /// Last grid position a drag painted, so each cell is entered once.
    last_pixel: Option<Pixel>,
    /// A press landed on the slider; drags move it, release commits.
    sliding: bool,
}

impl Sketch {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let state = UiState::with_size(settings.grid_size);
        let canvas = Canvas::new(state.size, settings.palette, settings.brush, settings.seed);
        let screen = Size::FALLBACK;
        let layout = Layout::new(screen, state.size, canvas.palette().len());
        Self {
            state,
            canvas,
            screen,
            layout,
            last_pixel: None,
            sliding: false,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &UiState {
        &self.state
    }

    #[must_use]
    pub const fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn relayout(&mut self) {
        self.layout = Layout::new(self.screen, self.state.size, self.canvas.palette().len());
    }

    /// Run one message through the reducer and apply its effect.
    fn send(&mut self, msg: Msg) {
        let (next, effect) = self.state.update(&msg);
        if next != self.state {
            debug!(?msg, mode = %next.mode, size = next.size, pending = next.pending_size, "state");
        }
        self.state = next;

        if let Effect::Rebuild(size) = effect {
            self.canvas.rebuild(size);
            self.last_pixel = None;
            self.relayout();
        }
    }

    fn stroke(&mut self, pixel: Pixel, stroke: Stroke) {
        for row in pixel.rows() {
            self.canvas.stroke(&self.state, row, pixel.col, stroke);
        }
    }

    fn pick_swatch(&mut self, index: usize) {
        if let Some(color) = self.canvas.palette().get(index).map(|s| s.color) {
            self.send(Msg::PickColor(color));
        }
    }

    fn cycle_swatch(&mut self, forward: bool) {
        let palette = self.canvas.palette();
        let len = palette.len();
        let next = match palette.position(self.state.color) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.pick_swatch(next);
    }

    fn nudge_size(&mut self, delta: i32) {
        let size = (i32::from(self.state.pending_size) + delta)
            .clamp(i32::from(MIN_SIZE), i32::from(MAX_SIZE));
        if let Ok(size) = u16::try_from(size) {
            self.send(Msg::SizeInput(size));
        }
    }

    // ── Keys ─────────────────────────────────────────────────────────────

    fn on_key(&mut self, key: &KeyEvent) -> Action {
        if key.is('c', Modifiers::CTRL) {
            return Action::Quit;
        }
        if key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) {
            return Action::Continue;
        }

        match key.code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('g') => self.send(Msg::ToggleMode(Mode::GoCrazy)),
            KeyCode::Char('l') => self.send(Msg::ToggleMode(Mode::Lighten)),
            KeyCode::Char('d') => self.send(Msg::ToggleMode(Mode::Darken)),
            KeyCode::Char('n') => self.send(Msg::ToggleMode(Mode::Normal)),
            KeyCode::Char('c') => self.send(Msg::Clear),
            KeyCode::Char('[' | '-') => self.nudge_size(-1),
            KeyCode::Char(']' | '+' | '=') => self.nudge_size(1),
            KeyCode::Char('{') => self.nudge_size(-10),
            KeyCode::Char('}') => self.nudge_size(10),
            KeyCode::Enter => self.send(Msg::SizeCommit),
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                if let Some(index) = digit_swatch(ch) {
                    self.pick_swatch(index);
                }
            }
            KeyCode::Tab => self.cycle_swatch(true),
            KeyCode::BackTab => self.cycle_swatch(false),
            _ => {}
        }
        Action::Continue
    }

    // ── Mouse ────────────────────────────────────────────────────────────

    fn on_mouse(&mut self, mouse: &MouseEvent) {
        let target = self.layout.hit(mouse.x, mouse.y);

        match mouse.kind {
            MouseEventKind::Press(_) => {
                self.send(Msg::ButtonDown);
                self.last_pixel = None;
                match target {
                    Some(Target::Pixel(pixel)) => {
                        self.stroke(pixel, Stroke::Press);
                        self.last_pixel = Some(pixel);
                    }
                    Some(Target::Swatch(index)) => self.pick_swatch(index),
                    Some(Target::Mode(mode)) => self.send(Msg::ToggleMode(mode)),
                    Some(Target::Clear) => self.send(Msg::Clear),
                    Some(Target::Slider(size)) => {
                        self.sliding = true;
                        self.send(Msg::SizeInput(size));
                    }
                    None => {}
                }
            }
            MouseEventKind::Drag(_) | MouseEventKind::Move => {
                if self.sliding {
                    let size = self.layout.slider_value(mouse.x);
                    self.send(Msg::SizeInput(size));
                } else {
                    self.enter(target);
                }
            }
            MouseEventKind::Release(_) => {
                self.send(Msg::ButtonUp);
                self.last_pixel = None;
                if std::mem::take(&mut self.sliding) {
                    self.send(Msg::SizeCommit);
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if self.layout.over_slider(mouse.x, mouse.y) {
                    let delta = if mouse.kind == MouseEventKind::ScrollUp { 1 } else { -1 };
                    self.nudge_size(delta);
                    self.send(Msg::SizeCommit);
                }
            }
        }
    }

    /// The pointer moved onto `target`. Paints the grid cells under it
    /// that the previous position did not already cover; adjacent terminal
    /// rows can share a grid row.
    fn enter(&mut self, target: Option<Target>) {
        let Some(Target::Pixel(pixel)) = target else {
            self.last_pixel = None;
            return;
        };
        let prev = self.last_pixel.replace(pixel);
        for row in pixel.rows() {
            if !prev.is_some_and(|p| p.covers(row, pixel.col)) {
                self.canvas.stroke(&self.state, row, pixel.col, Stroke::Enter);
            }
        }
    }

    // ── Painting ─────────────────────────────────────────────────────────

    fn paint_grid(&self, frame: &mut FrameBuffer) {
        let layout = &self.layout;
        let grid = self.canvas.grid();
        let blank = self.canvas.brush().blank;

        let color_at = |row: Option<u16>, col: u16| {
            row.and_then(|r| grid.color_or(r, col, blank))
                .map_or(CellColor::Default, CellColor::from)
        };

        for dy in 0..layout.grid.h {
            let top = layout.pixel_row(dy, false);
            let bottom = layout.pixel_row(dy, true);
            for dx in 0..layout.grid.w {
                let Some(col) = layout.pixel_col(dx) else {
                    break;
                };
                let cell = Cell::half_blocks(color_at(top, col), color_at(bottom, col));
                frame.set(layout.grid.x + dx, layout.grid.y + dy, cell);
            }
        }
    }

    fn paint_panel(&self, frame: &mut FrameBuffer) {
        let layout = &self.layout;
        let x = layout.panel.x;
        let state = &self.state;

        frame.paint_text(x, layout.title_y, "etch-a-sketch", TEXT, TEXT, Attr::BOLD);

        let label = frame.paint_text(x, layout.color_y, "color ", TEXT, TEXT, Attr::DIM);
        frame.fill_rect(x + label, layout.color_y, 2, 1, state.color.into());
        frame.paint_text(
            x + label + 3,
            layout.color_y,
            &format!("{} {}", state.color.to_hex(), state.mode),
            TEXT,
            TEXT,
            Attr::empty(),
        );

        let selected = self.canvas.palette().position(state.color);
        for (index, swatch) in self.canvas.palette().iter().enumerate() {
            let rect = layout.swatch_rect(index);
            let bg = CellColor::from(swatch.color);
            let key = digit_for(index).unwrap_or(' ');
            let (text, attrs) = if selected == Some(index) {
                (format!(" [{key}] "), Attr::BOLD)
            } else {
                (format!("  {key}  "), Attr::empty())
            };
            frame.paint_text(rect.x, rect.y, &text, bg.contrast(), bg, attrs);
        }

        for &(mode, rect) in &layout.modes {
            let active = state.mode == mode;
            let bg = if active { ACTIVE_BG } else { BUTTON_BG };
            let attrs = if active { Attr::BOLD } else { Attr::empty() };
            let label = mode.button_label().unwrap_or_default();
            paint_button(frame, rect, label, mode_key(mode), bg, attrs);
        }
        paint_button(frame, layout.clear, "Clear", 'c', CLEAR_BG, Attr::empty());

        let n = state.pending_size;
        let y = layout.size_label_y;
        let w = frame.paint_text(x, y, &format!("{n} x {n}"), TEXT, TEXT, Attr::BOLD);
        if state.size_pending() {
            frame.paint_text(x + w, y, "  enter to apply", TEXT, TEXT, Attr::DIM);
        }

        let slider = layout.slider;
        for dx in 0..slider.w {
            frame.paint_text(slider.x + dx, slider.y, "─", TEXT, TEXT, Attr::DIM);
        }
        frame.paint_text(layout.slider_knob(n), slider.y, "█", TEXT, TEXT, Attr::BOLD);

        for (dy, line) in (0u16..).zip(HELP) {
            frame.paint_text(x, layout.help_y.saturating_add(dy), line, TEXT, TEXT, Attr::DIM);
        }
    }
}

impl App for Sketch {
    fn on_event(&mut self, event: &Event) -> Action {
        match event {
            Event::Key(key) => self.on_key(key),
            Event::Mouse(mouse) => {
                self.on_mouse(mouse);
                Action::Continue
            }
        }
    }

    fn on_resize(&mut self, size: Size) {
        self.screen = size;
        self.relayout();
    }

    fn paint(&mut self, frame: &mut FrameBuffer) {
        self.paint_grid(frame);
        self.paint_panel(frame);
    }
}

/// A one-row button: label on the left, shortcut on the right.
fn paint_button(
    frame: &mut FrameBuffer,
    rect: Rect,
    label: &str,
    key: char,
    bg: CellColor,
    attrs: Attr,
) {
    let fg = bg.contrast();
    frame.fill_rect(rect.x, rect.y, rect.w, rect.h, bg);
    frame.paint_text(rect.x + 1, rect.y, label, fg, bg, attrs);
    let mut buf = [0u8; 4];
    let key = key.encode_utf8(&mut buf);
    frame.paint_text(rect.right().saturating_sub(2), rect.y, key, fg, bg, Attr::DIM);
}

const fn mode_key(mode: Mode) -> char {
    match mode {
        Mode::Normal => 'n',
        Mode::GoCrazy => 'g',
        Mode::Darken => 'd',
        Mode::Lighten => 'l',
    }
}

/// Swatch for a digit key: `1`–`9` are the first nine, `0` the tenth.
fn digit_swatch(ch: char) -> Option<usize> {
    match ch.to_digit(10)? {
        0 => Some(9),
        d => usize::try_from(d - 1).ok(),
    }
}

/// Inverse of [`digit_swatch`], for labels.
fn digit_for(index: usize) -> Option<char> {
    match index {
        0..=8 => char::from_digit(u32::try_from(index + 1).ok()?, 10),
        9 => Some('0'),
        _ => None,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
