//! The interactive line editor.
//!
//! A [`LineEditor`] reads one line at a time on a [`Surface`], keeping the
//! cells on screen in step with its [`CursorBuffer`]:
//! - [`LineEditor::begin`]: draw the border and banner, reset scrollback
//! - [`LineEditor::read_line`]: run one editing session until commit or abort
//! - [`LineEditor::write_line`] / [`LineEditor::newline`]: output between
//!   sessions
//!
//! Lines longer than the visible window scroll horizontally; with scrolling
//! enabled, rows that leave the top of the region can be brought back with
//! the scroll keys.

mod event_loop;
mod input;
mod model;
mod update;


use std::fmt;

use crate::editor::{Completer, CursorBuffer, HistoryBrowser};
use crate::error::Result;
use crate::surface::{BORDER_VERTICAL, Surface, draw_border};
use crate::ui::{Menu, NumberedMenu};

pub use model::{Geometry, Scrollback};

/// Why a session ended without a committed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The viewport changed size. Call [`LineEditor::begin`] again before
    /// the next session.
    Resize,
    /// Ctrl-C.
    Interrupt,
    /// Ctrl-D or a closed input stream.
    EndOfInput,
}

/// How an editing session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Committed(String),
    Aborted(AbortReason),
}

/// Per-session switches for [`LineEditor::read_line`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Honour the scroll keys.
    pub scroll: bool,
    /// Blank the editing row after a commit and return the cursor to its
    /// start.
    pub clear: bool,
}

pub const DEFAULT_PROMPT: &str = "$ ";
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

/// Cursor-aware single-row line editor.
pub struct LineEditor {
    border: bool,
    banner: String,
    prompt: String,
    completer: Completer,
    menu: Box<dyn Menu>,
    history: Vec<String>,
    history_limit: usize,
    buffer: CursorBuffer,
    /// Characters hidden left of the visible window.
    offset: usize,
    browser: HistoryBrowser,
    scrollback: Scrollback,
    /// Screen row of the line being edited, in the unscrolled view.
    row: u16,
}

impl LineEditor {
    pub fn new() -> Self {
        Self {
            border: false,
            banner: String::new(),
            prompt: DEFAULT_PROMPT.to_string(),
            completer: Completer::default(),
            menu: Box::new(NumberedMenu::default()),
            history: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            buffer: CursorBuffer::new(),
            offset: 0,
            browser: HistoryBrowser::default(),
            scrollback: Scrollback::default(),
            row: 0,
        }
    }

    /// Draw a box around the whole surface and keep the line inside it.
    pub fn with_border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    /// Text drawn on the first row by [`begin`](Self::begin).
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Candidate words for Tab completion. An empty pool disables
    /// completion.
    pub fn with_completions<I, S>(mut self, pool: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.completer = Completer::new(pool);
        self
    }

    /// Maximum number of remembered lines. Zero disables history.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.trim_history();
        self
    }

    /// Seed the history, oldest line first.
    pub fn with_history<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.history = Vec::new();
        for line in lines {
            self.record(line.into());
        }
        self
    }

    /// Replace the picker shown for ambiguous completions.
    pub fn with_menu(mut self, menu: Box<dyn Menu>) -> Self {
        self.menu = menu;
        self
    }

    /// Committed lines, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// The line being edited, or the last one read.
    pub const fn buffer(&self) -> &CursorBuffer {
        &self.buffer
    }

    /// Characters scrolled off the left edge of the visible window.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn completer(&self) -> &Completer {
        &self.completer
    }

    /// Line bounds on `surface` for the current border and prompt.
    pub fn geometry(&self, surface: &dyn Surface) -> Geometry {
        let prompt_width = u16::try_from(self.prompt.chars().count()).unwrap_or(u16::MAX);
        Geometry::of(surface, self.border, prompt_width)
    }

    /// Prepare `surface` for a run of sessions: draw the border and banner,
    /// forget scrollback and place the cursor on the first editing row.
    ///
    /// Call again after a [`AbortReason::Resize`].
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be flushed.
    pub fn begin(&mut self, surface: &mut dyn Surface) -> Result<()> {
        let geo = self.geometry(surface);
        self.scrollback.clear();
        self.buffer = CursorBuffer::new();
        self.offset = 0;
        if self.border {
            draw_border(surface);
        }
        let top = geo.min_y();
        let mut row = top;
        if !self.banner.is_empty() {
            paint_row(surface, &geo, top, &self.banner);
            row = top.saturating_add(2).min(geo.max_y());
        }
        self.row = row;
        surface.set_cursor(row, geo.left());
        surface.flush()?;
        tracing::debug!(rows = geo.max_y(), cols = geo.cols(), "editor surface ready");
        Ok(())
    }

    /// Write `text` on the cursor row and move to the start of the next
    /// row, scrolling the region when already on the last one.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be flushed.
    pub fn write_line(&mut self, surface: &mut dyn Surface, text: &str) -> Result<()> {
        let geo = self.geometry(surface);
        let (row, _) = surface.cursor();
        let row = row.clamp(geo.min_y(), geo.max_y());
        paint_row(surface, &geo, row, text);
        self.advance(surface, &geo, row);
        surface.flush()?;
        Ok(())
    }

    /// Move to the start of the next row, scrolling if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be flushed.
    pub fn newline(&mut self, surface: &mut dyn Surface) -> Result<()> {
        let geo = self.geometry(surface);
        let (row, _) = surface.cursor();
        self.advance(surface, &geo, row.clamp(geo.min_y(), geo.max_y()));
        surface.flush()?;
        Ok(())
    }

    fn advance(&mut self, surface: &mut dyn Surface, geo: &Geometry, row: u16) {
        if row < geo.max_y() {
            self.row = row + 1;
        } else {
            let top = surface.row_text(geo.min_y(), geo.left(), geo.right());
            self.scrollback.upper.push(top);
            surface.scroll(geo.min_y(), geo.max_y(), 1);
            paint_row(surface, geo, geo.max_y(), "");
            self.row = geo.max_y();
        }
        surface.set_cursor(self.row, geo.left());
    }

    /// Append a committed line to the history.
    ///
    /// Empty lines and repeats of the most recent entry are skipped.
    fn record(&mut self, line: String) {
        if line.is_empty() || self.history.last() == Some(&line) {
            return;
        }
        self.history.push(line);
        self.trim_history();
    }

    fn trim_history(&mut self) {
        let excess = self.history.len().saturating_sub(self.history_limit);
        self.history.drain(..excess);
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LineEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineEditor")
            .field("border", &self.border)
            .field("prompt", &self.prompt)
            .field("buffer", &self.buffer)
            .field("offset", &self.offset)
            .field("history", &self.history.len())
            .field("row", &self.row)
            .finish_non_exhaustive()
    }
}

/// Replace the inside of `row` with `text`, clipped to the border.
fn paint_row(surface: &mut dyn Surface, geo: &Geometry, row: u16, text: &str) {
    surface.clear_span(row, geo.left(), geo.right());
    for (col, ch) in (geo.left()..geo.right()).zip(text.chars()) {
        let ch = if input::is_printable(ch) { ch } else { ' ' };
        surface.put_char(row, col, ch);
    }
    if geo.has_border() {
        surface.put_char(row, 0, BORDER_VERTICAL);
        surface.put_char(row, geo.cols().saturating_sub(1), BORDER_VERTICAL);
    }
}
