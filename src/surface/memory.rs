use std::collections::VecDeque;
use std::io;

use super::{Event, EventSource, Key, Surface};

/// An in-memory grid of character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySurface {
    rows: u16,
    cols: u16,
    cells: Vec<char>,
    cursor: (u16, u16),
}

impl MemorySurface {
    /// Create a blank grid with the cursor at the origin.
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            cells: vec![' '; usize::from(rows) * usize::from(cols)],
            cursor: (0, 0),
        }
    }

    /// Change the grid size, keeping the top-left content that still fits.
    pub fn resize(&mut self, rows: u16, cols: u16) {
        let mut resized = Self::new(rows, cols);
        for row in 0..rows.min(self.rows) {
            for col in 0..cols.min(self.cols) {
                resized.put_char(row, col, self.char_at(row, col));
            }
        }
        resized.cursor = (
            self.cursor.0.min(rows.saturating_sub(1)),
            self.cursor.1.min(cols.saturating_sub(1)),
        );
        *self = resized;
    }

    /// Blank every cell and home the cursor.
    pub fn clear(&mut self) {
        self.cells.fill(' ');
        self.cursor = (0, 0);
    }

    /// Full text of `row`.
    pub fn line(&self, row: u16) -> String {
        self.row_text(row, 0, self.cols)
    }

    /// All rows, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        (0..self.rows).map(|row| self.line(row)).collect()
    }

    fn index(&self, row: u16, col: u16) -> Option<usize> {
        (row < self.rows && col < self.cols)
            .then(|| usize::from(row) * usize::from(self.cols) + usize::from(col))
    }

    fn row_range(&self, row: u16) -> Option<std::ops::Range<usize>> {
        let start = self.index(row, 0)?;
        Some(start..start + usize::from(self.cols))
    }
}

impl Surface for MemorySurface {
    fn size(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    fn set_cursor(&mut self, row: u16, col: u16) {
        if row < self.rows && col < self.cols {
            self.cursor = (row, col);
        }
    }

    fn char_at(&self, row: u16, col: u16) -> char {
        self.index(row, col).map_or(' ', |i| self.cells[i])
    }

    fn put_char(&mut self, row: u16, col: u16, ch: char) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = ch;
        }
    }

    fn insert_char(&mut self, row: u16, col: u16, ch: char) {
        let (Some(at), Some(range)) = (self.index(row, col), self.row_range(row)) else {
            return;
        };
        let cells = &mut self.cells[at..range.end];
        cells.rotate_right(1);
        cells[0] = ch;
    }

    fn delete_char(&mut self, row: u16, col: u16) {
        let (Some(at), Some(range)) = (self.index(row, col), self.row_range(row)) else {
            return;
        };
        let cells = &mut self.cells[at..range.end];
        cells.rotate_left(1);
        if let Some(last) = cells.last_mut() {
            *last = ' ';
        }
    }

    fn scroll(&mut self, top: u16, bottom: u16, lines: i16) {
        let bottom = bottom.min(self.rows.saturating_sub(1));
        if top > bottom || lines == 0 {
            return;
        }
        let width = usize::from(self.cols);
        let (Some(start), Some(end)) = (self.row_range(top), self.row_range(bottom)) else {
            return;
        };
        let region = &mut self.cells[start.start..end.end];
        let shift = (usize::from(lines.unsigned_abs()) * width).min(region.len());
        if lines > 0 {
            region.rotate_left(shift);
            let len = region.len();
            region[len - shift..].fill(' ');
        } else {
            region.rotate_right(shift);
            region[..shift].fill(' ');
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Replays a fixed queue of events.
///
/// Once the queue is drained every read reports end-of-input, so an editor
/// driven by a finished script terminates instead of blocking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedEvents {
    queue: VecDeque<Event>,
}

impl ScriptedEvents {
    pub fn new<I: IntoIterator<Item = Event>>(events: I) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    /// One [`Event::Char`] per character of `text`.
    pub fn typed(text: &str) -> Self {
        Self::new(text.chars().map(Event::Char))
    }

    /// Queue another event.
    #[must_use]
    pub fn then(mut self, event: Event) -> Self {
        self.queue.push_back(event);
        self
    }

    /// Queue the characters of `text`.
    #[must_use]
    pub fn then_typed(mut self, text: &str) -> Self {
        self.queue.extend(text.chars().map(Event::Char));
        self
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl EventSource for ScriptedEvents {
    fn read_event(&mut self) -> io::Result<Event> {
        Ok(self
            .queue
            .pop_front()
            .unwrap_or(Event::Key(Key::EndOfInput)))
    }
}
