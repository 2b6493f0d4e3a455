//! Rendering and input collaborators.
//!
//! The line editor never talks to a terminal directly. It draws through a
//! [`Surface`] (a grid of character cells with a cursor) and reads keys from
//! an [`EventSource`]. This module defines both capabilities and ships:
//!
//! - [`MemorySurface`]: a plain cell grid, used by tests and as the shadow
//!   buffer of the terminal backend
//! - [`Region`]: a rectangular window onto another surface
//! - [`ScriptedEvents`]: a replayable event queue
//! - [`TerminalSurface`] / [`TerminalEvents`]: the crossterm backend

mod input;
mod memory;
mod region;
mod terminal;

use std::io;

pub use input::decode_key;
pub use memory::{MemorySurface, ScriptedEvents};
pub use region::Region;
pub use terminal::{RawModeGuard, TerminalEvents, TerminalSurface};

/// Named keys the editor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Backspace,
    Tab,
    /// Scroll modifier + Up
    ScrollUp,
    /// Scroll modifier + Down
    ScrollDown,
    Interrupt,
    EndOfInput,
    /// Any other special key; ignored by the editor.
    Unknown,
}

/// One decoded input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A character, printable or a control code.
    Char(char),
    Key(Key),
    /// The viewport changed size; every geometry value is stale.
    Resize,
}

/// A grid of character cells with a cursor.
///
/// Coordinates are `(row, col)`, zero-based. Writes outside the grid are
/// ignored and reads outside it return a blank.
pub trait Surface {
    /// `(rows, cols)`
    fn size(&self) -> (u16, u16);

    /// `(row, col)` of the cursor.
    fn cursor(&self) -> (u16, u16);

    fn set_cursor(&mut self, row: u16, col: u16);

    fn char_at(&self, row: u16, col: u16) -> char;

    /// Overwrite one cell.
    fn put_char(&mut self, row: u16, col: u16, ch: char);

    /// Insert `ch` at `col`, shifting the rest of the row right. The last
    /// cell of the row falls off.
    fn insert_char(&mut self, row: u16, col: u16, ch: char);

    /// Delete the cell at `col`, shifting the rest of the row left. The last
    /// cell of the row becomes blank.
    fn delete_char(&mut self, row: u16, col: u16);

    /// Scroll rows `top..=bottom` by `lines`: positive moves content up,
    /// negative moves it down. Uncovered rows are blank.
    fn scroll(&mut self, top: u16, bottom: u16, lines: i16);

    /// Push pending changes to the display.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing device cannot be written.
    fn flush(&mut self) -> io::Result<()>;

    /// Write `text` starting at `(row, col)`, clipped to the row.
    fn put_str(&mut self, row: u16, col: u16, text: &str) {
        let (_, cols) = self.size();
        for (i, ch) in text.chars().enumerate() {
            let Ok(offset) = u16::try_from(i) else { break };
            let Some(c) = col.checked_add(offset).filter(|c| *c < cols) else {
                break;
            };
            self.put_char(row, c, ch);
        }
    }

    /// Blank cells `from..to` of `row`.
    fn clear_span(&mut self, row: u16, from: u16, to: u16) {
        for col in from..to {
            self.put_char(row, col, ' ');
        }
    }

    /// Text of cells `from..to` of `row`.
    fn row_text(&self, row: u16, from: u16, to: u16) -> String {
        (from..to).map(|col| self.char_at(row, col)).collect()
    }
}

/// A blocking source of input events.
pub trait EventSource {
    /// Wait for the next event.
    ///
    /// # Errors
    ///
    /// Returns an error if the input device fails.
    fn read_event(&mut self) -> io::Result<Event>;
}

pub const BORDER_HORIZONTAL: char = '─';
pub const BORDER_VERTICAL: char = '│';

/// Draw a single-line box around the edges of `surface`.
pub fn draw_border(surface: &mut dyn Surface) {
    let (rows, cols) = surface.size();
    if rows < 2 || cols < 2 {
        return;
    }
    let (bottom, right) = (rows - 1, cols - 1);
    for col in 1..right {
        surface.put_char(0, col, BORDER_HORIZONTAL);
        surface.put_char(bottom, col, BORDER_HORIZONTAL);
    }
    for row in 1..bottom {
        surface.put_char(row, 0, BORDER_VERTICAL);
        surface.put_char(row, right, BORDER_VERTICAL);
    }
    surface.put_char(0, 0, '┌');
    surface.put_char(0, right, '┐');
    surface.put_char(bottom, 0, '└');
    surface.put_char(bottom, right, '┘');
}
