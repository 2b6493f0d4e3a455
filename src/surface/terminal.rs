use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event as TermEvent};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};

use super::{Event, EventSource, MemorySurface, Surface, decode_key};

/// A [`Surface`] backed by a real terminal.
///
/// Edits land in a shadow grid; [`Surface::flush`] writes the rows that
/// changed since the last flush and places the terminal cursor.
pub struct TerminalSurface<W: Write> {
    out: W,
    grid: MemorySurface,
    dirty: Vec<bool>,
    full_redraw: bool,
}

impl TerminalSurface<io::Stdout> {
    /// Surface over stdout, sized to the current terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size cannot be queried.
    pub fn stdout() -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::with_size(io::stdout(), rows, cols))
    }

    /// Re-query the terminal size after a resize. The whole grid is
    /// cleared and repainted on the next flush.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size cannot be queried.
    pub fn refresh_size(&mut self) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        self.reset(rows, cols);
        Ok(())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn with_size(out: W, rows: u16, cols: u16) -> Self {
        Self {
            out,
            grid: MemorySurface::new(rows, cols),
            dirty: vec![false; usize::from(rows)],
            full_redraw: true,
        }
    }

    /// Blank the grid at a new size and schedule a full repaint.
    pub fn reset(&mut self, rows: u16, cols: u16) {
        self.grid = MemorySurface::new(rows, cols);
        self.dirty = vec![false; usize::from(rows)];
        self.full_redraw = true;
    }

    pub const fn grid(&self) -> &MemorySurface {
        &self.grid
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn mark(&mut self, row: u16) {
        if let Some(flag) = self.dirty.get_mut(usize::from(row)) {
            *flag = true;
        }
    }

    fn mark_span(&mut self, top: u16, bottom: u16) {
        for row in top..=bottom {
            self.mark(row);
        }
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn size(&self) -> (u16, u16) {
        self.grid.size()
    }

    fn cursor(&self) -> (u16, u16) {
        self.grid.cursor()
    }

    fn set_cursor(&mut self, row: u16, col: u16) {
        self.grid.set_cursor(row, col);
    }

    fn char_at(&self, row: u16, col: u16) -> char {
        self.grid.char_at(row, col)
    }

    fn put_char(&mut self, row: u16, col: u16, ch: char) {
        self.grid.put_char(row, col, ch);
        self.mark(row);
    }

    fn insert_char(&mut self, row: u16, col: u16, ch: char) {
        self.grid.insert_char(row, col, ch);
        self.mark(row);
    }

    fn delete_char(&mut self, row: u16, col: u16) {
        self.grid.delete_char(row, col);
        self.mark(row);
    }

    fn scroll(&mut self, top: u16, bottom: u16, lines: i16) {
        self.grid.scroll(top, bottom, lines);
        self.mark_span(top, bottom);
    }

    fn flush(&mut self) -> io::Result<()> {
        queue!(self.out, Hide)?;
        if self.full_redraw {
            queue!(self.out, Clear(ClearType::All))?;
            self.dirty.fill(true);
            self.full_redraw = false;
        }
        for (row, dirty) in self.dirty.iter_mut().enumerate() {
            if !std::mem::take(dirty) {
                continue;
            }
            let row = row as u16;
            queue!(self.out, MoveTo(0, row), Print(self.grid.line(row)))?;
        }
        let (row, col) = self.grid.cursor();
        queue!(self.out, MoveTo(col, row), Show)?;
        self.out.flush()
    }
}

/// Blocking key reader over crossterm's event queue.
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn read_event(&mut self) -> io::Result<Event> {
        loop {
            match event::read()? {
                TermEvent::Key(key) => {
                    if let Some(decoded) = decode_key(key) {
                        return Ok(decoded);
                    }
                }
                TermEvent::Resize(..) => return Ok(Event::Resize),
                _ => {}
            }
        }
    }
}

/// Puts the terminal into raw mode on the alternate screen and restores it
/// on drop.
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// # Errors
    ///
    /// Returns an error if raw mode or the alternate screen cannot be
    /// entered.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(err) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        let _ = disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(surface: TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.into_inner()).unwrap()
    }

    #[test]
    fn test_first_flush_paints_every_row() {
        let mut surface = TerminalSurface::with_size(Vec::new(), 2, 3);
        surface.put_str(0, 0, "ab");
        surface.flush().unwrap();
        let out = output(surface);
        assert!(out.contains("ab "));
        assert!(out.contains("   "));
    }

    #[test]
    fn test_later_flush_writes_only_dirty_rows() {
        let mut surface = TerminalSurface::with_size(Vec::new(), 2, 3);
        surface.flush().unwrap();
        surface.out.clear();
        surface.put_char(1, 0, 'z');
        surface.flush().unwrap();
        let out = output(surface);
        assert!(out.contains("z  "));
        assert_eq!(out.matches("   ").count(), 0);
    }

    #[test]
    fn test_edits_update_shadow_grid() {
        let mut surface = TerminalSurface::with_size(Vec::new(), 1, 4);
        surface.put_str(0, 0, "abc");
        surface.insert_char(0, 0, 'x');
        surface.delete_char(0, 1);
        surface.set_cursor(0, 2);
        assert_eq!(surface.grid().line(0), "xbc ");
        assert_eq!(surface.cursor(), (0, 2));
    }

    #[test]
    fn test_reset_schedules_full_redraw() {
        let mut surface = TerminalSurface::with_size(Vec::new(), 1, 2);
        surface.flush().unwrap();
        surface.reset(2, 2);
        assert_eq!(surface.size(), (2, 2));
        surface.out.clear();
        surface.flush().unwrap();
        assert_eq!(output(surface).matches("  ").count(), 2);
    }
}
