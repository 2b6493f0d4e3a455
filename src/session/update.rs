use crate::editor::{BufferError, Completion, CursorBuffer, current_word};
use crate::error::Result;
use crate::surface::{BORDER_VERTICAL, EventSource, Surface};
use crate::ui::Choice;

use super::input::{Action, is_printable};
use super::{AbortReason, Geometry, LineEditor, paint_row};

/// Result of handling one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Step {
    Continue,
    Committed(String),
    Aborted(AbortReason),
}

impl LineEditor {
    pub(super) fn update(
        &mut self,
        surface: &mut dyn Surface,
        events: &mut dyn EventSource,
        action: Action,
    ) -> Result<Step> {
        let geo = self.geometry(surface);
        match action {
            Action::Abort(reason) => return Ok(Step::Aborted(reason)),
            Action::Submit => return Ok(Step::Committed(self.buffer.to_string())),
            Action::Complete => return self.complete(surface, events, &geo),
            Action::Insert(ch) => self.insert(surface, &geo, ch)?,
            Action::Backspace => self.backspace(surface, &geo)?,
            Action::Left => self.left(surface, &geo)?,
            Action::Right => self.right(surface, &geo)?,
            Action::HistoryUp => self.browse(surface, &geo, true),
            Action::HistoryDown => self.browse(surface, &geo, false),
            Action::ScrollUp => self.scroll_back(surface, &geo),
            Action::ScrollDown => self.scroll_forward(surface, &geo),
            Action::Ignore => {}
        }
        Ok(Step::Continue)
    }

    /// Index of the character right of the caret.
    fn caret_index(&self) -> usize {
        usize::try_from(self.buffer.pos() + 1).unwrap_or(0)
    }

    /// Column the caret belongs in for the current buffer and offset.
    fn caret_column(&self, geo: &Geometry) -> u16 {
        let shown = self.caret_index().saturating_sub(self.offset);
        geo.min_x()
            .saturating_add(u16::try_from(shown).unwrap_or(u16::MAX))
            .min(geo.max_x())
    }

    fn char_at(&self, index: usize) -> Result<char> {
        let len = self.buffer.len();
        self.buffer.get(index).ok_or_else(|| {
            BufferError::OutOfRange {
                index: isize::try_from(index).unwrap_or(isize::MAX),
                len,
            }
            .into()
        })
    }

    fn insert(&mut self, surface: &mut dyn Surface, geo: &Geometry, ch: char) -> Result<()> {
        if geo.content_length() == 0 {
            self.buffer.insert(self.buffer.pos() + 1, ch);
            self.buffer.move_by(1)?;
            self.offset = self.caret_index();
            return Ok(());
        }
        let (row, mut x) = surface.cursor();
        if x < geo.min_x() {
            self.rewind(surface, geo, row)?;
            x = geo.min_x();
        }
        self.buffer.insert(self.buffer.pos() + 1, ch);
        self.buffer.move_by(1)?;
        if x >= geo.max_x() {
            surface.delete_char(row, geo.min_x());
            self.offset += 1;
            surface.insert_char(row, geo.max_x() - 1, ch);
            x = geo.max_x();
        } else {
            surface.insert_char(row, x, ch);
            x += 1;
        }
        seal_row(surface, geo, row);
        surface.set_cursor(row, x);
        Ok(())
    }

    fn backspace(&mut self, surface: &mut dyn Surface, geo: &Geometry) -> Result<()> {
        let at = self.buffer.pos();
        if geo.content_length() == 0 {
            if at >= 0 {
                self.remove_at(at)?;
                self.offset = self.caret_index();
            }
            return Ok(());
        }
        let (row, mut x) = surface.cursor();
        if x < geo.min_x() {
            self.rewind(surface, geo, row)?;
            return Ok(());
        }
        if at < 0 {
            return Ok(());
        }
        if x == geo.min_x() {
            // Only reachable with hidden text on the left after Left moved
            // the caret here; the character being deleted is off screen.
            let Some(offset) = self.offset.checked_sub(1) else {
                return Ok(());
            };
            self.offset = offset;
            surface.insert_char(row, geo.min_x(), self.char_at(offset)?);
            x += 1;
        }
        self.remove_at(at)?;
        surface.delete_char(row, x - 1);
        x -= 1;

        let caret = self.caret_index();
        let room = usize::from(geo.max_x() - x);
        if self.buffer.len() - caret >= room {
            surface.put_char(row, geo.max_x() - 1, self.char_at(caret + room - 1)?);
        } else if let Some(offset) = self.offset.checked_sub(1) {
            self.offset = offset;
            surface.insert_char(row, geo.min_x(), self.char_at(offset)?);
            x += 1;
        }
        seal_row(surface, geo, row);
        surface.set_cursor(row, x);
        Ok(())
    }

    /// Delete the character left of the caret and step the caret back.
    fn remove_at(&mut self, at: isize) -> Result<()> {
        self.buffer.pop(at)?;
        if at == 0 && !self.buffer.is_empty() {
            self.buffer.move_by(-1)?;
        }
        Ok(())
    }

    fn left(&mut self, surface: &mut dyn Surface, geo: &Geometry) -> Result<()> {
        if self.buffer.pos() < 0 {
            return Ok(());
        }
        self.buffer.move_by(-1)?;
        if geo.content_length() == 0 {
            self.offset = self.caret_index();
            return Ok(());
        }
        let (row, x) = surface.cursor();
        if x > geo.min_x() {
            surface.set_cursor(row, x - 1);
        } else if let Some(offset) = self.offset.checked_sub(1) {
            self.offset = offset;
            surface.insert_char(row, geo.min_x(), self.char_at(offset)?);
            seal_row(surface, geo, row);
            surface.set_cursor(row, x);
        }
        Ok(())
    }

    fn right(&mut self, surface: &mut dyn Surface, geo: &Geometry) -> Result<()> {
        if self.caret_index() >= self.buffer.len() {
            return Ok(());
        }
        self.buffer.move_by(1)?;
        if geo.content_length() == 0 {
            self.offset = self.caret_index();
            return Ok(());
        }
        let (row, x) = surface.cursor();
        if x < geo.max_x() {
            surface.set_cursor(row, x + 1);
            return Ok(());
        }
        surface.delete_char(row, geo.min_x());
        self.offset += 1;
        surface.put_char(row, geo.max_x() - 1, self.buffer.cursor()?);
        seal_row(surface, geo, row);
        surface.set_cursor(row, x);
        Ok(())
    }

    fn complete(
        &mut self,
        surface: &mut dyn Surface,
        events: &mut dyn EventSource,
        geo: &Geometry,
    ) -> Result<Step> {
        if self.completer.is_empty() {
            return Ok(Step::Continue);
        }
        let head: String = self.buffer.as_slice()[..self.caret_index()].iter().collect();
        let word = current_word(&head);
        let insertion = match self.completer.complete(word) {
            Completion::NoMatch => None,
            Completion::Extend(rest) => Some(rest),
            Completion::Ambiguous(candidates) => {
                tracing::debug!(word, count = candidates.len(), "ambiguous completion");
                match self.menu.choose(surface, events, &candidates)? {
                    Choice::Selected(index) => candidates
                        .get(index)
                        .and_then(|candidate| candidate.get(word.len()..))
                        .map(str::to_string),
                    Choice::Resized => return Ok(Step::Aborted(AbortReason::Resize)),
                    Choice::Cancelled => None,
                }
            }
        };
        if let Some(text) = insertion {
            for ch in text.chars().filter(|ch| is_printable(*ch)) {
                self.insert(surface, geo, ch)?;
            }
        }
        Ok(Step::Continue)
    }

    fn browse(&mut self, surface: &mut dyn Surface, geo: &Geometry, older: bool) {
        let current = self.buffer.to_string();
        let next = if older {
            self.browser.up(current)
        } else {
            self.browser.down(current)
        };
        if let Some(line) = next {
            self.load_line(surface, geo, &line);
        }
    }

    /// Replace the line with `text`, caret at its end and its tail visible.
    pub(super) fn load_line(&mut self, surface: &mut dyn Surface, geo: &Geometry, text: &str) {
        self.buffer = CursorBuffer::from_text(text);
        self.offset = self
            .buffer
            .len()
            .saturating_sub(usize::from(geo.content_length()));
        let (row, _) = surface.cursor();
        self.redraw(surface, geo, row);
    }

    /// Move the caret before the first character and redraw from there.
    /// Only reached when the cursor was moved behind the editor's back.
    fn rewind(&mut self, surface: &mut dyn Surface, geo: &Geometry, row: u16) -> Result<()> {
        tracing::debug!(row, "cursor left the line, rewinding");
        self.buffer.move_to_start();
        if !self.buffer.is_empty() {
            self.buffer.move_by(-1)?;
        }
        self.offset = 0;
        self.redraw(surface, geo, row);
        Ok(())
    }

    /// Paint the visible window of the buffer on `row` and place the caret.
    fn redraw(&self, surface: &mut dyn Surface, geo: &Geometry, row: u16) {
        surface.clear_span(row, geo.min_x(), geo.max_x().saturating_add(1));
        let visible = self.buffer.as_slice().iter().skip(self.offset);
        for (col, &ch) in (geo.min_x()..geo.max_x()).zip(visible) {
            surface.put_char(row, col, if is_printable(ch) { ch } else { ' ' });
        }
        seal_row(surface, geo, row);
        surface.set_cursor(row, self.caret_column(geo));
    }

    /// Bring back the most recent row that scrolled off the top.
    fn scroll_back(&mut self, surface: &mut dyn Surface, geo: &Geometry) {
        let Some(text) = self.scrollback.upper.pop() else {
            return;
        };
        let bottom = surface.row_text(geo.max_y(), geo.left(), geo.right());
        self.scrollback.lower.push(bottom);
        surface.scroll(geo.min_y(), geo.max_y(), -1);
        paint_row(surface, geo, geo.min_y(), &text);
        self.place_caret(surface, geo);
    }

    fn scroll_forward(&mut self, surface: &mut dyn Surface, geo: &Geometry) {
        let Some(text) = self.scrollback.lower.pop() else {
            return;
        };
        let top = surface.row_text(geo.min_y(), geo.left(), geo.right());
        self.scrollback.upper.push(top);
        surface.scroll(geo.min_y(), geo.max_y(), 1);
        paint_row(surface, geo, geo.max_y(), &text);
        self.place_caret(surface, geo);
    }

    /// Undo any scrollback so the editing row is where edits expect it.
    pub(super) fn reflow(&mut self, surface: &mut dyn Surface) {
        let geo = self.geometry(surface);
        while self.scrollback.depth() > 0 {
            self.scroll_forward(surface, &geo);
        }
    }

    /// Caret on the editing row as currently shown, or parked at the bottom
    /// left while that row is scrolled out of view.
    fn place_caret(&self, surface: &mut dyn Surface, geo: &Geometry) {
        let depth = u16::try_from(self.scrollback.depth()).unwrap_or(u16::MAX);
        match self.row.checked_add(depth).filter(|row| *row <= geo.max_y()) {
            Some(row) => surface.set_cursor(row, self.caret_column(geo)),
            None => surface.set_cursor(geo.max_y(), geo.left()),
        }
    }
}

/// Blank the caret's parking cell and restore the right border, both of
/// which horizontal edits can disturb.
fn seal_row(surface: &mut dyn Surface, geo: &Geometry, row: u16) {
    if geo.max_x() >= geo.min_x() {
        surface.put_char(row, geo.max_x(), ' ');
    }
    if geo.has_border() {
        surface.put_char(row, geo.cols().saturating_sub(1), BORDER_VERTICAL);
    }
}
