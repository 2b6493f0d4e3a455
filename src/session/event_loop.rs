use crate::editor::{CursorBuffer, HistoryBrowser};
use crate::error::Result;
use crate::surface::{EventSource, Surface};

use super::input::action_for;
use super::update::Step;
use super::{LineEditor, Outcome, ReadOptions, paint_row};

impl LineEditor {
    /// Run one editing session on the cursor row.
    ///
    /// Draws the prompt, then handles events until the line is committed
    /// (Enter) or the session is aborted (Ctrl-C, Ctrl-D, resize). A
    /// committed line is added to the history.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or drawing fails.
    pub fn read_line(
        &mut self,
        surface: &mut dyn Surface,
        events: &mut dyn EventSource,
        options: ReadOptions,
    ) -> Result<Outcome> {
        let geo = self.geometry(surface);
        let (row, _) = surface.cursor();
        self.row = row.clamp(geo.min_y(), geo.max_y());
        self.buffer = CursorBuffer::new();
        self.offset = 0;
        self.browser = HistoryBrowser::new(&self.history);
        paint_row(surface, &geo, self.row, &self.prompt);
        surface.set_cursor(self.row, geo.min_x().min(geo.max_x()));
        surface.flush()?;
        tracing::debug!(row = self.row, width = geo.content_length(), "reading line");

        loop {
            let event = events.read_event()?;
            let action = action_for(event, options.scroll);
            tracing::trace!(?event, ?action, "input");
            if !action.is_scroll() {
                self.reflow(surface);
            }
            let step = self.update(surface, events, action)?;
            surface.flush()?;
            match step {
                Step::Continue => {}
                Step::Committed(line) => {
                    tracing::debug!(len = line.chars().count(), "line committed");
                    self.record(line.clone());
                    if options.clear {
                        paint_row(surface, &geo, self.row, "");
                        surface.set_cursor(self.row, geo.left());
                        surface.flush()?;
                    }
                    return Ok(Outcome::Committed(line));
                }
                Step::Aborted(reason) => {
                    tracing::debug!(?reason, "session aborted");
                    return Ok(Outcome::Aborted(reason));
                }
            }
        }
    }
}
