use crate::error::Result;
use crate::session::{AbortReason, LineEditor, Outcome, ReadOptions};
use crate::surface::{EventSource, Region, Surface};

/// The user's answer to a [`Menu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Index into the candidates.
    Selected(usize),
    /// Dismissed with Ctrl-C or Ctrl-D, or nothing to choose from.
    Cancelled,
    /// The viewport changed size while the menu was open.
    Resized,
}

/// Picks one of several completion candidates.
pub trait Menu {
    /// Ask the user to choose among `candidates`.
    ///
    /// Implementations must leave `surface` as they found it, cursor
    /// included.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or drawing fails.
    fn choose(
        &mut self,
        surface: &mut dyn Surface,
        events: &mut dyn EventSource,
        candidates: &[String],
    ) -> Result<Choice>;
}

/// Boxed panel over the middle of the screen listing `n: candidate`, read
/// with a nested line editor until a valid number is entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedMenu {
    title: String,
    prompt: String,
}

impl NumberedMenu {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    fn run(
        &self,
        region: &mut Region<'_>,
        events: &mut dyn EventSource,
        candidates: &[String],
    ) -> Result<Choice> {
        let mut editor = LineEditor::new()
            .with_border(true)
            .with_banner(self.title.clone())
            .with_prompt(self.prompt.clone())
            .with_history_limit(0);
        editor.begin(region)?;
        for (i, candidate) in candidates.iter().enumerate() {
            editor.write_line(region, &format!("{}: {candidate}", i + 1))?;
        }
        let options = ReadOptions {
            scroll: true,
            clear: true,
        };
        loop {
            match editor.read_line(region, events, options)? {
                Outcome::Committed(line) => {
                    let picked = line
                        .trim()
                        .parse::<usize>()
                        .ok()
                        .filter(|n| (1..=candidates.len()).contains(n));
                    if let Some(n) = picked {
                        return Ok(Choice::Selected(n - 1));
                    }
                }
                Outcome::Aborted(AbortReason::Resize) => return Ok(Choice::Resized),
                Outcome::Aborted(_) => return Ok(Choice::Cancelled),
            }
        }
    }
}

impl Default for NumberedMenu {
    fn default() -> Self {
        Self {
            title: String::new(),
            prompt: ">".to_string(),
        }
    }
}

impl Menu for NumberedMenu {
    fn choose(
        &mut self,
        surface: &mut dyn Surface,
        events: &mut dyn EventSource,
        candidates: &[String],
    ) -> Result<Choice> {
        match candidates.len() {
            0 => return Ok(Choice::Cancelled),
            1 => return Ok(Choice::Selected(0)),
            _ => {}
        }
        let (rows, cols) = surface.size();
        let (height, width) = (rows / 2, cols / 2);
        // Border, banner, gap and prompt rows at the least.
        if height < 5 || width < 4 {
            tracing::warn!(rows, cols, "screen too small for the completion menu");
            return Ok(Choice::Cancelled);
        }
        let (top, left) = ((rows - height) / 2, (cols - width) / 2);
        let cursor = surface.cursor();
        let saved: Vec<String> = (top..top + height)
            .map(|row| surface.row_text(row, left, left + width))
            .collect();

        let choice = {
            let mut region = Region::new(&mut *surface, top, left, height, width);
            for row in 0..height {
                region.clear_span(row, 0, width);
            }
            self.run(&mut region, events, candidates)
        };

        for (row, text) in (top..).zip(&saved) {
            surface.put_str(row, left, text);
        }
        surface.set_cursor(cursor.0, cursor.1);
        surface.flush()?;
        choice
    }
}
