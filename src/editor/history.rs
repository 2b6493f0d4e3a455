/// Browsing state over committed lines for one editing session.
///
/// Holds two private stacks: `above` starts as a copy of the history with
/// the most recent line on top, `below` starts empty. Moving pushes the line
/// being left onto the opposite stack, so the draft typed before browsing is
/// reachable again by moving back down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryBrowser {
    above: Vec<String>,
    below: Vec<String>,
}

impl HistoryBrowser {
    /// Start browsing `history`, oldest entry first.
    pub fn new(history: &[String]) -> Self {
        Self {
            above: history.to_vec(),
            below: Vec::new(),
        }
    }

    /// Step to the previous (older) line.
    ///
    /// Returns the line to load, or `None` when there is nothing older.
    pub fn up(&mut self, current: String) -> Option<String> {
        let line = self.above.pop()?;
        self.below.push(current);
        Some(line)
    }

    /// Step to the next (newer) line.
    ///
    /// Returns the line to load, or `None` when already at the newest.
    pub fn down(&mut self, current: String) -> Option<String> {
        let line = self.below.pop()?;
        self.above.push(current);
        Some(line)
    }

    pub fn can_go_up(&self) -> bool {
        !self.above.is_empty()
    }

    pub fn can_go_down(&self) -> bool {
        !self.below.is_empty()
    }
}
