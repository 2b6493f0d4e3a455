use crate::surface::Surface;

/// Cell bounds of the editable line within a surface.
///
/// Content cells are `min_x..max_x`; `max_x` itself is where the caret
/// parks once the visible window is full, and it is always blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    rows: u16,
    cols: u16,
    border: u16,
    prompt_width: u16,
}

impl Geometry {
    pub fn new(rows: u16, cols: u16, border: bool, prompt_width: u16) -> Self {
        Self {
            rows,
            cols,
            border: u16::from(border),
            prompt_width,
        }
    }

    pub fn of(surface: &dyn Surface, border: bool, prompt_width: u16) -> Self {
        let (rows, cols) = surface.size();
        Self::new(rows, cols, border, prompt_width)
    }

    /// First column right of the border and the prompt.
    pub const fn min_x(&self) -> u16 {
        self.border + self.prompt_width
    }

    /// Last legal column.
    pub const fn max_x(&self) -> u16 {
        self.cols.saturating_sub(1 + self.border)
    }

    /// First column inside the border.
    pub const fn left(&self) -> u16 {
        self.border
    }

    /// One past the last column inside the border.
    pub const fn right(&self) -> u16 {
        self.cols.saturating_sub(self.border)
    }

    pub const fn min_y(&self) -> u16 {
        self.border
    }

    pub const fn max_y(&self) -> u16 {
        self.rows.saturating_sub(1 + self.border)
    }

    /// Number of visible content cells.
    pub const fn content_length(&self) -> u16 {
        self.max_x().saturating_sub(self.min_x())
    }

    pub const fn has_border(&self) -> bool {
        self.border > 0
    }

    pub const fn cols(&self) -> u16 {
        self.cols
    }
}

/// Rows scrolled out of the editing region.
///
/// `upper` holds rows that left through the top (most recent last),
/// `lower` rows pushed out through the bottom while looking back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scrollback {
    pub(super) upper: Vec<String>,
    pub(super) lower: Vec<String>,
}

impl Scrollback {
    pub fn upper(&self) -> &[String] {
        &self.upper
    }

    pub fn lower(&self) -> &[String] {
        &self.lower
    }

    /// Rows the view is currently scrolled back by.
    pub fn depth(&self) -> usize {
        self.lower.len()
    }

    pub fn clear(&mut self) {
        self.upper.clear();
        self.lower.clear();
    }
}
