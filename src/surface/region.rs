use std::io;

use super::Surface;

/// A rectangular window onto a parent surface.
///
/// Coordinates are relative to the region's top-left corner. Row edits and
/// scrolling are confined to the rectangle, so cells of the parent outside
/// it are never disturbed.
pub struct Region<'a> {
    parent: &'a mut dyn Surface,
    top: u16,
    left: u16,
    rows: u16,
    cols: u16,
}

impl<'a> Region<'a> {
    /// Window of `rows` x `cols` cells at `(top, left)`, clipped to the
    /// parent.
    pub fn new(parent: &'a mut dyn Surface, top: u16, left: u16, rows: u16, cols: u16) -> Self {
        let (parent_rows, parent_cols) = parent.size();
        let rows = rows.min(parent_rows.saturating_sub(top));
        let cols = cols.min(parent_cols.saturating_sub(left));
        Self {
            parent,
            top,
            left,
            rows,
            cols,
        }
    }

    /// `(top, left)` of the region in parent coordinates.
    pub const fn origin(&self) -> (u16, u16) {
        (self.top, self.left)
    }

    const fn contains(&self, row: u16, col: u16) -> bool {
        row < self.rows && col < self.cols
    }
}

impl Surface for Region<'_> {
    fn size(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    fn cursor(&self) -> (u16, u16) {
        let (row, col) = self.parent.cursor();
        (
            row.saturating_sub(self.top).min(self.rows.saturating_sub(1)),
            col.saturating_sub(self.left).min(self.cols.saturating_sub(1)),
        )
    }

    fn set_cursor(&mut self, row: u16, col: u16) {
        if self.contains(row, col) {
            self.parent.set_cursor(self.top + row, self.left + col);
        }
    }

    fn char_at(&self, row: u16, col: u16) -> char {
        if self.contains(row, col) {
            self.parent.char_at(self.top + row, self.left + col)
        } else {
            ' '
        }
    }

    fn put_char(&mut self, row: u16, col: u16, ch: char) {
        if self.contains(row, col) {
            self.parent.put_char(self.top + row, self.left + col, ch);
        }
    }

    fn insert_char(&mut self, row: u16, col: u16, ch: char) {
        if !self.contains(row, col) {
            return;
        }
        for c in (col + 1..self.cols).rev() {
            let moved = self.char_at(row, c - 1);
            self.put_char(row, c, moved);
        }
        self.put_char(row, col, ch);
    }

    fn delete_char(&mut self, row: u16, col: u16) {
        if !self.contains(row, col) {
            return;
        }
        for c in col..self.cols - 1 {
            let moved = self.char_at(row, c + 1);
            self.put_char(row, c, moved);
        }
        self.put_char(row, self.cols - 1, ' ');
    }

    fn scroll(&mut self, top: u16, bottom: u16, lines: i16) {
        let bottom = bottom.min(self.rows.saturating_sub(1));
        if top > bottom || lines == 0 || self.rows == 0 {
            return;
        }
        let shift = lines.unsigned_abs();
        let copy_row = |region: &mut Self, from: Option<u16>, to: u16| {
            for col in 0..region.cols {
                let ch = from.map_or(' ', |r| region.char_at(r, col));
                region.put_char(to, col, ch);
            }
        };
        if lines > 0 {
            for row in top..=bottom {
                let from = row.checked_add(shift).filter(|r| *r <= bottom);
                copy_row(self, from, row);
            }
        } else {
            for row in (top..=bottom).rev() {
                let from = row.checked_sub(shift).filter(|r| *r >= top);
                copy_row(self, from, row);
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.parent.flush()
    }
}
