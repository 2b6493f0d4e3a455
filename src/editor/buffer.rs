use std::fmt;

use thiserror::Error;

/// Errors reported by [`CursorBuffer`] operations.
///
/// Every failing operation leaves the buffer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    /// A cursor move would leave the legal range `[-len, len - 1]`.
    #[error("new cursor position {pos} out of bounds for buffer of length {len}")]
    OutOfBounds { pos: isize, len: usize },
    /// An index does not name a character in the buffer.
    #[error("index {index} out of range for buffer of length {len}")]
    OutOfRange { index: isize, len: usize },
    /// The buffer holds no characters.
    #[error("empty buffer")]
    Empty,
}

/// A character buffer with a cursor that is independent of insertion order.
///
/// The cursor names the character *under* it by index, `-1` when there is
/// none. Structural edits elsewhere in the buffer shift the index so the
/// cursor keeps pointing at the same logical character.
///
/// # Example
///
/// ```
/// use cursorline::editor::CursorBuffer;
///
/// let mut buf = CursorBuffer::from_text("abcde");
/// assert_eq!(buf.pos(), 4);
///
/// buf.insert(0, 'f');
/// assert_eq!(buf.to_string(), "fabcde");
/// assert_eq!(buf.cursor(), Ok('e'));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CursorBuffer {
    data: Vec<char>,
    pos: isize,
}

impl CursorBuffer {
    /// Create an empty buffer with no character under the cursor.
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            pos: -1,
        }
    }

    /// Create a buffer seeded with `text`, cursor on the last character.
    pub fn from_text(text: &str) -> Self {
        let data: Vec<char> = text.chars().collect();
        let pos = data.len() as isize - 1;
        Self { data, pos }
    }

    /// The cursor index.
    pub const fn pos(&self) -> isize {
        self.pos
    }

    /// Number of characters in the buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Character at `index`, if any.
    pub fn get(&self, index: usize) -> Option<char> {
        self.data.get(index).copied()
    }

    /// The characters in order.
    pub fn as_slice(&self) -> &[char] {
        &self.data
    }

    /// The character under the cursor.
    ///
    /// Negative cursor positions count from the end of the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Empty`] if the buffer holds no characters.
    pub fn cursor(&self) -> Result<char, BufferError> {
        if self.data.is_empty() {
            return Err(BufferError::Empty);
        }
        let index = self.resolve(self.pos);
        usize::try_from(index)
            .ok()
            .and_then(|i| self.get(i))
            .ok_or(BufferError::OutOfRange {
                index: self.pos,
                len: self.len(),
            })
    }

    /// Add `x` at the end. A cursor on the last character follows it.
    pub fn append(&mut self, x: char) {
        self.mutate(|data, pos| {
            let tracking = *pos == data.len() as isize - 1;
            data.push(x);
            if tracking {
                *pos += 1;
            }
        });
    }

    /// Add all of `xs` at the end. A cursor on the last character follows
    /// the new end.
    pub fn extend<I: IntoIterator<Item = char>>(&mut self, xs: I) {
        self.mutate(|data, pos| {
            let tracking = *pos == data.len() as isize - 1;
            let before = data.len();
            data.extend(xs);
            if tracking {
                *pos += (data.len() - before) as isize;
            }
        });
    }

    /// Insert `x` before index `i`. Negative indices count from the end.
    ///
    /// Inserting at or before the cursor pushes it forward by one.
    pub fn insert(&mut self, i: isize, x: char) {
        self.mutate(|data, pos| {
            let len = data.len() as isize;
            let at = (if i >= 0 { i } else { len + i }).clamp(0, len);
            data.insert(at as usize, x);
            if *pos >= at {
                *pos += 1;
            }
        });
    }

    /// Remove the first occurrence of `x`. Absent characters are ignored.
    pub fn remove(&mut self, x: char) {
        self.mutate(|data, pos| {
            if let Some(i) = data.iter().position(|&c| c == x) {
                data.remove(i);
                if *pos > 0 && *pos >= i as isize {
                    *pos -= 1;
                }
            }
        });
    }

    /// Remove and return the character at `index`. Negative indices count
    /// from the end.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfRange`] if `index` does not resolve to a
    /// character.
    pub fn pop(&mut self, index: isize) -> Result<char, BufferError> {
        let len = self.len();
        let at = self.resolve(index);
        if at < 0 || at >= len as isize {
            return Err(BufferError::OutOfRange { index, len });
        }
        Ok(self.mutate(|data, pos| {
            let x = data.remove(at as usize);
            if *pos > 0 && *pos >= at {
                *pos -= 1;
            }
            x
        }))
    }

    /// Remove every character.
    pub fn clear(&mut self) {
        self.data.clear();
        self.pos = -1;
    }

    /// Reverse the characters in place, mirroring the cursor.
    pub fn reverse(&mut self) {
        self.mutate(|data, pos| {
            data.reverse();
            if *pos >= 0 {
                *pos = data.len() as isize - 1 - *pos;
            }
        });
    }

    /// Shift the cursor `n` characters, right for positive `n`.
    ///
    /// The legal range is `[-len, len - 1]`, so a cursor may step past the
    /// front into negative indices that count from the end.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] without moving if the new
    /// position leaves the legal range.
    pub fn move_by(&mut self, n: isize) -> Result<(), BufferError> {
        let len = self.len() as isize;
        let pos = self.pos + n;
        if pos > len - 1 || pos < -len {
            return Err(BufferError::OutOfBounds {
                pos,
                len: self.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Put the cursor on the first character.
    pub fn move_to_start(&mut self) {
        self.mutate(|_, pos| *pos = 0);
    }

    /// Put the cursor on the last character.
    pub fn move_to_end(&mut self) {
        self.mutate(|data, pos| *pos = data.len() as isize - 1);
    }

    // --- Private helpers ---

    fn resolve(&self, index: isize) -> isize {
        if index >= 0 {
            index
        } else {
            self.data.len() as isize + index
        }
    }

    /// Run a structural edit with the cursor in canonical form, then settle
    /// it back into `[-1, len - 1]`.
    fn mutate<R>(&mut self, edit: impl FnOnce(&mut Vec<char>, &mut isize) -> R) -> R {
        if self.pos < -1 {
            self.pos = self.resolve(self.pos);
        }
        let result = edit(&mut self.data, &mut self.pos);
        let last = self.data.len() as isize - 1;
        self.pos = self.pos.clamp(-1, last);
        result
    }
}

impl Default for CursorBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CursorBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.data.iter().try_for_each(|c| fmt::Write::write_char(f, *c))
    }
}

impl fmt::Debug for CursorBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorBuffer")
            .field("data", &self.to_string())
            .field("pos", &self.pos)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(text: &str, pos: isize) -> CursorBuffer {
        let mut buf = CursorBuffer::from_text(text);
        buf.move_by(pos - buf.pos()).unwrap();
        buf
    }

    // --- Construction ---

    #[test]
    fn test_empty_buffer_has_no_cursor() {
        let buf = CursorBuffer::new();
        assert_eq!(buf.pos(), -1);
        assert_eq!(buf.cursor(), Err(BufferError::Empty));
    }

    #[test]
    fn test_seeded_buffer_cursor_on_last_char() {
        let buf = CursorBuffer::from_text("abcde");
        assert_eq!(buf.pos(), 4);
        assert_eq!(buf.cursor(), Ok('e'));
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(CursorBuffer::default(), CursorBuffer::new());
    }

    // --- append / extend ---

    #[test]
    fn test_append_tracks_end() {
        let mut buf = CursorBuffer::from_text("abcde");
        buf.append('f');
        assert_eq!(buf.pos(), 5);
        assert_eq!(buf.cursor(), Ok('f'));
    }

    #[test]
    fn test_append_before_end_keeps_cursor() {
        let mut buf = at("abcde", 3);
        buf.append('f');
        assert_eq!(buf.pos(), 3);
        assert_eq!(buf.cursor(), Ok('d'));
    }

    #[test]
    fn test_append_to_empty_buffer() {
        let mut buf = CursorBuffer::new();
        buf.append('x');
        assert_eq!(buf.pos(), 0);
        buf.append('y');
        assert_eq!(buf.pos(), 1);
        assert_eq!(buf.cursor(), Ok('y'));
    }

    #[test]
    fn test_extend_tracks_end() {
        let mut buf = CursorBuffer::from_text("abc");
        buf.extend("def".chars());
        assert_eq!(buf.pos(), 5);
        assert_eq!(buf.cursor(), Ok('f'));
    }

    #[test]
    fn test_extend_before_end_keeps_cursor() {
        let mut buf = at("abc", 1);
        buf.extend("def".chars());
        assert_eq!(buf.pos(), 1);
        assert_eq!(buf.cursor(), Ok('b'));
    }

    // --- insert ---

    #[test]
    fn test_insert_before_cursor() {
        let mut buf = CursorBuffer::from_text("abcde");
        buf.insert(0, 'f');
        assert_eq!(buf.to_string(), "fabcde");
        assert_eq!(buf.pos(), 5);
        assert_eq!(buf.cursor(), Ok('e'));
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut buf = CursorBuffer::from_text("abcde");
        buf.insert(4, 'f');
        assert_eq!(buf.pos(), 5);
        assert_eq!(buf.cursor(), Ok('e'));
    }

    #[test]
    fn test_insert_after_cursor() {
        let mut buf = CursorBuffer::from_text("abcde");
        buf.insert(5, 'f');
        assert_eq!(buf.pos(), 4);
        assert_eq!(buf.cursor(), Ok('e'));
    }

    #[test]
    fn test_insert_negative_index_counts_from_end() {
        let mut buf = at("abcde", 1);
        buf.insert(-1, 'x');
        assert_eq!(buf.to_string(), "abcdxe");
        assert_eq!(buf.pos(), 1);
    }

    #[test]
    fn test_insert_past_end_appends() {
        let mut buf = at("abc", 0);
        buf.insert(10, 'x');
        assert_eq!(buf.to_string(), "abcx");
        assert_eq!(buf.pos(), 0);
    }

    // --- remove ---

    #[test]
    fn test_remove_absent_is_noop() {
        let mut buf = CursorBuffer::from_text("abcde");
        buf.remove('f');
        assert_eq!(buf.to_string(), "abcde");
        assert_eq!(buf.pos(), 4);
    }

    #[test]
    fn test_remove_after_cursor() {
        let mut buf = at("abcde", 2);
        buf.remove('d');
        assert_eq!(buf.pos(), 2);
        assert_eq!(buf.cursor(), Ok('c'));
    }

    #[test]
    fn test_remove_at_cursor() {
        let mut buf = CursorBuffer::from_text("abcde");
        buf.remove('e');
        assert_eq!(buf.pos(), 3);
        assert_eq!(buf.cursor(), Ok('d'));
    }

    #[test]
    fn test_remove_before_cursor() {
        let mut buf = CursorBuffer::from_text("abcde");
        buf.remove('a');
        assert_eq!(buf.pos(), 3);
        assert_eq!(buf.cursor(), Ok('e'));
    }

    #[test]
    fn test_remove_first_occurrence_only() {
        let mut buf = CursorBuffer::from_text("abab");
        buf.remove('b');
        assert_eq!(buf.to_string(), "aab");
    }

    // --- pop ---

    #[test]
    fn test_pop_out_of_range_leaves_buffer() {
        let mut buf = CursorBuffer::from_text("abcde");
        assert_eq!(
            buf.pop(5),
            Err(BufferError::OutOfRange { index: 5, len: 5 })
        );
        assert_eq!(buf.pop(-6), Err(BufferError::OutOfRange { index: -6, len: 5 }));
        assert_eq!(buf.to_string(), "abcde");
        assert_eq!(buf.pos(), 4);
    }

    #[test]
    fn test_pop_after_cursor() {
        let mut buf = at("abcde", 3);
        assert_eq!(buf.pop(4), Ok('e'));
        assert_eq!(buf.pos(), 3);
        assert_eq!(buf.cursor(), Ok('d'));
    }

    #[test]
    fn test_pop_at_cursor() {
        let mut buf = CursorBuffer::from_text("abcde");
        assert_eq!(buf.pop(4), Ok('e'));
        assert_eq!(buf.pos(), 3);
        assert_eq!(buf.cursor(), Ok('d'));
    }

    #[test]
    fn test_pop_before_cursor() {
        let mut buf = CursorBuffer::from_text("abcde");
        assert_eq!(buf.pop(0), Ok('a'));
        assert_eq!(buf.pos(), 3);
        assert_eq!(buf.cursor(), Ok('e'));
    }

    #[test]
    fn test_pop_negative_index() {
        let mut buf = CursorBuffer::from_text("abcde");
        assert_eq!(buf.pop(-1), Ok('e'));
        assert_eq!(buf.pos(), 3);
    }

    #[test]
    fn test_pop_last_char_empties_cursor() {
        let mut buf = CursorBuffer::from_text("a");
        assert_eq!(buf.pop(0), Ok('a'));
        assert!(buf.is_empty());
        assert_eq!(buf.pos(), -1);
    }

    // --- clear / reverse ---

    #[test]
    fn test_clear() {
        let mut buf = CursorBuffer::from_text("abcde");
        buf.clear();
        assert_eq!(buf.pos(), -1);
        assert!(buf.is_empty());
        assert_eq!(buf.cursor(), Err(BufferError::Empty));
    }

    #[test]
    fn test_reverse_mirrors_cursor() {
        let mut buf = at("abcde", 3);
        buf.reverse();
        assert_eq!(buf.to_string(), "edcba");
        assert_eq!(buf.pos(), 1);
        assert_eq!(buf.cursor(), Ok('d'));
    }

    #[test]
    fn test_reverse_without_cursor_char() {
        let mut buf = at("abc", -1);
        buf.reverse();
        assert_eq!(buf.pos(), -1);
    }

    // --- move ---

    #[test]
    fn test_move_from_end() {
        let mut buf = CursorBuffer::from_text("abcde");
        assert!(buf.move_by(1).is_err());
        assert!(buf.move_by(-10).is_err());
        buf.move_by(-2).unwrap();
        assert_eq!(buf.pos(), 2);
        assert_eq!(buf.cursor(), Ok('c'));
    }

    #[test]
    fn test_move_from_start() {
        let mut buf = at("abcde", 0);
        assert!(buf.move_by(5).is_err());
        assert!(buf.move_by(-6).is_err());
        buf.move_by(1).unwrap();
        assert_eq!(buf.pos(), 1);
        assert_eq!(buf.cursor(), Ok('b'));
    }

    #[test]
    fn test_move_from_middle() {
        let mut buf = at("abcde", 2);
        buf.move_by(1).unwrap();
        assert_eq!(buf.pos(), 3);
        assert_eq!(buf.cursor(), Ok('d'));
        assert_eq!(
            buf.move_by(3),
            Err(BufferError::OutOfBounds { pos: 6, len: 5 })
        );
        assert!(buf.move_by(-9).is_err());
        assert_eq!(buf.pos(), 3);
    }

    #[test]
    fn test_move_lower_bound_is_minus_len() {
        let mut buf = at("abcde", 0);
        buf.move_by(-5).unwrap();
        assert_eq!(buf.pos(), -5);
        assert_eq!(buf.cursor(), Ok('a'));
    }

    #[test]
    fn test_negative_cursor_is_canonicalized_by_edits() {
        let mut buf = at("abcde", 0);
        buf.move_by(-3).unwrap(); // 'c'
        buf.append('f');
        assert_eq!(buf.pos(), 2);
        assert_eq!(buf.cursor(), Ok('c'));
    }

    #[test]
    fn test_move_to_start_and_end() {
        let mut buf = CursorBuffer::from_text("abcde");
        buf.move_to_start();
        assert_eq!(buf.pos(), 0);
        buf.move_to_end();
        assert_eq!(buf.pos(), 4);
    }

    #[test]
    fn test_move_to_start_on_empty_buffer() {
        let mut buf = CursorBuffer::new();
        buf.move_to_start();
        assert_eq!(buf.pos(), -1);
    }

    // --- Display ---

    #[test]
    fn test_display_joins_chars() {
        let mut buf = CursorBuffer::new();
        buf.extend("héllo".chars());
        assert_eq!(buf.to_string(), "héllo");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Append(char),
            Extend(Vec<char>),
            Insert(isize, char),
            Remove(char),
            Pop(isize),
        }

        fn letter() -> impl Strategy<Value = char> {
            proptest::char::range('a', 'e')
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                letter().prop_map(Op::Append),
                proptest::collection::vec(letter(), 0..4).prop_map(Op::Extend),
                (-8..8isize, letter()).prop_map(|(i, c)| Op::Insert(i, c)),
                letter().prop_map(Op::Remove),
                (-8..8isize).prop_map(Op::Pop),
            ]
        }

        fn apply(buf: &mut CursorBuffer, op: &Op) -> Result<(), BufferError> {
            match op {
                Op::Append(c) => buf.append(*c),
                Op::Extend(cs) => buf.extend(cs.iter().copied()),
                Op::Insert(i, c) => buf.insert(*i, *c),
                Op::Remove(c) => buf.remove(*c),
                Op::Pop(i) => {
                    buf.pop(*i)?;
                }
            }
            Ok(())
        }

        proptest! {
            #[test]
            fn edits_keep_cursor_in_bounds(
                seed in "[a-e]{0,6}",
                ops in proptest::collection::vec(op(), 0..32),
            ) {
                let mut buf = CursorBuffer::from_text(&seed);
                for op in &ops {
                    let before = buf.clone();
                    match apply(&mut buf, op) {
                        Ok(()) => {
                            prop_assert!(buf.pos() >= -1);
                            prop_assert!(buf.pos() <= buf.len() as isize - 1);
                        }
                        Err(_) => prop_assert_eq!(&buf, &before),
                    }
                }
            }

            #[test]
            fn move_round_trip(
                seed in "[a-e]{1,8}",
                start in 0..8isize,
                n in -10..10isize,
            ) {
                let mut buf = CursorBuffer::from_text(&seed);
                let start = start.min(buf.len() as isize - 1);
                buf.move_by(start - buf.pos()).unwrap();
                if buf.move_by(n).is_ok() && buf.move_by(-n).is_ok() {
                    prop_assert_eq!(buf.pos(), start);
                }
            }

            #[test]
            fn reverse_is_self_inverse(
                seed in "[a-e]{0,8}",
                start in -1..8isize,
            ) {
                let mut buf = CursorBuffer::from_text(&seed);
                let start = start.min(buf.len() as isize - 1);
                let _ = buf.move_by(start - buf.pos());
                let before = buf.clone();
                buf.reverse();
                buf.reverse();
                prop_assert_eq!(buf, before);
            }

            #[test]
            fn clear_always_empties(seed in "[a-e]{0,8}") {
                let mut buf = CursorBuffer::from_text(&seed);
                buf.clear();
                prop_assert_eq!(buf.pos(), -1);
                prop_assert!(buf.is_empty());
                prop_assert_eq!(buf.cursor(), Err(BufferError::Empty));
            }
        }
    }
}
