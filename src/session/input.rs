use unicode_width::UnicodeWidthChar;

use crate::surface::{Event, Key};

use super::AbortReason;

/// What the editor does with one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Action {
    Abort(AbortReason),
    Complete,
    HistoryUp,
    HistoryDown,
    ScrollUp,
    ScrollDown,
    Left,
    Right,
    Submit,
    Backspace,
    Insert(char),
    Ignore,
}

impl Action {
    /// Scroll actions leave a scrolled-back view alone; everything else
    /// brings the editing row back first.
    pub(super) const fn is_scroll(self) -> bool {
        matches!(self, Self::ScrollUp | Self::ScrollDown)
    }
}

pub(super) fn action_for(event: Event, scroll_enabled: bool) -> Action {
    match event {
        Event::Resize => Action::Abort(AbortReason::Resize),
        Event::Key(key) => match key {
            Key::Interrupt => Action::Abort(AbortReason::Interrupt),
            Key::EndOfInput => Action::Abort(AbortReason::EndOfInput),
            Key::Tab => Action::Complete,
            Key::Up => Action::HistoryUp,
            Key::Down => Action::HistoryDown,
            Key::ScrollUp if scroll_enabled => Action::ScrollUp,
            Key::ScrollDown if scroll_enabled => Action::ScrollDown,
            Key::Left => Action::Left,
            Key::Right => Action::Right,
            Key::Enter => Action::Submit,
            Key::Backspace => Action::Backspace,
            Key::ScrollUp | Key::ScrollDown | Key::Unknown => Action::Ignore,
        },
        Event::Char(ch) => match ch {
            '\x03' => Action::Abort(AbortReason::Interrupt),
            '\x04' => Action::Abort(AbortReason::EndOfInput),
            '\t' => Action::Complete,
            '\r' | '\n' => Action::Submit,
            '\x7f' | '\x08' => Action::Backspace,
            c if is_printable(c) => Action::Insert(c),
            _ => Action::Ignore,
        },
    }
}

/// Whether `ch` fills exactly one cell. Control, zero-width and
/// double-width characters do not.
pub(super) fn is_printable(ch: char) -> bool {
    !ch.is_control() && ch.width() == Some(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_signals_abort() {
        assert_eq!(
            action_for(Event::Resize, false),
            Action::Abort(AbortReason::Resize)
        );
        assert_eq!(
            action_for(Event::Char('\x03'), false),
            Action::Abort(AbortReason::Interrupt)
        );
        assert_eq!(
            action_for(Event::Char('\x04'), false),
            Action::Abort(AbortReason::EndOfInput)
        );
        assert_eq!(
            action_for(Event::Key(Key::EndOfInput), false),
            Action::Abort(AbortReason::EndOfInput)
        );
    }

    #[test]
    fn test_editing_keys() {
        assert_eq!(action_for(Event::Char('\t'), false), Action::Complete);
        assert_eq!(action_for(Event::Key(Key::Up), false), Action::HistoryUp);
        assert_eq!(action_for(Event::Key(Key::Down), false), Action::HistoryDown);
        assert_eq!(action_for(Event::Key(Key::Left), false), Action::Left);
        assert_eq!(action_for(Event::Key(Key::Right), false), Action::Right);
        assert_eq!(action_for(Event::Key(Key::Enter), false), Action::Submit);
        assert_eq!(action_for(Event::Char('\r'), false), Action::Submit);
        assert_eq!(
            action_for(Event::Key(Key::Backspace), false),
            Action::Backspace
        );
        assert_eq!(action_for(Event::Char('\x7f'), false), Action::Backspace);
    }

    #[test]
    fn test_scroll_keys_need_scrolling_enabled() {
        assert_eq!(action_for(Event::Key(Key::ScrollUp), false), Action::Ignore);
        assert_eq!(action_for(Event::Key(Key::ScrollUp), true), Action::ScrollUp);
        assert_eq!(
            action_for(Event::Key(Key::ScrollDown), true),
            Action::ScrollDown
        );
    }

    #[test]
    fn test_printable_and_control_chars() {
        assert_eq!(action_for(Event::Char('a'), false), Action::Insert('a'));
        assert_eq!(action_for(Event::Char('ä'), false), Action::Insert('ä'));
        assert_eq!(action_for(Event::Char(' '), false), Action::Insert(' '));
        assert_eq!(action_for(Event::Char('\x1b'), false), Action::Ignore);
        assert_eq!(action_for(Event::Char('\u{200b}'), false), Action::Ignore);
        assert_eq!(action_for(Event::Char('日'), false), Action::Ignore);
        assert_eq!(action_for(Event::Char('\u{ff21}'), false), Action::Ignore);
        assert_eq!(action_for(Event::Key(Key::Unknown), false), Action::Ignore);
    }
}
