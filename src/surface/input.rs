use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{Event, Key};

/// Translate a crossterm key event into an editor [`Event`].
///
/// Control-letter chords become their ASCII control codes (Ctrl-C is
/// `'\x03'`), Ctrl-Up/Down become the scroll keys. Key releases and keys the
/// editor has no use for return `None`.
pub fn decode_key(key: KeyEvent) -> Option<Event> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let event = match key.code {
        KeyCode::Char(c) if ctrl => Event::Char(control_code(c)?),
        KeyCode::Char(c) => Event::Char(c),
        KeyCode::Tab => Event::Char('\t'),
        KeyCode::Enter => Event::Key(Key::Enter),
        KeyCode::Backspace => Event::Key(Key::Backspace),
        KeyCode::Up if ctrl => Event::Key(Key::ScrollUp),
        KeyCode::Down if ctrl => Event::Key(Key::ScrollDown),
        KeyCode::Up => Event::Key(Key::Up),
        KeyCode::Down => Event::Key(Key::Down),
        KeyCode::Left => Event::Key(Key::Left),
        KeyCode::Right => Event::Key(Key::Right),
        KeyCode::Esc => Event::Char('\x1b'),
        _ => Event::Key(Key::Unknown),
    };
    Some(event)
}

fn control_code(c: char) -> Option<char> {
    c.is_ascii_alphabetic()
        .then(|| char::from(c.to_ascii_uppercase() as u8 & 0x1f))
}
