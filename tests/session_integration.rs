use cursorline::prelude::*;
use cursorline::surface::{Event, Key};

fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

#[test]
fn test_shell_like_run_of_sessions() {
    let mut surface = MemorySurface::new(6, 30);
    let mut editor = LineEditor::new()
        .with_prompt("$ ")
        .with_banner("Welcome")
        .with_completions(["help", "history", "exit"]);
    editor.begin(&mut surface).unwrap();

    let mut events = ScriptedEvents::typed("ec\x7fcho hi\r");
    let outcome = editor
        .read_line(&mut surface, &mut events, ReadOptions::default())
        .unwrap();
    assert_eq!(outcome, Outcome::Committed("echo hi".to_string()));
    editor.newline(&mut surface).unwrap();
    editor.write_line(&mut surface, "hi").unwrap();

    let mut events = ScriptedEvents::typed("hi\t\r");
    let outcome = editor
        .read_line(&mut surface, &mut events, ReadOptions::default())
        .unwrap();
    assert_eq!(outcome, Outcome::Committed("history".to_string()));

    assert_eq!(surface.line(0), pad("Welcome", 30));
    assert_eq!(surface.line(2), pad("$ echo hi", 30));
    assert_eq!(surface.line(3), pad("hi", 30));
    assert_eq!(surface.line(4), pad("$ history", 30));
    assert_eq!(editor.history(), ["echo hi", "history"]);
}

#[test]
fn test_ambiguous_completion_through_numbered_menu() {
    let mut surface = MemorySurface::new(20, 40);
    let mut editor = LineEditor::new()
        .with_prompt("> ")
        .with_completions(["help", "hello", "helm"]);
    editor.begin(&mut surface).unwrap();

    // "hel" is shared by all three; the menu answer "2" picks "hello".
    let mut events = ScriptedEvents::typed("hel\t2\r\r");
    let outcome = editor
        .read_line(&mut surface, &mut events, ReadOptions::default())
        .unwrap();

    assert_eq!(outcome, Outcome::Committed("hello".to_string()));
    assert_eq!(surface.line(0), pad("> hello", 40));
    for row in 1..20 {
        assert_eq!(surface.line(row), pad("", 40), "row {row} not restored");
    }
}

#[test]
fn test_interrupted_menu_keeps_the_word() {
    let mut surface = MemorySurface::new(20, 40);
    let mut editor = LineEditor::new()
        .with_prompt("> ")
        .with_completions(["help", "hello"]);
    editor.begin(&mut surface).unwrap();

    let mut events = ScriptedEvents::typed("hel\t\x03!\r");
    let outcome = editor
        .read_line(&mut surface, &mut events, ReadOptions::default())
        .unwrap();
    assert_eq!(outcome, Outcome::Committed("hel!".to_string()));
}

#[test]
fn test_history_survives_across_sessions() {
    let mut surface = MemorySurface::new(5, 20);
    let mut editor = LineEditor::new();
    editor.begin(&mut surface).unwrap();

    for line in ["first\r", "second\r"] {
        let mut events = ScriptedEvents::typed(line);
        editor
            .read_line(&mut surface, &mut events, ReadOptions::default())
            .unwrap();
        editor.newline(&mut surface).unwrap();
    }

    let mut events = ScriptedEvents::new([
        Event::Key(Key::Up),
        Event::Key(Key::Up),
        Event::Key(Key::Enter),
    ]);
    let outcome = editor
        .read_line(&mut surface, &mut events, ReadOptions::default())
        .unwrap();
    assert_eq!(outcome, Outcome::Committed("first".to_string()));
    assert_eq!(editor.history(), ["first", "second", "first"]);
}

#[test]
fn test_resize_then_begin_again() {
    let mut surface = MemorySurface::new(5, 20);
    let mut editor = LineEditor::new().with_border(true);
    editor.begin(&mut surface).unwrap();

    let mut events = ScriptedEvents::typed("abc").then(Event::Resize);
    let outcome = editor
        .read_line(&mut surface, &mut events, ReadOptions::default())
        .unwrap();
    assert_eq!(outcome, Outcome::Aborted(AbortReason::Resize));

    surface.resize(8, 30);
    surface.clear();
    editor.begin(&mut surface).unwrap();
    assert_eq!(surface.line(0), format!("┌{}┐", "─".repeat(28)));
    assert_eq!(surface.cursor(), (1, 1));

    let mut events = ScriptedEvents::typed("xyz\r");
    let outcome = editor
        .read_line(&mut surface, &mut events, ReadOptions::default())
        .unwrap();
    assert_eq!(outcome, Outcome::Committed("xyz".to_string()));
    assert_eq!(surface.line(1), format!("│{:<28}│", "$ xyz"));
}
