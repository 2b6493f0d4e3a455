// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorError)
    clippy::module_name_repetitions
)]

//! # Cursorline
//!
//! A cursor-aware line editor for character-cell terminals.
//!
//! Cursorline reads one line at a time with:
//! - In-place insertion and deletion anywhere in the line
//! - Horizontal scrolling for lines wider than the window
//! - Per-session history browsing
//! - Prefix completion with a numbered picker for ambiguous words
//! - Optional scrollback over rows that left the top of the screen
//!
//! ## Architecture
//!
//! The editor never touches the terminal itself:
//! - **Buffer**: characters plus a cursor index, no screen knowledge
//! - **Session**: keeps the buffer and the on-screen row in step
//! - **Surface**: the cell grid the session draws on
//! - **Events**: where keys come from
//!
//! ## Modules
//!
//! - [`editor`]: Cursor buffer, history and completion
//! - [`session`]: The line editor state machine
//! - [`surface`]: Drawing and input collaborators, crossterm backend
//! - [`ui`]: Completion menu
//! - [`config`]: Persistent default flags

pub mod config;
pub mod editor;
pub mod error;
pub mod session;
pub mod surface;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::editor::CursorBuffer;
    pub use crate::error::EditorError;
    pub use crate::session::{AbortReason, LineEditor, Outcome, ReadOptions};
    pub use crate::surface::{EventSource, MemorySurface, ScriptedEvents, Surface};
}
