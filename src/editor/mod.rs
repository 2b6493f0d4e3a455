//! Line-editing state that is independent of any screen.
//!
//! Provides the cursor-tracking character buffer, history browsing and
//! prefix completion used by the [`session`](crate::session) line editor.

mod buffer;
mod completion;
mod history;

pub use buffer::{BufferError, CursorBuffer};
pub use completion::{Completer, Completion, current_word};
pub use history::HistoryBrowser;
