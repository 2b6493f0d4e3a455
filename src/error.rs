//! Error types for the line editor.

use thiserror::Error;

use crate::editor::BufferError;

/// Failures that end an editing session abnormally.
///
/// Resize, interrupt and end-of-input are not errors; they arrive as
/// [`Outcome::Aborted`](crate::session::Outcome::Aborted).
#[derive(Debug, Error)]
pub enum EditorError {
    /// Reading input or writing to the display failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The buffer rejected an edit the editor considered valid.
    #[error("buffer out of sync with the screen: {0}")]
    Buffer(#[from] BufferError),
}

pub type Result<T> = std::result::Result<T, EditorError>;
