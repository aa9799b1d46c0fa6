mod editor;
mod helper;
mod raw;

use rustyline::error::ReadlineError;

pub use editor::LineEditor;
pub use helper::ShellHelper;
pub use raw::{RawLines, RawStdin};

use crate::core::config::ShellConfig;

/// One request to the line-input service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadLine {
    /// A line without its terminating newline.
    Line(String),
    /// The user pressed ^C while editing.
    Interrupted,
    Eof,
}

pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadLine, ReadlineError>;

    fn add_history(&mut self, _line: &str) {}

    /// Completion follows this `PATH`, updated before every prompt.
    fn set_search_path(&mut self, _search_path: Option<&str>) {}

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Picks the line editor for a terminal, and the raw reader for anything else.
pub fn open(config: &ShellConfig) -> Result<Box<dyn LineSource>, ReadlineError> {
    if unsafe { libc::isatty(libc::STDIN_FILENO) } == 1 {
        tracing::debug!("stdin is a terminal, using the line editor");
        Ok(Box::new(LineEditor::new(config)?))
    } else {
        Ok(Box::new(RawLines::new(RawStdin)))
    }
}
