use crate::process::ProcessError;

/// Failures that stop the shell before its read loop starts.
#[derive(Debug)]
pub enum ShellError {
    Readline(rustyline::error::ReadlineError),
    Flag(String),
    Process(ProcessError),
}

impl From<rustyline::error::ReadlineError> for ShellError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ShellError::Readline(err)
    }
}

impl From<ProcessError> for ShellError {
    fn from(err: ProcessError) -> Self {
        ShellError::Process(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Readline(e) => write!(f, "line editor: {}", e),
            ShellError::Flag(msg) => write!(f, "{}", msg),
            ShellError::Process(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ShellError {}
