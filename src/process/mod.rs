use std::fmt;
use std::io;

mod exec;
pub mod executor;
pub mod fd;
pub mod fork;
mod heredoc;
pub mod redirect;
pub mod resolve;
pub mod signal;
mod status;

pub use executor::{Executor, Outcome};
pub use resolve::ResolveError;
pub use signal::{SignalState, Signals};
pub use status::Status;

#[derive(Debug)]
pub enum ProcessError {
    Resolve(ResolveError),
    Redirect { target: String, source: io::Error },
    Os { call: &'static str, source: io::Error },
    InvalidArgument(String),
}

impl ProcessError {
    pub fn os(call: &'static str, source: io::Error) -> Self {
        ProcessError::Os { call, source }
    }

    pub fn status(&self) -> Status {
        match self {
            ProcessError::Resolve(e) => e.status(),
            _ => Status::FAILURE,
        }
    }
}

impl From<ResolveError> for ProcessError {
    fn from(e: ResolveError) -> Self {
        ProcessError::Resolve(e)
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Resolve(e) => write!(f, "{}", e),
            ProcessError::Redirect { target, source } => {
                write!(f, "{}: {}", target, os_error_text(source))
            }
            ProcessError::Os { call, source } => write!(f, "{}: {}", call, os_error_text(source)),
            ProcessError::InvalidArgument(arg) => write!(f, "{}: invalid argument", arg),
        }
    }
}

impl std::error::Error for ProcessError {}

/// The `strerror` text of an OS error, without the "(os error N)" suffix.
pub fn os_error_text(err: &io::Error) -> String {
    let text = err.to_string();
    match text.find(" (os error") {
        Some(idx) => text[..idx].to_string(),
        None => text,
    }
}
