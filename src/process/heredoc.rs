use std::fs::File;
use std::io::Write;
use std::os::fd::OwnedFd;

use super::fork::{self, Fork};
use super::{fd, ProcessError, Signals, Status};
use crate::input::{LineSource, ReadLine};

pub const PROMPT: &str = "> ";

/// Collects a heredoc body in a helper process and returns the read end of
/// the pipe holding it.
pub fn collect(
    delimiter: &str,
    input: &mut dyn LineSource,
    signals: &Signals,
) -> Result<OwnedFd, ProcessError> {
    let (read, write) = fd::pipe()?;

    match fork::fork()? {
        Fork::Child => {
            signals.child_default();
            drop(read);
            let status = feed(delimiter, input, File::from(write));
            fork::exit_child(status)
        }
        Fork::Parent(pid) => {
            drop(write);
            let _wait = signals.foreground();
            // The body is whatever reached the pipe, even if the helper died.
            if let Err(e) = fork::wait(pid) {
                tracing::warn!("heredoc helper: {}", e);
            }
            Ok(read)
        }
    }
}

fn feed(delimiter: &str, input: &mut dyn LineSource, mut sink: File) -> Status {
    loop {
        match input.read_line(PROMPT) {
            Ok(ReadLine::Line(line)) if line == delimiter => return Status::SUCCESS,
            Ok(ReadLine::Line(line)) => {
                if writeln!(sink, "{}", line).is_err() {
                    return Status::FAILURE;
                }
            }
            Ok(ReadLine::Eof) => return Status::SUCCESS,
            Ok(ReadLine::Interrupted) => return Status::from_signal(libc::SIGINT),
            Err(e) => {
                tracing::warn!("heredoc input: {}", e);
                return Status::FAILURE;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RawLines;
    use std::io::{Cursor, Read, Seek};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_feed_stops_at_delimiter() -> TestResult {
        let mut input = RawLines::new(Cursor::new(b"one\n  two\nEOF\nafter\n".to_vec()));
        let mut file = tempfile::tempfile()?;
        let status = feed("EOF", &mut input, file.try_clone()?);
        assert_eq!(status, Status::SUCCESS);

        let mut body = String::new();
        file.rewind()?;
        file.read_to_string(&mut body)?;
        assert_eq!(body, "one\n  two\n");
        assert_eq!(input.read_line("")?, ReadLine::Line("after".into()));
        Ok(())
    }

    #[test]
    fn test_feed_ends_at_eof_and_matches_exactly() -> TestResult {
        let mut input = RawLines::new(Cursor::new(b"EOF \nx".to_vec()));
        let mut file = tempfile::tempfile()?;
        assert_eq!(feed("EOF", &mut input, file.try_clone()?), Status::SUCCESS);

        let mut body = String::new();
        file.rewind()?;
        file.read_to_string(&mut body)?;
        assert_eq!(body, "EOF \nx\n");
        Ok(())
    }
}
