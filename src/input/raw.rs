use std::io::{self, Read};

use rustyline::error::ReadlineError;

use super::{LineSource, ReadLine};

/// Reads fd 0 directly. `std::io::stdin` buffers, which would hide input
/// from heredoc helpers and children.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawStdin;

impl Read for RawStdin {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = unsafe { libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), buf.len()) };
        if n < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(n as usize)
    }
}

/// Line reader for non-interactive input: no prompt, no history, and never
/// a byte read past the newline.
#[derive(Debug)]
pub struct RawLines<R> {
    reader: R,
}

impl<R: Read> RawLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> LineSource for RawLines<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadLine, ReadlineError> {
        let mut line = Vec::new();
        loop {
            match self.next_byte()? {
                Some(b'\n') => break,
                Some(byte) => line.push(byte),
                None if line.is_empty() => return Ok(ReadLine::Eof),
                None => break,
            }
        }
        Ok(ReadLine::Line(String::from_utf8_lossy(&line).into_owned()))
    }
}
