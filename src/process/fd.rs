use std::io::{self, Write};
use std::os::fd::{AsRawFd, BorrowedFd, FromRawFd, OwnedFd, RawFd};

use super::ProcessError;

pub const STDIN: RawFd = libc::STDIN_FILENO;
pub const STDOUT: RawFd = libc::STDOUT_FILENO;

/// Creates a pipe as `(read, write)`. Both ends are close-on-exec; the
/// copies that `dup2` puts on 0 or 1 are not.
pub fn pipe() -> Result<(OwnedFd, OwnedFd), ProcessError> {
    let mut fds = [0 as RawFd; 2];
    if unsafe { libc::pipe(fds.as_mut_ptr()) } == -1 {
        return Err(ProcessError::os("pipe", io::Error::last_os_error()));
    }
    let (read, write) = unsafe { (OwnedFd::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1])) };
    set_cloexec(&read).map_err(|e| ProcessError::os("fcntl", e))?;
    set_cloexec(&write).map_err(|e| ProcessError::os("fcntl", e))?;
    Ok((read, write))
}

/// Points `target` at the same open file as `fd`.
pub fn dup2(fd: &OwnedFd, target: RawFd) -> io::Result<()> {
    loop {
        if unsafe { libc::dup2(fd.as_raw_fd(), target) } != -1 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

fn set_cloexec(fd: &OwnedFd) -> io::Result<()> {
    let raw = fd.as_raw_fd();
    let flags = unsafe { libc::fcntl(raw, libc::F_GETFD) };
    if flags == -1 || unsafe { libc::fcntl(raw, libc::F_SETFD, flags | libc::FD_CLOEXEC) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

fn duplicate(fd: RawFd) -> io::Result<OwnedFd> {
    // fd 0 and 1 stay open for the lifetime of the shell.
    unsafe { BorrowedFd::borrow_raw(fd) }.try_clone_to_owned()
}

/// Copies of stdin and stdout, put back on drop.
///
/// Builtins run in the shell process, so their redirections must not
/// outlive the command.
#[derive(Debug)]
pub struct SavedStdio {
    stdin: OwnedFd,
    stdout: OwnedFd,
}

impl SavedStdio {
    pub fn save() -> Result<Self, ProcessError> {
        Ok(Self {
            stdin: duplicate(STDIN).map_err(|e| ProcessError::os("dup", e))?,
            stdout: duplicate(STDOUT).map_err(|e| ProcessError::os("dup", e))?,
        })
    }
}

impl Drop for SavedStdio {
    fn drop(&mut self) {
        // Anything still buffered belongs to the redirected target.
        let _ = io::stdout().flush();
        for (fd, target) in [(&self.stdin, STDIN), (&self.stdout, STDOUT)] {
            if let Err(e) = dup2(fd, target) {
                tracing::error!("could not restore fd {}: {}", target, e);
            }
        }
    }
}
