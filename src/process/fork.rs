use std::io::{self, Write};

use super::{ProcessError, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fork {
    Child,
    Parent(libc::pid_t),
}

/// Forks the shell. Buffered output is flushed first so it is not
/// written twice.
pub fn fork() -> Result<Fork, ProcessError> {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();

    match unsafe { libc::fork() } {
        -1 => Err(ProcessError::os("fork", io::Error::last_os_error())),
        0 => Ok(Fork::Child),
        pid => {
            tracing::debug!(pid, "forked");
            Ok(Fork::Parent(pid))
        }
    }
}

/// Blocks until `pid` terminates.
pub fn wait(pid: libc::pid_t) -> Result<Status, ProcessError> {
    let mut raw = 0;
    loop {
        if unsafe { libc::waitpid(pid, &mut raw, 0) } != -1 {
            let status = Status::from_wait(raw);
            tracing::debug!(pid, %status, "reaped");
            return Ok(status);
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(ProcessError::os("waitpid", err));
        }
    }
}

/// Ends a forked child without running the parent's exit handlers.
pub fn exit_child(status: Status) -> ! {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
    unsafe { libc::_exit(status.code()) }
}
