use std::fmt;

/// Exit status of a command or pipeline, always in `0..=255`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Status(u8);

impl Status {
    pub const SUCCESS: Status = Status(0);
    pub const FAILURE: Status = Status(1);
    pub const MISUSE: Status = Status(2);
    pub const NOT_EXECUTABLE: Status = Status(126);
    pub const NOT_FOUND: Status = Status(127);

    /// Truncates like the kernel does: `256` becomes `0`, `-1` becomes `255`.
    pub fn from_code(code: i64) -> Self {
        Status(code.rem_euclid(256) as u8)
    }

    pub fn from_signal(signal: libc::c_int) -> Self {
        Self::from_code(128 + i64::from(signal))
    }

    /// Decodes a raw status from `waitpid`.
    pub fn from_wait(raw: libc::c_int) -> Self {
        if libc::WIFEXITED(raw) {
            Self::from_code(i64::from(libc::WEXITSTATUS(raw)))
        } else if libc::WIFSIGNALED(raw) {
            Self::from_signal(libc::WTERMSIG(raw))
        } else {
            Status::FAILURE
        }
    }

    pub fn code(self) -> i32 {
        i32::from(self.0)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_wraps() {
        assert_eq!(Status::from_code(0), Status::SUCCESS);
        assert_eq!(Status::from_code(256).code(), 0);
        assert_eq!(Status::from_code(257).code(), 1);
        assert_eq!(Status::from_code(-1).code(), 255);
        assert_eq!(Status::from_code(42).to_string(), "42");
    }

    #[test]
    fn test_signal_offset() {
        assert_eq!(Status::from_signal(libc::SIGKILL).code(), 137);
        assert_eq!(Status::from_signal(libc::SIGINT).code(), 130);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_from_wait_linux_encoding() {
        assert_eq!(Status::from_wait(3 << 8).code(), 3);
        assert_eq!(Status::from_wait(libc::SIGTERM).code(), 128 + libc::SIGTERM);
        // stopped: 0x7f in the low byte
        assert_eq!(Status::from_wait(0x137f), Status::FAILURE);
    }
}
