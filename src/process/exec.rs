use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use super::{os_error_text, ProcessError, Status};

/// Everything `execve` needs, converted before the fork so the child only
/// has to make the call.
#[derive(Debug)]
pub struct ExecImage {
    path: CString,
    _argv: Vec<CString>,
    _envp: Vec<CString>,
    argv_ptrs: Vec<*const libc::c_char>,
    envp_ptrs: Vec<*const libc::c_char>,
}

impl ExecImage {
    pub fn new(path: &Path, args: &[String], env: &[String]) -> Result<Self, ProcessError> {
        let path = CString::new(path.as_os_str().as_bytes())
            .map_err(|_| ProcessError::InvalidArgument(path.display().to_string()))?;
        let argv = to_cstrings(args)?;
        let envp = to_cstrings(env)?;
        let argv_ptrs = null_terminated(&argv);
        let envp_ptrs = null_terminated(&envp);

        Ok(Self {
            path,
            _argv: argv,
            _envp: envp,
            argv_ptrs,
            envp_ptrs,
        })
    }

    /// Replaces the process image. Only returns on failure.
    pub fn exec(&self) -> io::Error {
        unsafe {
            libc::execve(
                self.path.as_ptr(),
                self.argv_ptrs.as_ptr(),
                self.envp_ptrs.as_ptr(),
            );
        }
        io::Error::last_os_error()
    }
}

fn to_cstrings(values: &[String]) -> Result<Vec<CString>, ProcessError> {
    values
        .iter()
        .map(|value| {
            CString::new(value.as_bytes())
                .map_err(|_| ProcessError::InvalidArgument(value.clone()))
        })
        .collect()
}

fn null_terminated(values: &[CString]) -> Vec<*const libc::c_char> {
    values
        .iter()
        .map(|value| value.as_ptr())
        .chain(std::iter::once(ptr::null()))
        .collect()
}

/// Status and message for a failed `execve` of `name`.
pub fn failure(name: &str, err: &io::Error) -> (Status, String) {
    match err.raw_os_error() {
        Some(libc::EACCES) => (Status::NOT_EXECUTABLE, format!("{}: Permission denied", name)),
        Some(libc::EISDIR) => (Status::NOT_EXECUTABLE, format!("{}: Is a directory", name)),
        Some(libc::ENOENT) if name.contains('/') => (
            Status::NOT_FOUND,
            format!("{}: No such file or directory", name),
        ),
        Some(libc::ENOENT) => (Status::NOT_FOUND, format!("{}: command not found", name)),
        _ => (Status::NOT_EXECUTABLE, format!("{}: {}", name, os_error_text(err))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_mapping() {
        let denied = io::Error::from_raw_os_error(libc::EACCES);
        assert_eq!(
            failure("./x", &denied),
            (Status::NOT_EXECUTABLE, "./x: Permission denied".to_string())
        );

        let missing = io::Error::from_raw_os_error(libc::ENOENT);
        assert_eq!(failure("ls", &missing).0, Status::NOT_FOUND);
        assert_eq!(failure("ls", &missing).1, "ls: command not found");
        assert_eq!(failure("/no/ls", &missing).1, "/no/ls: No such file or directory");

        let format = io::Error::from_raw_os_error(libc::ENOEXEC);
        assert_eq!(failure("bin", &format).0, Status::NOT_EXECUTABLE);
    }

    #[test]
    fn test_image_rejects_interior_nul() {
        let args = vec!["a\0b".to_string()];
        assert!(matches!(
            ExecImage::new(Path::new("/bin/true"), &args, &[]),
            Err(ProcessError::InvalidArgument(_))
        ));
        assert!(ExecImage::new(Path::new("/bin/true"), &["true".to_string()], &[]).is_ok());
    }
}
