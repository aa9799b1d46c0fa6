use std::ffi::CString;
use std::fmt;
use std::fs;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use super::{os_error_text, Status};
use crate::core::env::Environment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// `with_path` tells a missing file (`./x`) from an unknown command (`x`).
    NotFound { name: String, with_path: bool },
    IsDirectory(String),
    PermissionDenied(String),
    /// The path exists in part but cannot be used, e.g. `/etc/passwd/x`.
    Unusable { name: String, reason: String },
}

impl ResolveError {
    pub fn status(&self) -> Status {
        match self {
            ResolveError::NotFound { .. } => Status::NOT_FOUND,
            ResolveError::IsDirectory(_)
            | ResolveError::PermissionDenied(_)
            | ResolveError::Unusable { .. } => Status::NOT_EXECUTABLE,
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NotFound {
                name,
                with_path: true,
            } => write!(f, "{}: No such file or directory", name),
            ResolveError::NotFound { name, .. } => write!(f, "{}: command not found", name),
            ResolveError::IsDirectory(name) => write!(f, "{}: Is a directory", name),
            ResolveError::PermissionDenied(name) => write!(f, "{}: Permission denied", name),
            ResolveError::Unusable { name, reason } => write!(f, "{}: {}", name, reason),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Finds the file to execute for command `name`.
///
/// A name containing `/` is used as is. Otherwise each `PATH` entry is
/// tried in order, an empty entry meaning the current directory.
pub fn resolve(name: &str, env: &Environment) -> Result<PathBuf, ResolveError> {
    if name.contains('/') {
        return check_explicit(name);
    }

    let not_found = ResolveError::NotFound {
        name: name.to_string(),
        with_path: false,
    };
    let search = match env.get("PATH") {
        Some(search) if !search.is_empty() && !name.is_empty() => search,
        _ => return Err(not_found),
    };

    let mut denied = false;
    for dir in search.split(':') {
        let candidate = if dir.is_empty() {
            Path::new(".").join(name)
        } else {
            Path::new(dir).join(name)
        };
        match fs::metadata(&candidate) {
            Ok(meta) if meta.is_file() => {
                if is_executable(&candidate) {
                    tracing::debug!(path = %candidate.display(), "resolved {}", name);
                    return Ok(candidate);
                }
                denied = true;
            }
            _ => {}
        }
    }

    if denied {
        Err(ResolveError::PermissionDenied(name.to_string()))
    } else {
        Err(not_found)
    }
}

fn check_explicit(name: &str) -> Result<PathBuf, ResolveError> {
    let path = PathBuf::from(name);
    let meta = fs::metadata(&path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ResolveError::NotFound {
            name: name.to_string(),
            with_path: true,
        },
        _ => ResolveError::Unusable {
            name: name.to_string(),
            reason: os_error_text(&err),
        },
    })?;
    if meta.is_dir() {
        return Err(ResolveError::IsDirectory(name.to_string()));
    }
    if !is_executable(&path) {
        return Err(ResolveError::PermissionDenied(name.to_string()));
    }
    Ok(path)
}

fn is_executable(path: &Path) -> bool {
    match CString::new(path.as_os_str().as_bytes()) {
        Ok(c_path) => unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 },
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, mode: u32) -> std::io::Result<PathBuf> {
        let path = dir.path().join(name);
        fs::write(&path, "#!/bin/sh\n")?;
        fs::set_permissions(&path, fs::Permissions::from_mode(mode))?;
        Ok(path)
    }

    fn env_with_path(path: &str) -> Environment {
        Environment::from_pairs([("PATH".to_string(), path.to_string())])
    }

    #[test]
    fn test_first_executable_match_wins() -> std::io::Result<()> {
        let first = TempDir::new()?;
        let second = TempDir::new()?;
        let expected = write_file(&first, "tool", 0o755)?;
        write_file(&second, "tool", 0o755)?;

        let search = format!("{}:{}", first.path().display(), second.path().display());
        assert_eq!(resolve("tool", &env_with_path(&search)), Ok(expected));
        Ok(())
    }

    #[test]
    fn test_skips_directories_and_non_executables() -> std::io::Result<()> {
        let first = TempDir::new()?;
        let second = TempDir::new()?;
        fs::create_dir(first.path().join("tool"))?;
        let expected = write_file(&second, "tool", 0o755)?;

        let search = format!("{}:{}", first.path().display(), second.path().display());
        assert_eq!(resolve("tool", &env_with_path(&search)), Ok(expected));
        Ok(())
    }

    #[test]
    fn test_unset_or_empty_path_is_not_found() {
        let err = resolve("ls", &Environment::new());
        assert_eq!(err.as_ref().map_err(ResolveError::status), Err(Status::NOT_FOUND));
        assert!(resolve("ls", &env_with_path("")).is_err());
    }

    #[test]
    fn test_explicit_paths() -> std::io::Result<()> {
        let dir = TempDir::new()?;
        let dir_name = dir.path().display().to_string();
        assert_eq!(
            resolve(&dir_name, &Environment::new()),
            Err(ResolveError::IsDirectory(dir_name.clone()))
        );

        let missing = format!("{}/missing", dir_name);
        let err = resolve(&missing, &Environment::new());
        assert_eq!(err.as_ref().map_err(ResolveError::status), Err(Status::NOT_FOUND));
        assert_eq!(
            err.map_err(|e| e.to_string()),
            Err(format!("{}: No such file or directory", missing))
        );

        let script = write_file(&dir, "run", 0o755)?;
        let name = script.display().to_string();
        assert_eq!(resolve(&name, &Environment::new()), Ok(script));
        Ok(())
    }

    #[test]
    fn test_file_used_as_directory() -> std::io::Result<()> {
        let dir = TempDir::new()?;
        let script = write_file(&dir, "plain", 0o755)?;
        let name = format!("{}/x", script.display());

        let err = resolve(&name, &Environment::new());
        assert_eq!(err.as_ref().map_err(ResolveError::status), Err(Status::NOT_EXECUTABLE));
        assert_eq!(
            err.map_err(|e| e.to_string()),
            Err(format!("{}: Not a directory", name))
        );
        Ok(())
    }

    #[test]
    fn test_empty_entry_is_cwd() {
        // Tests run from the package root, where Cargo.toml is a plain file.
        assert_eq!(
            resolve("Cargo.toml", &env_with_path(":/nonexistent")),
            Err(ResolveError::PermissionDenied("Cargo.toml".to_string()))
        );
        assert_eq!(
            resolve("Cargo.toml", &env_with_path("/nonexistent")),
            Err(ResolveError::NotFound {
                name: "Cargo.toml".to_string(),
                with_path: false,
            })
        );
    }

    #[test]
    fn test_non_executable_only_is_denied() -> std::io::Result<()> {
        let first = TempDir::new()?;
        let second = TempDir::new()?;
        write_file(&first, "tool", 0o644)?;

        let search = format!("{}:{}", first.path().display(), second.path().display());
        let err = resolve("tool", &env_with_path(&search));
        assert_eq!(err, Err(ResolveError::PermissionDenied("tool".to_string())));
        assert_eq!(err.map_err(|e| e.status()), Err(Status::NOT_EXECUTABLE));
        Ok(())
    }

    #[test]
    fn test_unknown_command_message() {
        let err = resolve("definitely-not-a-command", &env_with_path("/nonexistent"));
        assert_eq!(
            err.map_err(|e| e.to_string()),
            Err("definitely-not-a-command: command not found".to_string())
        );
    }
}
