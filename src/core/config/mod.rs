use std::{fmt, io, path::PathBuf};

mod loader;
mod paths;

pub use loader::load_rc;
pub use paths::ConfigPaths;

use crate::flags::Flags;

pub const DEFAULT_PROMPT: &str = "rill$ ";
pub const DEFAULT_HISTORY_SIZE: usize = 1000;

/// Session settings resolved from the command line and the home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: String,
    pub history_size: usize,
    /// `None` with `--norc`, or when there is no home directory.
    pub rc_path: Option<PathBuf>,
    pub history_path: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            prompt: DEFAULT_PROMPT.to_string(),
            history_size: DEFAULT_HISTORY_SIZE,
            rc_path: None,
            history_path: None,
        }
    }
}

impl ShellConfig {
    pub fn from_flags(flags: &Flags) -> Self {
        let paths = match ConfigPaths::new() {
            Ok(paths) => Some(paths),
            Err(e) => {
                tracing::warn!("{}; history and rc file disabled", e);
                None
            }
        };
        Self::with_paths(flags, paths)
    }

    fn with_paths(flags: &Flags, paths: Option<ConfigPaths>) -> Self {
        let rc_path = if flags.is_set("norc") {
            None
        } else if let Some(path) = flags.get_value("rcfile") {
            Some(PathBuf::from(path))
        } else {
            paths.as_ref().map(|p| p.rc_path.clone())
        };

        ShellConfig {
            rc_path,
            history_path: paths.map(|p| p.history_path),
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    HomeDirNotFound,
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HomeDirNotFound => write!(f, "Home directory not found"),
            ConfigError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for ConfigError {}
