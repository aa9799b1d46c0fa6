use std::path::{Path, PathBuf};

use super::ConfigError;

pub const RC_FILE: &str = ".rillrc";
pub const HISTORY_FILE: &str = ".rill_history";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
    pub history_path: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(Self::in_dir(&home))
    }

    pub fn in_dir(home: &Path) -> Self {
        ConfigPaths {
            rc_path: home.join(RC_FILE),
            history_path: home.join(HISTORY_FILE),
        }
    }
}
