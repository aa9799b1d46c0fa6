use std::{fs, io, path::Path};

use super::ConfigError;

/// Reads the start-up file at `path` and returns the lines worth running:
/// blank lines and `#` comments are dropped. A missing file has no lines.
pub fn load_rc(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    Ok(content
        .lines()
        .filter(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_skips_blank_and_comments() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join(".rillrc");
        fs::write(&path, "# greeting\nexport A=1\n\n   \n  # indented\necho $A | cat\n")?;

        assert_eq!(load_rc(&path)?, vec!["export A=1", "echo $A | cat"]);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_empty() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        assert!(load_rc(&dir.path().join("absent"))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_directory_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        assert!(matches!(load_rc(dir.path()), Err(ConfigError::Io { .. })));
        Ok(())
    }
}
