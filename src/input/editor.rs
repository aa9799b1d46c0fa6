use std::path::PathBuf;

use rustyline::{error::ReadlineError, history::FileHistory, Config, Editor};

use super::{LineSource, ReadLine, ShellHelper};
use crate::core::config::ShellConfig;

/// The interactive line-input service.
pub struct LineEditor {
    editor: Editor<ShellHelper, FileHistory>,
    history_path: Option<PathBuf>,
}

impl LineEditor {
    pub fn new(config: &ShellConfig) -> Result<Self, ReadlineError> {
        let rl_config = Config::builder()
            .max_history_size(config.history_size)?
            .auto_add_history(false)
            .build();

        let mut editor = Editor::<ShellHelper, FileHistory>::with_config(rl_config)?;
        editor.set_helper(Some(ShellHelper::new(None)));

        let history_path = config.history_path.clone();
        if let Some(path) = history_path.as_deref().filter(|path| path.exists()) {
            if let Err(e) = editor.load_history(path) {
                tracing::warn!("could not load history from {}: {}", path.display(), e);
            }
        }

        Ok(Self {
            editor,
            history_path,
        })
    }
}

impl LineSource for LineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadLine, ReadlineError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadLine::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadLine::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadLine::Eof),
            Err(e) => Err(e),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            tracing::warn!("could not add history entry: {}", e);
            return;
        }
        if let Some(path) = &self.history_path {
            if let Err(e) = self.editor.append_history(path) {
                tracing::warn!("could not write history to {}: {}", path.display(), e);
            }
        }
    }

    fn set_search_path(&mut self, search_path: Option<&str>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.set_search_path(search_path);
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
