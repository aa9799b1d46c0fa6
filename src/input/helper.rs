use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use inksac::prelude::*;
use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

use crate::core::commands::Builtin;

/// Completion and prompt colouring for the line editor.
pub struct ShellHelper {
    search_path: Option<String>,
    commands: BTreeSet<String>,
    color_support: ColorSupport,
}

impl ShellHelper {
    pub fn new(search_path: Option<&str>) -> Self {
        Self {
            search_path: search_path.map(str::to_string),
            commands: scan_commands(search_path),
            color_support: check_color_support().unwrap_or(ColorSupport::NoColor),
        }
    }

    /// Follows the shell's `PATH`; rescans only when it changed.
    pub fn set_search_path(&mut self, search_path: Option<&str>) {
        if self.search_path.as_deref() == search_path {
            return;
        }
        tracing::debug!(path = ?search_path, "rescanning commands for completion");
        self.search_path = search_path.map(str::to_string);
        self.commands = scan_commands(search_path);
    }

    fn complete_command(&self, prefix: &str) -> Vec<Pair> {
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect()
    }

    fn complete_path(&self, prefix: &str) -> Vec<Pair> {
        let (dir, file_prefix) = match prefix.rfind('/') {
            Some(idx) => (&prefix[..=idx], &prefix[idx + 1..]),
            None => ("", prefix),
        };
        let search = if dir.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(dir)
        };

        let Ok(entries) = fs::read_dir(&search) else {
            return Vec::new();
        };
        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(file_prefix) || (name.starts_with('.') && file_prefix.is_empty()) {
                    return None;
                }
                let full = format!("{}{}", dir, name);
                Some(if Path::new(&full).is_dir() {
                    Pair {
                        display: format!("{}/", name),
                        replacement: format!("{}/", full),
                    }
                } else {
                    Pair {
                        display: name,
                        replacement: format!("{} ", full),
                    }
                })
            })
            .collect();
        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

fn scan_commands(search_path: Option<&str>) -> BTreeSet<String> {
    let mut commands: BTreeSet<String> =
        Builtin::ALL.iter().map(|b| b.name().to_string()).collect();
    for dir in search_path.unwrap_or_default().split(':').filter(|d| !d.is_empty()) {
        let Ok(entries) = fs::read_dir(dir) else {
            continue;
        };
        for entry in entries.filter_map(Result::ok) {
            let is_file = entry
                .file_type()
                .map(|t| t.is_file() || t.is_symlink())
                .unwrap_or(false);
            if let (true, Some(name)) = (is_file, entry.file_name().to_str()) {
                commands.insert(name.to_string());
            }
        }
    }
    commands
}

/// Start of the word under the cursor, and whether it is the command name.
fn current_word(line: &str) -> (usize, bool) {
    let start = line
        .rfind(|c: char| c == ' ' || c == '\t' || c == '|' || c == '<' || c == '>')
        .map(|idx| idx + 1)
        .unwrap_or(0);
    let before = line[..start].trim_end_matches([' ', '\t']);
    let is_command = before.is_empty() || before.ends_with('|');
    (start, is_command)
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let (start, is_command) = current_word(line);
        let word = &line[start..];
        let matches = if is_command && !word.contains('/') {
            self.complete_command(word)
        } else {
            self.complete_path(word)
        };
        Ok((start, matches))
    }
}

impl Highlighter for ShellHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return Cow::Borrowed(prompt);
        }
        let style = Style::builder().foreground(Color::Cyan).bold().build();
        Cow::Owned(prompt.style(style).to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        false
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Validator for ShellHelper {}
