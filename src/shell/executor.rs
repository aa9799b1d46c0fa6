use crate::process::{Executor, Outcome, Status};
use crate::syntax;

/// Runs one raw input line through lex, expand, compact, parse and execute.
pub(crate) trait LineHandler {
    /// Returns the exit status when the line ran `exit`.
    fn execute_line(&mut self, line: &str, record_history: bool) -> Option<Status>;
}

impl LineHandler for super::Shell {
    fn execute_line(&mut self, line: &str, record_history: bool) -> Option<Status> {
        let mut tokens = match syntax::tokenize(line) {
            Ok(tokens) => tokens,
            Err(e) => {
                if record_history && !line.is_empty() {
                    self.input.add_history(line);
                }
                eprintln!("rill: {}", e);
                return None;
            }
        };

        syntax::expand(&mut tokens, &self.env, self.status);
        syntax::compact(&mut tokens);
        if tokens.is_empty() {
            return None;
        }
        if record_history {
            self.input.add_history(line);
        }

        let command = syntax::parse(&tokens)?;
        tracing::debug!(?command, "parsed");

        let outcome = Executor::new(&mut self.env, self.input.as_mut(), &self.signals).execute(&command);
        self.status = outcome.status();
        match outcome {
            Outcome::Continue(_) => None,
            Outcome::Exit(status) => Some(status),
        }
    }
}
