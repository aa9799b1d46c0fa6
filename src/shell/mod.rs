use std::io::{self, Write};

mod executor;

use crate::{
    core::{
        config::{load_rc, ShellConfig},
        env::Environment,
    },
    error::ShellError,
    input::{self, LineSource, ReadLine},
    process::{Signals, Status},
};

use executor::LineHandler;

pub struct Shell {
    pub(crate) input: Box<dyn LineSource>,
    pub(crate) env: Environment,
    pub(crate) status: Status,
    pub(crate) signals: Signals,
    pub(crate) config: ShellConfig,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Result<Self, ShellError> {
        let signals = Signals::install()?;
        let input = input::open(&config)?;
        Ok(Self::with_input(input, config, signals))
    }

    pub fn with_input(input: Box<dyn LineSource>, config: ShellConfig, signals: Signals) -> Self {
        Shell {
            input,
            env: Environment::from_process(),
            status: Status::SUCCESS,
            signals,
            config,
        }
    }

    /// Runs the start-up file, then the read loop. Returns the status the
    /// process should exit with.
    pub fn run(&mut self) -> Result<Status, ShellError> {
        if let Some(status) = self.run_rc() {
            return Ok(status);
        }

        loop {
            let interactive = self.input.is_interactive();
            if self.signals.take_interrupt() && interactive {
                println!();
            }

            self.input.set_search_path(self.env.get("PATH"));
            let prompt = if interactive { self.config.prompt.as_str() } else { "" };
            match self.input.read_line(prompt)? {
                ReadLine::Line(line) => {
                    if let Some(status) = self.execute_line(&line, true) {
                        return Ok(status);
                    }
                }
                ReadLine::Interrupted => continue,
                ReadLine::Eof => {
                    println!("exit");
                    let _ = io::stdout().flush();
                    return Ok(self.status);
                }
            }
        }
    }

    fn run_rc(&mut self) -> Option<Status> {
        let path = self.config.rc_path.clone()?;
        let lines = match load_rc(&path) {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!("skipping start-up file: {}", e);
                return None;
            }
        };

        tracing::debug!(path = %path.display(), lines = lines.len(), "running start-up file");
        lines
            .iter()
            .find_map(|line| self.execute_line(line, false))
    }

    pub fn status(&self) -> Status {
        self.status
    }
}
