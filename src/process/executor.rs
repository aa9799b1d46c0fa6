use std::io::{self, Write};
use std::os::fd::{OwnedFd, RawFd};

use super::exec::{self, ExecImage};
use super::fd::{self, SavedStdio, STDIN, STDOUT};
use super::fork::{self, Fork};
use super::resolve::resolve;
use super::{os_error_text, redirect, ProcessError, Signals, Status};
use crate::core::commands::{Builtin, Command as _, CommandError, Context};
use crate::core::env::Environment;
use crate::input::LineSource;
use crate::syntax::{Command, SimpleCommand};

/// How evaluating a command tree ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue(Status),
    /// The `exit` builtin ran in the shell process.
    Exit(Status),
}

impl Outcome {
    pub fn status(self) -> Status {
        match self {
            Outcome::Continue(status) | Outcome::Exit(status) => status,
        }
    }
}

pub struct Executor<'a> {
    env: &'a mut Environment,
    input: &'a mut dyn LineSource,
    signals: &'a Signals,
}

impl<'a> Executor<'a> {
    pub fn new(env: &'a mut Environment, input: &'a mut dyn LineSource, signals: &'a Signals) -> Self {
        Self {
            env,
            input,
            signals,
        }
    }

    pub fn execute(&mut self, command: &Command) -> Outcome {
        match command {
            Command::Simple(simple) => self.simple(simple),
            Command::Pipe(left, right) => Outcome::Continue(report(self.pipeline(left, right))),
        }
    }

    fn simple(&mut self, command: &SimpleCommand) -> Outcome {
        let Some(name) = command.name() else {
            return Outcome::Continue(Status::SUCCESS);
        };
        match Builtin::lookup(name) {
            Some(builtin) => self.builtin(builtin, command),
            None => Outcome::Continue(report(self.external(command))),
        }
    }

    fn builtin(&mut self, builtin: Builtin, command: &SimpleCommand) -> Outcome {
        // Declared first so it is dropped last, after the output is flushed.
        let _saved = if command.redirections.is_empty() {
            None
        } else {
            let saved = match SavedStdio::save() {
                Ok(saved) => saved,
                Err(e) => return Outcome::Continue(report(Err(e))),
            };
            if let Err(e) = redirect::apply(&command.redirections, &mut *self.input, self.signals) {
                return Outcome::Continue(report(Err(e)));
            }
            Some(saved)
        };

        let stdout = io::stdout();
        let stderr = io::stderr();
        let mut out = stdout.lock();
        let mut err = stderr.lock();
        let result = builtin.execute(
            &command.args[1..],
            &mut Context {
                env: &mut *self.env,
                out: &mut out,
                err: &mut err,
            },
        );
        let _ = out.flush();

        match result {
            Ok(status) => Outcome::Continue(status),
            Err(CommandError::Exit(status)) => Outcome::Exit(status),
            Err(e) => {
                let _ = writeln!(err, "rill: {}: {}", builtin.name(), e);
                Outcome::Continue(e.status())
            }
        }
    }

    fn external(&mut self, command: &SimpleCommand) -> Result<Status, ProcessError> {
        let name = &command.args[0];
        let path = resolve(name, &*self.env)?;
        let image = ExecImage::new(&path, &command.args, &self.env.to_pairs())?;

        let signals = self.signals;
        let _wait = signals.foreground();
        match fork::fork()? {
            Fork::Child => {
                self.signals.child_default();
                if let Err(e) = redirect::apply(&command.redirections, &mut *self.input, self.signals) {
                    eprintln!("rill: {}", e);
                    fork::exit_child(e.status());
                }
                let err = image.exec();
                let (status, message) = exec::failure(name, &err);
                eprintln!("rill: {}", message);
                fork::exit_child(status)
            }
            Fork::Parent(pid) => {
                tracing::debug!(pid, path = %path.display(), "started {}", name);
                fork::wait(pid)
            }
        }
    }

    fn pipeline(&mut self, left: &Command, right: &Command) -> Result<Status, ProcessError> {
        let (read, write) = fd::pipe()?;
        let signals = self.signals;
        let _wait = signals.foreground();

        let left_pid = match fork::fork()? {
            Fork::Child => {
                drop(read);
                self.pipe_side(left, write, STDOUT)
            }
            Fork::Parent(pid) => pid,
        };
        let right_pid = match fork::fork() {
            Ok(Fork::Child) => {
                drop(write);
                self.pipe_side(right, read, STDIN)
            }
            Ok(Fork::Parent(pid)) => pid,
            Err(e) => {
                drop(read);
                drop(write);
                if let Err(wait_err) = fork::wait(left_pid) {
                    tracing::warn!("pipeline: {}", wait_err);
                }
                return Err(e);
            }
        };

        // Neither child sees end-of-file while the shell holds an end open.
        drop(read);
        drop(write);

        let left_status = fork::wait(left_pid);
        let right_status = fork::wait(right_pid);
        if let Ok(status) = left_status {
            tracing::debug!(%status, "left side of pipeline finished");
        }
        right_status
    }

    /// Runs one side of a pipeline in a forked child with `end` bound to
    /// `target`, then exits with its status.
    fn pipe_side(&mut self, command: &Command, end: OwnedFd, target: RawFd) -> ! {
        self.signals.child_default();
        if let Err(e) = fd::dup2(&end, target) {
            eprintln!("rill: dup2: {}", os_error_text(&e));
            fork::exit_child(Status::FAILURE);
        }
        drop(end);
        let status = self.execute(command).status();
        fork::exit_child(status)
    }
}

/// Prints an engine error and turns it into an exit status.
fn report(result: Result<Status, ProcessError>) -> Status {
    match result {
        Ok(status) => status,
        Err(e) => {
            eprintln!("rill: {}", e);
            e.status()
        }
    }
}
