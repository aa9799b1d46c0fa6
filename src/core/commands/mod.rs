use std::fmt;
use std::io::{self, Write};

mod cd;
mod echo;
mod env;
mod exit;
mod export;
mod pwd;
mod unset;

pub use cd::CdCommand;
pub use echo::EchoCommand;
pub use env::EnvCommand;
pub use exit::ExitCommand;
pub use export::ExportCommand;
pub use pwd::PwdCommand;
pub use unset::UnsetCommand;

use crate::core::env::Environment;
use crate::process::{os_error_text, Status};

#[derive(Debug)]
pub enum CommandError {
    TooManyArguments,
    NotSet(&'static str),
    ChangeDir { path: String, source: io::Error },
    Io(io::Error),
    /// Not a failure: `exit` unwinding to the read loop.
    Exit(Status),
}

impl CommandError {
    pub fn status(&self) -> Status {
        match self {
            CommandError::Exit(status) => *status,
            _ => Status::FAILURE,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::TooManyArguments => write!(f, "too many arguments"),
            CommandError::NotSet(var) => write!(f, "{} not set", var),
            CommandError::ChangeDir { path, source } => {
                write!(f, "{}: {}", path, os_error_text(source))
            }
            CommandError::Io(e) => write!(f, "{}", os_error_text(e)),
            CommandError::Exit(status) => write!(f, "exit {}", status),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<io::Error> for CommandError {
    fn from(err: io::Error) -> Self {
        CommandError::Io(err)
    }
}

/// What a builtin may touch: the live environment and its two output streams.
pub struct Context<'a> {
    pub env: &'a mut Environment,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

pub trait Command {
    /// `args` excludes the command name.
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Status, CommandError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Echo,
    Cd,
    Pwd,
    Export,
    Unset,
    Env,
    Exit,
}

impl Builtin {
    pub const ALL: [Builtin; 7] = [
        Builtin::Echo,
        Builtin::Cd,
        Builtin::Pwd,
        Builtin::Export,
        Builtin::Unset,
        Builtin::Env,
        Builtin::Exit,
    ];

    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Echo => "echo",
            Builtin::Cd => "cd",
            Builtin::Pwd => "pwd",
            Builtin::Export => "export",
            Builtin::Unset => "unset",
            Builtin::Env => "env",
            Builtin::Exit => "exit",
        }
    }
}

impl Command for Builtin {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Status, CommandError> {
        match self {
            Builtin::Echo => EchoCommand.execute(args, ctx),
            Builtin::Cd => CdCommand.execute(args, ctx),
            Builtin::Pwd => PwdCommand.execute(args, ctx),
            Builtin::Export => ExportCommand.execute(args, ctx),
            Builtin::Unset => UnsetCommand.execute(args, ctx),
            Builtin::Env => EnvCommand.execute(args, ctx),
            Builtin::Exit => ExitCommand.execute(args, ctx),
        }
    }
}
