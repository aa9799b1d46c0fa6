use std::env;

use super::{Command, CommandError, Context};
use crate::process::Status;

#[derive(Debug, Clone, Copy, Default)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(&self, _args: &[String], ctx: &mut Context<'_>) -> Result<Status, CommandError> {
        let cwd = env::current_dir()?;
        writeln!(ctx.out, "{}", cwd.display())?;
        Ok(Status::SUCCESS)
    }
}
