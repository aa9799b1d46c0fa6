use super::{Command, CommandError, Context};
use crate::process::Status;

#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCommand;

impl Command for EnvCommand {
    fn execute(&self, _args: &[String], ctx: &mut Context<'_>) -> Result<Status, CommandError> {
        for entry in ctx.env.iter() {
            writeln!(ctx.out, "{}={}", entry.key, entry.value)?;
        }
        Ok(Status::SUCCESS)
    }
}
