use super::{Command, CommandError, Context};
use crate::core::env::is_valid_identifier;
use crate::process::Status;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExportCommand;

impl ExportCommand {
    fn list(&self, ctx: &mut Context<'_>) -> Result<Status, CommandError> {
        for entry in ctx.env.iter() {
            writeln!(ctx.out, "declare -x {}=\"{}\"", entry.key, entry.value)?;
        }
        Ok(Status::SUCCESS)
    }
}

impl Command for ExportCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Status, CommandError> {
        if args.is_empty() {
            return self.list(ctx);
        }

        let mut status = Status::SUCCESS;
        for arg in args {
            let (key, value) = arg.split_once('=').unwrap_or((arg.as_str(), ""));
            if !is_valid_identifier(key) {
                writeln!(ctx.err, "rill: export: `{}': not a valid identifier", arg)?;
                status = Status::FAILURE;
                continue;
            }
            ctx.env.set(key, value);
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::run;
    use crate::core::env::Environment;

    #[test]
    fn test_list_format() {
        let mut env = Environment::from_assignments(["A=1", "B="]);
        let (_, out, _) = run(&ExportCommand, &mut env, &[]);
        assert_eq!(out, "declare -x A=\"1\"\ndeclare -x B=\"\"\n");
    }

    #[test]
    fn test_set_and_create() {
        let mut env = Environment::from_assignments(["A=1"]);
        let (result, _, _) = run(&ExportCommand, &mut env, &["A=2", "NEW=x=y", "EMPTY"]);
        assert_eq!(result.ok(), Some(Status::SUCCESS));
        assert_eq!(env.to_pairs(), vec!["A=2", "NEW=x=y", "EMPTY="]);
    }

    #[test]
    fn test_invalid_identifier_continues() {
        let mut env = Environment::new();
        let (result, _, err) = run(&ExportCommand, &mut env, &["1X=a", "OK=b", "=c"]);
        assert_eq!(result.ok(), Some(Status::FAILURE));
        assert_eq!(env.get("OK"), Some("b"));
        assert_eq!(env.len(), 1);
        assert_eq!(
            err,
            "rill: export: `1X=a': not a valid identifier\nrill: export: `=c': not a valid identifier\n"
        );
    }
}
