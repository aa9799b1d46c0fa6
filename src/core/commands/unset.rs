use super::{Command, CommandError, Context};
use crate::process::Status;

#[derive(Debug, Clone, Copy, Default)]
pub struct UnsetCommand;

impl Command for UnsetCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Status, CommandError> {
        for key in args {
            if ctx.env.remove(key).is_some() {
                tracing::debug!("unset {}", key);
            }
        }
        Ok(Status::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::run;
    use crate::core::env::Environment;

    #[test]
    fn test_removes_known_ignores_unknown() {
        let mut env = Environment::from_assignments(["A=1", "B=2"]);
        let (result, out, err) = run(&UnsetCommand, &mut env, &["A", "ZZZ"]);
        assert_eq!(result.ok(), Some(Status::SUCCESS));
        assert!(out.is_empty() && err.is_empty());
        assert_eq!(env.to_pairs(), vec!["B=2"]);
    }
}
