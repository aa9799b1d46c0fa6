use std::env;

use super::{Command, CommandError, Context};
use crate::process::Status;

#[derive(Debug, Clone, Copy, Default)]
pub struct CdCommand;

impl Command for CdCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Status, CommandError> {
        if args.len() > 1 {
            return Err(CommandError::TooManyArguments);
        }

        let target = match args.first().map(String::as_str) {
            None => ctx
                .env
                .get("HOME")
                .ok_or(CommandError::NotSet("HOME"))?
                .to_string(),
            Some("-") => {
                let previous = ctx
                    .env
                    .get("OLDPWD")
                    .ok_or(CommandError::NotSet("OLDPWD"))?
                    .to_string();
                writeln!(ctx.out, "{}", previous)?;
                previous
            }
            Some(path) => path.to_string(),
        };

        let before = env::current_dir().ok();
        env::set_current_dir(&target).map_err(|source| CommandError::ChangeDir {
            path: target.clone(),
            source,
        })?;

        if let Some(before) = before {
            ctx.env.set("OLDPWD", &before.to_string_lossy());
        }
        if let Ok(after) = env::current_dir() {
            ctx.env.set("PWD", &after.to_string_lossy());
        }
        Ok(Status::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::run;
    use crate::core::env::Environment;

    // Only failure paths here: the working directory is shared by every
    // test thread. Successful `cd` is covered in tests/shell.rs.

    #[test]
    fn test_home_not_set() {
        let mut env = Environment::new();
        let before = env::current_dir().ok();
        let (result, _, _) = run(&CdCommand, &mut env, &[]);
        assert!(matches!(result, Err(CommandError::NotSet("HOME"))));
        assert_eq!(env::current_dir().ok(), before);
        assert_eq!(env.get("OLDPWD"), None);
    }

    #[test]
    fn test_oldpwd_not_set() {
        let mut env = Environment::new();
        let (result, out, _) = run(&CdCommand, &mut env, &["-"]);
        assert!(matches!(result, Err(CommandError::NotSet("OLDPWD"))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_too_many_arguments() {
        let mut env = Environment::from_assignments(["HOME=/"]);
        let (result, _, _) = run(&CdCommand, &mut env, &["/", "/tmp"]);
        assert!(matches!(result, Err(CommandError::TooManyArguments)));
        assert_eq!(env.get("PWD"), None);
    }

    #[test]
    fn test_missing_directory() {
        let mut env = Environment::new();
        let (result, _, _) = run(&CdCommand, &mut env, &["/definitely/not/here"]);
        match result {
            Err(err @ CommandError::ChangeDir { .. }) => {
                assert_eq!(err.to_string(), "/definitely/not/here: No such file or directory");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
