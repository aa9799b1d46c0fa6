use super::{Command, CommandError, Context};
use crate::process::Status;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExitCommand;

impl ExitCommand {
    /// An optional sign then at least one digit, fitting in an `i64`.
    fn parse_code(arg: &str) -> Option<i64> {
        let digits = arg.strip_prefix(['+', '-']).unwrap_or(arg);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        arg.parse().ok()
    }
}

impl Command for ExitCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Status, CommandError> {
        writeln!(ctx.out, "exit")?;

        match args {
            [] => Err(CommandError::Exit(Status::SUCCESS)),
            [code] => match Self::parse_code(code) {
                Some(code) => Err(CommandError::Exit(Status::from_code(code))),
                None => {
                    writeln!(ctx.err, "rill: exit: {}: numeric argument required", code)?;
                    Err(CommandError::Exit(Status::MISUSE))
                }
            },
            _ => Err(CommandError::TooManyArguments),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::run;
    use crate::core::env::Environment;

    fn exit_status(args: &[&str]) -> Option<Status> {
        match run(&ExitCommand, &mut Environment::new(), args).0 {
            Err(CommandError::Exit(status)) => Some(status),
            _ => None,
        }
    }

    #[test]
    fn test_codes() {
        assert_eq!(exit_status(&[]), Some(Status::SUCCESS));
        assert_eq!(exit_status(&["42"]), Some(Status::from_code(42)));
        assert_eq!(exit_status(&["256"]), Some(Status::SUCCESS));
        assert_eq!(exit_status(&["-1"]).map(Status::code), Some(255));
        assert_eq!(exit_status(&["+3"]).map(Status::code), Some(3));
    }

    #[test]
    fn test_non_numeric() {
        let (result, out, err) = run(&ExitCommand, &mut Environment::new(), &["abc"]);
        assert!(matches!(result, Err(CommandError::Exit(Status::MISUSE))));
        assert_eq!(out, "exit\n");
        assert_eq!(err, "rill: exit: abc: numeric argument required\n");

        for arg in ["", "-", "1a", "99999999999999999999"] {
            assert_eq!(exit_status(&[arg]), Some(Status::MISUSE), "arg {:?}", arg);
        }
    }

    #[test]
    fn test_too_many_arguments_does_not_exit() {
        let (result, out, _) = run(&ExitCommand, &mut Environment::new(), &["a", "b"]);
        assert!(matches!(result, Err(CommandError::TooManyArguments)));
        assert_eq!(out, "exit\n");
    }
}
