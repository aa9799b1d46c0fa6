use super::{Command, CommandError, Context};
use crate::process::Status;

#[derive(Debug, Clone, Copy, Default)]
pub struct EchoCommand;

impl EchoCommand {
    fn is_newline_flag(arg: &str) -> bool {
        arg.len() > 1 && arg.starts_with('-') && arg[1..].bytes().all(|b| b == b'n')
    }
}

impl Command for EchoCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Status, CommandError> {
        let mut newline = true;
        let mut escapes = false;
        let mut rest = args;

        while let Some((first, tail)) = rest.split_first() {
            if Self::is_newline_flag(first) {
                newline = false;
            } else if first == "-e" {
                escapes = true;
            } else {
                break;
            }
            rest = tail;
        }

        for (i, arg) in rest.iter().enumerate() {
            if i > 0 {
                ctx.out.write_all(b" ")?;
            }
            if escapes {
                ctx.out.write_all(interpret_escapes(arg).as_bytes())?;
            } else {
                ctx.out.write_all(arg.as_bytes())?;
            }
        }
        if newline {
            ctx.out.write_all(b"\n")?;
        }
        Ok(Status::SUCCESS)
    }
}

fn interpret_escapes(arg: &str) -> String {
    let mut result = String::with_capacity(arg.len());
    let mut chars = arg.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('b') => result.push('\u{8}'),
            Some('a') => result.push('\u{7}'),
            Some('v') => result.push('\u{b}'),
            Some('f') => result.push('\u{c}'),
            Some('\\') => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}
