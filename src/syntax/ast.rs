use super::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    In,
    Out,
    Append,
    Heredoc,
}

impl RedirectKind {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::RedirIn => Some(RedirectKind::In),
            TokenKind::RedirOut => Some(RedirectKind::Out),
            TokenKind::Append => Some(RedirectKind::Append),
            TokenKind::Heredoc => Some(RedirectKind::Heredoc),
            _ => None,
        }
    }
}

/// A redirection; `target` is a file name, or the delimiter for a heredoc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub kind: RedirectKind,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleCommand {
    pub args: Vec<String>,
    pub redirections: Vec<Redirection>,
}

impl SimpleCommand {
    /// The command name, or `None` for an empty or blank command.
    pub fn name(&self) -> Option<&str> {
        self.args
            .first()
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }
}

/// One parsed input line. `a | b | c` nests to the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Simple(SimpleCommand),
    Pipe(Box<Command>, Box<Command>),
}
