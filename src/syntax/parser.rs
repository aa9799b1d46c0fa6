use super::ast::{Command, RedirectKind, Redirection, SimpleCommand};
use super::token::{Token, TokenKind};

/// Builds the command tree for one line of (already expanded) tokens.
///
/// Returns `None` for an empty sequence, and for a pipe with nothing after
/// it. A redirection operator without a following word is dropped rather
/// than rejected.
pub fn parse(tokens: &[Token]) -> Option<Command> {
    if tokens.is_empty() {
        return None;
    }
    Parser { tokens, pos: 0 }.command()
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> TokenKind {
        self.tokens
            .get(self.pos)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    // command := simple_cmd ( PIPE command )?
    fn command(&mut self) -> Option<Command> {
        let left = Command::Simple(self.simple_command());

        if self.peek() != TokenKind::Pipe {
            return Some(left);
        }
        self.advance();

        if self.peek() == TokenKind::Eof {
            return None;
        }
        let right = self.command()?;
        Some(Command::Pipe(Box::new(left), Box::new(right)))
    }

    // simple_cmd := ( WORD | redirection )*
    fn simple_command(&mut self) -> SimpleCommand {
        let mut command = SimpleCommand::default();

        loop {
            match self.peek() {
                TokenKind::Word => {
                    if let Some(token) = self.advance() {
                        command.args.push(token.value.clone());
                    }
                }
                kind if kind.is_redirection() => {
                    self.advance();
                    if let Some(redirection) = self.redirection_target(kind) {
                        command.redirections.push(redirection);
                    }
                }
                _ => break,
            }
        }

        command
    }

    fn redirection_target(&mut self, kind: TokenKind) -> Option<Redirection> {
        if self.peek() != TokenKind::Word {
            return None;
        }
        let target = self.advance()?.value.clone();
        Some(Redirection {
            kind: RedirectKind::from_token(kind)?,
            target,
        })
    }
}
