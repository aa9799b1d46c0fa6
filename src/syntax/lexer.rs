use std::iter::Peekable;
use std::str::Chars;

use super::token::{Quoting, Token, TokenKind};
use super::SyntaxError;

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

fn is_metachar(c: char) -> bool {
    matches!(c, '|' | '<' | '>')
}

fn is_quote(c: char) -> bool {
    matches!(c, '\'' | '"')
}

/// Splits one input line into tokens.
///
/// An empty or blank line yields an empty sequence. An unterminated quote
/// rejects the whole line; no partial token list is returned.
pub fn tokenize(line: &str) -> Result<Vec<Token>, SyntaxError> {
    Lexer::new(line).run()
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            chars: line.chars().peekable(),
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, SyntaxError> {
        loop {
            while self.chars.next_if(|&c| is_blank(c)).is_some() {}

            let Some(&c) = self.chars.peek() else {
                break;
            };

            let token = match c {
                '|' => {
                    self.chars.next();
                    Token::operator(TokenKind::Pipe)
                }
                '<' => Token::operator(self.angle('<', TokenKind::RedirIn, TokenKind::Heredoc)),
                '>' => Token::operator(self.angle('>', TokenKind::RedirOut, TokenKind::Append)),
                _ => self.word()?,
            };
            self.tokens.push(token);
        }

        Ok(self.tokens)
    }

    // Longest match: a doubled angle bracket is one operator.
    fn angle(&mut self, c: char, single: TokenKind, double: TokenKind) -> TokenKind {
        self.chars.next();
        if self.chars.next_if_eq(&c).is_some() {
            double
        } else {
            single
        }
    }

    fn word(&mut self) -> Result<Token, SyntaxError> {
        let mut value = String::new();
        let mut quoting = Quoting::None;

        while let Some(&c) = self.chars.peek() {
            if is_blank(c) || is_metachar(c) {
                break;
            }
            self.chars.next();

            if is_quote(c) {
                quoting = quoting.with(c);
                self.quoted_run(c, &mut value)?;
            } else {
                value.push(c);
            }
        }

        Ok(Token::word(value, quoting))
    }

    fn quoted_run(&mut self, quote: char, value: &mut String) -> Result<(), SyntaxError> {
        loop {
            match self.chars.next() {
                Some(c) if c == quote => return Ok(()),
                Some(c) => value.push(c),
                None => return Err(SyntaxError::UnterminatedQuote(quote)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(tokens: &[Token]) -> Vec<&str> {
        tokens
            .iter()
            .filter(|t| t.is_word())
            .map(|t| t.value.as_str())
            .collect()
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_quoted_words_stay_whole() {
        let tokens = tokenize("echo 'a b' \"c\"").unwrap();
        assert_eq!(words(&tokens), vec!["echo", "a b", "c"]);
        assert_eq!(tokens[0].quoting, Quoting::None);
        assert_eq!(tokens[1].quoting, Quoting::Single);
        assert_eq!(tokens[2].quoting, Quoting::Double);
    }

    #[test]
    fn test_blank_lines() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("  \t  ").unwrap().is_empty());
    }

    #[test]
    fn test_operators_longest_match() {
        let tokens = tokenize("cat<<EOF>>out|wc<in>x").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Word,
                TokenKind::Heredoc,
                TokenKind::Word,
                TokenKind::Append,
                TokenKind::Word,
                TokenKind::Pipe,
                TokenKind::Word,
                TokenKind::RedirIn,
                TokenKind::Word,
                TokenKind::RedirOut,
                TokenKind::Word,
            ]
        );
        assert_eq!(words(&tokens), vec!["cat", "EOF", "out", "wc", "in", "x"]);
    }

    #[test]
    fn test_adjacent_runs_concatenate() {
        let tokens = tokenize("ab\"cd\"'ef'g").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value, "abcdefg");
        assert_eq!(tokens[0].quoting, Quoting::Mixed);
    }

    #[test]
    fn test_metachars_inside_quotes_are_literal() {
        let tokens = tokenize("echo \"a | b > c\"").unwrap();
        assert_eq!(words(&tokens), vec!["echo", "a | b > c"]);
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_same_quote_twice_is_not_mixed() {
        let tokens = tokenize("'a''b'").unwrap();
        assert_eq!(tokens[0].value, "ab");
        assert_eq!(tokens[0].quoting, Quoting::Single);
    }

    #[test]
    fn test_empty_quotes_make_empty_word() {
        let tokens = tokenize("echo ''").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].value, "");
        assert_eq!(tokens[1].quoting, Quoting::Single);
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(
            tokenize("echo \"abc"),
            Err(SyntaxError::UnterminatedQuote('"'))
        );
        assert_eq!(
            tokenize("echo ok 'x"),
            Err(SyntaxError::UnterminatedQuote('\''))
        );
    }
}
