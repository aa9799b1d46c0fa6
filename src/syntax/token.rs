#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Pipe,
    RedirIn,
    RedirOut,
    Heredoc,
    Append,
    Eof,
}

impl TokenKind {
    pub fn is_redirection(self) -> bool {
        matches!(
            self,
            TokenKind::RedirIn | TokenKind::RedirOut | TokenKind::Heredoc | TokenKind::Append
        )
    }
}

/// How a word was written on the command line. Drives expansion only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quoting {
    #[default]
    None,
    Single,
    Double,
    Mixed,
}

impl Quoting {
    /// Folds one more quoted run into the classification of a word.
    pub fn with(self, quote: char) -> Self {
        let seen = if quote == '\'' {
            Quoting::Single
        } else {
            Quoting::Double
        };
        match self {
            Quoting::None => seen,
            current if current == seen => current,
            _ => Quoting::Mixed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub kind: TokenKind,
    pub quoting: Quoting,
}

impl Token {
    pub fn word(value: impl Into<String>, quoting: Quoting) -> Self {
        Self {
            value: value.into(),
            kind: TokenKind::Word,
            quoting,
        }
    }

    pub fn operator(kind: TokenKind) -> Self {
        let value = match kind {
            TokenKind::Pipe => "|",
            TokenKind::RedirIn => "<",
            TokenKind::RedirOut => ">",
            TokenKind::Heredoc => "<<",
            TokenKind::Append => ">>",
            TokenKind::Word | TokenKind::Eof => "",
        };
        Self {
            value: value.to_string(),
            kind,
            quoting: Quoting::None,
        }
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoting_fold() {
        assert_eq!(Quoting::None.with('\''), Quoting::Single);
        assert_eq!(Quoting::None.with('"'), Quoting::Double);
        assert_eq!(Quoting::Single.with('\''), Quoting::Single);
        assert_eq!(Quoting::Double.with('\''), Quoting::Mixed);
        assert_eq!(Quoting::Mixed.with('"'), Quoting::Mixed);
    }

    #[test]
    fn test_operator_text() {
        assert_eq!(Token::operator(TokenKind::Heredoc).value, "<<");
        assert_eq!(Token::operator(TokenKind::Append).value, ">>");
        assert!(Token::operator(TokenKind::RedirIn).kind.is_redirection());
        assert!(!Token::operator(TokenKind::Pipe).kind.is_redirection());
    }
}
