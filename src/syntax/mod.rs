//! Line front end: lexing, variable expansion and parsing.

pub mod ast;
pub mod expander;
pub mod lexer;
pub mod parser;
pub mod token;

use std::fmt;

pub use ast::{Command, RedirectKind, Redirection, SimpleCommand};
pub use expander::{compact, expand};
pub use lexer::tokenize;
pub use parser::parse;
pub use token::{Quoting, Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    UnterminatedQuote(char),
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::UnterminatedQuote(quote) => {
                write!(f, "unexpected EOF while looking for matching `{}'", quote)
            }
        }
    }
}

impl std::error::Error for SyntaxError {}
