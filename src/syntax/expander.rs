use std::borrow::Cow;

use super::token::{Quoting, Token};
use crate::core::env::Environment;
use crate::process::Status;

/// Rewrites every word token in place. Operators pass through untouched.
pub fn expand(tokens: &mut [Token], env: &Environment, last_status: Status) {
    for token in tokens.iter_mut().filter(|t| t.is_word()) {
        if let Cow::Owned(expanded) = expand_word(&token.value, token.quoting, env, last_status) {
            token.value = expanded;
        }
    }
}

/// Drops word tokens whose value became empty. No word splitting happens.
pub fn compact(tokens: &mut Vec<Token>) {
    tokens.retain(|t| !(t.is_word() && t.value.is_empty()));
}

pub fn expand_word<'a>(
    word: &'a str,
    quoting: Quoting,
    env: &Environment,
    last_status: Status,
) -> Cow<'a, str> {
    // Mixed words expand exactly like unquoted ones.
    if quoting == Quoting::Single || !word.contains('$') {
        return Cow::Borrowed(word);
    }
    Cow::Owned(substitute(word, env, last_status))
}

fn starts_identifier(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn continues_identifier(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn substitute(word: &str, env: &Environment, last_status: Status) -> String {
    let mut result = String::with_capacity(word.len());
    let mut chars = word.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some((_, '?')) => {
                chars.next();
                result.push_str(&last_status.to_string());
            }
            Some((start, next)) if starts_identifier(next) => {
                let mut end = start;
                while let Some((idx, c)) = chars.next_if(|&(_, c)| continues_identifier(c)) {
                    end = idx + c.len_utf8();
                }
                if let Some(value) = env.get(&word[start..end]) {
                    result.push_str(value);
                }
            }
            Some((_, next)) => {
                chars.next();
                result.push('$');
                result.push(next);
            }
            None => result.push('$'),
        }
    }

    result
}
