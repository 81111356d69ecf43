//! Splitting input lines into command arguments

use gocache_core::{CacheError, Result};

/// Split a line into words, honoring quotes and backslash escapes.
///
/// Single quotes keep everything literally. Inside double quotes a backslash
/// only escapes `"` and `\`. Quoted JSON such as `'{"a": [1, 2]}'` therefore
/// arrives as a single argument.
pub fn split_line(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some('\'') => {
                if c == '\'' {
                    quote = None;
                } else {
                    current.push(c);
                }
            }
            Some(_) => match c {
                '"' => quote = None,
                '\\' => match chars.next() {
                    Some(next @ ('"' | '\\')) => current.push(next),
                    Some(next) => {
                        current.push('\\');
                        current.push(next);
                    }
                    None => return Err(CacheError::Parse("unterminated quote".to_string())),
                },
                _ => current.push(c),
            },
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_word = true;
                }
                '\\' => match chars.next() {
                    Some(next) => {
                        current.push(next);
                        in_word = true;
                    }
                    None => return Err(CacheError::Parse("trailing backslash".to_string())),
                },
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                _ => {
                    current.push(c);
                    in_word = true;
                }
            },
        }
    }

    if quote.is_some() {
        return Err(CacheError::Parse("unterminated quote".to_string()));
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}
