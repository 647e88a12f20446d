//! Placeholder scanning for `%(key)s` interpolation
//!
//! Raw values may reference other keys in the same section with `%(key)s`
//! placeholders and escape a literal percent sign as `%%`. The scanner is
//! shared by the parser (eager syntax checking) and the document resolver.

use crate::error::{Error, Result};

/// Maximum substitution depth before a cycle is assumed.
pub const MAX_DEPTH: usize = 10;

/// One piece of a raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// A run of text with no interpolation syntax in it
    Literal(&'a str),
    /// A `%%` escape, rendering as a single `%`
    Percent,
    /// A `%(key)s` placeholder naming another key in the same section
    Placeholder(&'a str),
}

/// Split a raw value into literal runs, escapes and placeholders.
///
/// Fails on malformed interpolation syntax: an unterminated `%(`, a
/// placeholder missing its `s` type suffix, an empty key, or a stray `%`
/// that starts neither `%%` nor `%(key)s`.
pub fn tokenize(raw: &str) -> Result<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut rest = raw;

    while let Some(pos) = rest.find('%') {
        if pos > 0 {
            tokens.push(Token::Literal(&rest[..pos]));
        }
        let after = &rest[pos + 1..];
        let mut chars = after.chars();
        match chars.next() {
            Some('%') => {
                tokens.push(Token::Percent);
                rest = &after[1..];
            }
            Some('(') => {
                let body = &after[1..];
                let close = body.find(')').ok_or_else(|| {
                    Error::bad_placeholder(format!("Unterminated placeholder in {:?}", raw))
                })?;
                let key = &body[..close];
                if key.is_empty() {
                    return Err(Error::bad_placeholder(format!(
                        "Empty placeholder key in {:?}",
                        raw
                    )));
                }
                let tail = &body[close + 1..];
                if !tail.starts_with('s') {
                    return Err(Error::bad_placeholder(format!(
                        "Placeholder %({}) is missing its 's' suffix in {:?}",
                        key, raw
                    )));
                }
                tokens.push(Token::Placeholder(key));
                rest = &tail[1..];
            }
            _ => {
                return Err(Error::bad_placeholder(format!(
                    "Stray '%' in {:?}",
                    raw
                )));
            }
        }
    }

    if !rest.is_empty() {
        tokens.push(Token::Literal(rest));
    }
    Ok(tokens)
}

/// Check a raw value for malformed interpolation syntax without rendering it.
pub fn check_syntax(raw: &str) -> Result<()> {
    tokenize(raw).map(|_| ())
}

/// Whether a raw value contains any placeholder (assumes valid syntax).
pub fn has_placeholder(raw: &str) -> bool {
    matches!(tokenize(raw), Ok(tokens) if tokens.iter().any(|t| matches!(t, Token::Placeholder(_))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_is_one_literal() {
        let tokens = tokenize("org.kivy").unwrap();
        assert_eq!(tokens, vec![Token::Literal("org.kivy")]);
    }

    #[test]
    fn test_empty_value() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_placeholder_with_surrounding_text() {
        let tokens = tokenize("%(source.dir)s/icon.png").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Placeholder("source.dir"), Token::Literal("/icon.png")]
        );
    }

    #[test]
    fn test_percent_escape() {
        let tokens = tokenize("100%%").unwrap();
        assert_eq!(tokens, vec![Token::Literal("100"), Token::Percent]);
    }

    #[test]
    fn test_unterminated_placeholder() {
        let err = tokenize("%(source.dir").unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_missing_type_suffix() {
        assert!(tokenize("%(source.dir)").is_err());
        assert!(tokenize("%(source.dir)d").is_err());
    }

    #[test]
    fn test_stray_percent() {
        assert!(tokenize("50% done").is_err());
        assert!(tokenize("trailing %").is_err());
    }

    #[test]
    fn test_empty_key() {
        assert!(tokenize("%()s").is_err());
    }

    #[test]
    fn test_has_placeholder() {
        assert!(has_placeholder("%(a)s"));
        assert!(!has_placeholder("plain"));
        assert!(!has_placeholder("100%%"));
    }
}
