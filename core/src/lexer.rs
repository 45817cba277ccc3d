//! Lexical classification of single argument tokens.

/// Shape of one argument token.
///
/// Names and inline values are slices of the original token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Anything not starting with `-`; matched against command names.
    Command(&'a str),
    /// `--name` or `--name=value`.
    Long {
        name: &'a str,
        value: Option<&'a str>,
    },
    /// `-x`, or any single-dash token carrying `=` (`-x=value`, `-xy=value`).
    Short {
        name: &'a str,
        value: Option<&'a str>,
    },
    /// `-xyz` without `=`: every character is its own boolean short flag.
    Batch(&'a str),
}

impl Token<'_> {
    /// Returns `true` if the token may take its value from the next argument.
    pub fn accepts_next_value(&self) -> bool {
        matches!(
            self,
            Token::Long { value: None, .. } | Token::Short { value: None, .. }
        )
    }
}

/// Classifies a token.
///
/// Character counts decide between a short flag and a batch, so `-é` is a
/// short flag even though it is three bytes long. A single-dash token that
/// contains `=` is never a batch: `-hv=1` becomes a short flag named `hv`.
///
/// # Examples
///
/// ```
/// use optly_core::{classify, Token};
///
/// assert_eq!(classify("build"), Token::Command("build"));
/// assert_eq!(classify("--name=Alice"), Token::Long { name: "name", value: Some("Alice") });
/// assert_eq!(classify("-x"), Token::Short { name: "x", value: None });
/// assert_eq!(classify("-x=77"), Token::Short { name: "x", value: Some("77") });
/// assert_eq!(classify("-hv"), Token::Batch("hv"));
/// assert_eq!(classify("-hv=1"), Token::Short { name: "hv", value: Some("1") });
/// ```
pub fn classify(arg: &str) -> Token<'_> {
    if let Some(rest) = arg.strip_prefix("--") {
        let (name, value) = split_inline_value(rest);
        return Token::Long { name, value };
    }

    let Some(rest) = arg.strip_prefix('-') else {
        return Token::Command(arg);
    };

    if rest.contains('=') {
        let (name, value) = split_inline_value(rest);
        Token::Short { name, value }
    } else if rest.chars().count() > 1 {
        Token::Batch(rest)
    } else {
        Token::Short {
            name: rest,
            value: None,
        }
    }
}

/// Splits `name=value` at the first `=`.
fn split_inline_value(s: &str) -> (&str, Option<&str>) {
    match s.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (s, None),
    }
}
