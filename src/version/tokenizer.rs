//! Single-pass version tokenizer
//!
//! Scans the lower-cased version string left to right while keeping a stack of
//! lists under construction below the root list. Each `-` pushes a nested list
//! and nothing is popped before end of input.

use crate::version::error::VersionError;
use crate::version::token::{Token, normalize_items};

/// Tokenize a version string into the items of its normalized root list.
pub fn tokenize(raw: &str) -> Result<Vec<Token>, VersionError> {
    let version = raw.trim().to_lowercase();
    if version.is_empty() {
        return Err(VersionError::malformed(raw, 0, "", "version string is empty"));
    }

    let chars: Vec<(usize, char)> = version.char_indices().collect();
    let mut root: Vec<Token> = Vec::new();
    let mut nested: Vec<Vec<Token>> = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let (offset, c) = chars[pos];
        match c {
            '-' => {
                pos += 1;
                let list = current(&mut root, &mut nested);

                // Trailing zeros before a hyphen are dropped so "1.0-x" equals "1-x"
                if matches!(list.last(), Some(Token::Integer(_))) {
                    normalize_items(list);
                }

                // Redundant separators must not create empty sub-lists
                if !list.is_empty() {
                    nested.push(Vec::new());
                }
            }
            '.' => pos += 1,
            c if c.is_ascii_digit() => {
                let end = scan(&chars, pos, |c| c.is_ascii_digit());
                let digits = slice(&version, &chars, pos, end);
                let value = digits.parse::<u64>().map_err(|e| {
                    VersionError::malformed(raw, offset, digits, &e.to_string())
                })?;
                current(&mut root, &mut nested).push(Token::Integer(value));
                pos = end;
            }
            _ => {
                let end = scan(&chars, pos, |c| !c.is_ascii_digit() && !is_separator(c));
                let text = slice(&version, &chars, pos, end);
                let followed_by_digit = chars.get(end).is_some_and(|(_, c)| c.is_ascii_digit());
                current(&mut root, &mut nested).push(Token::qualifier(text, followed_by_digit));
                pos = end;
            }
        }
    }

    // Close every open list, innermost first
    while let Some(mut list) = nested.pop() {
        normalize_items(&mut list);
        current(&mut root, &mut nested).push(Token::List(list));
    }
    normalize_items(&mut root);

    Ok(root)
}

/// The list currently receiving items: the innermost open sub-list, or the root.
fn current<'a>(root: &'a mut Vec<Token>, nested: &'a mut [Vec<Token>]) -> &'a mut Vec<Token> {
    match nested.last_mut() {
        Some(list) => list,
        None => root,
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, '.' | '-')
}

/// Index one past the last char matching `pred`, starting at `start`.
fn scan(chars: &[(usize, char)], start: usize, pred: impl Fn(char) -> bool) -> usize {
    chars[start..]
        .iter()
        .position(|(_, c)| !pred(*c))
        .map_or(chars.len(), |n| start + n)
}

fn slice<'a>(version: &'a str, chars: &[(usize, char)], start: usize, end: usize) -> &'a str {
    let from = chars[start].0;
    let to = chars.get(end).map_or(version.len(), |(offset, _)| *offset);
    &version[from..to]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn render(raw: &str) -> String {
        Token::List(tokenize(raw).unwrap()).to_string()
    }

    #[rstest]
    #[case("1", "[1]")]
    #[case("1.0.0", "[1]")]
    #[case("1.5.0", "[1,5]")]
    #[case("2.0.1-xyz", "[2,0,1,[xyz]]")]
    #[case("1.0-alpha-1", "[1,[alpha,[1]]]")]
    #[case("2.0-0", "[2]")]
    #[case("2.0-1", "[2,[1]]")]
    #[case("2.0-0-SNAPSHOT", "[2,[snapshot]]")]
    #[case("1.0-alpha-1-SNAPSHOT", "[1,[alpha,[1,[snapshot]]]]")]
    #[case("1.0-GA", "[1]")]
    #[case("1.0.Final", "[1]")]
    #[case("1.0-CR2", "[1,[rc,2]]")]
    #[case("1.0a1", "[1,0,alpha,1]")]
    #[case("1.0-b2", "[1,[beta,2]]")]
    #[case("1.0-m", "[1,[m]]")]
    #[case("1.5.+", "[1,5,+]")]
    #[case("1.0--1", "[1,[1]]")]
    #[case("-1", "[1]")]
    #[case("  1.2  ", "[1,2]")]
    fn tokenize_builds_normalized_tree(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(render(raw), expected);
    }

    #[test]
    fn tokenize_rejects_empty_input() {
        let result = tokenize("   ");

        assert!(matches!(result, Err(VersionError::MalformedVersion { .. })));
    }

    #[test]
    fn tokenize_reports_overflowing_digit_run() {
        let result = tokenize("1.99999999999999999999999");

        let Err(VersionError::MalformedVersion {
            raw,
            offset,
            fragment,
            ..
        }) = result
        else {
            panic!("expected a malformed version error");
        };
        assert_eq!(raw, "1.99999999999999999999999");
        assert_eq!(offset, 2);
        assert!(fragment.starts_with("999999"));
    }
}
