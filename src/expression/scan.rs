//! Paren-aware scanning primitives for expression normalization
//!
//! There is no tokenizer: expressions are decomposed by scanning byte
//! indices directly, skipping parenthesized regions wholly so operators
//! inside parentheses never affect the current level. The grammar is plain
//! ASCII (`and`, `or`, `!`, parentheses, `[A-Za-z_][A-Za-z0-9_]*`
//! literals), so byte indices and `str` slicing agree.

use std::sync::Arc;

use crate::error::EvalError;

/// Find the closing parenthesis matching the opening one assumed to be
/// present at `open_index`.
///
/// Returns `None` if the parenthesis is never closed; callers treat that as
/// a malformed-input condition rather than tolerating it.
pub(super) fn find_closing_paren(text: &str, open_index: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 1usize;
    for (i, &b) in bytes.iter().enumerate().skip(open_index + 1) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn unbalanced(input: &str, position: usize) -> EvalError {
    EvalError::MalformedExpression {
        message: Arc::from("unbalanced parentheses"),
        input: Arc::from(input),
        position: Some(position),
    }
}

fn missing_operand(input: &str, token: &str, position: usize) -> EvalError {
    EvalError::MalformedExpression {
        message: Arc::from(format!("'{}' operator with a missing operand", token).as_str()),
        input: Arc::from(input),
        position: Some(position),
    }
}

/// Trim whitespace and remove parenthesis pairs that enclose the entire
/// remaining string.
///
/// A leading parenthesis that closes before the end of the string is left
/// alone (`"(a and b) or c"` is already minimal); one that never closes is
/// an error.
pub(super) fn strip(text: &str) -> Result<&str, EvalError> {
    let mut text = text.trim();
    while text.starts_with('(') {
        match find_closing_paren(text, 0) {
            Some(end) if end == text.len() - 1 => text = text[1..end].trim(),
            Some(_) => break,
            None => return Err(unbalanced(text, 0)),
        }
    }
    Ok(text)
}

/// Strip a leading logical NOT (possibly applied through enclosing parens)
/// and return the canonical inner text plus the accumulated inversion flag.
///
/// A `!` is only stripped when it unambiguously applies to the whole
/// remainder: either the remainder is a bare single-value literal (no
/// space), or it is itself a fully-parenthesized whole-string expression.
/// `"!a and b"` is returned unchanged, since that `!` binds only to `a` and
/// is resolved later at the single-literal level during child construction.
///
/// ```text
/// "!(A and B)"      => ("A and B", true)
/// "(!(!(A and B)))" => ("A and B", false)
/// "!a and b"        => ("!a and b", false)
/// "!a"              => ("a", true)
/// "!!a"             => ("a", false)
/// ```
pub(super) fn clean_and_extract_inversion(text: &str) -> Result<(&str, bool), EvalError> {
    let mut inverted = false;
    let mut text = text.trim();
    loop {
        if text.starts_with('(') {
            match find_closing_paren(text, 0) {
                Some(end) if end == text.len() - 1 => text = text[1..end].trim(),
                Some(_) => break,
                None => return Err(unbalanced(text, 0)),
            }
        } else if let Some(rest) = text.strip_prefix('!') {
            let rest = rest.trim();
            if !rest.contains(' ') {
                // Bare single-value remainder, the inversion covers it all.
                text = rest;
                inverted = !inverted;
            } else if rest.starts_with('(') {
                match find_closing_paren(rest, 0) {
                    Some(end) if end == rest.len() - 1 => {
                        text = rest[1..end].trim();
                        inverted = !inverted;
                    }
                    Some(_) => break,
                    None => return Err(unbalanced(rest, 0)),
                }
            } else {
                break;
            }
        } else {
            break;
        }
    }
    Ok((text, inverted))
}

/// Split into top-level OR-separated parts.
///
/// OR is split before AND because AND binds tighter: the OR parts are the
/// coarsest top-level decomposition. Returns a single-element result equal
/// to the stripped input when no top-level `or` exists.
pub(super) fn split_or(text: &str) -> Result<Vec<&str>, EvalError> {
    split_at_token(text, "or")
}

/// Split into top-level AND-separated parts.
///
/// Only applied once [`split_or`] produced no split.
pub(super) fn split_and(text: &str) -> Result<Vec<&str>, EvalError> {
    split_at_token(text, "and")
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Token match at `i` requires word boundaries on both sides so literal
/// names containing `or`/`and` as a substring never cause a split.
fn is_token_at(bytes: &[u8], i: usize, token: &[u8]) -> bool {
    bytes[i..].starts_with(token)
        && (i == 0 || !is_word_byte(bytes[i - 1]))
        && (i + token.len() == bytes.len() || !is_word_byte(bytes[i + token.len()]))
}

fn split_at_token<'a>(text: &'a str, token: &str) -> Result<Vec<&'a str>, EvalError> {
    let text = strip(text)?;
    let bytes = text.as_bytes();
    let tok = token.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == b'(' {
            // Skip the parenthesized region wholly.
            let end = find_closing_paren(text, i).ok_or_else(|| unbalanced(text, i))?;
            i = end + 1;
        } else if is_token_at(bytes, i, tok) {
            let part = strip(&text[start..i])?;
            if part.is_empty() {
                return Err(missing_operand(text, token, i));
            }
            parts.push(part);
            i += tok.len();
            start = i;
        } else {
            i += 1;
        }
    }
    if parts.is_empty() {
        return Ok(vec![text]);
    }
    let tail = strip(&text[start..])?;
    if tail.is_empty() {
        return Err(missing_operand(text, token, text.len()));
    }
    parts.push(tail);
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_closing_paren() {
        assert_eq!(find_closing_paren("(a and b)", 0), Some(8));
        assert_eq!(find_closing_paren("a and (b or c)", 6), Some(13));
        assert_eq!(find_closing_paren("((a) and b)", 0), Some(10));
        assert_eq!(find_closing_paren("(a and (b)", 0), None);
    }

    #[test]
    fn test_strip() {
        assert_eq!(strip(" a and b").unwrap(), "a and b");
        assert_eq!(strip("(a and b)").unwrap(), "a and b");
        assert_eq!(strip("( a and b )").unwrap(), "a and b");
        assert_eq!(strip("((a and b))").unwrap(), "a and b");
        assert_eq!(strip("( (a and b))").unwrap(), "a and b");
        assert_eq!(strip("((a and b) or c )").unwrap(), "(a and b) or c");
        assert_eq!(strip("!(a and b)").unwrap(), "!(a and b)");
    }

    #[test]
    fn test_strip_unbalanced() {
        assert!(matches!(
            strip("(a and b"),
            Err(EvalError::MalformedExpression { .. })
        ));
    }

    #[test]
    fn test_clean_and_extract_inversion() {
        fn clean(text: &str) -> (&str, bool) {
            clean_and_extract_inversion(text).unwrap()
        }
        assert_eq!(clean(" a and b"), ("a and b", false));
        assert_eq!(clean("!a and b"), ("!a and b", false));
        assert_eq!(clean("!(a and b)"), ("a and b", true));
        assert_eq!(clean("!(a and b) and c"), ("!(a and b) and c", false));
        assert_eq!(clean("(!(a and b))"), ("a and b", true));
        assert_eq!(clean("(!(!(a and b)))"), ("a and b", false));
        assert_eq!(clean("!a"), ("a", true));
        assert_eq!(clean("!!a"), ("a", false));
    }

    #[test]
    fn test_split_or() {
        assert_eq!(split_or("a or b or c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(split_or("a or b and c").unwrap(), vec!["a", "b and c"]);
        assert_eq!(
            split_or("a or b or (c and d)").unwrap(),
            vec!["a", "b", "c and d"]
        );
        assert_eq!(
            split_or("(a or b) and (c or d)").unwrap(),
            vec!["(a or b) and (c or d)"]
        );
        assert_eq!(
            split_or("(a and b) and (c or d)").unwrap(),
            vec!["(a and b) and (c or d)"]
        );
    }

    #[test]
    fn test_split_and() {
        assert_eq!(split_and("a and b").unwrap(), vec!["a", "b"]);
        assert_eq!(split_and("a and b and c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(split_and("(a and b)").unwrap(), vec!["a", "b"]);
        assert_eq!(split_and("a and (b and c)").unwrap(), vec!["a", "b and c"]);
        assert_eq!(
            split_and("(a and b) and (b and c)").unwrap(),
            vec!["a and b", "b and c"]
        );
        // Whitespace between tokens is not required around parens.
        assert_eq!(split_and("(a and b)and c").unwrap(), vec!["a and b", "c"]);
    }

    #[test]
    fn test_split_respects_word_boundaries() {
        // "or"/"and" as a substring of a longer identifier is not a token.
        assert_eq!(split_or("oregon or corn").unwrap(), vec!["oregon", "corn"]);
        assert_eq!(split_or("sailor or manor").unwrap(), vec!["sailor", "manor"]);
        assert_eq!(
            split_and("band and android").unwrap(),
            vec!["band", "android"]
        );
        assert_eq!(split_or("a andor b").unwrap(), vec!["a andor b"]);
        assert_eq!(split_and("a andor b").unwrap(), vec!["a andor b"]);
    }

    #[test]
    fn test_split_missing_operand() {
        assert!(matches!(
            split_or("a or b or"),
            Err(EvalError::MalformedExpression { .. })
        ));
        assert!(matches!(
            split_or("or a"),
            Err(EvalError::MalformedExpression { .. })
        ));
        assert!(matches!(
            split_or("a or or b"),
            Err(EvalError::MalformedExpression { .. })
        ));
        assert!(matches!(
            split_and("a and"),
            Err(EvalError::MalformedExpression { .. })
        ));
    }
}
