// src/extract/complexity.rs
//! Lexical complexity: 1 + the number of branching constructs found within a
//! brace-matched function body. Shared by both extraction strategies.

use once_cell::sync::Lazy;
use regex::Regex;

static BRANCH_KEYWORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:if|for|while|case|catch)\b").expect("valid branch pattern"));

/// Replaces string literals and comments with spaces, preserving length and
/// newlines, so that brace matching and keyword counting ignore them.
#[must_use]
pub fn mask_code(source: &str) -> String {
    #[derive(PartialEq)]
    enum State {
        Code,
        Line,
        Block,
        Str(char),
    }

    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '"' | '\'' | '`' => {
                    state = State::Str(c);
                    out.push(' ');
                }
                '/' if chars.peek() == Some(&'/') => {
                    state = State::Line;
                    out.push(' ');
                }
                '/' if chars.peek() == Some(&'*') => {
                    state = State::Block;
                    out.push(' ');
                }
                _ => out.push(c),
            },
            State::Line => {
                if c == '\n' {
                    state = State::Code;
                    out.push('\n');
                } else {
                    out.push(' ');
                }
            }
            State::Block => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = State::Code;
                } else if c == '\n' {
                    out.push('\n');
                } else {
                    out.push(' ');
                }
            }
            State::Str(quote) => {
                if c == '\\' {
                    chars.next();
                    out.push_str("  ");
                } else if c == quote {
                    state = State::Code;
                    out.push(' ');
                } else if c == '\n' {
                    out.push('\n');
                } else {
                    out.push(' ');
                }
            }
        }
    }
    out
}

/// Counts branching constructs in already-masked body text.
#[must_use]
pub fn count_branches(masked_body: &str) -> u32 {
    let mut count = BRANCH_KEYWORDS.find_iter(masked_body).count();
    count += masked_body.matches("&&").count();
    count += masked_body.matches("||").count();
    count += masked_body.matches("??").count();
    count += count_ternaries(masked_body);
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Cyclomatic complexity of a masked function body. Never below 1.
#[must_use]
pub fn complexity_of(masked_body: &str) -> u32 {
    1 + count_branches(masked_body)
}

fn count_ternaries(masked: &str) -> usize {
    let bytes = masked.as_bytes();
    let mut count = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'?' {
            continue;
        }
        // Skip `??`, `?.` (optional chaining) and `?:`/`?,`/`?)` (optional
        // parameter or property markers).
        if i > 0 && bytes[i - 1] == b'?' {
            continue;
        }
        let next = bytes[i + 1..]
            .iter()
            .copied()
            .find(|&n| n != b' ' && n != b'\n');
        match next {
            Some(b'?' | b'.' | b':' | b',' | b')') | None => {}
            Some(_) => count += 1,
        }
    }
    count
}

/// Finds the span of the first `{ ... }` block at or after `from` in masked
/// text. Returns byte indices of the opening and closing braces.
#[must_use]
pub fn find_body_span(masked: &str, from: usize) -> Option<(usize, usize)> {
    let bytes = masked.as_bytes();
    let open = bytes[from..].iter().position(|&b| b == b'{')? + from;

    let mut depth = 0usize;
    for (i, &b) in bytes[open..].iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((open, open + i));
                }
            }
            _ => {}
        }
    }
    None
}

/// 1-based line number of a byte offset.
#[must_use]
pub fn line_number(source: &str, byte: usize) -> usize {
    source.as_bytes()[..byte.min(source.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// Splits a raw parameter list on top-level commas.
#[must_use]
pub fn split_params(raw: &str) -> Vec<String> {
    let inner = raw.trim().trim_start_matches('(').trim_end_matches(')');
    let mut params = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();

    for c in inner.chars() {
        match c {
            '(' | '[' | '{' | '<' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' | '}' | '>' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                push_param(&mut params, &current);
                current.clear();
            }
            _ => current.push(c),
        }
    }
    push_param(&mut params, &current);
    params
}

fn push_param(params: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        params.push(trimmed.to_string());
    }
}
