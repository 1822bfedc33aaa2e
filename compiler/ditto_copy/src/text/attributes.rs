//! Attribute-list text: `[A, B(1)] [return: C]`.

use super::{tokenize, Token, TokenKind};

/// Every top-level `[...]` list in `text`, brackets included.
///
/// Brackets inside string literals and argument lists do not count.
pub fn attribute_lists(text: &str) -> Vec<&str> {
    let tokens = tokenize(text);
    let mut lists = Vec::new();
    let mut depth = 0usize;
    let mut open = 0;

    for token in &tokens {
        if token.kind != TokenKind::Punct {
            continue;
        }
        match token.text(text) {
            "[" => {
                if depth == 0 {
                    open = token.start;
                }
                depth += 1;
            }
            "]" if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    lists.push(&text[open..token.end]);
                }
            }
            _ => {}
        }
    }
    lists
}

/// Split one attribute list into its target specifier (`return`, `method`,
/// ...) and its comma-separated attributes.
pub fn split_attributes(list: &str) -> (Option<&str>, Vec<&str>) {
    let inner = list
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(list);
    let tokens = tokenize(inner);

    let (target, body_start) = match tokens.as_slice() {
        [first, colon, next, ..]
            if first.is_identifier()
                && colon.is_punct(inner, ':')
                && !next.is_punct(inner, ':') =>
        {
            (Some(first.text(inner)), colon.end)
        }
        _ => (None, 0),
    };

    let mut attributes = Vec::new();
    let mut depth = 0usize;
    let mut start = body_start;
    for token in tokens.iter().filter(|t| t.start >= body_start) {
        match punct(token, inner) {
            Some('(' | '[' | '{') => depth += 1,
            Some(')' | ']' | '}') => depth = depth.saturating_sub(1),
            Some(',') if depth == 0 => {
                push_trimmed(&mut attributes, &inner[start..token.start]);
                start = token.end;
            }
            _ => {}
        }
    }
    push_trimmed(&mut attributes, &inner[start..]);
    (target, attributes)
}

/// Name part of one attribute, e.g. `Ditto.Pattern` for `Ditto.Pattern("a", "b")`.
pub fn attribute_name(attribute: &str) -> &str {
    attribute
        .split_once('(')
        .map_or(attribute, |(name, _)| name)
        .trim()
}

fn punct(token: &Token, source: &str) -> Option<char> {
    if token.kind == TokenKind::Punct {
        token.text(source).chars().next()
    } else {
        None
    }
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, text: &'a str) {
    let text = text.trim();
    if !text.is_empty() {
        out.push(text);
    }
}
