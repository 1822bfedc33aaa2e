//! Token-level view of serialized declaration text.
//!
//! Copied text is rewritten as text, not as a tree. To keep generic
//! substitution and special-member renaming from touching string literals
//! or comments, both work over the token stream produced here. The scanner
//! is deliberately forgiving: anything it does not recognize becomes a
//! one-character punctuation token, so it never fails.

mod attributes;
mod cursor;

pub use attributes::{attribute_lists, attribute_name, split_attributes};

use cursor::Cursor;

/// Token category.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Identifier or keyword, including the `@` of a verbatim identifier.
    Identifier,
    Number,
    /// Any string literal (regular, verbatim, interpolated).
    String,
    Char,
    Comment,
    Punct,
}

/// A token as a byte range into the scanned text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Identifier name with any verbatim `@` removed.
    pub fn name<'a>(&self, source: &'a str) -> &'a str {
        let text = self.text(source);
        text.strip_prefix('@').unwrap_or(text)
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    /// Whether this is the single punctuation character `c`.
    pub fn is_punct(&self, source: &str, c: char) -> bool {
        self.kind == TokenKind::Punct && self.text(source).starts_with(c)
    }
}

/// Split `text` into tokens. Whitespace is not tokenized.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut cursor = Cursor::new(text);
    let mut tokens = Vec::new();

    loop {
        cursor.eat_while(|b| b.is_ascii_whitespace());
        if cursor.is_eof() {
            break;
        }
        let start = cursor.pos();
        let kind = scan_token(&mut cursor);
        tokens.push(Token {
            kind,
            start,
            end: cursor.pos(),
        });
    }

    tokens
}

fn scan_token(cursor: &mut Cursor<'_>) -> TokenKind {
    match (cursor.current(), cursor.peek(), cursor.peek2()) {
        (b'/', b'/', _) => {
            cursor.eat_while(|b| b != b'\n');
            TokenKind::Comment
        }
        (b'/', b'*', _) => {
            cursor.advance_n(2);
            cursor.eat_until_pair(b'*', b'/');
            TokenKind::Comment
        }
        (b'@', b'"', _) | (b'$', b'@', b'"') | (b'@', b'$', b'"') => {
            cursor.eat_while(|b| b == b'@' || b == b'$');
            cursor.advance();
            scan_verbatim_string(cursor);
            TokenKind::String
        }
        (b'$', b'"', _) => {
            cursor.advance_n(2);
            scan_interpolated_string(cursor);
            TokenKind::String
        }
        (b'"', _, _) => {
            cursor.advance();
            scan_quoted(cursor, b'"');
            TokenKind::String
        }
        (b'\'', _, _) => {
            cursor.advance();
            scan_quoted(cursor, b'\'');
            TokenKind::Char
        }
        (b'@', next, _) if is_ident_start(next) => {
            cursor.advance();
            cursor.eat_while(is_ident_continue);
            TokenKind::Identifier
        }
        (b, _, _) if is_ident_start(b) => {
            cursor.eat_while(is_ident_continue);
            TokenKind::Identifier
        }
        (b, _, _) if b.is_ascii_digit() => {
            scan_number(cursor);
            TokenKind::Number
        }
        _ => {
            cursor.advance_char();
            TokenKind::Punct
        }
    }
}

/// Non-ASCII bytes are accepted as identifier characters.
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

fn scan_number(cursor: &mut Cursor<'_>) {
    loop {
        cursor.eat_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        if cursor.current() == b'.' && cursor.peek().is_ascii_digit() {
            cursor.advance();
        } else {
            break;
        }
    }
}

/// Body of a `"..."` or `'...'` literal after the opening quote.
/// Unterminated literals end at the line break.
fn scan_quoted(cursor: &mut Cursor<'_>, quote: u8) {
    while !cursor.is_eof() {
        match cursor.current() {
            b'\\' => {
                cursor.advance();
                if !cursor.is_eof() {
                    cursor.advance_char();
                }
            }
            b'\n' => return,
            b if b == quote => {
                cursor.advance();
                return;
            }
            _ => cursor.advance_char(),
        }
    }
}

fn scan_verbatim_string(cursor: &mut Cursor<'_>) {
    while !cursor.is_eof() {
        if cursor.current() == b'"' {
            if cursor.peek() == b'"' {
                cursor.advance_n(2);
                continue;
            }
            cursor.advance();
            return;
        }
        cursor.advance_char();
    }
}

/// Interpolation holes are part of the literal token; nested string
/// literals inside a hole are skipped so their quotes do not end it.
fn scan_interpolated_string(cursor: &mut Cursor<'_>) {
    let mut depth = 0usize;
    while !cursor.is_eof() {
        match (cursor.current(), depth) {
            (b'\\', 0) => {
                cursor.advance();
                if !cursor.is_eof() {
                    cursor.advance_char();
                }
            }
            (b'"', 0) => {
                cursor.advance();
                return;
            }
            (b'{', 0) if cursor.peek() == b'{' => cursor.advance_n(2),
            (b'{', _) => {
                depth += 1;
                cursor.advance();
            }
            (b'}', d) if d > 0 => {
                depth -= 1;
                cursor.advance();
            }
            (b'"', _) => {
                cursor.advance();
                scan_quoted(cursor, b'"');
            }
            (b'\n', 0) => return,
            _ => cursor.advance_char(),
        }
    }
}

/// A replacement of `start..end` with `text`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Edit {
    pub fn replace(token: Token, text: impl Into<String>) -> Self {
        Edit {
            start: token.start,
            end: token.end,
            text: text.into(),
        }
    }
}

/// Apply non-overlapping edits, given in ascending order, to `source`.
pub fn apply_edits(source: &str, edits: &[Edit]) -> String {
    if edits.is_empty() {
        return source.to_owned();
    }
    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for edit in edits {
        debug_assert!(edit.start >= last, "edits must be sorted and disjoint");
        out.push_str(&source[last..edit.start]);
        out.push_str(&edit.text);
        last = edit.end;
    }
    out.push_str(&source[last..]);
    out
}

/// Remove leading and trailing blank lines and the indentation common to
/// every non-blank line.
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return String::new();
    };
    let lines = &lines[first..=last];

    let common = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                ""
            } else {
                l.get(common..).unwrap_or_else(|| l.trim_start())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
