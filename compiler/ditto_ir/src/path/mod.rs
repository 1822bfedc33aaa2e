//! Parsing of reference text.
//!
//! A reference is a dotted path whose segments may carry generic arguments
//! (`Outer.Source<int>`, or the cref spelling `Source{int}`), optionally
//! followed by a parameter list (`Compute(int, string)`), optionally
//! prefixed with `global::`.

/// One dotted segment of a reference.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Segment {
    pub name: String,
    /// Generic argument texts, as written.
    pub type_args: Vec<String>,
}

/// A parsed reference.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ReferencePath {
    /// Written with the `global::` alias.
    pub global: bool,
    pub segments: Vec<Segment>,
    /// Parameter type texts when the reference is call-like.
    pub parameters: Option<Vec<String>>,
}

impl ReferencePath {
    /// Parse reference text. Returns `None` for text that is not a
    /// well-formed reference.
    pub fn parse(text: &str) -> Option<ReferencePath> {
        let text = text.trim();
        let (global, text) = match text.strip_prefix("global::") {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let (path, parameters) = match find_top_level(text, '(') {
            Some(open) => {
                let inner = text[open + 1..].strip_suffix(')')?;
                let parameters = split_top_level(inner, ',')
                    .into_iter()
                    .filter(|p| !p.is_empty())
                    .collect();
                (&text[..open], Some(parameters))
            }
            None => (text, None),
        };

        let mut segments = Vec::new();
        for raw in split_top_level(path, '.') {
            segments.push(parse_segment(&raw)?);
        }
        if segments.is_empty() {
            return None;
        }

        Some(ReferencePath {
            global,
            segments,
            parameters,
        })
    }

    pub fn is_call_like(&self) -> bool {
        self.parameters.is_some()
    }

    /// The final segment, which names the referenced symbol.
    pub fn last(&self) -> &Segment {
        // parse() never produces an empty path
        &self.segments[self.segments.len() - 1]
    }
}

/// Whether reference text contains an argument list.
pub fn looks_like_call(text: &str) -> bool {
    find_top_level(text, '(').is_some()
}

fn parse_segment(raw: &str) -> Option<Segment> {
    let raw = raw.trim();
    let (name, type_args) = match raw.find(['<', '{']) {
        Some(open) => {
            let close = match raw.as_bytes()[open] {
                b'<' => '>',
                _ => '}',
            };
            let inner = raw[open + 1..].strip_suffix(close)?;
            let args = split_top_level(inner, ',');
            if args.iter().any(String::is_empty) {
                return None;
            }
            (&raw[..open], args)
        }
        None => (raw, Vec::new()),
    };
    let name = name.trim().trim_start_matches('@');
    if !is_identifier(name) {
        return None;
    }
    Some(Segment {
        name: name.to_owned(),
        type_args,
    })
}

/// Identifier check for the host language: a letter or `_`, then letters,
/// digits or `_`.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Find `needle` outside any bracket pair.
fn find_top_level(text: &str, needle: char) -> Option<usize> {
    let mut depth = 0usize;
    for (index, c) in text.char_indices() {
        if c == needle && depth == 0 {
            return Some(index);
        }
        match c {
            '<' | '{' | '[' | '(' => depth += 1,
            '>' | '}' | ']' | ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

/// Split on `separator` outside any bracket pair, trimming each piece.
pub fn split_top_level(text: &str, separator: char) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, c) in text.char_indices() {
        match c {
            '<' | '{' | '[' | '(' => depth += 1,
            '>' | '}' | ']' | ')' => depth = depth.saturating_sub(1),
            _ if c == separator && depth == 0 => {
                parts.push(text[start..index].trim().to_owned());
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim().to_owned());
    parts
}

#[cfg(test)]
mod tests;
