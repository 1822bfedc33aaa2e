//! Generic type-parameter substitution over copied text.
//!
//! Pairs are computed once from the target's own parameters and the
//! supplied arguments, then applied in a single pass over the identifier
//! tokens of the original text. A replacement is never scanned again, so
//! `T -> U, U -> int` turns `T` into `U`, not `int`.

use ditto_ir::{TypeArg, TypeParam};
use rustc_hash::FxHashMap;

use crate::text::{apply_edits, tokenize, Edit, Token, TokenKind};

/// Parameter name to replacement text.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Substitution {
    pairs: Vec<(String, String)>,
}

impl Substitution {
    /// Pair `params` with `args` positionally, skipping pairs that would not
    /// change anything. Extra parameters or arguments are ignored.
    pub fn for_target(params: &[TypeParam], args: &[TypeArg]) -> Self {
        let pairs = params
            .iter()
            .zip(args)
            .map(|(param, arg)| (param.name.clone(), replacement_text(arg)))
            .filter(|(name, replacement)| name != replacement)
            .collect();
        Substitution { pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Replace every identifier naming a substituted parameter.
    ///
    /// Identifiers inside literals and comments are left alone. Unlike a
    /// whole-tree identifier replacement, a member access (`x.T`) is also
    /// left alone: a member that happens to share a parameter's name does
    /// not refer to that parameter.
    pub fn apply(&self, text: &str) -> String {
        if self.pairs.is_empty() {
            return text.to_owned();
        }
        let map: FxHashMap<&str, &str> = self
            .pairs
            .iter()
            .map(|(name, replacement)| (name.as_str(), replacement.as_str()))
            .collect();

        let tokens = tokenize(text);
        let edits: Vec<Edit> = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.is_identifier())
            .filter(|(i, _)| !is_member_access(text, &tokens, *i))
            .filter_map(|(_, token)| {
                map.get(token.name(text))
                    .map(|replacement| Edit::replace(*token, *replacement))
            })
            .collect();
        apply_edits(text, &edits)
    }
}

/// Keyword alias for primitives, the fully qualified generic name for
/// everything else, `?` appended when nullable.
pub fn replacement_text(arg: &TypeArg) -> String {
    let mut text = match arg.special {
        Some(special) => special.keyword().to_owned(),
        None => arg.qualified_name.clone(),
    };
    if arg.nullable {
        text.push('?');
    }
    text
}

fn is_member_access(text: &str, tokens: &[Token], index: usize) -> bool {
    index > 0 && tokens[index - 1].is_punct(text, '.')
}

const DECLARATION_MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "internal",
    "static",
    "extern",
    "unsafe",
];

/// Rename constructor and destructor declarations named `from` to `to`.
///
/// A declaration is an identifier followed by `(` and preceded by `~`, a
/// modifier, or the start of a member (`{`, `}`, `;`, `]`, start of text).
/// Object creation (`new Source()`) is not a declaration and keeps its name.
pub fn rename_special_members(text: &str, from: &str, to: &str) -> String {
    if from == to {
        return text.to_owned();
    }
    let tokens = tokenize(text);
    let edits: Vec<Edit> = tokens
        .iter()
        .enumerate()
        .filter(|(i, token)| {
            token.is_identifier()
                && token.name(text) == from
                && tokens.get(i + 1).is_some_and(|next| next.is_punct(text, '('))
                && starts_member(text, &tokens, *i)
        })
        .map(|(_, token)| Edit::replace(*token, to))
        .collect();
    apply_edits(text, &edits)
}

fn starts_member(text: &str, tokens: &[Token], index: usize) -> bool {
    let Some(previous) = index.checked_sub(1).map(|i| tokens[i]) else {
        return true;
    };
    if previous.is_identifier() {
        return DECLARATION_MODIFIERS.contains(&previous.text(text));
    }
    ['~', '{', '}', ';', ']']
        .iter()
        .any(|c| previous.is_punct(text, *c))
        || previous.kind == TokenKind::Comment
}

#[cfg(test)]
mod tests;
