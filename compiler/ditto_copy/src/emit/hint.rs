//! Output identifiers.
//!
//! Hint names only name outputs; nothing in the engine decides anything
//! from them.

use ditto_ir::SymbolKey;
use rustc_hash::FxHashSet;

use crate::member::MemberKind;

/// Derives an output identifier for a member.
pub trait HintNameProvider {
    fn hint_name(&self, key: &SymbolKey, kind: MemberKind) -> String;
}

/// Canonical key plus `.g.cs`: `N.Outer.Copy1.g.cs`, ``N.Outer.Source`1.g.cs``,
/// `N.Outer.Compute(int).g.cs`. Characters outside the portable set become `_`.
#[derive(Copy, Clone, Debug, Default)]
pub struct QualifiedHintNames;

impl HintNameProvider for QualifiedHintNames {
    fn hint_name(&self, key: &SymbolKey, _kind: MemberKind) -> String {
        let mut name: String = key
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || "._-+`(),[]{}".contains(c) {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        name.push_str(".g.cs");
        name
    }
}

/// Makes hint names unique within one run by appending `_2`, `_3`, ...
/// before the extension.
#[derive(Debug, Default)]
pub struct UniqueHints {
    used: FxHashSet<String>,
}

impl UniqueHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, hint: String) -> String {
        if self.used.insert(hint.clone()) {
            return hint;
        }
        let (stem, extension) = match hint.rfind(".g.") {
            Some(dot) => hint.split_at(dot),
            None => (hint.as_str(), ""),
        };
        let mut n = 2usize;
        loop {
            let candidate = format!("{stem}_{n}{extension}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
