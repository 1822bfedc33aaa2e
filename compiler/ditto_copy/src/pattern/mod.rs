//! Ordered text-rewrite rules.
//!
//! Rules rewrite serialized text, not a syntax tree. The scheduler and the
//! transform step only see the narrow [`TextRewriter`] interface; the
//! regular-expression engine behind it is [`PatternEngine`].

mod cache;

pub use cache::PatternCache;

use std::borrow::Cow;

use regex::Regex;

use crate::member::PatternRule;
use crate::PatternError;

/// Applies a member's rules to its copied text.
pub trait TextRewriter {
    /// Check that `pattern` can be applied, without applying it.
    fn check(&mut self, pattern: &str) -> Result<(), PatternError>;

    /// Apply `rules`, already in apply order, to every text independently.
    ///
    /// Each rule is compiled once and used for every text. Later rules see
    /// the output of earlier rules on the same text.
    fn rewrite_all(
        &mut self,
        rules: &[PatternRule],
        texts: &mut [&mut String],
    ) -> Result<(), PatternError>;
}

/// Regular-expression rewriting with a shared compiled-pattern cache.
///
/// Replacements use `$1` / `${name}` group references.
#[derive(Debug, Default)]
pub struct PatternEngine {
    cache: PatternCache,
}

impl PatternEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &PatternCache {
        &self.cache
    }

    fn compiled(&mut self, rules: &[PatternRule]) -> Result<Vec<Regex>, PatternError> {
        rules
            .iter()
            .map(|rule| self.cache.get_or_compile(&rule.pattern))
            .collect()
    }
}

impl TextRewriter for PatternEngine {
    fn check(&mut self, pattern: &str) -> Result<(), PatternError> {
        self.cache.get_or_compile(pattern).map(|_| ())
    }

    fn rewrite_all(
        &mut self,
        rules: &[PatternRule],
        texts: &mut [&mut String],
    ) -> Result<(), PatternError> {
        if rules.is_empty() {
            return Ok(());
        }
        let compiled = self.compiled(rules)?;
        for text in texts.iter_mut() {
            for (rule, regex) in rules.iter().zip(&compiled) {
                let rewritten = match regex.replace_all(text.as_str(), rule.replacement.as_str()) {
                    Cow::Owned(rewritten) => Some(rewritten),
                    Cow::Borrowed(_) => None,
                };
                if let Some(rewritten) = rewritten {
                    **text = rewritten;
                }
            }
        }
        tracing::trace!(rules = rules.len(), texts = texts.len(), "applied pattern rules");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
