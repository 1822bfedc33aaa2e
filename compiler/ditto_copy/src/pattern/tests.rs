#![allow(clippy::unwrap_used)]

use super::*;
use ditto_ir::Span;
use pretty_assertions::assert_eq;

fn rule(pattern: &str, replacement: &str, index: usize) -> PatternRule {
    PatternRule {
        pattern: pattern.to_owned(),
        replacement: replacement.to_owned(),
        order: 0,
        index,
        span: Span::DUMMY,
    }
}

#[test]
fn rewrites_each_text_independently() {
    let mut engine = PatternEngine::new();
    let mut body = "return 1 + 2;".to_owned();
    let mut docs = "/// Adds 1".to_owned();
    let mut attrs = String::new();
    engine
        .rewrite_all(
            &[rule("1", "10", 0)],
            &mut [&mut body, &mut attrs, &mut docs],
        )
        .unwrap();
    assert_eq!(body, "return 10 + 2;");
    assert_eq!(docs, "/// Adds 10");
    assert_eq!(attrs, "");
}

#[test]
fn rules_apply_sequentially_with_group_references() {
    let mut engine = PatternEngine::new();
    let mut body = "Add(a, b)".to_owned();
    engine
        .rewrite_all(
            &[rule(r"Add\((\w+), (\w+)\)", "Sub($2, $1)", 0), rule("Sub", "Mul", 1)],
            &mut [&mut body],
        )
        .unwrap();
    assert_eq!(body, "Mul(b, a)");
}

#[test]
fn invalid_pattern_is_an_error() {
    let mut engine = PatternEngine::new();
    let err = engine.check("(unclosed").unwrap_err();
    assert!(err.to_string().contains("(unclosed"));
    assert!(engine.cache().is_empty());
}

#[test]
fn cache_evicts_oldest_first() {
    let mut cache = PatternCache::with_capacity(2);
    cache.get_or_compile("a").unwrap();
    cache.get_or_compile("b").unwrap();
    cache.get_or_compile("a").unwrap();
    cache.get_or_compile("c").unwrap();
    assert_eq!(cache.len(), 2);
    assert!(!cache.contains("a"));
    assert!(cache.contains("b"));
    assert!(cache.contains("c"));
}

#[test]
fn default_capacity() {
    assert_eq!(PatternCache::default().capacity(), crate::PATTERN_CACHE_CAPACITY);
}
