use super::*;
use pretty_assertions::assert_eq;

fn error_at(start: u32, message: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message(message)
        .with_label(Span::new(start, start + 1), "here")
}

#[test]
fn test_flush_sorts_by_location() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(error_at(30, "third")));
    assert!(queue.add(error_at(10, "first")));
    assert!(queue.add(Diagnostic::warning(ErrorCode::W3003).with_message("nowhere")));
    assert!(queue.add(error_at(20, "second")));

    let messages: Vec<String> = queue.flush().into_iter().map(|d| d.message).collect();
    assert_eq!(messages, vec!["first", "second", "third", "nowhere"]);
    assert!(queue.is_empty());
}

#[test]
fn test_identical_reports_deduplicated() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(error_at(5, "cannot resolve `Source`")));
    assert!(!queue.add(error_at(5, "cannot resolve `Source`")));
    assert!(queue.add(error_at(6, "cannot resolve `Source`")));
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn test_unlimited_keeps_duplicates() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    for _ in 0..3 {
        assert!(queue.add(error_at(5, "same")));
    }
    assert_eq!(queue.len(), 3);
}

#[test]
fn test_error_limit_truncates_and_reports() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 2,
        deduplicate: true,
    });
    assert!(queue.add(error_at(1, "a")));
    assert!(queue.add(error_at(2, "b")));
    assert!(queue.limit_reached());
    assert!(!queue.add(error_at(3, "c")));
    // warnings are not subject to the error limit
    assert!(queue.add(Diagnostic::warning(ErrorCode::W3001).with_message("w")));

    let flushed = queue.flush();
    assert_eq!(flushed.len(), 4);
    assert_eq!(flushed[3].code, ErrorCode::E9002);
}

#[test]
fn test_has_errors_gives_guarantee() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.has_errors().is_none());
    queue.add(Diagnostic::warning(ErrorCode::W3002).with_message("warn"));
    assert!(queue.has_errors().is_none());
    let _proof = queue.emit_error(error_at(0, "boom"));
    assert!(queue.has_errors().is_some());
}
