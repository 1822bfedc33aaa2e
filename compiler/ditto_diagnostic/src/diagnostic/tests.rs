use super::*;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("test error")
        .with_label(Span::new(0, 5), "here")
        .with_note("some context")
        .with_arg("Source");

    assert_eq!(diag.code, ErrorCode::E1001);
    assert_eq!(diag.message, "test error");
    assert!(diag.is_error());
    assert_eq!(diag.labels.len(), 1);
    assert!(diag.labels[0].is_primary);
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.args, vec!["Source".to_owned()]);
}

#[test]
fn test_severity_follows_code() {
    assert_eq!(Diagnostic::for_code(ErrorCode::W3001).severity, Severity::Warning);
    assert_eq!(Diagnostic::for_code(ErrorCode::E3006).severity, Severity::Error);
}

#[test]
fn test_primary_span_skips_secondary_labels() {
    let diag = Diagnostic::warning(ErrorCode::W3002)
        .with_secondary_label(Span::new(1, 2), "first defined here")
        .with_label(Span::new(10, 20), "duplicate");
    assert_eq!(diag.primary_span(), Some(Span::new(10, 20)));
    assert!(!diag.is_error());
}

#[test]
fn test_diagnostic_display() {
    let diag = Diagnostic::error(ErrorCode::E2005)
        .with_message("cannot copy from self")
        .with_label(Span::new(0, 5), "here")
        .with_note("pick another target");

    let output = diag.to_string();
    assert!(output.starts_with("error [E2005]: cannot copy from self"));
    assert!(output.contains("--> 0..5: here"));
    assert!(output.contains("= note: pick another target"));
}
