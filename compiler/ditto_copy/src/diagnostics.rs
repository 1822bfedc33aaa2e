//! Constructors for every diagnostic the engine reports.
//!
//! Messages name symbols by their display names; the positional `args`
//! carry the same names for hosts that format from their own tables.

use ditto_diagnostic::{Diagnostic, ErrorCode};
use ditto_ir::{Constraint, DeclKind, Span};

#[cold]
pub fn unresolved(reference: &str, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message(format!("cannot resolve copy-from reference `{reference}`"))
        .with_label(span, "no declaration with this name is visible here")
        .with_arg(reference)
}

#[cold]
pub fn unspecified_target(span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message("copy-from annotation does not name a target")
        .with_label(span, "target required")
}

#[cold]
pub fn unknown_fragment(target: &str, fragment: &str, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message(format!("`{target}` has no partial declaration named `{fragment}`"))
        .with_label(span, "unknown fragment selector")
        .with_arg(target)
        .with_arg(fragment)
}

#[cold]
pub fn conflict(reference: &str, candidates: &[String], span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1002)
        .with_message(format!("copy-from reference `{reference}` is ambiguous"))
        .with_label(span, format!("{} candidates match", candidates.len()))
        .with_note(format!("candidates: {}", candidates.join(", ")))
        .with_arg(reference)
}

#[cold]
pub fn not_accessible(target: &str, member: &str, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1003)
        .with_message(format!(
            "the implementation of `{target}` is not accessible from `{member}`"
        ))
        .with_label(span, "inaccessible target")
        .with_note("copies cannot cross compilation-unit boundaries")
        .with_arg(target)
        .with_arg(member)
}

#[cold]
pub fn wrong_kind(target: &str, found: DeclKind, expected: &str, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1004)
        .with_message(format!(
            "cannot copy a {expected} from {} `{target}`",
            found.describe()
        ))
        .with_label(span, format!("expected a {expected}"))
        .with_arg(target)
}

#[cold]
pub fn no_implementation(target: &str, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1005)
        .with_message(format!("cannot copy from method `{target}` without an implementation"))
        .with_label(span, "target has no body")
        .with_arg(target)
}

#[cold]
pub fn wrong_arity(reference: &str, expected: usize, found: usize, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1006)
        .with_message(format!(
            "`{reference}` expects {expected} type argument(s), {found} supplied"
        ))
        .with_label(span, "wrong number of type arguments")
        .with_arg(reference)
}

#[cold]
pub fn member_not_open(member: &str, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2001)
        .with_message(format!("`{member}` must be declared partial to be generated"))
        .with_label(span, "not open for extension")
        .with_arg(member)
}

#[cold]
pub fn container_not_open(member: &str, container: &str, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2002)
        .with_message(format!(
            "`{container}`, which contains `{member}`, must be declared partial"
        ))
        .with_label(span, "containing type is not open for extension")
        .with_arg(member)
        .with_arg(container)
}

#[cold]
pub fn already_implemented(member: &str, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2003)
        .with_message(format!("partial method `{member}` already has an implementation"))
        .with_label(span, "remove the body to generate it")
        .with_arg(member)
}

#[cold]
pub fn unsupported_kind(member: &str, kind: DeclKind, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2004)
        .with_message(format!("{} `{member}` cannot be generated by copying", kind.describe()))
        .with_label(span, "unsupported member kind")
        .with_arg(member)
}

#[cold]
pub fn invalid_target(target: &str, relation: &str, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2005)
        .with_message(format!("cannot copy from `{target}`: it is {relation}"))
        .with_label(span, "invalid copy-from target")
        .with_arg(target)
}

#[cold]
pub fn constraint_violation(
    argument: &str,
    parameter: &str,
    constraint: &Constraint,
    span: Span,
) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2006)
        .with_message(format!(
            "type argument `{argument}` does not satisfy constraint `{}` on `{parameter}`",
            constraint.describe()
        ))
        .with_label(span, "constraint not satisfied")
        .with_arg(argument)
        .with_arg(parameter)
}

#[cold]
pub fn circular_dependency(member: &str, missing: &[String], span: Span) -> Diagnostic {
    let mut diag = Diagnostic::error(ErrorCode::E2007)
        .with_message(format!(
            "`{member}` was not generated: its copy-from dependencies never became available"
        ))
        .with_label(span, "dependency cycle or missing dependency")
        .with_arg(member);
    if !missing.is_empty() {
        diag = diag.with_note(format!("still waiting for: {}", missing.join(", ")));
    }
    diag
}

#[cold]
pub fn duplicate_target(target: &str, span: Span, first: Span) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W3001)
        .with_message(format!("`{target}` is already a copy-from target"))
        .with_label(span, "duplicate target ignored")
        .with_secondary_label(first, "first specified here")
        .with_arg(target)
}

#[cold]
pub fn duplicate_pattern(pattern: &str, span: Span, first: Span) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W3002)
        .with_message(format!("pattern `{pattern}` is specified more than once"))
        .with_label(span, "duplicate pattern ignored")
        .with_secondary_label(first, "first specified here")
        .with_arg(pattern)
}

#[cold]
pub fn redundant_pattern(member: &str, span: Span) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W3003)
        .with_message(format!("pattern on `{member}` has no copy-from target to apply to"))
        .with_label(span, "redundant pattern")
        .with_arg(member)
}

#[cold]
pub fn malformed_pattern(missing: &str, span: Span) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W3004)
        .with_message(format!("pattern is missing its {missing}"))
        .with_label(span, "pattern ignored")
        .with_arg(missing)
}

#[cold]
pub fn pattern_on_other_declaration(member: &str, span: Span) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W3005)
        .with_message(format!(
            "pattern must be on the partial declaration of `{member}` that holds the copy-from annotation"
        ))
        .with_label(span, "pattern ignored")
        .with_arg(member)
}

#[cold]
pub fn invalid_pattern(pattern: &str, reason: &str, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3006)
        .with_message(format!("pattern `{pattern}` is not a valid regular expression"))
        .with_label(span, "pattern ignored")
        .with_note(reason.to_owned())
        .with_arg(pattern)
}

#[cold]
pub fn name_collision(target: &str, name: &str, span: Span) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W3007)
        .with_message(format!(
            "copying `{target}` would declare `{name}`, which collides with an existing member"
        ))
        .with_label(span, "target skipped")
        .with_arg(target)
        .with_arg(name)
}
