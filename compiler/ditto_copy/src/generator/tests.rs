#![allow(clippy::unwrap_used)]

use super::*;
use crate::member::{Candidate, PatternRequest};
use ditto_diagnostic::ErrorCode;
use ditto_ir::{DeclSpec, Program};
use pretty_assertions::assert_eq;

struct Fixture {
    program: Program,
    a: SymbolId,
    b: SymbolId,
    c: SymbolId,
    plain: SymbolId,
}

fn fixture() -> Fixture {
    let mut builder = Program::builder();
    let outer = builder.add(DeclSpec::class("Outer").namespace("N").partial());
    builder.add(DeclSpec::class("Source").inside(outer).body("int value;"));
    let a = builder.add(DeclSpec::class("A").inside(outer).partial());
    let b = builder.add(DeclSpec::class("B").inside(outer).partial());
    let c = builder.add(DeclSpec::class("C").inside(outer).partial());
    let plain = builder.add(DeclSpec::class("Plain").inside(outer));
    Fixture {
        program: builder.build(),
        a,
        b,
        c,
        plain,
    }
}

fn keys(report: &GenerationReport) -> Vec<&str> {
    report.outputs.iter().map(|o| o.key.as_str()).collect()
}

#[test]
fn chain_is_emitted_in_dependency_order() {
    let f = fixture();
    let group = CandidateSet::new()
        .with_type(Candidate::new(f.a).copy_from("B"))
        .with_type(Candidate::new(f.b).copy_from("C"))
        .with_type(Candidate::new(f.c).copy_from("Source"));

    let report = Generator::new(&f.program).generate_group(&group).unwrap();
    assert_eq!(keys(&report), vec!["N.Outer.C", "N.Outer.B", "N.Outer.A"]);
    assert!(report.stalled.is_empty());
    assert!(report.rejected.is_empty());

    // The end of the chain carries the original text.
    let a = report.output("N.Outer.A").unwrap();
    assert!(a.text.contains("int value;"), "{}", a.text);
    assert_eq!(a.origins, vec![SymbolKey::new("N.Outer.B")]);
}

#[test]
fn mutual_copy_stalls_silently() {
    let f = fixture();
    let group = CandidateSet::new()
        .with_type(Candidate::new(f.a).copy_from("B"))
        .with_type(Candidate::new(f.b).copy_from("A"));

    let report = Generator::new(&f.program).generate_group(&group).unwrap();
    assert!(report.outputs.is_empty());
    assert!(report.diagnostics.is_empty());
    let stalled: Vec<&str> = report.stalled.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(stalled, vec!["N.Outer.A", "N.Outer.B"]);
    assert_eq!(report.stalled[0].missing, vec![SymbolKey::new("N.Outer.B")]);
}

#[test]
fn stalled_members_can_be_reported() {
    let f = fixture();
    let group = CandidateSet::new()
        .with_type(Candidate::new(f.a).copy_from("B"))
        .with_type(Candidate::new(f.b).copy_from("A"));

    let report = Generator::new(&f.program)
        .with_config(GeneratorConfig::default().with_stalled_dependency_reports(true))
        .generate_group(&group)
        .unwrap();
    let codes: Vec<ErrorCode> = report.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E2007, ErrorCode::E2007]);
    assert!(report.diagnostics[0].message.contains("N.Outer.A"));
}

#[test]
fn rejected_members_keep_their_reason() {
    let f = fixture();
    let group = CandidateSet::new()
        .with_type(Candidate::new(f.plain).copy_from("Source"))
        .with_type(Candidate::new(f.c).copy_from("Source"));

    let report = Generator::new(&f.program).generate_group(&group).unwrap();
    assert_eq!(keys(&report), vec!["N.Outer.C"]);
    assert_eq!(report.rejected.len(), 1);
    let rejection = &report.rejected[0];
    assert_eq!(rejection.symbol, f.plain);
    assert_eq!(
        rejection.reason.as_ref().map(|d| d.code),
        Some(ErrorCode::E2001)
    );
}

#[test]
fn invalid_pattern_is_dropped_and_reported() {
    let f = fixture();
    let group = CandidateSet::new().with_type(
        Candidate::new(f.c)
            .copy_from("Source")
            .pattern(PatternRequest::new("(", "x"))
            .pattern(PatternRequest::new("value", "count")),
    );

    let report = Generator::new(&f.program).generate_group(&group).unwrap();
    let codes: Vec<ErrorCode> = report.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E3006]);
    let c = report.output("N.Outer.C").unwrap();
    assert!(c.text.contains("int count;"), "{}", c.text);
}

#[test]
fn registry_is_per_group_and_hints_are_per_run() {
    let f = fixture();
    let group = CandidateSet::new().with_type(Candidate::new(f.c).copy_from("Source"));

    let report = Generator::new(&f.program)
        .generate(&[group.clone(), group])
        .unwrap();
    let hints: Vec<&str> = report.outputs.iter().map(|o| o.hint_name.as_str()).collect();
    assert_eq!(hints, vec!["N.Outer.C.g.cs", "N.Outer.C_2.g.cs"]);
}

#[test]
fn custom_hint_names() {
    struct Short;
    impl HintNameProvider for Short {
        fn hint_name(&self, key: &SymbolKey, _kind: MemberKind) -> String {
            format!("{}.cs", key.as_str().rsplit('.').next().unwrap_or_default())
        }
    }

    let f = fixture();
    let group = CandidateSet::new().with_type(Candidate::new(f.c).copy_from("Source"));
    let report = Generator::new(&f.program)
        .with_hint_names(Short)
        .generate_group(&group)
        .unwrap();
    assert_eq!(report.outputs[0].hint_name, "C.cs");
}

#[test]
fn member_without_targets_emits_nothing() {
    let f = fixture();
    let group = CandidateSet::new()
        .with_type(Candidate::new(f.c))
        .with_type(Candidate::new(f.a).copy_from("C"));

    let report = Generator::new(&f.program).generate_group(&group).unwrap();
    // C is still registered, so A is not left waiting for it.
    assert_eq!(keys(&report), vec!["N.Outer.A"]);
    assert!(report.stalled.is_empty());
}

#[test]
fn cancellation_aborts_the_run() {
    let f = fixture();
    let cancel = CancellationToken::new();
    cancel.cancel();
    let group = CandidateSet::new().with_type(Candidate::new(f.c).copy_from("Source"));

    let generator = Generator::new(&f.program).with_cancellation(cancel);
    assert!(matches!(
        generator.generate_group(&group),
        Err(GenerateError::Cancelled)
    ));
    assert!(matches!(generator.analyze(&group), Err(GenerateError::Cancelled)));
}

#[test]
fn analysis_accumulates_every_problem() {
    let f = fixture();
    let group = CandidateSet::new()
        .with_type(Candidate::new(f.plain).copy_from("Missing"))
        .with_type(
            Candidate::new(f.a)
                .copy_from("A")
                .copy_from("Source")
                .copy_from("Source"),
        );

    let diagnostics = Generator::new(&f.program).analyze(&group).unwrap();
    let mut codes: Vec<ErrorCode> = diagnostics.iter().map(|d| d.code).collect();
    codes.sort_by_key(|c| c.as_str());
    assert_eq!(
        codes,
        vec![
            ErrorCode::E1001,
            ErrorCode::E2001,
            ErrorCode::E2005,
            ErrorCode::W3001
        ]
    );
}

#[test]
fn deferred_candidate_that_stops_validating_is_rejected() {
    let f = fixture();
    let group = CandidateSet::new().with_type(Candidate::new(f.plain).copy_from("Source"));
    let config = GeneratorConfig::default();
    let pending = pending_symbols(&group);
    let cancel = CancellationToken::new();
    let validator = Validator::new(&f.program, &config, &pending, &cancel);
    let registry = SymbolRegistry::new();
    let mut engine = PatternEngine::new();
    let mut outputs = Vec::new();
    let mut rejected = Vec::new();
    let mut pass = Pass {
        program: &f.program,
        config: &config,
        group: &group,
        validator: &validator,
        registry: &registry,
        rewriter: &mut engine,
        outputs: &mut outputs,
        rejected: &mut rejected,
    };
    let durable = DurableRef {
        origin: CandidateRef {
            kind: MemberKind::Type,
            index: 0,
        },
        key: SymbolKey::new("N.Outer.Plain"),
        hint: "N.Outer.Plain.g.cs".to_owned(),
    };

    assert!(pass.materialize(&durable).unwrap().is_none());
    // Dropped again when the stall report re-materializes it.
    assert!(pass.materialize(&durable).unwrap().is_none());

    assert!(outputs.is_empty());
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].symbol, f.plain);
    assert_eq!(rejected[0].key, SymbolKey::new("N.Outer.Plain"));
    assert_eq!(
        rejected[0].reason.as_ref().map(|d| d.code),
        Some(ErrorCode::E2001)
    );
}
