//! End-to-end generation scenarios over an in-memory program.

#![allow(clippy::unwrap_used)]

use ditto_copy::{
    Candidate, CandidateSet, CopyRequest, DocumentationPolicy, GenerationReport, Generator,
    GeneratorConfig, PatternRequest, Reference,
};
use ditto_diagnostic::ErrorCode;
use ditto_ir::{
    Accessibility, Constraint, DeclSpec, Program, Span, SpecialType, SymbolId, TypeArg, TypeParam,
};
use pretty_assertions::assert_eq;

struct Sample {
    program: Program,
    outer: SymbolId,
    copy: SymbolId,
    nested: SymbolId,
    generic: SymbolId,
    twice: SymbolId,
    thrice: SymbolId,
    overloaded: SymbolId,
}

/// ```text
/// namespace N {
///   partial class Outer {
///     class Source { public int Compute() { return 1 + 2; } }
///     class Box<T> where T : struct { T value; public T Get() => value; }
///     partial class Copy1 { partial class Nested { } }
///     partial class Copy2 { }
///     int Compute(int x) { return x * 2; }
///     partial int Twice(int x);
///     partial int Thrice(int x);
///     int Pick(int x) { return 1; }
///     int Pick(string x) { return 2; }
///     partial int Overloaded(int x);
///   }
/// }
/// ```
fn sample() -> Sample {
    let mut b = Program::builder();
    let outer = b.add(DeclSpec::class("Outer").namespace("N").partial());
    b.add(
        DeclSpec::class("Source")
            .inside(outer)
            .body("public int Compute() { return 1 + 2; }"),
    );
    b.add(
        DeclSpec::class("Box")
            .inside(outer)
            .type_param(TypeParam::new("T").with_constraint(Constraint::ValueType))
            .body("T value;\npublic T Get() => value;"),
    );
    let copy = b.add(DeclSpec::class("Copy1").inside(outer).partial());
    let nested = b.add(DeclSpec::class("Nested").inside(copy).partial());
    let generic = b.add(DeclSpec::class("Copy2").inside(outer).partial());
    b.add(
        DeclSpec::method("Compute")
            .inside(outer)
            .parameter("int")
            .returns("int")
            .body("return x * 2;"),
    );
    let twice = b.add(
        DeclSpec::method("Twice")
            .inside(outer)
            .partial()
            .parameter("int")
            .returns("int")
            .signature("public partial int Twice(int x)"),
    );
    let thrice = b.add(
        DeclSpec::method("Thrice")
            .inside(outer)
            .partial()
            .parameter("int")
            .returns("int")
            .signature("public partial int Thrice(int x)"),
    );
    b.add(
        DeclSpec::method("Pick")
            .inside(outer)
            .parameter("int")
            .returns("int")
            .body("return 1;"),
    );
    b.add(
        DeclSpec::method("Pick")
            .inside(outer)
            .parameter("string")
            .returns("int")
            .accessibility(Accessibility::Internal)
            .body("return 2;"),
    );
    let overloaded = b.add(
        DeclSpec::method("Overloaded")
            .inside(outer)
            .partial()
            .parameter("int")
            .returns("int")
            .signature("public partial int Overloaded(int x)"),
    );
    Sample {
        program: b.build(),
        outer,
        copy,
        nested,
        generic,
        twice,
        thrice,
        overloaded,
    }
}

fn generate(program: &Program, group: &CandidateSet) -> GenerationReport {
    Generator::new(program).generate_group(group).unwrap()
}

fn only_text(report: &GenerationReport) -> &str {
    assert_eq!(report.outputs.len(), 1, "{:?}", report.rejected);
    &report.outputs[0].text
}

#[test]
fn pattern_rewrites_copied_type() {
    let s = sample();
    let group = CandidateSet::new().with_type(
        Candidate::new(s.copy)
            .copy_from("Source")
            .pattern(PatternRequest::new("1", "10")),
    );
    let report = generate(&s.program, &group);
    assert_eq!(report.outputs[0].hint_name, "N.Outer.Copy1.g.cs");
    assert_eq!(
        only_text(&report),
        r#"// <auto-generated/>
namespace N
{
    partial class Outer
    {
        /// <inheritdoc cref="N.Outer.Source"/>
        [global::Ditto.Generator.GeneratedFrom("global::N.Outer.Source")]
        partial class Copy1
        {
            public int Compute() { return 10 + 2; }
        }
    }
}
"#
    );
}

#[test]
fn method_body_is_copied_under_the_member_signature() {
    let s = sample();
    let group = CandidateSet::new().with_method(Candidate::new(s.twice).copy_from("Compute"));
    let report = generate(&s.program, &group);
    assert_eq!(
        only_text(&report),
        r#"// <auto-generated/>
namespace N
{
    partial class Outer
    {
        /// <inheritdoc cref="N.Outer.Compute(int)"/>
        [global::Ditto.Generator.GeneratedFrom("global::N.Outer.Compute")]
        public partial int Twice(int x)
        {
            return x * 2;
        }
    }
}
"#
    );
}

#[test]
fn generic_argument_is_substituted() {
    let s = sample();
    let config = GeneratorConfig::default()
        .with_documentation(DocumentationPolicy::Never)
        .with_provenance(false)
        .with_auto_generated_header(false);

    let by_name = CandidateSet::new().with_type(Candidate::new(s.generic).copy_from("Box<int>"));
    let report = Generator::new(&s.program)
        .with_config(config.clone())
        .generate_group(&by_name)
        .unwrap();
    let text = only_text(&report).to_owned();
    assert!(text.contains("int value;\n"), "{text}");
    assert!(text.contains("public int Get() => value;"), "{text}");

    let box_symbol = s.program.find("N.Outer.Box").unwrap();
    let by_handle = CandidateSet::new().with_type(Candidate::new(s.generic).copy(CopyRequest::new(
        Reference::Handle {
            symbol: box_symbol,
            type_arguments: vec![TypeArg::special(SpecialType::Int32)],
        },
    )));
    let report = Generator::new(&s.program)
        .with_config(config)
        .generate_group(&by_handle)
        .unwrap();
    assert_eq!(only_text(&report), text);
}

#[test]
fn constraint_violation_rejects_the_member() {
    let s = sample();
    let group = CandidateSet::new().with_type(Candidate::new(s.generic).copy_from("Box<string>"));
    let report = generate(&s.program, &group);
    assert!(report.outputs.is_empty());
    assert_eq!(
        report.rejected[0].reason.as_ref().map(|d| d.code),
        Some(ErrorCode::E2006)
    );
}

#[test]
fn plain_and_qualified_references_generate_the_same_text() {
    let s = sample();
    let texts: Vec<String> = ["Source", "Outer.Source", "N.Outer.Source", "global::N.Outer.Source"]
        .into_iter()
        .map(|reference| {
            let group = CandidateSet::new().with_type(Candidate::new(s.copy).copy_from(reference));
            only_text(&generate(&s.program, &group)).to_owned()
        })
        .collect();
    assert!(texts.windows(2).all(|w| w[0] == w[1]), "{texts:#?}");
}

#[test]
fn self_container_and_contained_targets_are_invalid() {
    let s = sample();
    let group = CandidateSet::new().with_type(
        Candidate::new(s.copy)
            .copy(CopyRequest::new(Reference::name("Copy1")).at(Span::new(10, 15)))
            .copy(CopyRequest::new(Reference::handle(s.outer)).at(Span::new(20, 25)))
            .copy(CopyRequest::new(Reference::handle(s.nested)).at(Span::new(30, 35))),
    );

    let report = generate(&s.program, &group);
    assert!(report.outputs.is_empty());
    assert_eq!(report.rejected.len(), 1);

    let diagnostics = Generator::new(&s.program).analyze(&group).unwrap();
    let codes: Vec<ErrorCode> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E2005; 3]);
}

#[test]
fn duplicate_pattern_keeps_the_first() {
    let s = sample();
    let group = CandidateSet::new().with_type(
        Candidate::new(s.copy)
            .copy_from("Source")
            .pattern(PatternRequest::new("1", "10").at(Span::new(10, 20)))
            .pattern(PatternRequest::new("1", "20").at(Span::new(30, 40))),
    );

    let report = generate(&s.program, &group);
    assert!(only_text(&report).contains("return 10 + 2;"));

    let diagnostics = Generator::new(&s.program).analyze(&group).unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::W3002);
    assert_eq!(diagnostics[0].primary_span(), Some(Span::new(30, 40)));
}

#[test]
fn method_may_copy_from_a_pending_partial_method() {
    let s = sample();
    let group = CandidateSet::new()
        .with_method(Candidate::new(s.thrice).copy_from("Twice"))
        .with_method(Candidate::new(s.twice).copy_from("Compute"));

    let report = generate(&s.program, &group);
    let keys: Vec<&str> = report.outputs.iter().map(|o| o.key.as_str()).collect();
    assert_eq!(keys, vec!["N.Outer.Twice(int)", "N.Outer.Thrice(int)"]);
    assert!(report.outputs[1].text.contains("return x * 2;"));
}

#[test]
fn call_like_reference_selects_an_overload() {
    let s = sample();
    let ambiguous =
        CandidateSet::new().with_method(Candidate::new(s.overloaded).copy_from("Pick"));
    let diagnostics = Generator::new(&s.program).analyze(&ambiguous).unwrap();
    let codes: Vec<ErrorCode> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E1002]);

    let exact =
        CandidateSet::new().with_method(Candidate::new(s.overloaded).copy_from("Pick(string)"));
    let report = generate(&s.program, &exact);
    assert!(only_text(&report).contains("return 2;"));
}

#[test]
fn method_without_implementation_cannot_be_copied() {
    let s = sample();
    // Twice is not a member of this group, so it has no body to copy.
    let group = CandidateSet::new().with_method(Candidate::new(s.thrice).copy_from("Twice"));
    let diagnostics = Generator::new(&s.program).analyze(&group).unwrap();
    let codes: Vec<ErrorCode> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E1005]);
}

#[test]
fn unspecified_and_unknown_targets() {
    let s = sample();
    let group = CandidateSet::new().with_type(
        Candidate::new(s.copy)
            .copy(CopyRequest::new(Reference::None).at(Span::new(1, 2)))
            .copy(CopyRequest::new(Reference::name("Missing")).at(Span::new(3, 4)))
            .copy(CopyRequest::new(Reference::name("Box<int, int>")).at(Span::new(5, 6))),
    );
    let diagnostics = Generator::new(&s.program).analyze(&group).unwrap();
    let codes: Vec<ErrorCode> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![ErrorCode::E1001, ErrorCode::E1001, ErrorCode::E1006]
    );
}
