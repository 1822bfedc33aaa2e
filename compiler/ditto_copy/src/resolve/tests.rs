#![allow(clippy::unwrap_used)]

use super::*;
use ditto_ir::{Accessibility, Constraint, DeclSpec, Program, SpecialType, TypeParam, UnitId};
use pretty_assertions::assert_eq;

struct Fixture {
    program: Program,
    outer: SymbolId,
    source: SymbolId,
    generic_source: SymbolId,
    copy: SymbolId,
    compute_int: SymbolId,
    compute_str: SymbolId,
    declared_only: SymbolId,
    hidden: SymbolId,
}

fn fixture() -> Fixture {
    let mut b = Program::builder();
    let outer = b.add(DeclSpec::class("Outer").namespace("N").partial());
    let source = b.add(DeclSpec::class("Source").inside(outer).body("int x;"));
    let generic_source = b.add(
        DeclSpec::class("Source")
            .inside(outer)
            .type_param(TypeParam::new("T").with_constraint(Constraint::ValueType))
            .body("T value;"),
    );
    let copy = b.add(DeclSpec::class("Copy1").inside(outer).partial());
    let compute_int = b.add(
        DeclSpec::method("Compute")
            .inside(outer)
            .parameter("int")
            .body("return 1;"),
    );
    let compute_str = b.add(
        DeclSpec::method("Compute")
            .inside(outer)
            .parameter("string")
            .body("return 2;"),
    );
    let declared_only = b.add(DeclSpec::method("Declared").inside(outer).partial());
    let hidden = b.add(
        DeclSpec::class("Hidden")
            .namespace("N")
            .accessibility(Accessibility::Internal)
            .unit(UnitId(1)),
    );
    Fixture {
        program: b.build(),
        outer,
        source,
        generic_source,
        copy,
        compute_int,
        compute_str,
        declared_only,
        hidden,
    }
}

fn resolve(f: &Fixture, reference: Reference, kind: MemberKind) -> Result<Resolved, ResolveError> {
    resolve_with(f, reference, kind, &FxHashSet::default())
}

fn resolve_with(
    f: &Fixture,
    reference: Reference,
    kind: MemberKind,
    pending: &FxHashSet<SymbolId>,
) -> Result<Resolved, ResolveError> {
    let cancel = CancellationToken::new();
    Resolver::new(&f.program, pending, &cancel).resolve(&reference, f.copy, kind)
}

#[test]
fn plain_and_qualified_names_agree() {
    let f = fixture();
    let plain = resolve(&f, Reference::name("Source"), MemberKind::Type).unwrap();
    let qualified = resolve(&f, Reference::name("global::N.Outer.Source"), MemberKind::Type).unwrap();
    assert_eq!(plain.symbol, f.source);
    assert_eq!(plain, qualified);
}

#[test]
fn generic_reference_binds_type_arguments() {
    let f = fixture();
    let resolved = resolve(&f, Reference::name("Source<int>"), MemberKind::Type).unwrap();
    assert_eq!(resolved.symbol, f.generic_source);
    assert_eq!(resolved.type_arguments.len(), 1);
    assert_eq!(resolved.type_arguments[0].special, Some(SpecialType::Int32));
}

#[test]
fn wrong_type_argument_count() {
    let f = fixture();
    let err = resolve(&f, Reference::name("Source<int, int>"), MemberKind::Type).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::E1006));

    let handle = Reference::Handle {
        symbol: f.source,
        type_arguments: vec![TypeArg::special(SpecialType::Int32)],
    };
    let err = resolve(&f, handle, MemberKind::Type).unwrap_err();
    assert_eq!(
        err,
        ResolveError::WrongArity {
            reference: "Source".to_owned(),
            expected: 0,
            found: 1
        }
    );
}

#[test]
fn call_like_reference_selects_overload() {
    let f = fixture();
    let int = resolve(&f, Reference::name("Compute(int)"), MemberKind::Method).unwrap();
    assert_eq!(int.symbol, f.compute_int);
    let string = resolve(&f, Reference::name("Outer.Compute(System.String)"), MemberKind::Method)
        .unwrap();
    assert_eq!(string.symbol, f.compute_str);
}

#[test]
fn overloaded_name_conflicts() {
    let f = fixture();
    let err = resolve(&f, Reference::name("Compute"), MemberKind::Method).unwrap_err();
    assert_eq!(
        err,
        ResolveError::Conflict {
            reference: "Compute".to_owned(),
            candidates: vec![f.compute_int, f.compute_str],
        }
    );
    assert_eq!(err.code(), Some(ErrorCode::E1002));
}

#[test]
fn missing_and_unspecified_targets() {
    let f = fixture();
    let err = resolve(&f, Reference::name("Missing"), MemberKind::Type).unwrap_err();
    assert_eq!(err, ResolveError::NotFound("Missing".to_owned()));
    let err = resolve(&f, Reference::None, MemberKind::Type).unwrap_err();
    assert_eq!(err, ResolveError::Unspecified);
    assert_eq!(err.code(), Some(ErrorCode::E1001));
}

#[test]
fn other_units_are_inaccessible() {
    let f = fixture();
    let err = resolve(&f, Reference::handle(f.hidden), MemberKind::Type).unwrap_err();
    assert_eq!(err, ResolveError::NotAccessible(f.hidden));
}

#[test]
fn kind_rules() {
    let f = fixture();
    let err = resolve(&f, Reference::name("Compute(int)"), MemberKind::Type).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::E1004));
    let err = resolve(&f, Reference::handle(f.outer), MemberKind::Method).unwrap_err();
    assert_eq!(err, ResolveError::WrongKind(f.outer));
}

#[test]
fn method_without_body_unless_pending() {
    let f = fixture();
    let err = resolve(&f, Reference::name("Declared"), MemberKind::Method).unwrap_err();
    assert_eq!(err, ResolveError::NoImplementation(f.declared_only));

    let pending: FxHashSet<SymbolId> = [f.declared_only].into_iter().collect();
    let ok = resolve_with(&f, Reference::name("Declared"), MemberKind::Method, &pending).unwrap();
    assert_eq!(ok.symbol, f.declared_only);
}

#[test]
fn cancellation_is_checked_before_lookup() {
    let f = fixture();
    let cancel = CancellationToken::new();
    cancel.cancel();
    let pending = FxHashSet::default();
    let err = Resolver::new(&f.program, &pending, &cancel)
        .resolve(&Reference::name("Source"), f.copy, MemberKind::Type)
        .unwrap_err();
    assert_eq!(err, ResolveError::Cancelled);
    assert_eq!(err.code(), None);
}

#[test]
fn diagnostics_name_the_reference() {
    let f = fixture();
    let pending = FxHashSet::default();
    let cancel = CancellationToken::new();
    let resolver = Resolver::new(&f.program, &pending, &cancel);
    let reference = Reference::name("Missing");
    let err = resolver
        .resolve(&reference, f.copy, MemberKind::Type)
        .unwrap_err();
    let diag = resolver
        .diagnose(&err, &reference, f.copy, MemberKind::Type, Span::new(3, 9))
        .unwrap();
    assert_eq!(diag.code, ErrorCode::E1001);
    assert_eq!(diag.primary_span(), Some(Span::new(3, 9)));
    assert_eq!(diag.args, vec!["Missing".to_owned()]);
}

/// Delegates to the fixture program but reports every name as ambiguous
/// with no candidates.
struct EmptyAmbiguity<'a>(&'a Program);

impl ProgramView for EmptyAmbiguity<'_> {
    fn declaration(&self, id: SymbolId) -> Option<&Declaration> {
        self.0.declaration(id)
    }

    fn children(&self, id: SymbolId) -> Vec<SymbolId> {
        self.0.children(id)
    }

    fn lookup(&self, _reference: &str, _context: SymbolId) -> Lookup {
        Lookup::Ambiguous(Vec::new())
    }

    fn bind_documentation(&self, doc_comment: &str, context: SymbolId) -> Lookup {
        self.0.bind_documentation(doc_comment, context)
    }

    fn resolve_type_argument(&self, text: &str, context: SymbolId) -> Option<TypeArg> {
        self.0.resolve_type_argument(text, context)
    }

    fn satisfies(&self, arg: &TypeArg, constraint: &Constraint) -> bool {
        self.0.satisfies(arg, constraint)
    }

    fn is_accessible(&self, target: SymbolId, from: SymbolId) -> bool {
        self.0.is_accessible(target, from)
    }
}

#[test]
fn empty_ambiguity_from_host_is_not_found() {
    let f = fixture();
    let view = EmptyAmbiguity(&f.program);
    let pending = FxHashSet::default();
    let cancel = CancellationToken::new();
    let err = Resolver::new(&view, &pending, &cancel)
        .resolve(&Reference::name("Source"), f.copy, MemberKind::Type)
        .unwrap_err();
    assert_eq!(err, ResolveError::NotFound("Source".to_owned()));
}
