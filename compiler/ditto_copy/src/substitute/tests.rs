use super::*;
use ditto_ir::{SpecialType, SymbolId};
use pretty_assertions::assert_eq;

fn params(names: &[&str]) -> Vec<TypeParam> {
    names.iter().map(|n| TypeParam::new(*n)).collect()
}

#[test]
fn primitive_arguments_use_keyword_alias() {
    let sub = Substitution::for_target(&params(&["T"]), &[TypeArg::special(SpecialType::Int32)]);
    assert_eq!(sub.pairs(), &[("T".to_owned(), "int".to_owned())]);
    assert_eq!(
        sub.apply("T Add(T a, T b) { return a + b; }"),
        "int Add(int a, int b) { return a + b; }"
    );
}

#[test]
fn named_arguments_use_qualified_name() {
    let arg = TypeArg::named("global::N.Widget", Some(SymbolId::from_raw(3))).with_nullable(true);
    let sub = Substitution::for_target(&params(&["T"]), &[arg]);
    assert_eq!(sub.apply("List<T> items;"), "List<global::N.Widget?> items;");
}

#[test]
fn identical_pairs_are_skipped() {
    let sub = Substitution::for_target(
        &params(&["T", "U"]),
        &[
            TypeArg::type_parameter("T", Vec::new()),
            TypeArg::special(SpecialType::String),
        ],
    );
    assert_eq!(sub.pairs(), &[("U".to_owned(), "string".to_owned())]);
}

#[test]
fn replacements_are_not_substituted_again() {
    let sub = Substitution::for_target(
        &params(&["T", "U"]),
        &[
            TypeArg::type_parameter("U", Vec::new()),
            TypeArg::special(SpecialType::Int32),
        ],
    );
    assert_eq!(sub.apply("Map<T, U>"), "Map<U, int>");
}

#[test]
fn literals_comments_and_member_access_are_untouched() {
    let sub = Substitution::for_target(&params(&["T"]), &[TypeArg::special(SpecialType::Int64)]);
    assert_eq!(
        sub.apply("var t = \"T\"; // T\nx.T = default(T); Tx = T;"),
        "var t = \"T\"; // T\nx.T = default(long); Tx = long;"
    );
}

#[test]
fn empty_substitution_is_identity() {
    let sub = Substitution::for_target(&[], &[]);
    assert!(sub.is_empty());
    assert_eq!(sub.apply("T"), "T");
}

#[test]
fn renames_constructor_and_destructor_declarations() {
    let body = "public Source(int x) { } ~Source() { } void M() { var s = new Source(1); }";
    assert_eq!(
        rename_special_members(body, "Source", "Copy1"),
        "public Copy1(int x) { } ~Copy1() { } void M() { var s = new Source(1); }"
    );
    assert_eq!(rename_special_members("Source() { }", "Source", "Copy1"), "Copy1() { }");
    assert_eq!(rename_special_members("int Source;", "Source", "Copy1"), "int Source;");
}
