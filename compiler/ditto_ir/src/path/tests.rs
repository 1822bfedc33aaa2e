use super::*;
use pretty_assertions::assert_eq;

fn segment(name: &str, args: &[&str]) -> Segment {
    Segment {
        name: name.to_owned(),
        type_args: args.iter().map(|a| (*a).to_owned()).collect(),
    }
}

#[test]
fn plain_name() {
    let path = ReferencePath::parse("Source").unwrap_or_else(|| panic!("parse"));
    assert_eq!(path.segments, vec![segment("Source", &[])]);
    assert!(!path.global);
    assert!(!path.is_call_like());
}

#[test]
fn qualified_generic_path() {
    let path = ReferencePath::parse("global::N.Outer.Source<int, List<string>>")
        .unwrap_or_else(|| panic!("parse"));
    assert!(path.global);
    assert_eq!(
        path.segments,
        vec![
            segment("N", &[]),
            segment("Outer", &[]),
            segment("Source", &["int", "List<string>"]),
        ]
    );
}

#[test]
fn cref_braces_are_generic_arguments() {
    let path = ReferencePath::parse("Source{T}").unwrap_or_else(|| panic!("parse"));
    assert_eq!(path.last(), &segment("Source", &["T"]));
}

#[test]
fn call_like_reference_keeps_parameters() {
    let path =
        ReferencePath::parse("Outer.Compute(int, Dictionary<string, int>)").unwrap_or_else(|| panic!("parse"));
    assert_eq!(
        path.parameters,
        Some(vec!["int".to_owned(), "Dictionary<string, int>".to_owned()])
    );
    assert_eq!(path.last().name, "Compute");

    let empty = ReferencePath::parse("Compute()").unwrap_or_else(|| panic!("parse"));
    assert_eq!(empty.parameters, Some(Vec::new()));
}

#[test]
fn malformed_references() {
    for text in ["", "1Source", "Source<", "A..B", "Compute(int", "Source<int,>"] {
        assert_eq!(ReferencePath::parse(text), None, "{text:?}");
    }
}

#[test]
fn looks_like_call_ignores_nested_parentheses() {
    assert!(looks_like_call("Compute(int)"));
    assert!(!looks_like_call("Source<int>"));
}
