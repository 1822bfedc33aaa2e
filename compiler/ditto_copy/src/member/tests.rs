use super::*;
use pretty_assertions::assert_eq;

fn rule(order: i32, index: usize) -> PatternRule {
    PatternRule {
        pattern: format!("p{index}"),
        replacement: String::new(),
        order,
        index,
        span: Span::DUMMY,
    }
}

#[test]
fn zero_order_sorts_first_even_before_negative() {
    let mut rules = vec![rule(2, 0), rule(-5, 1), rule(0, 2), rule(2, 3), rule(0, 4)];
    PatternRule::sort(&mut rules);
    let order: Vec<(i32, usize)> = rules.iter().map(|r| (r.order, r.index)).collect();
    assert_eq!(order, vec![(0, 2), (0, 4), (-5, 1), (2, 0), (2, 3)]);
}

#[test]
fn target_options_default_to_copying_usings() {
    let options = TargetOptions::default();
    assert!(options.copy_usings);
    assert!(options.rename_special_members);
    assert_eq!(options.order, 0);
    assert_eq!(
        TargetOptions::default().with_fragment("Second").fragment.as_deref(),
        Some("Second")
    );
}

#[test]
fn candidate_set_groups_by_kind() {
    let set = CandidateSet::new()
        .with_type(Candidate::new(SymbolId::from_raw(1)).copy_from("Source"))
        .with_method(Candidate::new(SymbolId::from_raw(2)));
    assert_eq!(set.len(), 2);
    assert_eq!(set.candidates(MemberKind::Type).len(), 1);
    assert_eq!(
        set.types[0].copies[0].reference,
        Reference::Name("Source".to_owned())
    );
}
