use super::*;
use pretty_assertions::assert_eq;

fn key(name: &str) -> SymbolKey {
    SymbolKey::new(name)
}

#[test]
fn first_registration_wins() {
    let registry = SymbolRegistry::new();
    let first = GeneratedFragment {
        body: "first".to_owned(),
        ..GeneratedFragment::default()
    };
    assert!(registry.register(key("N.A"), first.clone()));
    assert!(!registry.register(key("N.A"), GeneratedFragment::default()));
    assert_eq!(registry.generated(&key("N.A")), Some(first));
    assert_eq!(registry.len(), 1);
}

#[test]
fn all_registered_checks_every_key() {
    let registry = SymbolRegistry::new();
    registry.register(key("N.A"), GeneratedFragment::default());
    assert!(registry.all_registered(&[key("N.A")]));
    assert!(!registry.all_registered(&[key("N.A"), key("N.B")]));
    assert!(registry.all_registered(&[]));
}

#[test]
fn clear_resets_state_and_order() {
    let registry = SymbolRegistry::new();
    registry.register(key("N.C"), GeneratedFragment::default());
    registry.register(key("N.B"), GeneratedFragment::default());
    assert_eq!(registry.registration_order(), vec![key("N.C"), key("N.B")]);

    registry.clear();
    assert!(registry.is_empty());
    assert!(!registry.is_registered(&key("N.C")));
    assert!(registry.registration_order().is_empty());
}
