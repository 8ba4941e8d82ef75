use crate::{Interner, Symbol};

#[test]
fn intern_deduplicates() {
    let mut interner = Interner::new();

    let a = interner.intern("Acme.User");
    let b = interner.intern("Acme.User");
    let c = interner.intern("Acme.Order");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.len(), 2);
}

#[test]
fn resolve_returns_original_text() {
    let mut interner = Interner::new();

    let sym = interner.intern("Name");
    assert_eq!(interner.resolve(sym), "Name");
    assert_eq!(interner.try_resolve(Symbol::from_raw(7)), None);
}

#[test]
fn lookup_does_not_insert() {
    let mut interner = Interner::new();
    let sym = interner.intern("Email");

    assert_eq!(interner.lookup("Email"), Some(sym));
    assert_eq!(interner.lookup("Phone"), None);
    assert_eq!(interner.len(), 1);
}

#[test]
fn symbol_ordering_is_insertion_order() {
    let mut interner = Interner::new();

    let z = interner.intern("z");
    let a = interner.intern("a");

    assert!(z < a);
}

#[test]
fn iter_yields_all_strings() {
    let mut interner = Interner::new();
    let a = interner.intern("alpha");
    let b = interner.intern("beta");

    let items: Vec<_> = interner.iter().collect();
    assert_eq!(items, vec![(a, "alpha"), (b, "beta")]);
}
