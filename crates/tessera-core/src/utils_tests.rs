use crate::utils::{is_blank, simple_name, split_qualified};

#[test]
fn blank_names() {
    assert!(is_blank(""));
    assert!(is_blank("   "));
    assert!(is_blank("\n\t"));
    assert!(!is_blank(" x "));
}

#[test]
fn qualified_names_split_on_last_separator() {
    assert_eq!(split_qualified("Acme.User"), (Some("Acme"), "User"));
    assert_eq!(split_qualified("Acme.Outer+Inner"), (Some("Acme.Outer"), "Inner"));
    assert_eq!(split_qualified("User"), (None, "User"));
}

#[test]
fn simple_name_drops_namespace() {
    assert_eq!(simple_name("Acme.Sales.Order"), "Order");
    assert_eq!(simple_name("Order"), "Order");
}
