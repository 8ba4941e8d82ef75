/// Whether a name is empty or whitespace only.
///
/// # Examples
/// ```
/// use tessera_core::utils::is_blank;
/// assert!(is_blank("  \t"));
/// assert!(!is_blank("L(int)"));
/// ```
pub fn is_blank(name: &str) -> bool {
    name.trim().is_empty()
}

/// Split a fully-qualified name into namespace and simple name.
///
/// Nested type separators (`+`) are treated like namespace dots.
///
/// # Examples
/// ```
/// use tessera_core::utils::split_qualified;
/// assert_eq!(split_qualified("Acme.Sales.Order"), (Some("Acme.Sales"), "Order"));
/// assert_eq!(split_qualified("Order"), (None, "Order"));
/// ```
pub fn split_qualified(name: &str) -> (Option<&str>, &str) {
    match name.rfind(['.', '+']) {
        Some(pos) => (Some(&name[..pos]), &name[pos + 1..]),
        None => (None, name),
    }
}

/// Simple (unqualified) part of a type name.
pub fn simple_name(name: &str) -> &str {
    split_qualified(name).1
}
