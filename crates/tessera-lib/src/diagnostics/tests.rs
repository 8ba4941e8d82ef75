use super::*;

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyUnion, Location::member("Acme.Order", "Payload"))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    insta::assert_snapshot!(diagnostics.render(), @r"
    error: union declares no member type
      --> Acme.Order.Payload
    ");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::IncompatibleShapes, Location::member("Acme.IUser", "Tags"))
        .message("`List<int>` and `List<string>`")
        .note("`int` and `string` cannot be reconciled")
        .emit();

    insta::assert_snapshot!(diagnostics.render(), @r"
    error: incompatible shapes: `List<int>` and `List<string>`
      --> Acme.IUser.Tags
      = note: `int` and `string` cannot be reconciled
    ");
}

#[test]
fn default_hint_is_attached() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::NullabilityMismatch, Location::member("Acme.User", "Email"))
        .related_to("declared here", Location::ty("Acme.IUser"))
        .emit();

    insta::assert_snapshot!(diagnostics.render(), @r"
    error: read and write nullability differ
      --> Acme.User.Email
      = note: declared here (Acme.IUser)
      = hint: getter and setter must agree on nullability
    ");
}

#[test]
fn warnings_are_counted_separately() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::TupleNamesIgnored, Location::member("Acme.User", "Age"))
        .emit();
    diagnostics
        .report(DiagnosticKind::DuplicateTypeName, Location::ty("Acme.User"))
        .message("Acme.User")
        .emit();

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 1);
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.of_kind(DiagnosticKind::DuplicateTypeName).count(), 1);
}

#[test]
fn sorted_printer_orders_by_priority() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::IncompatibleShapes, Location::member("A", "x"))
        .emit();
    diagnostics
        .report(DiagnosticKind::InvalidAttributes, Location::member("A", "y"))
        .emit();

    insta::assert_snapshot!(diagnostics.printer().sorted(true).render(), @r"
    error: invalid attribute data
      --> A.y
    error: incompatible shapes
      --> A.x
    ");
}

#[test]
fn errors_only_hides_warnings() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::TupleNamesIgnored, Location::member("A", "x"))
        .emit();

    assert_eq!(diagnostics.printer().errors_only().render(), "");
}

#[test]
fn extend_merges_messages() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::EmptyUnion, Location::ty("A")).emit();
    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::EmptyUnion, Location::ty("B")).emit();

    a.extend(b);
    assert_eq!(a.len(), 2);
}
