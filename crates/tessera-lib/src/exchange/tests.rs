use tessera_core::{Nullability, RawAttributes};

use super::*;
use crate::types::{
    BasicType, CollectionForm, MemberDescriptor, TYPE_ANY, TYPE_BOOL, TYPE_BYTE, TYPE_INT,
    TYPE_LONG, TYPE_STRING, TypeSystemBuilder,
};

fn member(name: &str, ty: TypeId) -> MemberDescriptor {
    MemberDescriptor::new(name, ty, Nullability::NotNull)
}

fn record(b: &mut TypeSystemBuilder, name: &str, fields: &[(&str, TypeId)]) -> TypeId {
    let id = b.declare_record(name, false, &RawAttributes::new());
    b.define_fields(id, fields.iter().map(|&(n, ty)| member(n, ty)));
    id
}

#[test]
fn everything_starts_eligible() {
    let (system, _) = TypeSystemBuilder::new().lock();

    let set = ExchangeableSet::new(&system, &Config::new());

    assert_eq!(set.len(), system.len());
    assert_eq!(set.universe(), system.len());
    assert_eq!(set.iter().next(), Some(TYPE_ANY));
    assert_eq!(set.iter().count(), set.len());
}

#[test]
fn object_is_never_excluded() {
    let (system, _) = TypeSystemBuilder::new().lock();
    let mut set = ExchangeableSet::new(&system, &Config::new());

    assert_eq!(set.exclude(&system, TYPE_ANY.nullable()), 0);
    assert!(set.is_eligible(TYPE_ANY));
}

#[test]
fn exclusion_covers_both_duals() {
    let (system, _) = TypeSystemBuilder::new().lock();
    let mut set = ExchangeableSet::new(&system, &Config::new());

    assert_eq!(set.exclude(&system, TYPE_INT.nullable()), 1);
    assert!(!set.is_eligible(TYPE_INT));
    assert!(!set.is_eligible(TYPE_INT.nullable()));
    assert_eq!(set.exclude(&system, TYPE_INT), 0);
}

#[test]
fn composite_degrades_field_by_field() {
    let mut b = TypeSystemBuilder::new();
    let pair = record(&mut b, "Acme.Pair", &[("Count", TYPE_LONG), ("Flag", TYPE_BOOL)]);
    let (system, _) = b.lock();
    let mut set = ExchangeableSet::new(&system, &Config::new());

    assert_eq!(set.exclude(&system, TYPE_LONG), 1);
    assert!(set.is_eligible(pair));

    assert_eq!(set.exclude(&system, TYPE_BOOL), 2);
    assert!(!set.is_eligible(pair));
}

#[test]
fn union_survives_while_a_member_does() {
    let mut b = TypeSystemBuilder::new();
    let union = b.union(&[TYPE_INT, TYPE_LONG, TYPE_BOOL]);
    let (system, _) = b.lock();
    let mut set = ExchangeableSet::new(&system, &Config::new());

    set.exclude(&system, TYPE_INT);
    set.exclude(&system, TYPE_LONG);
    assert!(set.is_eligible(union));

    assert_eq!(set.exclude(&system, TYPE_BOOL), 2);
    assert!(!set.is_eligible(union));
}

#[test]
fn single_member_union_follows_its_member() {
    let mut b = TypeSystemBuilder::new();
    let order = record(&mut b, "Acme.Order", &[("Id", TYPE_INT)]);
    let union = b.union(&[order.nullable()]);
    let (system, _) = b.lock();
    let mut set = ExchangeableSet::new(&system, &Config::new());

    assert_eq!(set.exclude(&system, order), 2);
    assert!(!set.is_eligible(union));
}

#[test]
fn structural_owners_follow_immediately() {
    let mut b = TypeSystemBuilder::new();
    let tag = record(&mut b, "Acme.Tag", &[("Name", TYPE_STRING)]);
    let list = b.list(tag.nullable(), CollectionForm::Concrete);
    let dict = b.dictionary(TYPE_STRING.nullable(), tag.nullable(), CollectionForm::Concrete);
    let tuple = b.tuple(&[TYPE_INT, tag.nullable()]);
    let (system, _) = b.lock();
    let mut set = ExchangeableSet::new(&system, &Config::new());

    assert_eq!(set.exclude(&system, tag), 4);
    for ty in [list, dict, tuple] {
        assert!(!set.is_eligible(ty), "{}", system.display(ty));
    }
    assert!(set.is_eligible(TYPE_STRING));
}

#[test]
fn family_and_abstractions_follow_primary() {
    let mut b = TypeSystemBuilder::new();
    let entity = b.declare_abstract("Acme.IEntity", &[], &RawAttributes::new());
    let user = b.declare_primary("Acme.IUser", &RawAttributes::new());
    let extra = b.declare_secondary("Acme.IUserExtra", user, &RawAttributes::new());
    b.implement(user, entity);
    b.define_family(user, [(user, member("Name", TYPE_STRING))]);
    let (system, _) = b.lock();
    let mut set = ExchangeableSet::new(&system, &Config::new());

    assert_eq!(set.exclude(&system, user), 3);
    assert!(!set.is_eligible(extra));
    assert!(!set.is_eligible(entity));
}

#[test]
fn unimplemented_abstraction_starts_excluded() {
    let mut b = TypeSystemBuilder::new();
    let orphan = b.declare_abstract("Acme.IOrphan", &[], &RawAttributes::new());
    let (system, _) = b.lock();

    let set = ExchangeableSet::new(&system, &Config::new());

    assert!(!set.is_eligible(orphan));
    assert_eq!(set.len(), system.len() - 1);
}

#[test]
fn enum_policy_is_configurable() {
    let mut b = TypeSystemBuilder::new();
    let mode = b.declare_enum("Acme.Mode", BasicType::Byte, &RawAttributes::new());
    let (system, _) = b.lock();

    let mut contagious = ExchangeableSet::new(&system, &Config::new());
    assert_eq!(contagious.exclude(&system, TYPE_BYTE), 2);
    assert!(!contagious.is_eligible(mode));

    let config = Config::new().enum_follows_underlying(false);
    let mut isolated = ExchangeableSet::new(&system, &config);
    assert_eq!(isolated.exclude(&system, TYPE_BYTE), 1);
    assert!(isolated.is_eligible(mode));
}

#[test]
fn rejected_types_cascade() {
    let mut b = TypeSystemBuilder::new();
    let secret = record(&mut b, "Acme.Secret", &[("Key", TYPE_STRING)]);
    let holder = record(&mut b, "Acme.Holder", &[("Secret", secret)]);
    let (system, _) = b.lock();

    let set = ExchangeableSet::with_filter(&system, &Config::new(), |system, ty| {
        system.qualified_name(ty) == Some("Acme.Secret")
    });

    assert!(!set.is_eligible(secret));
    assert!(!set.is_eligible(holder));
    assert!(set.is_eligible(TYPE_STRING));
}

#[test]
fn empty_composites_are_configurable() {
    let mut b = TypeSystemBuilder::new();
    let empty = record(&mut b, "Acme.Empty", &[]);
    let (system, _) = b.lock();

    let set = ExchangeableSet::new(&system, &Config::new());
    assert!(set.is_eligible(empty));

    let set = ExchangeableSet::new(&system, &Config::new().allow_empty_composites(false));
    assert!(!set.is_eligible(empty));
}

#[test]
fn propagation_is_idempotent() {
    let mut b = TypeSystemBuilder::new();
    let tag = record(&mut b, "Acme.Tag", &[("Name", TYPE_STRING)]);
    record(&mut b, "Acme.Post", &[("Tag", tag), ("Title", TYPE_STRING)]);
    b.list(tag.nullable(), CollectionForm::ReadOnly);
    let (system, _) = b.lock();
    let mut set = ExchangeableSet::new(&system, &Config::new());

    set.exclude(&system, TYPE_STRING);
    let settled = set.clone();

    assert_eq!(set.propagate(&system), 0);
    assert_eq!(set, settled);
}

#[test]
fn subset_cascades_without_touching_the_source() {
    let mut b = TypeSystemBuilder::new();
    let tag = record(&mut b, "Acme.Tag", &[("Name", TYPE_STRING)]);
    let list = b.list(tag.nullable(), CollectionForm::Concrete);
    let (system, _) = b.lock();
    let set = ExchangeableSet::new(&system, &Config::new());

    let subset = set.subset(&system, |ty| ty != tag);

    assert!(!subset.is_eligible(list));
    assert!(set.is_eligible(list));
    assert_eq!(subset.len(), set.len() - 2);
}
