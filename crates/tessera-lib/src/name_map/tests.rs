use indoc::indoc;
use tessera_core::{Nullability, RawAttributes};

use super::*;
use crate::naming::DefaultNaming;
use crate::types::{
    BasicType, CollectionForm, Kind, MemberDescriptor, TYPE_ANY, TYPE_BOOL, TYPE_INT, TYPE_LONG,
    TYPE_STRING, TypeSystemBuilder,
};

fn build<'s>(system: &'s TypeSystem, config: &'s Config) -> NameMap<'s> {
    let set = ExchangeableSet::new(system, config);
    NameMap::build(system, &DefaultNaming, config, set).unwrap()
}

#[test]
fn names_and_indices() {
    let mut b = TypeSystemBuilder::new();
    let order = b.declare_record("Acme.Order", false, &RawAttributes::new());
    b.define_fields(
        order,
        [MemberDescriptor::new("Id", TYPE_LONG, Nullability::NotNull)],
    );
    let (system, _) = b.lock();
    let config = Config::new();

    let map = build(&system, &config);

    assert_eq!(map.name(order).unwrap(), "Acme.Order");
    assert_eq!(map.name(order.nullable()).unwrap(), "Acme.Order?");
    assert_eq!(map.index(TYPE_ANY).unwrap(), 0);
    assert_eq!(map.index(BasicType::Bool.type_id().nullable()).unwrap(), 1);
    assert_eq!(map.index(order).unwrap(), map.len() - 1);
    assert_eq!(map.iter().count(), map.len());
}

#[test]
fn lookup_outside_subset_is_usage_error() {
    let (system, _) = TypeSystemBuilder::new().lock();
    let config = Config::new();
    let mut set = ExchangeableSet::new(&system, &config);
    set.exclude(&system, TYPE_LONG);

    let map = NameMap::build(&system, &DefaultNaming, &config, set).unwrap();

    let err = map.name(TYPE_LONG.nullable()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"`long?` is not in the exchangeable set");
    assert!(matches!(map.index(TYPE_LONG), Err(Error::NotInSubset(_))));
    assert!(matches!(map.previous_names(TYPE_LONG), Err(Error::NotInSubset(_))));
    assert!(!map.is_eligible(TypeId::from_raw(10_000)));
    assert!(map.name(TypeId::from_raw(10_000)).is_err());
}

#[test]
fn foreign_subset_is_rejected() {
    let (small, _) = TypeSystemBuilder::new().lock();
    let mut b = TypeSystemBuilder::new();
    b.array(TYPE_INT);
    let (large, _) = b.lock();
    let config = Config::new();

    let set = ExchangeableSet::new(&small, &config);
    let result = NameMap::build(&large, &DefaultNaming, &config, set);

    assert!(matches!(result, Err(Error::ForeignSubset)));
}

#[test]
fn subset_clones_name_deterministically() {
    let mut b = TypeSystemBuilder::new();
    let union = b.union(&[TYPE_INT, TYPE_LONG, TYPE_BOOL]);
    let holder = b.declare_record("Acme.Holder", false, &RawAttributes::new());
    b.define_fields(
        holder,
        [
            MemberDescriptor::new("Payload", TYPE_ANY, Nullability::Nullable)
                .union_of([TYPE_INT, TYPE_LONG, TYPE_BOOL]),
            MemberDescriptor::new("Id", TYPE_INT, Nullability::NotNull),
        ],
    );
    let ints = b.list(TYPE_INT, CollectionForm::Concrete);
    let (system, _) = b.lock();
    let config = Config::new();
    let map = build(&system, &config);

    let subset = map.set().subset(&system, |ty| ty != TYPE_LONG);
    let clone = map.with_subset(subset.clone()).unwrap();
    let fresh = NameMap::build(&system, &DefaultNaming, &config, subset).unwrap();

    for (ty, entry) in clone.iter() {
        assert_eq!(entry, fresh.entry(ty).unwrap());
    }
    assert_eq!(clone.len(), fresh.len());
    assert_eq!(map.name(union).unwrap(), "int|long|bool");
    assert_eq!(clone.name(union).unwrap(), "int|bool");
    assert_eq!(clone.name(holder).unwrap(), map.name(holder).unwrap());
    assert_eq!(clone.name(ints).unwrap(), "L(int)");
}

#[test]
fn previous_names_are_exposed() {
    let mut b = TypeSystemBuilder::new();
    let mode = b.declare_enum(
        "Acme.Mode",
        BasicType::Int,
        &RawAttributes::new()
            .with_external_name("Mode")
            .with_previous_names(["AccessMode"]),
    );
    let (system, _) = b.lock();
    let config = Config::new();

    let map = build(&system, &config);

    assert_eq!(map.name(mode).unwrap(), "Mode");
    assert_eq!(map.previous_names(mode).unwrap(), ["AccessMode"]);
    assert!(map.previous_names(TYPE_INT).unwrap().is_empty());
}

#[test]
fn collections_of_abstractions_need_support_shapes() {
    let mut b = TypeSystemBuilder::new();
    let entity = b.declare_abstract("Acme.IEntity", &[], &RawAttributes::new());
    let user = b.declare_primary("Acme.IUser", &RawAttributes::new());
    b.implement(user, entity);
    b.define_family(
        user,
        [(user, MemberDescriptor::new("Name", TYPE_STRING, Nullability::NotNull))],
    );
    let list = b.list(entity.nullable(), CollectionForm::Concrete);
    b.list(entity.nullable(), CollectionForm::ReadOnly);
    let dict = b.dictionary(
        TYPE_STRING.nullable(),
        entity.nullable(),
        CollectionForm::Concrete,
    );
    b.list(TYPE_ANY.nullable(), CollectionForm::Concrete);
    let (system, _) = b.lock();
    let config = Config::new();

    let map = build(&system, &config);

    let shapes = map.support_shapes();
    assert_eq!(shapes.len(), 2);
    assert_eq!(shapes[0].kind, Kind::List);
    assert_eq!(shapes[0].collection, list);
    assert_eq!(shapes[0].name, format!("List_{}_Generated", entity.nullable()));
    assert_eq!(shapes[1].kind, Kind::Dictionary);
    assert_eq!(shapes[1].collection, dict);
    assert_eq!(shapes[1].key, Some(TYPE_STRING.nullable()));
    assert_eq!(
        shapes[1].name,
        format!(
            "Dictionary_{}_{}_Generated",
            TYPE_STRING.nullable(),
            entity.nullable()
        )
    );
}

#[test]
fn end_to_end_family() {
    let mut b = TypeSystemBuilder::new();
    let user = b.declare_primary("Acme.IUser", &RawAttributes::new().with_external_name("User"));
    let extra = b.declare_secondary("Acme.IUserExtra", user, &RawAttributes::new());
    let read_only = b.list(TYPE_INT, CollectionForm::ReadOnly);
    let concrete = b.list(TYPE_INT, CollectionForm::Concrete);
    let scores = b.dictionary(TYPE_STRING, concrete, CollectionForm::Concrete);
    b.define_family(
        user,
        [
            (user, MemberDescriptor::new("Tags", read_only, Nullability::Nullable)),
            (extra, MemberDescriptor::new("Tags", concrete, Nullability::NotNull)),
            (extra, MemberDescriptor::new("Scores", scores, Nullability::Nullable)),
        ],
    );
    let system = b.lock_strict().unwrap();
    let config = Config::new();
    let map = build(&system, &config);

    let mut out = String::new();
    for field in system.fields(user) {
        out.push_str(&format!(
            "{}: {}\n",
            system.resolve(field.name),
            map.name(field.ty).unwrap()
        ));
    }
    out.push_str(&format!("secondary: {}\n", map.name(extra).unwrap()));

    assert_eq!(
        out,
        indoc! {"
            Tags: L(int)
            Scores: O(L(int))?
            secondary: User
        "}
    );
}
