//! Adapter shapes required by collections of polymorphic items.

use indexmap::IndexMap;
use tracing::debug;

use crate::exchange::ExchangeableSet;
use crate::types::{Kind, TypeData, TypeId, TypeSystem};

/// A collection whose items (or dictionary values) are polymorphic and need a
/// generated adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupportShape {
    pub kind: Kind,
    /// First eligible collection the shape was synthesized for.
    pub collection: TypeId,
    pub key: Option<TypeId>,
    pub item: TypeId,
    /// `List_{item}_Generated`, `Dictionary_{key}_{value}_Generated`, ...
    pub name: String,
}

pub(crate) fn collect(system: &TypeSystem, set: &ExchangeableSet) -> Vec<SupportShape> {
    let mut shapes: IndexMap<String, SupportShape> = IndexMap::new();

    for ty in set.iter() {
        let (label, key, item) = match system.get(ty) {
            TypeData::Array { item } => ("Array", None, *item),
            TypeData::List { item, .. } => ("List", None, *item),
            TypeData::Set { item, .. } => ("Set", None, *item),
            TypeData::Dictionary { key, value, .. } => ("Dictionary", Some(*key), *value),
            _ => continue,
        };
        if !is_polymorphic_item(system, item) {
            continue;
        }

        let name = match key {
            Some(key) => format!("{label}_{key}_{item}_Generated"),
            None => format!("{label}_{item}_Generated"),
        };
        shapes.entry(name.clone()).or_insert_with(|| {
            debug!(%name, "support shape");
            SupportShape {
                kind: system.kind(ty),
                collection: ty,
                key,
                item,
                name,
            }
        });
    }

    shapes.into_values().collect()
}

/// `object` needs no adapter; abstractions and unions do.
fn is_polymorphic_item(system: &TypeSystem, item: TypeId) -> bool {
    matches!(system.kind(item), Kind::AbstractInterface | Kind::Union)
}
