//! Canonical external names.
//!
//! Every eligible type gets a non-nullable name and a derived nullable name.
//! Names are produced per kind by a [`Naming`] strategy; each method has a
//! default rule and can be overridden independently. Names of structural
//! shapes embed the names of their components, computed depth-first and
//! memoized in a [`NameTable`].

mod builder;
mod table;


use tessera_core::utils::simple_name;

use crate::Config;
use crate::types::{BasicType, TYPE_BYTE, TYPE_STRING, TypeData, TypeId, TypeSystem};

pub(crate) use builder::NameBuilder;
pub use table::{NameEntry, NameTable};

/// The type being named, with the context a strategy may consult.
#[derive(Clone, Copy)]
pub struct NameContext<'a> {
    pub system: &'a TypeSystem,
    pub config: &'a Config,
    /// Non-nullable id of the type being named.
    pub ty: TypeId,
}

impl<'a> NameContext<'a> {
    pub fn data(&self) -> &'a TypeData {
        self.system.get(self.ty)
    }

    /// Qualified declared name. Empty for structural kinds.
    pub fn qualified_name(&self) -> &'a str {
        self.system.qualified_name(self.ty).unwrap_or_default()
    }

    pub fn external_name(&self) -> Option<&'a str> {
        self.system.external_name(self.ty)
    }

    /// External override if declared, else the qualified name.
    pub fn declared_name(&self) -> &'a str {
        self.external_name()
            .unwrap_or_else(|| self.qualified_name())
    }

    pub fn simple_name(&self) -> &'a str {
        simple_name(self.qualified_name())
    }
}

/// Already-named component of a structural shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Component<'n> {
    pub ty: TypeId,
    pub name: &'n str,
    /// Explicit element name, tuples only.
    pub label: Option<&'n str>,
}

/// Naming strategy, one method per kind.
///
/// Returning `None` means the strategy does not support the shape, which is
/// a fatal error when such a type is reachable.
pub trait Naming {
    fn any(&self, _cx: &NameContext<'_>) -> Option<String> {
        Some("object".to_string())
    }

    fn basic(&self, _cx: &NameContext<'_>, basic: BasicType) -> Option<String> {
        Some(basic.name().to_string())
    }

    /// Shared default of the named kinds.
    fn named(&self, cx: &NameContext<'_>) -> Option<String> {
        Some(cx.declared_name().to_string())
    }

    fn enumeration(&self, cx: &NameContext<'_>) -> Option<String> {
        self.named(cx)
    }

    fn record(&self, cx: &NameContext<'_>) -> Option<String> {
        self.named(cx)
    }

    fn primary_interface(&self, cx: &NameContext<'_>) -> Option<String> {
        self.named(cx)
    }

    /// A secondary interface is the same object as its primary.
    fn secondary_interface(&self, _cx: &NameContext<'_>, primary: &str) -> Option<String> {
        Some(primary.to_string())
    }

    fn abstract_interface(&self, cx: &NameContext<'_>) -> Option<String> {
        self.named(cx)
    }

    /// `(int,string:Name)`: only explicitly named elements carry their name.
    fn tuple(&self, _cx: &NameContext<'_>, elements: &[Component<'_>]) -> Option<String> {
        let parts: Vec<String> = elements
            .iter()
            .map(|e| match e.label {
                Some(label) => format!("{}:{}", e.name, label),
                None => e.name.to_string(),
            })
            .collect();
        Some(format!("({})", parts.join(",")))
    }

    fn array(&self, cx: &NameContext<'_>, item: Component<'_>) -> Option<String> {
        if item.ty == TYPE_BYTE {
            return Some(cx.config.byte_array_name.clone());
        }
        Some(format!("A({})", item.name))
    }

    fn list(&self, _cx: &NameContext<'_>, item: Component<'_>) -> Option<String> {
        Some(format!("L({})", item.name))
    }

    fn set(&self, _cx: &NameContext<'_>, item: Component<'_>) -> Option<String> {
        Some(format!("S({})", item.name))
    }

    /// `O(value)` for string keys, `M(key,value)` otherwise.
    fn dictionary(
        &self,
        _cx: &NameContext<'_>,
        key: Component<'_>,
        value: Component<'_>,
    ) -> Option<String> {
        if key.ty.non_nullable() == TYPE_STRING {
            return Some(format!("O({})", value.name));
        }
        Some(format!("M({},{})", key.name, value.name))
    }

    /// Members that are still eligible, joined with `|`.
    fn union(&self, _cx: &NameContext<'_>, members: &[Component<'_>]) -> Option<String> {
        let names: Vec<&str> = members.iter().map(|m| m.name).collect();
        Some(names.join("|"))
    }

    /// Nullable counterpart of a non-nullable name.
    fn nullable(&self, cx: &NameContext<'_>, name: &str) -> Option<String> {
        Some(format!("{}{}", name, cx.config.nullable_suffix))
    }
}

/// The default rule for every kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultNaming;

impl Naming for DefaultNaming {}
