//! Kind-specific descriptor payloads.

use tessera_core::Symbol;

use super::id::TypeId;
use super::kind::{BasicType, CollectionForm, DefaultValuePolicy, Kind};

/// Field of a named record or primary interface.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Field {
    pub name: Symbol,
    pub ty: TypeId,
    /// Filled when the graph is locked unless the declaration carried an explicit default.
    pub default_value: DefaultValuePolicy,
    pub(crate) explicit_default: bool,
    /// Interface that declared the field first. `None` for records.
    pub origin: Option<TypeId>,
}

/// Positional element of an anonymous record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TupleElement {
    pub ty: TypeId,
    /// Only explicitly named elements carry a name.
    pub name: Option<Symbol>,
}

impl TupleElement {
    pub fn positional(ty: TypeId) -> Self {
        Self { ty, name: None }
    }
}

/// External name override and previous-name aliases of a named kind.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ExternalName {
    pub name: Option<Symbol>,
    pub previous: Vec<Symbol>,
}

/// Payload of a descriptor pair. One variant per [`Kind`].
///
/// Anonymous variants are interned structurally; named variants are keyed by
/// their qualified name.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypeData {
    Any,
    Basic(BasicType),
    Enum {
        name: Symbol,
        underlying: TypeId,
    },
    NamedRecord {
        name: Symbol,
        is_value: bool,
        fields: Vec<Field>,
    },
    AnonymousRecord {
        elements: Vec<TupleElement>,
    },
    PrimaryInterface {
        name: Symbol,
        fields: Vec<Field>,
        secondaries: Vec<TypeId>,
        /// Abstract interfaces implemented by the family.
        abstractions: Vec<TypeId>,
    },
    SecondaryInterface {
        name: Symbol,
        primary: TypeId,
    },
    AbstractInterface {
        name: Symbol,
        generalizations: Vec<TypeId>,
        /// Primary interfaces implementing this abstraction. Computed at lock time.
        allowed: Vec<TypeId>,
    },
    Array {
        item: TypeId,
    },
    List {
        item: TypeId,
        form: CollectionForm,
    },
    Set {
        item: TypeId,
        form: CollectionForm,
    },
    Dictionary {
        key: TypeId,
        value: TypeId,
        form: CollectionForm,
    },
    Union {
        members: Vec<TypeId>,
    },
}

impl TypeData {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Any => Kind::Any,
            Self::Basic(_) => Kind::Basic,
            Self::Enum { .. } => Kind::Enum,
            Self::NamedRecord { .. } => Kind::NamedRecord,
            Self::AnonymousRecord { .. } => Kind::AnonymousRecord,
            Self::PrimaryInterface { .. } => Kind::PrimaryInterface,
            Self::SecondaryInterface { .. } => Kind::SecondaryInterface,
            Self::AbstractInterface { .. } => Kind::AbstractInterface,
            Self::Array { .. } => Kind::Array,
            Self::List { .. } => Kind::List,
            Self::Set { .. } => Kind::Set,
            Self::Dictionary { .. } => Kind::Dictionary,
            Self::Union { .. } => Kind::Union,
        }
    }

    /// Value kinds have distinct runtime identities for each nullability.
    pub fn is_value(&self) -> bool {
        match self {
            Self::Basic(b) => b.is_value(),
            Self::Enum { .. } | Self::AnonymousRecord { .. } => true,
            Self::NamedRecord { is_value, .. } => *is_value,
            _ => false,
        }
    }

    /// Declared name of named kinds.
    pub fn name(&self) -> Option<Symbol> {
        match self {
            Self::Enum { name, .. }
            | Self::NamedRecord { name, .. }
            | Self::PrimaryInterface { name, .. }
            | Self::SecondaryInterface { name, .. }
            | Self::AbstractInterface { name, .. } => Some(*name),
            _ => None,
        }
    }

    pub fn fields(&self) -> &[Field] {
        match self {
            Self::NamedRecord { fields, .. } | Self::PrimaryInterface { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Collection form, `Concrete` for arrays and `None` for non-collections.
    pub fn collection_form(&self) -> Option<CollectionForm> {
        match self {
            Self::Array { .. } => Some(CollectionForm::Concrete),
            Self::List { form, .. } | Self::Set { form, .. } | Self::Dictionary { form, .. } => {
                Some(*form)
            }
            _ => None,
        }
    }

    /// Referenced component types with their slot index in this owner.
    ///
    /// These are the edges of the back-reference graph.
    pub fn components(&self) -> Vec<(usize, TypeId)> {
        match self {
            Self::Any | Self::Basic(_) => Vec::new(),
            Self::Enum { underlying, .. } => vec![(0, *underlying)],
            Self::NamedRecord { fields, .. } | Self::PrimaryInterface { fields, .. } => {
                fields.iter().map(|f| f.ty).enumerate().collect()
            }
            Self::AnonymousRecord { elements } => {
                elements.iter().map(|e| e.ty).enumerate().collect()
            }
            Self::SecondaryInterface { primary, .. } => vec![(0, *primary)],
            Self::AbstractInterface { allowed, .. } => {
                allowed.iter().copied().enumerate().collect()
            }
            Self::Array { item } | Self::List { item, .. } | Self::Set { item, .. } => {
                vec![(0, *item)]
            }
            Self::Dictionary { key, value, .. } => vec![(0, *key), (1, *value)],
            Self::Union { members } => members.iter().copied().enumerate().collect(),
        }
    }
}
