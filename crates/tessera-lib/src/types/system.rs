//! The locked type graph.

use indexmap::IndexMap;
use tessera_core::{Interner, Symbol};

use super::data::{ExternalName, Field, TypeData};
use super::display::{TypeLookup, display};
use super::id::TypeId;
use super::kind::{DefaultValuePolicy, Kind};
use super::refs::{RefArena, RefsTo};

/// Normal forms of a pair, stored as non-nullable ids.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Forms {
    pub(crate) oblivious: Option<TypeId>,
    /// Outer `None`: not computed yet. Inner `None`: the type has no regular form.
    pub(crate) regular: Option<Option<TypeId>>,
}

#[derive(Clone, Debug)]
pub(crate) struct TypeDef {
    pub(crate) data: TypeData,
    pub(crate) external: ExternalName,
    pub(crate) forms: Forms,
    /// Policy of the non-nullable form.
    pub(crate) default_value: Option<DefaultValuePolicy>,
}

impl TypeDef {
    pub(crate) fn new(data: TypeData) -> Self {
        Self {
            data,
            external: ExternalName::default(),
            forms: Forms::default(),
            default_value: None,
        }
    }
}

/// Type graph after registration. No descriptor can be added anymore.
///
/// Every id handed out by the builder that produced this system is valid here;
/// methods panic on ids from another universe.
#[derive(Clone, Debug)]
pub struct TypeSystem {
    pub(crate) interner: Interner,
    pub(crate) defs: Vec<TypeDef>,
    pub(crate) names: IndexMap<Symbol, TypeId>,
    pub(crate) refs: RefArena,
}

impl TypeLookup for TypeSystem {
    fn data(&self, ty: TypeId) -> &TypeData {
        &self.defs[ty.pair_index()].data
    }

    fn symbol(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }
}

impl TypeSystem {
    /// Number of descriptor pairs.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn contains(&self, ty: TypeId) -> bool {
        ty.pair_index() < self.defs.len()
    }

    pub fn get(&self, ty: TypeId) -> &TypeData {
        &self.defs[ty.pair_index()].data
    }

    pub fn kind(&self, ty: TypeId) -> Kind {
        self.get(ty).kind()
    }

    pub fn is_value(&self, ty: TypeId) -> bool {
        self.get(ty).is_value()
    }

    pub fn fields(&self, ty: TypeId) -> &[Field] {
        self.get(ty).fields()
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn resolve(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }

    /// Look a named type up by its qualified name.
    pub fn find(&self, name: &str) -> Option<TypeId> {
        let sym = self.interner.lookup(name)?;
        self.names.get(&sym).copied()
    }

    pub fn qualified_name(&self, ty: TypeId) -> Option<&str> {
        self.get(ty).name().map(|sym| self.resolve(sym))
    }

    pub fn external_name(&self, ty: TypeId) -> Option<&str> {
        let sym = self.defs[ty.pair_index()].external.name?;
        Some(self.resolve(sym))
    }

    pub fn previous_names(&self, ty: TypeId) -> impl Iterator<Item = &str> {
        self.defs[ty.pair_index()]
            .external
            .previous
            .iter()
            .map(|&sym| self.resolve(sym))
    }

    /// Iterate over all non-nullable ids in registration order.
    pub fn iter(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.defs.len()).map(TypeId::from_pair)
    }

    /// Runtime-identity representative of `ty`.
    ///
    /// Reference kinds share one identity for both nullabilities and are
    /// represented by their nullable form.
    pub fn oblivious(&self, ty: TypeId) -> TypeId {
        let pair = self.defs[ty.pair_index()]
            .forms
            .oblivious
            .unwrap_or(ty.non_nullable());
        if self.is_value(pair) {
            pair.with_nullability(ty.is_nullable())
        } else {
            pair.nullable()
        }
    }

    pub fn is_oblivious(&self, ty: TypeId) -> bool {
        self.oblivious(ty) == ty
    }

    /// Normalized shape of `ty`, `None` for read-only collection abstractions.
    pub fn regular(&self, ty: TypeId) -> Option<TypeId> {
        let regular = self.defs[ty.pair_index()].forms.regular.flatten()?;
        Some(regular.with_nullability(ty.is_nullable()))
    }

    /// Instantiable terminal shape of `ty`, `None` for polymorphic kinds.
    pub fn final_form(&self, ty: TypeId) -> Option<TypeId> {
        match self.get(ty) {
            TypeData::Any | TypeData::AbstractInterface { .. } | TypeData::Union { .. } => None,
            TypeData::SecondaryInterface { primary, .. } => Some(primary.nullable()),
            _ => {
                let regular = self.regular(ty)?;
                if self.is_value(regular) {
                    Some(regular.non_nullable())
                } else {
                    Some(regular.nullable())
                }
            }
        }
    }

    pub fn is_final(&self, ty: TypeId) -> bool {
        self.final_form(ty) == Some(ty)
    }

    pub fn default_value(&self, ty: TypeId) -> DefaultValuePolicy {
        if ty.is_nullable() {
            return DefaultValuePolicy::Allowed;
        }
        self.defs[ty.pair_index()].default_value.unwrap_or_default()
    }

    /// Whether the type can have instances at all.
    pub fn is_implementable(&self, ty: TypeId) -> bool {
        match self.get(ty) {
            TypeData::AbstractInterface { allowed, .. } => !allowed.is_empty(),
            TypeData::Union { members } => !members.is_empty(),
            _ => true,
        }
    }

    /// Edges whose target is either dual of `ty`.
    pub fn back_refs(&self, ty: TypeId) -> RefsTo<'_> {
        self.refs.iter_to(ty)
    }

    pub fn refs(&self) -> &RefArena {
        &self.refs
    }

    /// Structural rendering, e.g. `IReadOnlyList<int>?`.
    pub fn display(&self, ty: TypeId) -> String {
        display(self, ty)
    }
}
