//! Mutable registration phase of the type graph.

use std::collections::HashMap;

use indexmap::IndexMap;
use tessera_core::{Interner, RawAttributes, Symbol};
use tracing::{debug, trace};

use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics, Location};

use super::data::{ExternalName, TupleElement, TypeData};
use super::display::{TypeLookup, display};
use super::id::{TYPE_ANY, TypeId};
use super::kind::{BasicType, CollectionForm, Kind};
use super::system::{TypeDef, TypeSystem};

/// Registers descriptors and reconciles member shapes.
///
/// Anonymous shapes are interned structurally, so registering the same shape
/// twice yields the same id. Named kinds are keyed by qualified name.
#[derive(Debug)]
pub struct TypeSystemBuilder {
    pub(crate) interner: Interner,
    pub(crate) defs: Vec<TypeDef>,
    shapes: HashMap<TypeData, TypeId>,
    pub(crate) names: IndexMap<Symbol, TypeId>,
    pub(crate) diag: Diagnostics,
}

impl Default for TypeSystemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeLookup for TypeSystemBuilder {
    fn data(&self, ty: TypeId) -> &TypeData {
        &self.defs[ty.pair_index()].data
    }

    fn symbol(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }
}

impl TypeSystemBuilder {
    /// Create a builder with `object` and every basic type pre-registered.
    pub fn new() -> Self {
        let mut builder = Self {
            interner: Interner::new(),
            defs: Vec::new(),
            shapes: HashMap::new(),
            names: IndexMap::new(),
            diag: Diagnostics::new(),
        };

        let any = builder.intern(TypeData::Any);
        debug_assert_eq!(any, TYPE_ANY);

        for basic in BasicType::ALL {
            let id = builder.intern(TypeData::Basic(basic));
            debug_assert_eq!(id, basic.type_id());
        }

        builder
    }

    pub fn any(&self) -> TypeId {
        TYPE_ANY
    }

    pub fn basic(&self, basic: BasicType) -> TypeId {
        basic.type_id()
    }

    pub fn data(&self, ty: TypeId) -> &TypeData {
        &self.defs[ty.pair_index()].data
    }

    pub fn find(&self, name: &str) -> Option<TypeId> {
        let sym = self.interner.lookup(name)?;
        self.names.get(&sym).copied()
    }

    pub fn display(&self, ty: TypeId) -> String {
        display(self, ty)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diag
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    fn push(&mut self, data: TypeData) -> TypeId {
        let id = TypeId::from_pair(self.defs.len());
        self.defs.push(TypeDef::new(data));
        id
    }

    /// Structural interning of anonymous shapes.
    pub(crate) fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.shapes.get(&data) {
            return id;
        }
        let id = self.push(data.clone());
        trace!(?id, kind = ?data.kind(), "interned shape");
        self.shapes.insert(data, id);
        id
    }

    fn declare_named(
        &mut self,
        name: &str,
        attrs: &RawAttributes,
        make: impl FnOnce(Symbol) -> TypeData,
    ) -> TypeId {
        let sym = self.interner.intern(name);
        if let Some(&existing) = self.names.get(&sym) {
            self.diag
                .report(DiagnosticKind::DuplicateTypeName, Location::ty(name))
                .message(name)
                .emit();
            return existing;
        }

        let id = self.push(make(sym));
        let external = ExternalName {
            name: attrs
                .external_name
                .as_deref()
                .map(|n| self.interner.intern(n)),
            previous: attrs
                .previous_names
                .iter()
                .map(|n| self.interner.intern(n))
                .collect(),
        };
        self.defs[id.pair_index()].external = external;
        self.names.insert(sym, id);
        debug!(name, ?id, "registered named type");
        id
    }

    pub fn declare_enum(
        &mut self,
        name: &str,
        underlying: BasicType,
        attrs: &RawAttributes,
    ) -> TypeId {
        if !underlying.is_integral() {
            self.diag
                .report(DiagnosticKind::UnderlyingNotIntegral, Location::ty(name))
                .message(underlying.name())
                .emit();
        }
        let underlying = underlying.type_id();
        self.declare_named(name, attrs, |name| TypeData::Enum { name, underlying })
    }

    /// Declare a record. Fields are attached later with [`Self::define_fields`].
    pub fn declare_record(&mut self, name: &str, is_value: bool, attrs: &RawAttributes) -> TypeId {
        self.declare_named(name, attrs, |name| TypeData::NamedRecord {
            name,
            is_value,
            fields: Vec::new(),
        })
    }

    /// Declare the single concrete data shape of an interface family.
    pub fn declare_primary(&mut self, name: &str, attrs: &RawAttributes) -> TypeId {
        self.declare_named(name, attrs, |name| TypeData::PrimaryInterface {
            name,
            fields: Vec::new(),
            secondaries: Vec::new(),
            abstractions: Vec::new(),
        })
    }

    /// Declare an alternative interface name that aliases `primary`.
    pub fn declare_secondary(
        &mut self,
        name: &str,
        primary: TypeId,
        attrs: &RawAttributes,
    ) -> TypeId {
        let primary = primary.non_nullable();
        let id = self.declare_named(name, attrs, |name| TypeData::SecondaryInterface {
            name,
            primary,
        });
        if let TypeData::PrimaryInterface { secondaries, .. } =
            &mut self.defs[primary.pair_index()].data
            && !secondaries.contains(&id)
        {
            secondaries.push(id);
        }
        id
    }

    /// Declare an abstract interface. Generalizations must already be declared.
    pub fn declare_abstract(
        &mut self,
        name: &str,
        generalizations: &[TypeId],
        attrs: &RawAttributes,
    ) -> TypeId {
        let generalizations: Vec<TypeId> =
            generalizations.iter().map(|g| g.non_nullable()).collect();
        self.declare_named(name, attrs, |name| TypeData::AbstractInterface {
            name,
            generalizations,
            allowed: Vec::new(),
        })
    }

    /// Record that the family of `primary` implements `abstraction`.
    ///
    /// Reports [`DiagnosticKind::KindMismatch`] and records nothing when
    /// either side has another kind.
    pub fn implement(&mut self, primary: TypeId, abstraction: TypeId) {
        let abstraction = abstraction.non_nullable();
        if self.data(abstraction).kind() != Kind::AbstractInterface {
            self.report_kind_mismatch(abstraction, "an abstract interface");
            return;
        }
        let TypeData::PrimaryInterface { abstractions, .. } =
            &mut self.defs[primary.pair_index()].data
        else {
            self.report_kind_mismatch(primary, "a primary interface");
            return;
        };
        if !abstractions.contains(&abstraction) {
            abstractions.push(abstraction);
        }
    }

    pub(crate) fn report_kind_mismatch(&mut self, ty: TypeId, expected: &str) {
        let ty = ty.non_nullable();
        let name = self.display(ty);
        let found = self.data(ty).kind();
        self.diag
            .report(DiagnosticKind::KindMismatch, Location::ty(&name))
            .message(format!("`{name}` is {found:?}, expected {expected}"))
            .emit();
    }

    pub fn array(&mut self, item: TypeId) -> TypeId {
        self.intern(TypeData::Array { item })
    }

    pub fn list(&mut self, item: TypeId, form: CollectionForm) -> TypeId {
        self.intern(TypeData::List { item, form })
    }

    pub fn set(&mut self, item: TypeId, form: CollectionForm) -> TypeId {
        self.intern(TypeData::Set { item, form })
    }

    pub fn dictionary(&mut self, key: TypeId, value: TypeId, form: CollectionForm) -> TypeId {
        self.intern(TypeData::Dictionary { key, value, form })
    }

    /// Anonymous record with positional elements only.
    pub fn tuple(&mut self, elements: &[TypeId]) -> TypeId {
        let elements: Vec<_> = elements.iter().copied().map(TupleElement::positional).collect();
        self.intern(TypeData::AnonymousRecord { elements })
    }

    /// Anonymous record whose elements may carry explicit names.
    pub fn named_tuple(&mut self, elements: &[(TypeId, Option<&str>)]) -> TypeId {
        let elements = elements
            .iter()
            .map(|&(ty, name)| TupleElement {
                ty,
                name: name.map(|n| self.interner.intern(n)),
            })
            .collect();
        self.intern(TypeData::AnonymousRecord { elements })
    }

    /// Union over `members`, duplicates dropped, declaration order kept.
    pub fn union(&mut self, members: &[TypeId]) -> TypeId {
        let mut unique: Vec<TypeId> = Vec::with_capacity(members.len());
        for &member in members {
            if !unique.contains(&member) {
                unique.push(member);
            }
        }
        self.intern(TypeData::Union { members: unique })
    }

    /// Lock the graph: compute derived data and drop registration state.
    pub fn lock(self) -> (TypeSystem, Diagnostics) {
        self.finish()
    }

    /// Like [`Self::lock`], but fails when any error was reported.
    pub fn lock_strict(self) -> Result<TypeSystem, Error> {
        let (system, diag) = self.lock();
        if diag.has_errors() {
            return Err(Error::RegistrationFailed(diag));
        }
        Ok(system)
    }
}
