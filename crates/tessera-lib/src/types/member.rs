//! Member descriptors and slot reconciliation.
//!
//! A slot collects every declaration of one member name on one owner. The
//! declarations are validated one by one, then their types are folded into a
//! single shape by the resolver.

use indexmap::IndexMap;
use tessera_core::{Nullability, RawAttributes, parse_attributes};
use tracing::debug;

use crate::diagnostics::{DiagnosticKind, Location};
use crate::resolve::{SlotError, resolve_slot};

use super::builder::TypeSystemBuilder;
use super::data::{Field, TupleElement, TypeData};
use super::id::TypeId;
use super::kind::DefaultValuePolicy;

/// One declaration of a member, as reported by the discovery feed.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberDescriptor {
    pub name: String,
    /// Declared type. Its own nullability is ignored in favor of the accessors'.
    pub ty: TypeId,
    pub read: Nullability,
    pub write: Nullability,
    pub attributes: RawAttributes,
    /// Declared union member types, valid only on `object` members.
    pub union: Option<Vec<TypeId>>,
    /// Unparsed attribute blob, takes precedence over `attributes`.
    blob: Option<String>,
}

impl MemberDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeId, nullability: Nullability) -> Self {
        Self {
            name: name.into(),
            ty,
            read: nullability,
            write: nullability,
            attributes: RawAttributes::default(),
            union: None,
            blob: None,
        }
    }

    pub fn accessors(mut self, read: Nullability, write: Nullability) -> Self {
        self.read = read;
        self.write = write;
        self
    }

    pub fn attributes(mut self, attributes: RawAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Attach raw attribute JSON; parsed when the member is registered.
    pub fn attribute_blob(mut self, json: impl Into<String>) -> Self {
        self.blob = Some(json.into());
        self
    }

    pub fn union_of(mut self, members: impl IntoIterator<Item = TypeId>) -> Self {
        self.union = Some(members.into_iter().collect());
        self
    }
}

/// Validated declaration of one member.
#[derive(Clone, Copy, Debug)]
struct Declared {
    ty: TypeId,
    explicit_default: bool,
    origin: Option<TypeId>,
}

impl TypeSystemBuilder {
    /// Attach members to a named record or primary interface.
    ///
    /// Several declarations of the same name are reconciled into one field.
    pub fn define_fields(
        &mut self,
        owner: TypeId,
        members: impl IntoIterator<Item = MemberDescriptor>,
    ) {
        let members = members.into_iter().map(|m| (None, m)).collect();
        self.define_members(owner, members);
    }

    /// Attach the members of a whole interface family to its primary.
    ///
    /// Each member is paired with the interface that declared it. A member
    /// declared by several interfaces of the family becomes one field whose
    /// origin is the first declarer.
    pub fn define_family(
        &mut self,
        primary: TypeId,
        members: impl IntoIterator<Item = (TypeId, MemberDescriptor)>,
    ) {
        let members = members
            .into_iter()
            .map(|(iface, m)| (Some(iface.non_nullable()), m))
            .collect();
        self.define_members(primary, members);
    }

    fn define_members(&mut self, owner: TypeId, members: Vec<(Option<TypeId>, MemberDescriptor)>) {
        let owner = owner.non_nullable();
        if !matches!(
            self.data(owner),
            TypeData::NamedRecord { .. } | TypeData::PrimaryInterface { .. }
        ) {
            self.report_kind_mismatch(owner, "a record or primary interface");
            return;
        }
        let owner_name = self.display(owner);

        let mut slots: IndexMap<String, Vec<Declared>> = IndexMap::new();
        for (origin, member) in members {
            let location = Location::member(&owner_name, &member.name);
            let Some((ty, explicit_default)) = self.member_type(&member, &location) else {
                continue;
            };
            slots.entry(member.name).or_default().push(Declared {
                ty,
                explicit_default,
                origin,
            });
        }

        let mut fields = Vec::with_capacity(slots.len());
        for (name, declared) in slots {
            let location = Location::member(&owner_name, &name);
            let ty = match resolve_slot(self, declared.iter().map(|d| d.ty)) {
                Ok(Some(ty)) => ty,
                Ok(None) => continue,
                Err(err) => {
                    self.report_slot_error(&err, location);
                    continue;
                }
            };
            fields.push(Field {
                name: self.interner.intern(&name),
                ty,
                default_value: DefaultValuePolicy::default(),
                explicit_default: declared.iter().any(|d| d.explicit_default),
                origin: declared[0].origin,
            });
        }

        debug!(owner = %owner_name, count = fields.len(), "defined fields");
        if let TypeData::NamedRecord { fields: slot, .. }
        | TypeData::PrimaryInterface { fields: slot, .. } = &mut self.defs[owner.pair_index()].data
        {
            *slot = fields;
        }
    }

    /// Validate one declaration and compute its member type.
    ///
    /// Returns `None` when the declaration is dropped; a diagnostic was reported.
    fn member_type(
        &mut self,
        member: &MemberDescriptor,
        location: &Location,
    ) -> Option<(TypeId, bool)> {
        let attrs = match &member.blob {
            None => member.attributes.clone(),
            Some(json) => match parse_attributes(json) {
                Ok(attrs) => attrs,
                Err(err) => {
                    self.diag
                        .report(DiagnosticKind::InvalidAttributes, location.clone())
                        .message(err.to_string())
                        .emit();
                    return None;
                }
            },
        };

        if member.read != member.write {
            self.diag
                .report(DiagnosticKind::NullabilityMismatch, location.clone())
                .emit();
            return None;
        }

        let mut ty = member.ty.non_nullable();

        if let Some(members) = &member.union {
            if !ty.is_any() {
                let found = self.display(ty);
                self.diag
                    .report(DiagnosticKind::UnionOnNonObject, location.clone())
                    .message(format!("declared on `{found}`"))
                    .emit();
                return None;
            }
            if members.is_empty() {
                self.diag
                    .report(DiagnosticKind::EmptyUnion, location.clone())
                    .emit();
                return None;
            }
            ty = self.union(members);
        }

        if !attrs.tuple_names.is_empty() {
            match self.data(ty).clone() {
                TypeData::AnonymousRecord { elements } => {
                    if elements.len() != attrs.tuple_names.len() {
                        self.diag
                            .report(DiagnosticKind::InvalidAttributes, location.clone())
                            .message(format!(
                                "expected {} tuple names, found {}",
                                elements.len(),
                                attrs.tuple_names.len()
                            ))
                            .emit();
                        return None;
                    }
                    let elements = elements
                        .iter()
                        .zip(&attrs.tuple_names)
                        .map(|(element, name)| TupleElement {
                            ty: element.ty,
                            name: name.as_deref().map(|n| self.interner.intern(n)),
                        })
                        .collect();
                    ty = self.intern(TypeData::AnonymousRecord { elements });
                }
                _ => {
                    let found = self.display(ty);
                    self.diag
                        .report(DiagnosticKind::TupleNamesIgnored, location.clone())
                        .message(format!("`{found}` is not a tuple"))
                        .emit();
                }
            }
        }

        Some((
            ty.with_nullability(member.read.is_nullable()),
            attrs.has_default_value(),
        ))
    }

    fn report_slot_error(&mut self, err: &SlotError, location: Location) {
        let left = self.display(err.left);
        let right = self.display(err.right);
        let inner = err.cause.operands();
        let note = (inner != (err.left.non_nullable(), err.right.non_nullable()))
            .then(|| err.cause.describe(self));

        let mut builder = self
            .diag
            .report(DiagnosticKind::IncompatibleShapes, location)
            .message(format!("`{left}` and `{right}`"));
        if let Some(note) = note {
            builder = builder.note(note);
        }
        builder.emit();
    }
}
