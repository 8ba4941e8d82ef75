//! Derived data computed when the graph is locked.
//!
//! Normal forms may intern shapes that were never registered, so the passes
//! walk the pair table by index and pick up appended pairs as they go.

use std::collections::HashSet;

use tracing::debug;

use crate::diagnostics::Diagnostics;

use super::builder::TypeSystemBuilder;
use super::data::{TupleElement, TypeData};
use super::id::TypeId;
use super::kind::{CollectionForm, DefaultValuePolicy};
use super::refs::RefArena;
use super::system::TypeSystem;

impl TypeSystemBuilder {
    pub(crate) fn finish(mut self) -> (TypeSystem, Diagnostics) {
        self.compute_allowed();

        let mut index = 0;
        while index < self.defs.len() {
            let ty = TypeId::from_pair(index);
            self.oblivious_pair(ty);
            self.regular_pair(ty);
            index += 1;
        }

        let mut visiting = HashSet::new();
        for index in 0..self.defs.len() {
            self.default_policy(TypeId::from_pair(index), &mut visiting);
        }

        let mut refs = RefArena::with_pairs(self.defs.len());
        for (index, def) in self.defs.iter().enumerate() {
            let owner = TypeId::from_pair(index);
            for (slot, target) in def.data.components() {
                refs.add(owner, target, slot);
            }
        }

        debug!(
            pairs = self.defs.len(),
            edges = refs.len(),
            "locked type system"
        );

        let system = TypeSystem {
            interner: self.interner,
            defs: self.defs,
            names: self.names,
            refs,
        };
        (system, self.diag)
    }

    /// Fill the allowed sets of abstract interfaces, following generalizations.
    fn compute_allowed(&mut self) {
        let implementations: Vec<(TypeId, Vec<TypeId>)> = self
            .defs
            .iter()
            .enumerate()
            .filter_map(|(index, def)| match &def.data {
                TypeData::PrimaryInterface { abstractions, .. } => {
                    Some((TypeId::from_pair(index), abstractions.clone()))
                }
                _ => None,
            })
            .collect();

        for (primary, mut stack) in implementations {
            let mut seen = HashSet::new();
            while let Some(abstraction) = stack.pop() {
                if !seen.insert(abstraction) {
                    continue;
                }
                if let TypeData::AbstractInterface {
                    generalizations,
                    allowed,
                    ..
                } = &mut self.defs[abstraction.pair_index()].data
                {
                    if !allowed.contains(&primary) {
                        allowed.push(primary);
                    }
                    stack.extend(generalizations.iter().copied());
                }
            }
        }
    }

    /// Oblivious shape of a pair: names and reference nullability erased.
    fn oblivious_pair(&mut self, ty: TypeId) -> TypeId {
        let index = ty.pair_index();
        if let Some(oblivious) = self.defs[index].forms.oblivious {
            return oblivious;
        }

        let oblivious = match self.defs[index].data.clone() {
            TypeData::AnonymousRecord { elements } => {
                let elements = elements
                    .iter()
                    .map(|e| TupleElement::positional(self.oblivious_of(e.ty)))
                    .collect();
                self.intern(TypeData::AnonymousRecord { elements })
            }
            TypeData::Array { item } => {
                let item = self.oblivious_of(item);
                self.array(item)
            }
            TypeData::List { item, form } => {
                let item = self.oblivious_of(item);
                self.list(item, form)
            }
            TypeData::Set { item, form } => {
                let item = self.oblivious_of(item);
                self.set(item, form)
            }
            TypeData::Dictionary { key, value, form } => {
                let key = self.oblivious_of(key);
                let value = self.oblivious_of(value);
                self.dictionary(key, value, form)
            }
            TypeData::Union { members } => {
                let members: Vec<_> = members.iter().map(|&m| self.oblivious_of(m)).collect();
                self.union(&members)
            }
            _ => ty.non_nullable(),
        };

        self.defs[index].forms.oblivious = Some(oblivious);
        // Components of the result are oblivious already.
        self.defs[oblivious.pair_index()]
            .forms
            .oblivious
            .get_or_insert(oblivious);
        oblivious
    }

    fn oblivious_of(&mut self, ty: TypeId) -> TypeId {
        let pair = self.oblivious_pair(ty);
        if self.defs[pair.pair_index()].data.is_value() {
            pair.with_nullability(ty.is_nullable())
        } else {
            pair.nullable()
        }
    }

    /// Regular shape of a pair, `None` for read-only collection abstractions.
    fn regular_pair(&mut self, ty: TypeId) -> Option<TypeId> {
        let index = ty.pair_index();
        if let Some(regular) = self.defs[index].forms.regular {
            return regular;
        }

        let regular = match self.defs[index].data.clone() {
            TypeData::AnonymousRecord { elements } => {
                let elements = elements
                    .iter()
                    .map(|e| TupleElement {
                        ty: self.regular_or_self(e.ty),
                        name: e.name,
                    })
                    .collect();
                Some(self.intern(TypeData::AnonymousRecord { elements }))
            }
            TypeData::Array { item } => {
                let item = self.regular_or_self(item);
                Some(self.array(item))
            }
            TypeData::List { form, .. }
            | TypeData::Set { form, .. }
            | TypeData::Dictionary { form, .. }
                if form == CollectionForm::ReadOnly =>
            {
                None
            }
            TypeData::List { item, .. } => {
                let item = self.regular_or_self(item);
                Some(self.list(item, CollectionForm::Concrete))
            }
            TypeData::Set { item, .. } => {
                let item = self.regular_or_self(item);
                Some(self.set(item, CollectionForm::Concrete))
            }
            TypeData::Dictionary { key, value, .. } => {
                let key = self.regular_or_self(key);
                let value = self.regular_or_self(value);
                Some(self.dictionary(key, value, CollectionForm::Concrete))
            }
            TypeData::Union { members } => {
                let members: Vec<_> = members.iter().map(|&m| self.regular_or_self(m)).collect();
                Some(self.union(&members))
            }
            _ => Some(ty.non_nullable()),
        };

        self.defs[index].forms.regular = Some(regular);
        regular
    }

    fn regular_or_self(&mut self, ty: TypeId) -> TypeId {
        match self.regular_pair(ty) {
            Some(regular) => regular.with_nullability(ty.is_nullable()),
            None => ty,
        }
    }

    /// Default-value policy of a type. Fills field policies of records on the way.
    fn default_policy(
        &mut self,
        ty: TypeId,
        visiting: &mut HashSet<usize>,
    ) -> DefaultValuePolicy {
        if ty.is_nullable() {
            return DefaultValuePolicy::Allowed;
        }
        let index = ty.pair_index();
        if let Some(policy) = self.defs[index].default_value {
            return policy;
        }

        let policy = match self.defs[index].data.clone() {
            TypeData::Any | TypeData::AbstractInterface { .. } | TypeData::Union { .. } => {
                DefaultValuePolicy::Disallowed
            }
            TypeData::NamedRecord { fields, .. } | TypeData::PrimaryInterface { fields, .. } => {
                if !visiting.insert(index) {
                    // Self-referential through non-nullable members.
                    return DefaultValuePolicy::RequiresInit;
                }
                let policies: Vec<_> = fields
                    .iter()
                    .map(|f| {
                        if f.explicit_default {
                            DefaultValuePolicy::Allowed
                        } else {
                            self.default_policy(f.ty, visiting)
                        }
                    })
                    .collect();
                visiting.remove(&index);

                if let TypeData::NamedRecord { fields, .. }
                | TypeData::PrimaryInterface { fields, .. } = &mut self.defs[index].data
                {
                    for (field, policy) in fields.iter_mut().zip(&policies) {
                        field.default_value = *policy;
                    }
                }

                let all_allowed = policies.iter().all(|p| *p == DefaultValuePolicy::Allowed);
                match self.defs[index].data {
                    TypeData::NamedRecord { .. } if !all_allowed => DefaultValuePolicy::RequiresInit,
                    _ => DefaultValuePolicy::Allowed,
                }
            }
            TypeData::AnonymousRecord { elements } => {
                if !visiting.insert(index) {
                    return DefaultValuePolicy::RequiresInit;
                }
                let all_allowed = elements
                    .iter()
                    .all(|e| self.default_policy(e.ty, visiting) == DefaultValuePolicy::Allowed);
                visiting.remove(&index);
                if all_allowed {
                    DefaultValuePolicy::Allowed
                } else {
                    DefaultValuePolicy::RequiresInit
                }
            }
            _ => DefaultValuePolicy::Allowed,
        };

        self.defs[index].default_value = Some(policy);
        policy
    }
}
