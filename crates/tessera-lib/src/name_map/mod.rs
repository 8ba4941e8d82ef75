//! Read-only view consumed by code generators.
//!
//! A [`NameMap`] ties a locked [`TypeSystem`] to one [`ExchangeableSet`] and
//! names every eligible type. Lookups outside the set are usage errors.

mod support;

#[cfg(test)]
mod tests;

use tracing::debug;

use crate::exchange::ExchangeableSet;
use crate::naming::{NameBuilder, NameEntry, NameTable, Naming};
use crate::types::{TypeId, TypeSystem};
use crate::{Config, Error, Result};

pub use support::SupportShape;

pub struct NameMap<'s> {
    system: &'s TypeSystem,
    naming: &'s dyn Naming,
    config: &'s Config,
    set: ExchangeableSet,
    table: NameTable,
    /// Dense position among eligible types, per pair.
    index: Vec<Option<usize>>,
    support: Vec<SupportShape>,
}

impl<'s> NameMap<'s> {
    /// Name every type of `set`. Fails on the first naming error.
    pub fn build(
        system: &'s TypeSystem,
        naming: &'s dyn Naming,
        config: &'s Config,
        set: ExchangeableSet,
    ) -> Result<Self> {
        let table = NameTable::with_pairs(system.len());
        Self::finish(system, naming, config, set, table)
    }

    /// Same universe, different subset. Names that do not depend on the
    /// subset are carried over instead of recomputed.
    pub fn with_subset(&self, set: ExchangeableSet) -> Result<NameMap<'s>> {
        Self::finish(
            self.system,
            self.naming,
            self.config,
            set,
            self.table.reusable(),
        )
    }

    fn finish(
        system: &'s TypeSystem,
        naming: &'s dyn Naming,
        config: &'s Config,
        set: ExchangeableSet,
        mut table: NameTable,
    ) -> Result<Self> {
        if set.universe() != system.len() {
            return Err(Error::ForeignSubset);
        }

        let reused = table.filled();
        let mut builder = NameBuilder::new(system, naming, config, &set, &mut table);
        for ty in set.iter() {
            builder.name_of(ty)?;
        }

        let mut index = vec![None; system.len()];
        for (position, ty) in set.iter().enumerate() {
            index[ty.pair_index()] = Some(position);
        }

        let support = support::collect(system, &set);
        debug!(
            names = set.len(),
            reused,
            support = support.len(),
            "built name map"
        );

        Ok(Self {
            system,
            naming,
            config,
            set,
            table,
            index,
            support,
        })
    }

    pub fn system(&self) -> &'s TypeSystem {
        self.system
    }

    pub fn set(&self) -> &ExchangeableSet {
        &self.set
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn is_eligible(&self, ty: TypeId) -> bool {
        self.system.contains(ty) && self.set.is_eligible(ty)
    }

    pub fn entry(&self, ty: TypeId) -> Result<&NameEntry> {
        if !self.is_eligible(ty) {
            return Err(self.not_in_subset(ty));
        }
        self.table.get(ty).ok_or_else(|| self.not_in_subset(ty))
    }

    /// Name of `ty` with its own nullability.
    pub fn name(&self, ty: TypeId) -> Result<&str> {
        Ok(self.entry(ty)?.name(ty))
    }

    /// Position of `ty` among the eligible types, in registration order.
    pub fn index(&self, ty: TypeId) -> Result<usize> {
        if !self.is_eligible(ty) {
            return Err(self.not_in_subset(ty));
        }
        self.index[ty.pair_index()].ok_or_else(|| self.not_in_subset(ty))
    }

    /// Aliases a named type was previously exchanged under.
    pub fn previous_names(&self, ty: TypeId) -> Result<Vec<&'s str>> {
        if !self.is_eligible(ty) {
            return Err(self.not_in_subset(ty));
        }
        Ok(self.system.previous_names(ty).collect())
    }

    /// Eligible non-nullable types with their names, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &NameEntry)> {
        self.set
            .iter()
            .filter_map(|ty| self.table.get(ty).map(|entry| (ty, entry)))
    }

    pub fn support_shapes(&self) -> &[SupportShape] {
        &self.support
    }

    fn not_in_subset(&self, ty: TypeId) -> Error {
        let ty = if self.system.contains(ty) {
            self.system.display(ty)
        } else {
            format!("{ty:?}")
        };
        Error::NotInSubset(ty)
    }
}
