//! Depth-first memoized name computation.

use tessera_core::utils::is_blank;
use tracing::trace;

use crate::exchange::ExchangeableSet;
use crate::types::{TypeData, TypeId, TypeSystem};
use crate::{Config, Error, Result};

use super::{Component, NameContext, NameEntry, NameTable, Naming};

pub(crate) struct NameBuilder<'a> {
    system: &'a TypeSystem,
    naming: &'a dyn Naming,
    config: &'a Config,
    set: &'a ExchangeableSet,
    table: &'a mut NameTable,
}

/// Component names computed before calling the strategy.
struct Parts {
    names: Vec<(TypeId, String, Option<String>)>,
    subset_dependent: bool,
}

impl Parts {
    fn components(&self) -> Vec<Component<'_>> {
        self.names
            .iter()
            .map(|(ty, name, label)| Component {
                ty: *ty,
                name,
                label: label.as_deref(),
            })
            .collect()
    }
}

impl<'a> NameBuilder<'a> {
    pub(crate) fn new(
        system: &'a TypeSystem,
        naming: &'a dyn Naming,
        config: &'a Config,
        set: &'a ExchangeableSet,
        table: &'a mut NameTable,
    ) -> Self {
        Self {
            system,
            naming,
            config,
            set,
            table,
        }
    }

    /// Name of `ty` with its nullability, computing the pair's entry if needed.
    pub(crate) fn name_of(&mut self, ty: TypeId) -> Result<(String, bool)> {
        let entry = match self.table.get(ty) {
            Some(entry) => entry.clone(),
            None => {
                let entry = self.compute(ty.non_nullable())?;
                self.table.insert(ty, entry.clone());
                entry
            }
        };
        Ok((entry.name(ty).to_string(), entry.subset_dependent))
    }

    fn compute(&mut self, ty: TypeId) -> Result<NameEntry> {
        let system = self.system;
        let naming = self.naming;
        let cx = NameContext {
            system,
            config: self.config,
            ty,
        };

        let (name, subset_dependent) = match system.get(ty) {
            TypeData::Any => (naming.any(&cx), false),
            TypeData::Basic(basic) => (naming.basic(&cx, *basic), false),
            TypeData::Enum { .. } => (naming.enumeration(&cx), false),
            TypeData::NamedRecord { .. } => (naming.record(&cx), false),
            TypeData::PrimaryInterface { .. } => (naming.primary_interface(&cx), false),
            TypeData::AbstractInterface { .. } => (naming.abstract_interface(&cx), false),
            TypeData::SecondaryInterface { primary, .. } => {
                let (primary, dependent) = self.name_of(*primary)?;
                (naming.secondary_interface(&cx, &primary), dependent)
            }
            TypeData::AnonymousRecord { elements } => {
                let parts = self.parts(
                    elements
                        .iter()
                        .map(|e| (e.ty, e.name.map(|n| system.resolve(n).to_string()))),
                )?;
                (naming.tuple(&cx, &parts.components()), parts.subset_dependent)
            }
            TypeData::Array { item } => {
                let parts = self.parts([(*item, None)])?;
                (naming.array(&cx, parts.components()[0]), parts.subset_dependent)
            }
            TypeData::List { item, .. } => {
                let parts = self.parts([(*item, None)])?;
                (naming.list(&cx, parts.components()[0]), parts.subset_dependent)
            }
            TypeData::Set { item, .. } => {
                let parts = self.parts([(*item, None)])?;
                (naming.set(&cx, parts.components()[0]), parts.subset_dependent)
            }
            TypeData::Dictionary { key, value, .. } => {
                let parts = self.parts([(*key, None), (*value, None)])?;
                let components = parts.components();
                (
                    naming.dictionary(&cx, components[0], components[1]),
                    parts.subset_dependent,
                )
            }
            TypeData::Union { members } => {
                let set = self.set;
                let parts = self.parts(
                    members
                        .iter()
                        .filter(|&&m| set.is_eligible(m))
                        .map(|&m| (m, None)),
                )?;
                (naming.union(&cx, &parts.components()), true)
            }
        };

        let non_nullable = self.check(ty, name)?;
        let nullable = self.check(ty.nullable(), naming.nullable(&cx, &non_nullable))?;
        trace!(?ty, name = %non_nullable, "named");

        Ok(NameEntry {
            non_nullable,
            nullable,
            subset_dependent,
        })
    }

    fn parts(
        &mut self,
        components: impl IntoIterator<Item = (TypeId, Option<String>)>,
    ) -> Result<Parts> {
        let mut names = Vec::new();
        let mut subset_dependent = false;
        for (ty, label) in components {
            let (name, dependent) = self.name_of(ty)?;
            subset_dependent |= dependent;
            names.push((ty, name, label));
        }
        Ok(Parts {
            names,
            subset_dependent,
        })
    }

    fn check(&self, ty: TypeId, name: Option<String>) -> Result<String> {
        let Some(name) = name else {
            return Err(Error::UnsupportedShape {
                ty: self.system.display(ty),
                kind: self.system.kind(ty),
            });
        };
        if is_blank(&name) {
            return Err(Error::InvalidName {
                ty: self.system.display(ty),
                name,
            });
        }
        Ok(name)
    }
}
