//! Exchangeable set: which types may appear in the interchange.
//!
//! Eligibility only ever goes from eligible to ineligible. Excluding a type
//! re-evaluates every owner that references it (through the back-reference
//! chain) and cascades until nothing changes.

use fixedbitset::FixedBitSet;
use tracing::debug;

use crate::Config;
use crate::types::{TypeData, TypeId, TypeSystem};

#[cfg(test)]
mod tests;

/// Eligible types of one [`TypeSystem`], tracked per descriptor pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangeableSet {
    eligible: FixedBitSet,
    count: usize,
    enum_follows_underlying: bool,
}

impl ExchangeableSet {
    /// Every implementable type starts eligible.
    pub fn new(system: &TypeSystem, config: &Config) -> Self {
        Self::with_filter(system, config, |_, _| false)
    }

    /// Like [`Self::new`], with types matching `reject` excluded up front.
    ///
    /// `reject` sees non-nullable ids and is never asked about `object`.
    pub fn with_filter(
        system: &TypeSystem,
        config: &Config,
        mut reject: impl FnMut(&TypeSystem, TypeId) -> bool,
    ) -> Self {
        let pairs = system.len();
        let mut eligible = FixedBitSet::with_capacity(pairs);
        eligible.insert_range(..);

        let mut set = Self {
            eligible,
            count: pairs,
            enum_follows_underlying: config.enum_follows_underlying,
        };

        let initial: Vec<TypeId> = system
            .iter()
            .filter(|&ty| !ty.is_any())
            .filter(|&ty| {
                !system.is_implementable(ty)
                    || (is_empty_composite(system, ty) && !config.allow_empty_composites)
                    || reject(system, ty)
            })
            .collect();

        for ty in initial {
            set.exclude(system, ty);
        }
        debug!(eligible = set.count, pairs, "built exchangeable set");
        set
    }

    /// Number of eligible descriptor pairs.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of pairs of the universe this set was built for.
    pub fn universe(&self) -> usize {
        self.eligible.len()
    }

    /// Whether `ty` (either nullability) is eligible.
    pub fn is_eligible(&self, ty: TypeId) -> bool {
        self.eligible.contains(ty.pair_index())
    }

    /// Eligible non-nullable ids in registration order.
    pub fn iter(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.eligible.ones().map(TypeId::from_pair)
    }

    /// Exclude `ty` and cascade. Returns the number of newly excluded pairs.
    ///
    /// `object` cannot be excluded; excluding an ineligible type is a no-op.
    pub fn exclude(&mut self, system: &TypeSystem, ty: TypeId) -> usize {
        let ty = ty.non_nullable();
        if ty.is_any() || !self.is_eligible(ty) {
            return 0;
        }

        self.mark(ty);
        let mut excluded = 1;
        let mut worklist = vec![(ty, 0usize)];

        while let Some((target, depth)) = worklist.pop() {
            debug!(ty = %system.display(target), depth, "excluded");
            for edge in system.back_refs(target) {
                let owner = edge.owner;
                if !self.is_eligible(owner) || !self.should_exclude(system, owner) {
                    continue;
                }
                self.mark(owner);
                excluded += 1;
                worklist.push((owner, depth + 1));
            }
        }

        debug!(excluded, eligible = self.count, "exclusion settled");
        excluded
    }

    /// Re-evaluate every eligible type until nothing changes.
    ///
    /// A set maintained only through [`Self::exclude`] is always at its fixed
    /// point already, so this returns 0 for it.
    pub fn propagate(&mut self, system: &TypeSystem) -> usize {
        let mut total = 0;
        loop {
            let pending: Vec<TypeId> = self
                .iter()
                .filter(|&ty| self.should_exclude(system, ty))
                .collect();
            if pending.is_empty() {
                return total;
            }
            for ty in pending {
                total += self.exclude(system, ty);
            }
        }
    }

    /// Clone of this set restricted to the types `keep` accepts, with cascade.
    pub fn subset(&self, system: &TypeSystem, mut keep: impl FnMut(TypeId) -> bool) -> Self {
        let mut subset = self.clone();
        let dropped: Vec<TypeId> = self.iter().filter(|&ty| !keep(ty)).collect();
        for ty in dropped {
            subset.exclude(system, ty);
        }
        subset
    }

    fn mark(&mut self, ty: TypeId) {
        self.eligible.set(ty.pair_index(), false);
        self.count -= 1;
    }

    /// Whether an eligible owner must follow its components out of the set.
    fn should_exclude(&self, system: &TypeSystem, owner: TypeId) -> bool {
        match system.get(owner) {
            TypeData::Any | TypeData::Basic(_) => false,
            TypeData::Enum { underlying, .. } => {
                self.enum_follows_underlying && !self.is_eligible(*underlying)
            }
            // Polymorphic sets survive while any alternative does.
            TypeData::Union { members } => !members.iter().any(|&m| self.is_eligible(m)),
            TypeData::AbstractInterface { allowed, .. } => {
                !allowed.iter().any(|&a| self.is_eligible(a))
            }
            // Composites degrade field by field.
            TypeData::NamedRecord { fields, .. } | TypeData::PrimaryInterface { fields, .. } => {
                !fields.is_empty() && !fields.iter().any(|f| self.is_eligible(f.ty))
            }
            other => other
                .components()
                .iter()
                .any(|&(_, component)| !self.is_eligible(component)),
        }
    }
}

fn is_empty_composite(system: &TypeSystem, ty: TypeId) -> bool {
    system.kind(ty).is_composite() && system.fields(ty).is_empty()
}
