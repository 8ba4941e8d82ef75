use crate::types::TypeId;

/// Names of one descriptor pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameEntry {
    pub non_nullable: String,
    pub nullable: String,
    /// The name embeds a union, whose name depends on which members are eligible.
    pub subset_dependent: bool,
}

impl NameEntry {
    /// Name matching the nullability of `ty`.
    pub fn name(&self, ty: TypeId) -> &str {
        if ty.is_nullable() {
            &self.nullable
        } else {
            &self.non_nullable
        }
    }
}

/// Pre-sized name cache, one slot per descriptor pair, each written once.
#[derive(Clone, Debug, Default)]
pub struct NameTable {
    entries: Vec<Option<NameEntry>>,
}

impl NameTable {
    pub fn with_pairs(pairs: usize) -> Self {
        Self {
            entries: vec![None; pairs],
        }
    }

    pub fn get(&self, ty: TypeId) -> Option<&NameEntry> {
        self.entries.get(ty.pair_index())?.as_ref()
    }

    pub(crate) fn insert(&mut self, ty: TypeId, entry: NameEntry) {
        let slot = &mut self.entries[ty.pair_index()];
        debug_assert!(slot.is_none(), "name slot written twice");
        *slot = Some(entry);
    }

    /// Copy of the entries that stay valid for any subset of the same universe.
    pub(crate) fn reusable(&self) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|entry| entry.clone().filter(|e| !e.subset_dependent))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of slots already named.
    pub fn filled(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }
}
