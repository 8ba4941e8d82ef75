//! Back-reference edges.
//!
//! Every edge records that `owner` mentions `target` at slot `index`. Edges
//! sharing a target pair are chained through `next`, so walking the chain
//! from a target's head visits every owner that references it.

use super::id::TypeId;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RefId(u32);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TypeRef {
    /// Non-nullable id of the owning type.
    pub owner: TypeId,
    /// Referenced type, nullability included.
    pub target: TypeId,
    /// Slot of the reference within the owner (field, element or argument position).
    pub index: usize,
    next: Option<RefId>,
}

/// Edge arena with one chain head per type pair.
#[derive(Clone, Debug, Default)]
pub struct RefArena {
    edges: Vec<TypeRef>,
    heads: Vec<Option<RefId>>,
}

impl RefArena {
    pub fn with_pairs(pair_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            heads: vec![None; pair_count],
        }
    }

    pub fn add(&mut self, owner: TypeId, target: TypeId, index: usize) -> RefId {
        let slot = target.pair_index();
        if slot >= self.heads.len() {
            self.heads.resize(slot + 1, None);
        }
        let id = RefId(self.edges.len() as u32);
        self.edges.push(TypeRef {
            owner: owner.non_nullable(),
            target,
            index,
            next: self.heads[slot],
        });
        self.heads[slot] = Some(id);
        id
    }

    pub fn get(&self, id: RefId) -> &TypeRef {
        &self.edges[id.0 as usize]
    }

    /// Edges pointing at either dual of `target`, most recent first.
    pub fn iter_to(&self, target: TypeId) -> RefsTo<'_> {
        RefsTo {
            arena: self,
            cursor: self.heads.get(target.pair_index()).copied().flatten(),
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

pub struct RefsTo<'a> {
    arena: &'a RefArena,
    cursor: Option<RefId>,
}

impl<'a> Iterator for RefsTo<'a> {
    type Item = &'a TypeRef;

    fn next(&mut self) -> Option<Self::Item> {
        let edge = self.arena.get(self.cursor?);
        self.cursor = edge.next;
        Some(edge)
    }
}
