//! Paired type identifiers.

use std::fmt;

/// Identifier of a type descriptor.
///
/// Descriptors come in nullable/non-nullable pairs that share a slot: the
/// even id is the non-nullable form, the following odd id its nullable dual.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(u32);

/// The universal placeholder (`object`).
pub const TYPE_ANY: TypeId = TypeId(0);

impl TypeId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Non-nullable id of the pair stored at `index`.
    #[inline]
    pub(crate) fn from_pair(index: usize) -> Self {
        Self((index as u32) << 1)
    }

    /// Slot shared by both duals.
    #[inline]
    pub fn pair_index(self) -> usize {
        (self.0 >> 1) as usize
    }

    #[inline]
    pub fn is_nullable(self) -> bool {
        self.0 & 1 == 1
    }

    #[inline]
    pub fn nullable(self) -> Self {
        Self(self.0 | 1)
    }

    #[inline]
    pub fn non_nullable(self) -> Self {
        Self(self.0 & !1)
    }

    /// The other member of the pair. `t.dual().dual() == t`.
    #[inline]
    pub fn dual(self) -> Self {
        Self(self.0 ^ 1)
    }

    #[inline]
    pub fn with_nullability(self, nullable: bool) -> Self {
        if nullable {
            self.nullable()
        } else {
            self.non_nullable()
        }
    }

    pub fn is_any(self) -> bool {
        self.non_nullable() == TYPE_ANY
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.is_nullable() { "?" } else { "" };
        write!(f, "TypeId({}{})", self.pair_index(), suffix)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
