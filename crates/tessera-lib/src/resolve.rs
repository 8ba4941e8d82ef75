//! Shape reconciliation for member slots.
//!
//! When a member is declared several times (a property redeclared across an
//! interface family, say), the declared shapes are folded pairwise into the
//! most specific shape compatible with all of them.
//!
//! Rules:
//! - the result is nullable only if both operands are
//! - `object` yields to the other operand
//! - value kinds and `string` must match exactly
//! - arrays match arrays of the same item, or a read-only list of it
//! - collections of one family resolve item-wise; dictionary keys are invariant
//! - interface families: the more derived family wins

use tracing::trace;

use crate::types::{CollectionForm, TypeData, TypeId, TypeSystemBuilder};

/// Why two shapes could not be reconciled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// Different kinds, or value kinds that are not identical.
    Incompatible { left: TypeId, right: TypeId },
    /// Collections of different families (list vs set, say).
    FamilyMismatch { left: TypeId, right: TypeId },
    /// Dictionary keys differ.
    KeyMismatch { left: TypeId, right: TypeId },
    /// Array items differ.
    ItemMismatch { left: TypeId, right: TypeId },
}

impl ResolveError {
    /// The innermost conflicting pair.
    pub fn operands(&self) -> (TypeId, TypeId) {
        match self {
            Self::Incompatible { left, right }
            | Self::FamilyMismatch { left, right }
            | Self::KeyMismatch { left, right }
            | Self::ItemMismatch { left, right } => (*left, *right),
        }
    }

    pub fn describe(&self, builder: &TypeSystemBuilder) -> String {
        let (left, right) = self.operands();
        let left = builder.display(left);
        let right = builder.display(right);
        match self {
            Self::Incompatible { .. } => format!("`{left}` is not compatible with `{right}`"),
            Self::FamilyMismatch { .. } => {
                format!("`{left}` and `{right}` are different collection families")
            }
            Self::KeyMismatch { .. } => {
                format!("dictionary keys `{left}` and `{right}` must be identical")
            }
            Self::ItemMismatch { .. } => {
                format!("array items `{left}` and `{right}` must be identical")
            }
        }
    }
}

/// Failure while folding a slot: the two top-level operands and the cause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotError {
    /// Shape accumulated from the preceding declarations.
    pub left: TypeId,
    /// Declaration that could not be merged into it.
    pub right: TypeId,
    pub cause: ResolveError,
}

/// Fold all declarations of a slot. `Ok(None)` for an empty slot.
pub fn resolve_slot(
    builder: &mut TypeSystemBuilder,
    candidates: impl IntoIterator<Item = TypeId>,
) -> Result<Option<TypeId>, SlotError> {
    let mut iter = candidates.into_iter();
    let Some(first) = iter.next() else {
        return Ok(None);
    };

    iter.try_fold(first, |left, right| {
        resolve_pair(builder, left, right).map_err(|cause| SlotError { left, right, cause })
    })
    .map(Some)
}

/// Reconcile two declared shapes.
pub fn resolve_pair(
    builder: &mut TypeSystemBuilder,
    left: TypeId,
    right: TypeId,
) -> Result<TypeId, ResolveError> {
    let nullable = left.is_nullable() && right.is_nullable();
    let shape = resolve_shape(builder, left.non_nullable(), right.non_nullable())?;
    let resolved = shape.with_nullability(nullable);
    trace!(?left, ?right, ?resolved, "resolved pair");
    Ok(resolved)
}

fn resolve_shape(
    builder: &mut TypeSystemBuilder,
    left: TypeId,
    right: TypeId,
) -> Result<TypeId, ResolveError> {
    if left == right {
        return Ok(left);
    }
    if left.is_any() {
        return Ok(right);
    }
    if right.is_any() {
        return Ok(left);
    }

    let incompatible = ResolveError::Incompatible { left, right };
    let l = builder.data(left).clone();
    let r = builder.data(right).clone();

    if is_exact(&l) || is_exact(&r) {
        return Err(incompatible);
    }

    match (&l, &r) {
        (TypeData::Array { item: a }, TypeData::Array { item: b }) => {
            Err(ResolveError::ItemMismatch {
                left: *a,
                right: *b,
            })
        }
        (
            TypeData::Array { item },
            TypeData::List {
                item: list_item,
                form: CollectionForm::ReadOnly,
            },
        ) if item == list_item => Ok(left),
        (
            TypeData::List {
                item: list_item,
                form: CollectionForm::ReadOnly,
            },
            TypeData::Array { item },
        ) if item == list_item => Ok(right),

        (TypeData::List { item: a, form: fa }, TypeData::List { item: b, form: fb }) => {
            resolve_sequence(builder, (left, *a, *fa), (right, *b, *fb), |b, item, form| {
                b.list(item, form)
            })
        }
        (TypeData::Set { item: a, form: fa }, TypeData::Set { item: b, form: fb }) => {
            resolve_sequence(builder, (left, *a, *fa), (right, *b, *fb), |b, item, form| {
                b.set(item, form)
            })
        }
        (
            TypeData::Dictionary {
                key: ka,
                value: va,
                form: fa,
            },
            TypeData::Dictionary {
                key: kb,
                value: vb,
                form: fb,
            },
        ) => {
            if ka != kb {
                return Err(ResolveError::KeyMismatch {
                    left: *ka,
                    right: *kb,
                });
            }
            let value = resolve_pair(builder, *va, *vb)?;
            let form = pick_form(*fa, *fb);
            if value == *va && form == *fa {
                return Ok(left);
            }
            if value == *vb && form == *fb {
                return Ok(right);
            }
            Ok(builder.dictionary(*ka, value, form))
        }

        _ if l.kind().is_collection() && r.kind().is_collection() => {
            Err(ResolveError::FamilyMismatch { left, right })
        }
        _ => resolve_reference(builder, left, right).ok_or(incompatible),
    }
}

/// Value kinds and strings admit no widening.
fn is_exact(data: &TypeData) -> bool {
    data.is_value() || matches!(data, TypeData::Basic(_))
}

/// Both sides must agree to keep an interface form; otherwise use the concrete one.
fn pick_form(left: CollectionForm, right: CollectionForm) -> CollectionForm {
    if left == right {
        left
    } else {
        CollectionForm::Concrete
    }
}

fn resolve_sequence(
    builder: &mut TypeSystemBuilder,
    (left, left_item, left_form): (TypeId, TypeId, CollectionForm),
    (right, right_item, right_form): (TypeId, TypeId, CollectionForm),
    make: impl FnOnce(&mut TypeSystemBuilder, TypeId, CollectionForm) -> TypeId,
) -> Result<TypeId, ResolveError> {
    let item = resolve_pair(builder, left_item, right_item)?;
    let form = pick_form(left_form, right_form);
    if item == left_item && form == left_form {
        return Ok(left);
    }
    if item == right_item && form == right_form {
        return Ok(right);
    }
    Ok(make(builder, item, form))
}

fn resolve_reference(builder: &TypeSystemBuilder, left: TypeId, right: TypeId) -> Option<TypeId> {
    let left = family(builder, left);
    let right = family(builder, right);
    if left == right || derives_from(builder, left, right) {
        return Some(left);
    }
    if derives_from(builder, right, left) {
        return Some(right);
    }
    None
}

/// Secondary interfaces stand for their primary.
fn family(builder: &TypeSystemBuilder, ty: TypeId) -> TypeId {
    match builder.data(ty) {
        TypeData::SecondaryInterface { primary, .. } => *primary,
        _ => ty,
    }
}

fn derives_from(builder: &TypeSystemBuilder, derived: TypeId, base: TypeId) -> bool {
    if derived == base {
        return true;
    }
    match builder.data(derived) {
        TypeData::PrimaryInterface { abstractions, .. } => abstractions
            .iter()
            .any(|&a| derives_from(builder, a, base)),
        TypeData::AbstractInterface {
            generalizations, ..
        } => generalizations
            .iter()
            .any(|&g| derives_from(builder, g, base)),
        _ => false,
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
