//! Type descriptor graph.
//!
//! Descriptors are registered on a [`TypeSystemBuilder`] and become immutable
//! once locked into a [`TypeSystem`]. Every descriptor has a nullable and a
//! non-nullable id sharing one pair slot.

mod builder;
mod data;
mod display;
mod forms;
mod id;
mod kind;
mod member;
mod refs;
mod system;


pub use builder::TypeSystemBuilder;
pub use data::{ExternalName, Field, TupleElement, TypeData};
pub use id::{TYPE_ANY, TypeId};
pub use kind::{
    BasicType, CollectionForm, DefaultValuePolicy, Kind, TYPE_BOOL, TYPE_BYTE, TYPE_DOUBLE,
    TYPE_INT, TYPE_LONG, TYPE_STRING,
};
pub use member::MemberDescriptor;
pub use refs::{RefArena, RefId, RefsTo, TypeRef};
pub use system::TypeSystem;
