//! Tessera: type-system engine for data interchange.
//!
//! Types reachable from exchangeable object families are registered into a
//! descriptor graph, locked, filtered down to an exchangeable set, and named.
//!
//! # Example
//!
//! ```
//! use tessera_core::{Nullability, RawAttributes};
//! use tessera_lib::types::{CollectionForm, MemberDescriptor, TYPE_INT, TYPE_STRING, TypeSystemBuilder};
//! use tessera_lib::{Config, DefaultNaming, ExchangeableSet, NameMap};
//!
//! let mut builder = TypeSystemBuilder::new();
//! let user = builder.declare_primary("Acme.IUser", &RawAttributes::new());
//! let tags = builder.list(TYPE_INT, CollectionForm::ReadOnly);
//! let scores = builder.list(TYPE_INT, CollectionForm::Concrete);
//! builder.define_family(user, [
//!     (user, MemberDescriptor::new("Name", TYPE_STRING, Nullability::NotNull)),
//!     (user, MemberDescriptor::new("Tags", tags, Nullability::Nullable)),
//!     (user, MemberDescriptor::new("Tags", scores, Nullability::NotNull)),
//! ]);
//!
//! let (system, diagnostics) = builder.lock();
//! eprintln!("{}", diagnostics.render());
//!
//! let config = Config::new();
//! let set = ExchangeableSet::new(&system, &config);
//! let names = NameMap::build(&system, &DefaultNaming, &config, set).expect("naming failed");
//! assert_eq!(names.name(system.fields(user)[1].ty).unwrap(), "L(int)");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod diagnostics;
pub mod exchange;
pub mod name_map;
pub mod naming;
pub mod resolve;
pub mod types;

pub use config::Config;
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use exchange::ExchangeableSet;
pub use name_map::{NameMap, SupportShape};
pub use naming::{DefaultNaming, NameContext, Naming};
pub use types::{TypeId, TypeSystem, TypeSystemBuilder};

/// Fatal errors. Recoverable registration problems go to [`Diagnostics`] instead.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A naming strategy produced a blank name.
    #[error("invalid name `{name}` for `{ty}`")]
    InvalidName { ty: String, name: String },

    /// A naming strategy declined a reachable shape.
    #[error("naming does not support `{ty}` ({kind:?})")]
    UnsupportedShape { ty: String, kind: types::Kind },

    /// Lookup of a type outside the active exchangeable set.
    #[error("`{0}` is not in the exchangeable set")]
    NotInSubset(String),

    /// The exchangeable set was built for a different type system.
    #[error("exchangeable set belongs to another type system")]
    ForeignSubset,

    #[error("registration failed with {} errors", .0.error_count())]
    RegistrationFailed(Diagnostics),
}

pub type Result<T> = std::result::Result<T, Error>;
