//! Core data structures shared by the Tessera type system.
//!
//! Two layers:
//! - **Attribute layer**: the raw attribute blob the discovery feed attaches to
//!   every type or member declaration, deserialized 1:1 from JSON.
//! - **Symbols**: string interning for type, member and alias names.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use indexmap::IndexMap;

mod interner;
pub mod utils;

pub use interner::{Interner, Symbol};

/// Nullability state of a member accessor, as reported by the discovery feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nullability {
    #[default]
    NotNull,
    Nullable,
}

impl Nullability {
    pub fn is_nullable(self) -> bool {
        matches!(self, Self::Nullable)
    }
}

/// Raw attribute data attached to a declaration.
///
/// Unknown keys are kept in `extra`, in declaration order, so that consumers
/// built on top of the type system can read their own attributes.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAttributes {
    /// External name override for named kinds.
    pub external_name: Option<String>,
    /// Names this declaration was previously known by.
    pub previous_names: Vec<String>,
    /// Explicit default value. Its presence is what matters, not its content.
    pub default_value: Option<serde_json::Value>,
    /// Element names for tuple-typed members. `None` keeps an element positional.
    pub tuple_names: Vec<Option<String>>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl RawAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_external_name(mut self, name: impl Into<String>) -> Self {
        self.external_name = Some(name.into());
        self
    }

    pub fn with_previous_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.previous_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default_value(mut self, value: serde_json::Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_tuple_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.tuple_names = names.into_iter().map(|n| n.map(Into::into)).collect();
        self
    }

    /// Whether the declaration carries an explicit default value.
    pub fn has_default_value(&self) -> bool {
        self.default_value.is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Parse an attribute blob.
pub fn parse_attributes(json: &str) -> Result<RawAttributes, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
#[path = "interner_tests.rs"]
mod interner_tests;

#[cfg(test)]
#[path = "utils_tests.rs"]
mod utils_tests;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
