//! Configuration of naming and eligibility.

/// Settings shared by the exchangeable set and the name builder.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Suffix of derived nullable names.
    pub nullable_suffix: String,
    /// Name of `A(byte)`.
    pub byte_array_name: String,
    /// Whether an enumeration is excluded when its underlying type is.
    pub enum_follows_underlying: bool,
    /// Whether records and primary interfaces without fields are eligible.
    pub allow_empty_composites: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nullable_suffix: "?".to_string(),
            byte_array_name: "binary".to_string(),
            enum_follows_underlying: true,
            allow_empty_composites: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nullable_suffix(mut self, value: impl Into<String>) -> Self {
        self.nullable_suffix = value.into();
        self
    }

    pub fn byte_array_name(mut self, value: impl Into<String>) -> Self {
        self.byte_array_name = value.into();
        self
    }

    pub fn enum_follows_underlying(mut self, value: bool) -> Self {
        self.enum_follows_underlying = value;
        self
    }

    pub fn allow_empty_composites(mut self, value: bool) -> Self {
        self.allow_empty_composites = value;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
