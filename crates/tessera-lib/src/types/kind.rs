//! Type kinds and the small enums attached to descriptors.

use super::id::TypeId;

/// Discriminant of a type descriptor.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Kind {
    /// Universal placeholder (`object`).
    Any = 0,
    /// Built-in scalar (`int`, `string`, ...).
    Basic = 1,
    /// Enumeration over a basic underlying type.
    Enum = 2,
    /// Named record with fields (class or struct).
    NamedRecord = 3,
    /// Tuple-like record with positional, optionally named elements.
    AnonymousRecord = 4,
    /// Root interface of an exchangeable family.
    PrimaryInterface = 5,
    /// Extension interface of a family, same object as its primary.
    SecondaryInterface = 6,
    /// Interface that several families may implement.
    AbstractInterface = 7,
    Array = 8,
    List = 9,
    Set = 10,
    Dictionary = 11,
    /// One-of over a fixed set of alternatives.
    Union = 12,
}

impl Kind {
    pub fn is_collection(self) -> bool {
        matches!(self, Self::Array | Self::List | Self::Set | Self::Dictionary)
    }

    /// Kinds with named fields that degrade gracefully on exclusion.
    pub fn is_composite(self) -> bool {
        matches!(self, Self::NamedRecord | Self::PrimaryInterface)
    }

    /// Kinds whose instances can be one of several final types.
    pub fn is_polymorphic(self) -> bool {
        matches!(self, Self::Any | Self::AbstractInterface | Self::Union)
    }

    /// Kinds identified by a declared name rather than by structure.
    pub fn is_named(self) -> bool {
        matches!(
            self,
            Self::Enum
                | Self::NamedRecord
                | Self::PrimaryInterface
                | Self::SecondaryInterface
                | Self::AbstractInterface
        )
    }
}

/// Built-in scalar types.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum BasicType {
    Bool,
    Byte,
    SByte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    Decimal,
    Char,
    String,
    Guid,
    DateTime,
    DateTimeOffset,
    TimeSpan,
}

impl BasicType {
    pub const ALL: [BasicType; 18] = [
        Self::Bool,
        Self::Byte,
        Self::SByte,
        Self::Short,
        Self::UShort,
        Self::Int,
        Self::UInt,
        Self::Long,
        Self::ULong,
        Self::Float,
        Self::Double,
        Self::Decimal,
        Self::Char,
        Self::String,
        Self::Guid,
        Self::DateTime,
        Self::DateTimeOffset,
        Self::TimeSpan,
    ];

    /// Pre-registered id. Slot 0 is `object`; basics follow in declaration order.
    pub const fn type_id(self) -> TypeId {
        TypeId::from_raw((self as u32 + 1) << 1)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::SByte => "sbyte",
            Self::Short => "short",
            Self::UShort => "ushort",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Long => "long",
            Self::ULong => "ulong",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Char => "char",
            Self::String => "string",
            Self::Guid => "guid",
            Self::DateTime => "datetime",
            Self::DateTimeOffset => "datetimeoffset",
            Self::TimeSpan => "timespan",
        }
    }

    /// `string` is the only reference basic.
    pub fn is_value(self) -> bool {
        !matches!(self, Self::String)
    }

    /// Whether this can back an enumeration.
    pub fn is_integral(self) -> bool {
        matches!(
            self,
            Self::Byte
                | Self::SByte
                | Self::Short
                | Self::UShort
                | Self::Int
                | Self::UInt
                | Self::Long
                | Self::ULong
        )
    }
}

pub const TYPE_BOOL: TypeId = BasicType::Bool.type_id();
pub const TYPE_BYTE: TypeId = BasicType::Byte.type_id();
pub const TYPE_INT: TypeId = BasicType::Int.type_id();
pub const TYPE_LONG: TypeId = BasicType::Long.type_id();
pub const TYPE_DOUBLE: TypeId = BasicType::Double.type_id();
pub const TYPE_STRING: TypeId = BasicType::String.type_id();

/// Shape of a collection type: concrete, mutable abstraction, or read-only abstraction.
///
/// `List<T>`, `IList<T>` and `IReadOnlyList<T>` respectively.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum CollectionForm {
    #[default]
    Concrete,
    Abstract,
    ReadOnly,
}

/// Whether a value of a type can be left to its default.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum DefaultValuePolicy {
    /// No default exists; a value must always be provided.
    Disallowed,
    #[default]
    Allowed,
    /// A default exists only once required members are initialized.
    RequiresInit,
}
