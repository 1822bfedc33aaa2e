//! Well-known primitive types and their keyword aliases.

/// Primitive types the host language spells with a keyword.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialType {
    Object,
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Decimal,
    Single,
    Double,
    String,
    IntPtr,
    UIntPtr,
}

impl SpecialType {
    pub const ALL: &[SpecialType] = &[
        SpecialType::Object,
        SpecialType::Boolean,
        SpecialType::Char,
        SpecialType::SByte,
        SpecialType::Byte,
        SpecialType::Int16,
        SpecialType::UInt16,
        SpecialType::Int32,
        SpecialType::UInt32,
        SpecialType::Int64,
        SpecialType::UInt64,
        SpecialType::Decimal,
        SpecialType::Single,
        SpecialType::Double,
        SpecialType::String,
        SpecialType::IntPtr,
        SpecialType::UIntPtr,
    ];

    /// The keyword alias, e.g. `int` for `System.Int32`.
    pub fn keyword(self) -> &'static str {
        match self {
            SpecialType::Object => "object",
            SpecialType::Boolean => "bool",
            SpecialType::Char => "char",
            SpecialType::SByte => "sbyte",
            SpecialType::Byte => "byte",
            SpecialType::Int16 => "short",
            SpecialType::UInt16 => "ushort",
            SpecialType::Int32 => "int",
            SpecialType::UInt32 => "uint",
            SpecialType::Int64 => "long",
            SpecialType::UInt64 => "ulong",
            SpecialType::Decimal => "decimal",
            SpecialType::Single => "float",
            SpecialType::Double => "double",
            SpecialType::String => "string",
            SpecialType::IntPtr => "nint",
            SpecialType::UIntPtr => "nuint",
        }
    }

    /// The simple metadata name, e.g. `Int32`.
    pub fn metadata_name(self) -> &'static str {
        match self {
            SpecialType::Object => "Object",
            SpecialType::Boolean => "Boolean",
            SpecialType::Char => "Char",
            SpecialType::SByte => "SByte",
            SpecialType::Byte => "Byte",
            SpecialType::Int16 => "Int16",
            SpecialType::UInt16 => "UInt16",
            SpecialType::Int32 => "Int32",
            SpecialType::UInt32 => "UInt32",
            SpecialType::Int64 => "Int64",
            SpecialType::UInt64 => "UInt64",
            SpecialType::Decimal => "Decimal",
            SpecialType::Single => "Single",
            SpecialType::Double => "Double",
            SpecialType::String => "String",
            SpecialType::IntPtr => "IntPtr",
            SpecialType::UIntPtr => "UIntPtr",
        }
    }

    /// Fully qualified name with the `global::` prefix.
    pub fn qualified_name(self) -> String {
        format!("global::System.{}", self.metadata_name())
    }

    pub fn is_value_type(self) -> bool {
        !matches!(self, SpecialType::Object | SpecialType::String)
    }

    /// Parse a keyword (`int`), simple metadata name (`Int32`) or qualified
    /// name (`System.Int32`, `global::System.Int32`).
    pub fn parse(text: &str) -> Option<SpecialType> {
        let text = text.trim();
        let text = text.strip_prefix("global::").unwrap_or(text);
        let simple = text.strip_prefix("System.").unwrap_or(text);
        SpecialType::ALL
            .iter()
            .copied()
            .find(|special| special.keyword() == text || special.metadata_name() == simple)
    }
}
