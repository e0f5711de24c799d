//! The scalar type catalog.
//!
//! Every field of a record has a [`ScalarType`]. All kinds except
//! [`ScalarType::Record`] have a fixed width; a nested record is as wide as
//! the resolved size of the record type it refers to.
use {
    crate::{
        error::{invalid_type, Result},
        value::ValueKind,
    },
    core::str::FromStr,
    strum::{Display, EnumString},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ScalarType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    Bool,
    /// A nested record; see [`FieldDecl::record`](crate::FieldDecl::record).
    Record,
}

impl ScalarType {
    /// Width in bytes, or `None` for [`ScalarType::Record`].
    pub const fn width(self) -> Option<usize> {
        match self {
            ScalarType::I8 | ScalarType::U8 | ScalarType::Bool => Some(1),
            ScalarType::I16 | ScalarType::U16 => Some(2),
            ScalarType::I32 | ScalarType::U32 => Some(4),
            ScalarType::I64 | ScalarType::U64 => Some(8),
            ScalarType::Record => None,
        }
    }

    /// The kind of [`Value`](crate::Value) the serializer accepts for this type.
    pub const fn expected_kind(self) -> ValueKind {
        match self {
            ScalarType::Bool => ValueKind::Boolean,
            ScalarType::Record => ValueKind::Record,
            _ => ValueKind::Integer,
        }
    }

    /// Parse a type name such as `"I32"` or `"u8"`.
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_str(name).map_err(|_| invalid_type(name))
    }
}

/// Byte width of `ty`.
///
/// `nested_size` must be the resolved size of the nested record type when `ty`
/// is [`ScalarType::Record`]; it is ignored otherwise.
pub fn width_of(ty: ScalarType, nested_size: Option<usize>) -> Result<usize> {
    match ty.width() {
        Some(width) => Ok(width),
        None => nested_size.ok_or_else(|| invalid_type("Record without a nested record type")),
    }
}

/// Byte order of a multi-byte field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum Endian {
    #[default]
    Big,
    Little,
}

impl Endian {
    /// Used when neither the record type nor the field picks a byte order.
    pub const DEFAULT: Endian = Endian::Big;

    pub const fn from_little(little_endian: bool) -> Self {
        if little_endian {
            Endian::Little
        } else {
            Endian::Big
        }
    }

    pub const fn is_little(self) -> bool {
        matches!(self, Endian::Little)
    }
}
