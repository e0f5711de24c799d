//! Typed record schemas.
//!
//! [`Schema`] ties a Rust struct to a static [`RecordType`](crate::RecordType)
//! and converts between the struct and a dynamic [`Record`]. It is normally
//! implemented with `#[derive(Record)]`:
//!
//! ```
//! # #[cfg(feature = "derive")] {
//! use wirestruct::{Record, Schema};
//!
//! #[derive(Record, Debug, PartialEq)]
//! #[wirestruct(little_endian)]
//! struct MyStruct {
//!     field1: i32,
//!     field2: i32,
//! }
//!
//! let value = MyStruct { field1: 1, field2: -2 };
//! let bytes = value.serialize().unwrap();
//! assert_eq!(bytes, [1, 0, 0, 0, 254, 255, 255, 255]);
//! assert_eq!(MyStruct::deserialize(&bytes).unwrap(), value);
//! assert_eq!(MyStruct::size().unwrap(), 8);
//! # }
//! ```
use crate::{
    error::{integer_out_of_range, type_mismatch, Result},
    kind::ScalarType,
    registry::{FieldDecl, RecordTypeRef},
    value::{Record, Value, ValueKind},
};

/// Types that can be stored in a record field.
pub trait Field: Sized {
    /// Declare a field of this type named `name`.
    fn declare(name: &str) -> FieldDecl;

    fn to_value(&self) -> Value;

    /// Convert the value of field `name` back. `None` means the value was
    /// missing.
    fn from_value(name: &str, value: Option<Value>) -> Result<Self>;
}

/// Rust types with a static record layout.
pub trait Schema: Sized {
    /// The record type, built once on first use.
    fn record_type() -> &'static RecordTypeRef;

    fn to_record(&self) -> Record;

    fn from_record(record: Record) -> Result<Self>;

    /// Serialize into a new buffer.
    fn serialize(&self) -> Result<Vec<u8>> {
        crate::ser::serialize(&self.to_record())
    }

    /// Deserialize from a buffer of exactly [`Schema::size`] bytes.
    fn deserialize(bytes: &[u8]) -> Result<Self> {
        Self::from_record(crate::de::deserialize(Self::record_type(), bytes)?)
    }

    /// Total size in bytes of the wire format.
    fn size() -> Result<usize> {
        Self::record_type().size()
    }
}

/// Convert a value holding a nested record of schema `T`.
///
/// Used by the [`Field`] impls the derive macro generates for record structs.
pub fn nested_from_value<T: Schema>(name: &str, value: Option<Value>) -> Result<T> {
    match value {
        Some(Value::Record(record)) => T::from_record(record),
        other => Err(type_mismatch(
            name,
            ValueKind::Record,
            other.as_ref().map_or(ValueKind::Missing, Value::kind),
        )),
    }
}

macro_rules! impl_int {
    ($type:ty => $kind:ident) => {
        impl Field for $type {
            #[inline]
            fn declare(name: &str) -> FieldDecl {
                FieldDecl::new(name, ScalarType::$kind)
            }

            #[inline]
            fn to_value(&self) -> Value {
                Value::from(*self)
            }

            fn from_value(name: &str, value: Option<Value>) -> Result<Self> {
                let value = value.ok_or_else(|| {
                    type_mismatch(name, ValueKind::Integer, ValueKind::Missing)
                })?;
                let val = value
                    .as_integer()
                    .ok_or_else(|| type_mismatch(name, ValueKind::Integer, value.kind()))?;
                <$type>::try_from(val)
                    .map_err(|_| integer_out_of_range(name, ScalarType::$kind, val))
            }
        }
    };
}

impl_int!(i8 => I8);
impl_int!(u8 => U8);
impl_int!(i16 => I16);
impl_int!(u16 => U16);
impl_int!(i32 => I32);
impl_int!(u32 => U32);
impl_int!(i64 => I64);
impl_int!(u64 => U64);

impl Field for bool {
    #[inline]
    fn declare(name: &str) -> FieldDecl {
        FieldDecl::new(name, ScalarType::Bool)
    }

    #[inline]
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(name: &str, value: Option<Value>) -> Result<Self> {
        match value {
            Some(Value::Bool(val)) => Ok(val),
            other => Err(type_mismatch(
                name,
                ValueKind::Boolean,
                other.as_ref().map_or(ValueKind::Missing, Value::kind),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::Error};

    #[test]
    fn int_from_value() {
        assert_eq!(u8::from_value("x", Some(Value::UInt(200))).unwrap(), 200);
        assert_eq!(i16::from_value("x", Some(Value::Int(-3))).unwrap(), -3);
        assert_eq!(u64::from_value("x", Some(Value::UInt(u64::MAX))).unwrap(), u64::MAX);
        assert!(matches!(
            i8::from_value("x", Some(Value::UInt(200))),
            Err(Error::IntegerOutOfRange { ty: ScalarType::I8, value: 200, .. })
        ));
        assert!(matches!(
            u32::from_value("x", None),
            Err(Error::TypeMismatch { actual: ValueKind::Missing, .. })
        ));
        assert!(matches!(
            i64::from_value("x", Some(Value::Bool(true))),
            Err(Error::TypeMismatch { expected: ValueKind::Integer, actual: ValueKind::Boolean, .. })
        ));
    }

    #[test]
    fn bool_from_value() {
        assert!(bool::from_value("flag", Some(Value::Bool(true))).unwrap());
        assert!(matches!(
            bool::from_value("flag", Some(Value::UInt(1))),
            Err(Error::TypeMismatch { field, actual: ValueKind::Integer, .. }) if field == "flag"
        ));
    }

    #[test]
    fn declarations() {
        assert_eq!(u16::declare("a").ty(), ScalarType::U16);
        assert_eq!(i64::declare("b").ty(), ScalarType::I64);
        assert_eq!(bool::declare("c").ty(), ScalarType::Bool);
        assert_eq!(bool::declare("c").name(), "c");
    }
}
