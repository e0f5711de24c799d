//! Dynamic record instances.
//!
//! A [`Record`] is a set of named [`Value`]s tied to the
//! [`RecordType`](crate::RecordType) that lays them out. Values are checked
//! against the declared [`ScalarType`](crate::ScalarType) only when the
//! record is serialized.
use {
    crate::{error::Result, registry::RecordTypeRef},
    indexmap::IndexMap,
    std::sync::Arc,
    strum::Display,
};

/// What a [`Value`] holds, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    Integer,
    Boolean,
    Text,
    Record,
    /// No value was set for the field.
    Missing,
}

/// A field value.
///
/// Deserialization produces [`Value::Int`] for signed and [`Value::UInt`] for
/// unsigned integer fields. Serialization accepts either for any integer
/// field as long as the number fits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Bool(bool),
    /// Never valid for any field type.
    Text(String),
    Record(Record),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) | Value::UInt(_) => ValueKind::Integer,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Text(_) => ValueKind::Text,
            Value::Record(_) => ValueKind::Record,
        }
    }

    /// The numeric value of an integer, widened so that every `i64` and `u64`
    /// fits.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Int(v) => Some(i128::from(*v)),
            Value::UInt(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! impl_from {
    ($variant:ident: $($type:ty),*) => {
        $(
            impl From<$type> for Value {
                #[inline]
                fn from(val: $type) -> Self {
                    Value::$variant(val.into())
                }
            }
        )*
    };
}

impl_from!(Int: i8, i16, i32, i64);
impl_from!(UInt: u8, u16, u32, u64);
impl_from!(Bool: bool);
impl_from!(Text: String, &str);
impl_from!(Record: Record);

/// An instance of a record type.
#[derive(Debug, Clone)]
pub struct Record {
    ty: RecordTypeRef,
    values: IndexMap<String, Value>,
}

impl Record {
    pub fn new(ty: &RecordTypeRef) -> Self {
        Self {
            ty: Arc::clone(ty),
            values: IndexMap::new(),
        }
    }

    pub fn record_type(&self) -> &RecordTypeRef {
        &self.ty
    }

    /// Set `name` to `value`, returning the previous value if any.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Builder-style [`Record::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Remove and return the value of `name`.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.values.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in the order they were first set.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Serialize into a new buffer; see [`serialize`](crate::serialize).
    pub fn serialize(&self) -> Result<Vec<u8>> {
        crate::ser::serialize(self)
    }
}

/// Records are equal when they share a record type and hold the same values,
/// regardless of the order in which the values were set.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ty, &other.ty) && self.values == other.values
    }
}

impl Eq for Record {}
