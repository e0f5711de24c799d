//! Error types and helpers.
use {
    crate::{
        io::{ReadError, WriteError},
        kind::ScalarType,
        value::ValueKind,
    },
    thiserror::Error,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid type: {0}")]
    InvalidType(String),
    #[error("Record type `{0}` mixes explicit and implicit offsets; define an offset for all fields, or none")]
    InconsistentOffsets(String),
    #[error("Expected field `{field}` to be of type {expected} but it is {actual}")]
    TypeMismatch {
        field: String,
        expected: ValueKind,
        actual: ValueKind,
    },
    #[error("Expected field `{field}` to be a `{expected}` record but it is a `{actual}` record")]
    RecordTypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },
    #[error("Value {value} of field `{field}` does not fit in {ty}")]
    IntegerOutOfRange {
        field: String,
        ty: ScalarType,
        value: i128,
    },
    #[error("Expected data of byte length {expected} for record type `{record}` (got {actual})")]
    SizeMismatch {
        record: String,
        expected: usize,
        actual: usize,
    },
    #[error("Computing size of record type would overflow usize::MAX")]
    SizeOfOverflow,
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

pub type Result<T> = core::result::Result<T, Error>;

#[cold]
pub fn invalid_type(what: impl Into<String>) -> Error {
    Error::InvalidType(what.into())
}

#[cold]
pub fn inconsistent_offsets(record: &str) -> Error {
    Error::InconsistentOffsets(record.to_owned())
}

#[cold]
pub fn type_mismatch(field: &str, expected: ValueKind, actual: ValueKind) -> Error {
    Error::TypeMismatch {
        field: field.to_owned(),
        expected,
        actual,
    }
}

#[cold]
pub fn record_type_mismatch(field: &str, expected: &str, actual: &str) -> Error {
    Error::RecordTypeMismatch {
        field: field.to_owned(),
        expected: expected.to_owned(),
        actual: actual.to_owned(),
    }
}

#[cold]
pub fn integer_out_of_range(field: &str, ty: ScalarType, value: i128) -> Error {
    Error::IntegerOutOfRange {
        field: field.to_owned(),
        ty,
        value,
    }
}

#[cold]
pub fn size_mismatch(record: &str, expected: usize, actual: usize) -> Error {
    Error::SizeMismatch {
        record: record.to_owned(),
        expected,
        actual,
    }
}

#[cold]
pub const fn size_of_overflow() -> Error {
    Error::SizeOfOverflow
}
