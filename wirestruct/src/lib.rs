//! wirestruct describes fixed-layout binary records and converts them to and from
//! byte buffers that match the layout exactly, much like a C struct with explicit
//! offset and byte order control.
//!
//! # Quickstart
//!
//! Declare a record type by registering its fields in order. Each field is a
//! [`ScalarType`] or a nested record type, and may carry an explicit offset and
//! a byte order.
//!
//! ```
//! use wirestruct::{Record, RecordType, ScalarType};
//!
//! let header = RecordType::builder("Header")
//!     .field("magic", ScalarType::U16)
//!     .field("len", ScalarType::U32)
//!     .field("compressed", ScalarType::Bool)
//!     .build();
//!
//! let record = Record::new(&header)
//!     .with("magic", 0xBEEFu16)
//!     .with("len", 16u32)
//!     .with("compressed", false);
//!
//! let bytes = record.serialize().unwrap();
//! assert_eq!(bytes, [0xBE, 0xEF, 0, 0, 0, 16, 0]);
//! assert_eq!(header.deserialize(&bytes).unwrap(), record);
//! ```
//!
//! Plain Rust structs can get a static record type with `#[derive(Record)]`;
//! see [`Schema`].
//!
//! # Layout rules
//!
//! - Without explicit offsets fields are packed in registration order with no
//!   padding.
//! - Either every field of a record type has an explicit offset or none does.
//! - The size of a record type is the sum of its field sizes, with or without
//!   explicit offsets.
//! - Multi-byte fields use the record type's byte order if set, else the
//!   field's, else big endian.
//! - A boolean is one byte: `1` is true, anything else is false.
//!
//! Layouts are resolved on first use and cached for the lifetime of the
//! [`RecordType`].
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod error;
pub use error::{Error, Result};
pub mod io;
mod kind;
pub use kind::*;
mod layout;
pub use layout::{Layout, ResolvedField};
mod registry;
pub use registry::{FieldDecl, RecordType, RecordTypeBuilder, RecordTypeRef};
mod value;
pub use value::{Record, Value, ValueKind};
mod ser;
pub use ser::{serialize, serialize_into, serialized_size};
mod de;
pub use de::deserialize;
mod schema;
pub use schema::{Field, Schema};
#[cfg(test)]
mod proptest_config;

#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    pub use once_cell::sync::Lazy;
    #[doc(hidden)]
    pub use crate::schema::nested_from_value;
}

#[cfg(feature = "derive")]
pub use wirestruct_derive::*;
