//! Field registration.
//!
//! Record types are declared with a [`RecordTypeBuilder`]: fields are
//! registered in order, then [`RecordTypeBuilder::build`] freezes them into a
//! shared [`RecordType`]. The layout is resolved on first use and cached.
//!
//! ```
//! use wirestruct::{Endian, FieldDecl, Record, RecordType, ScalarType};
//!
//! let point = RecordType::builder("Point")
//!     .with_endian(Endian::Little)
//!     .field("x", ScalarType::I32)
//!     .field("y", ScalarType::I32)
//!     .build();
//!
//! let line = RecordType::builder("Line")
//!     .nested("from", &point)
//!     .nested("to", &point)
//!     .register(FieldDecl::new("visible", ScalarType::Bool))
//!     .build();
//!
//! assert_eq!(point.size().unwrap(), 8);
//! assert_eq!(line.size().unwrap(), 17);
//!
//! let from = Record::new(&point).with("x", 1i32).with("y", -1i32);
//! let to = Record::new(&point).with("x", 3i32).with("y", 4i32);
//! let value = Record::new(&line)
//!     .with("from", from)
//!     .with("to", to)
//!     .with("visible", true);
//!
//! let bytes = value.serialize().unwrap();
//! assert_eq!(&bytes[..8], &[1, 0, 0, 0, 255, 255, 255, 255]);
//! assert_eq!(line.deserialize(&bytes).unwrap(), value);
//! ```
use {
    crate::{
        error::Result,
        kind::{Endian, ScalarType},
        layout::{self, Layout, ResolvedField},
        value::Record,
    },
    once_cell::sync::OnceCell,
    std::{fmt, sync::Arc},
};

/// Shared handle to a [`RecordType`].
pub type RecordTypeRef = Arc<RecordType>;

/// A field as declared, before its offset and size are resolved.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub(crate) name: String,
    pub(crate) ty: ScalarType,
    pub(crate) offset: Option<usize>,
    pub(crate) nested: Option<RecordTypeRef>,
    pub(crate) endian: Option<Endian>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: ScalarType) -> Self {
        Self {
            name: name.into(),
            ty,
            offset: None,
            nested: None,
            endian: None,
        }
    }

    /// A field holding a nested record of type `nested`.
    pub fn record(name: impl Into<String>, nested: &RecordTypeRef) -> Self {
        Self {
            nested: Some(Arc::clone(nested)),
            ..Self::new(name, ScalarType::Record)
        }
    }

    /// Place the field at an explicit byte offset.
    ///
    /// Either every field of a record type has an explicit offset or none
    /// does.
    pub fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Byte order for this field, unless the record type sets one.
    pub fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = Some(endian);
        self
    }

    pub fn little_endian(self) -> Self {
        self.with_endian(Endian::Little)
    }

    pub fn big_endian(self) -> Self {
        self.with_endian(Endian::Big)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> ScalarType {
        self.ty
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn nested(&self) -> Option<&RecordTypeRef> {
        self.nested.as_ref()
    }

    pub fn endian(&self) -> Option<Endian> {
        self.endian
    }
}

/// Accumulates field declarations for a new [`RecordType`].
#[derive(Debug, Clone)]
#[must_use]
pub struct RecordTypeBuilder {
    name: String,
    endian: Option<Endian>,
    fields: Vec<FieldDecl>,
}

impl RecordTypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endian: None,
            fields: Vec::new(),
        }
    }

    /// Byte order for every field of the record type, overriding per-field
    /// settings.
    pub fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = Some(endian);
        self
    }

    pub fn little_endian(self) -> Self {
        self.with_endian(Endian::Little)
    }

    /// Append a field. Registration order is layout order. Duplicate names are
    /// accepted.
    pub fn register(mut self, decl: FieldDecl) -> Self {
        self.fields.push(decl);
        self
    }

    pub fn field(self, name: impl Into<String>, ty: ScalarType) -> Self {
        self.register(FieldDecl::new(name, ty))
    }

    pub fn nested(self, name: impl Into<String>, nested: &RecordTypeRef) -> Self {
        self.register(FieldDecl::record(name, nested))
    }

    /// Freeze the declarations. The layout is resolved lazily.
    pub fn build(self) -> RecordTypeRef {
        Arc::new(RecordType {
            name: self.name,
            endian: self.endian,
            fields: self.fields,
            layout: OnceCell::new(),
        })
    }

    /// Freeze the declarations and resolve the layout right away.
    pub fn build_resolved(self) -> Result<RecordTypeRef> {
        let ty = self.build();
        ty.layout()?;
        Ok(ty)
    }
}

/// A declared record layout.
pub struct RecordType {
    name: String,
    endian: Option<Endian>,
    fields: Vec<FieldDecl>,
    layout: OnceCell<Layout>,
}

impl RecordType {
    pub fn builder(name: impl Into<String>) -> RecordTypeBuilder {
        RecordTypeBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The record-type-level byte order, if set.
    pub fn endian(&self) -> Option<Endian> {
        self.endian
    }

    /// Field declarations in registration order.
    pub fn declarations(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    /// The resolved layout, computed on first call.
    ///
    /// A failed resolution is not cached; it fails the same way on every call.
    pub fn layout(&self) -> Result<&Layout> {
        self.layout.get_or_try_init(|| layout::resolve(self))
    }

    /// Total size in bytes of the record's wire format.
    pub fn size(&self) -> Result<usize> {
        Ok(self.layout()?.size())
    }

    /// Resolved fields in registration order.
    pub fn fields(&self) -> Result<&[ResolvedField]> {
        Ok(self.layout()?.fields())
    }

    /// Deserialize `bytes` into a new record of this type; see
    /// [`deserialize`](crate::deserialize).
    pub fn deserialize(self: &Arc<Self>, bytes: &[u8]) -> Result<Record> {
        crate::de::deserialize(self, bytes)
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Nested types print by name only.
        f.debug_struct("RecordType")
            .field("name", &self.name)
            .field("endian", &self.endian)
            .field(
                "fields",
                &self
                    .fields
                    .iter()
                    .map(|decl| (&decl.name, decl.ty))
                    .collect::<Vec<_>>(),
            )
            .field("resolved", &self.layout.get().is_some())
            .finish()
    }
}
