//! Layout resolution.
//!
//! Turns the declarations of a [`RecordType`] into concrete offsets, sizes and
//! byte orders.
//!
//! With implicit offsets fields are packed in registration order without
//! padding. With explicit offsets each field sits where it was declared, but
//! the total size is still the sum of the field sizes, not the end of the
//! furthest field:
//!
//! ```
//! use wirestruct::{FieldDecl, RecordType, ScalarType};
//!
//! let ty = RecordType::builder("Sparse")
//!     .register(FieldDecl::new("a", ScalarType::U8).at(0))
//!     .register(FieldDecl::new("b", ScalarType::U8).at(8))
//!     .build();
//! assert_eq!(ty.size().unwrap(), 2);
//! ```
use {
    crate::{
        error::{inconsistent_offsets, size_of_overflow, Result},
        kind::{width_of, Endian, ScalarType},
        registry::{RecordType, RecordTypeRef},
    },
    tracing::debug,
};

/// A field with its final position in the record buffer.
#[derive(Debug, Clone)]
pub struct ResolvedField {
    pub(crate) name: String,
    pub(crate) ty: ScalarType,
    pub(crate) offset: usize,
    pub(crate) size: usize,
    pub(crate) nested: Option<RecordTypeRef>,
    pub(crate) endian: Endian,
}

impl ResolvedField {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> ScalarType {
        self.ty
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// One past the last byte of the field.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.size)
    }

    pub fn nested(&self) -> Option<&RecordTypeRef> {
        self.nested.as_ref()
    }

    /// The effective byte order.
    pub fn endian(&self) -> Endian {
        self.endian
    }
}

/// The resolved layout of a record type.
#[derive(Debug, Clone)]
pub struct Layout {
    size: usize,
    fields: Vec<ResolvedField>,
}

impl Layout {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn fields(&self) -> &[ResolvedField] {
        &self.fields
    }

    /// Look up a field by name. With duplicate names the last one wins.
    pub fn field(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.iter().rev().find(|field| field.name == name)
    }
}

pub(crate) fn resolve(ty: &RecordType) -> Result<Layout> {
    let decls = ty.declarations();

    let explicit = decls.iter().filter(|decl| decl.offset.is_some()).count();
    if explicit != 0 && explicit != decls.len() {
        return Err(inconsistent_offsets(ty.name()));
    }

    let mut offset = 0usize;
    let mut fields = Vec::with_capacity(decls.len());
    for decl in decls {
        let nested_size = match &decl.nested {
            Some(nested) => Some(nested.size()?),
            None => None,
        };
        let size = width_of(decl.ty, nested_size)?;

        fields.push(ResolvedField {
            name: decl.name.clone(),
            ty: decl.ty,
            offset: decl.offset.unwrap_or(offset),
            size,
            nested: decl.nested.clone(),
            endian: ty.endian().or(decl.endian).unwrap_or(Endian::DEFAULT),
        });
        // Explicit offsets still advance the running total.
        offset = offset.checked_add(size).ok_or_else(size_of_overflow)?;
    }

    debug!(
        record = ty.name(),
        fields = fields.len(),
        size = offset,
        "resolved record layout"
    );

    Ok(Layout {
        size: offset,
        fields,
    })
}
