//! Serialization of [`Record`]s.
//!
//! Serialization runs in two passes. The first walks the resolved layout,
//! checks every value against its field and produces a write plan. The
//! second allocates the buffer and executes the plan, so a record that fails
//! validation never produces output.
use {
    crate::{
        error::{
            integer_out_of_range, record_type_mismatch, size_mismatch, type_mismatch, Result,
        },
        io::{write_size_limit, WriteResult, Writer},
        kind::{Endian, ScalarType},
        layout::ResolvedField,
        value::{Record, ValueKind},
    },
    std::sync::Arc,
    tracing::trace,
};

/// A checked field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scalar {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    Bool(bool),
}

impl Scalar {
    /// Narrow `val` to the width of `ty`, or `None` if it does not fit.
    fn from_integer(ty: ScalarType, val: i128) -> Option<Self> {
        Some(match ty {
            ScalarType::I8 => Scalar::I8(val.try_into().ok()?),
            ScalarType::U8 => Scalar::U8(val.try_into().ok()?),
            ScalarType::I16 => Scalar::I16(val.try_into().ok()?),
            ScalarType::U16 => Scalar::U16(val.try_into().ok()?),
            ScalarType::I32 => Scalar::I32(val.try_into().ok()?),
            ScalarType::U32 => Scalar::U32(val.try_into().ok()?),
            ScalarType::I64 => Scalar::I64(val.try_into().ok()?),
            ScalarType::U64 => Scalar::U64(val.try_into().ok()?),
            ScalarType::Bool | ScalarType::Record => return None,
        })
    }

    fn write(self, writer: &mut Writer, offset: usize, endian: Endian) -> WriteResult<()> {
        match self {
            Scalar::I8(v) => writer.write_i8(offset, v),
            Scalar::U8(v) => writer.write_u8(offset, v),
            Scalar::I16(v) => writer.write_i16(offset, v, endian),
            Scalar::U16(v) => writer.write_u16(offset, v, endian),
            Scalar::I32(v) => writer.write_i32(offset, v, endian),
            Scalar::U32(v) => writer.write_u32(offset, v, endian),
            Scalar::I64(v) => writer.write_i64(offset, v, endian),
            Scalar::U64(v) => writer.write_u64(offset, v, endian),
            Scalar::Bool(v) => writer.write_u8(offset, u8::from(v)),
        }
    }
}

#[derive(Debug)]
enum Op {
    Scalar {
        offset: usize,
        endian: Endian,
        scalar: Scalar,
    },
    Record {
        offset: usize,
        size: usize,
        ops: Vec<Op>,
    },
}

fn plan(record: &Record) -> Result<Vec<Op>> {
    let layout = record.record_type().layout()?;
    layout
        .fields()
        .iter()
        .map(|field| plan_field(record, field, layout.size()))
        .collect()
}

fn plan_field(record: &Record, field: &ResolvedField, available: usize) -> Result<Op> {
    let name = field.name();
    let expected = field.ty().expected_kind();
    let Some(value) = record.get(name) else {
        return Err(type_mismatch(name, expected, ValueKind::Missing));
    };
    let mismatch = || type_mismatch(name, expected, value.kind());

    // Explicit offsets may point past the end of the buffer.
    let in_bounds = matches!(field.offset().checked_add(field.size()), Some(end) if end <= available);
    if !in_bounds {
        return Err(write_size_limit(field.offset(), field.size(), available).into());
    }

    let scalar = match field.ty() {
        ScalarType::Record => {
            let nested = value.as_record().ok_or_else(mismatch)?;
            if let Some(expected) = field.nested() {
                if !Arc::ptr_eq(expected, nested.record_type()) {
                    return Err(record_type_mismatch(
                        name,
                        expected.name(),
                        nested.record_type().name(),
                    ));
                }
            }
            return Ok(Op::Record {
                offset: field.offset(),
                size: field.size(),
                ops: plan(nested)?,
            });
        }
        ScalarType::Bool => Scalar::Bool(value.as_bool().ok_or_else(mismatch)?),
        ty => {
            let val = value.as_integer().ok_or_else(mismatch)?;
            Scalar::from_integer(ty, val).ok_or_else(|| integer_out_of_range(name, ty, val))?
        }
    };

    Ok(Op::Scalar {
        offset: field.offset(),
        endian: field.endian(),
        scalar,
    })
}

fn execute(writer: &mut Writer, ops: &[Op]) -> WriteResult<()> {
    for op in ops {
        match op {
            Op::Scalar {
                offset,
                endian,
                scalar,
            } => scalar.write(writer, *offset, *endian)?,
            Op::Record { offset, size, ops } => execute(&mut writer.sub(*offset, *size)?, ops)?,
        }
    }
    Ok(())
}

/// Serialize `record` into a new buffer of exactly the record type's size.
///
/// # Errors
///
/// Fails if the layout does not resolve, or if any field value is missing, of
/// the wrong kind, or does not fit the field.
pub fn serialize(record: &Record) -> Result<Vec<u8>> {
    let size = serialized_size(record)?;
    let ops = plan(record)?;
    let mut buf = vec![0; size];
    execute(&mut Writer::new(&mut buf), &ops)?;
    trace!(record = record.record_type().name(), size, "serialized record");
    Ok(buf)
}

/// Serialize `record` into `dst`, which must be exactly the record type's
/// size.
///
/// Bytes not covered by any field are left untouched. `dst` is not modified
/// if an error is returned.
pub fn serialize_into(record: &Record, dst: &mut [u8]) -> Result<()> {
    let size = serialized_size(record)?;
    if dst.len() != size {
        return Err(size_mismatch(record.record_type().name(), size, dst.len()));
    }
    let ops = plan(record)?;
    execute(&mut Writer::new(dst), &ops)?;
    trace!(record = record.record_type().name(), size, "serialized record");
    Ok(())
}

/// The size of `record` once serialized.
pub fn serialized_size(record: &Record) -> Result<usize> {
    record.record_type().size()
}
