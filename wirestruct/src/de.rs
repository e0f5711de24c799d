//! Deserialization of [`Record`]s.
use {
    crate::{
        error::{invalid_type, size_mismatch, Result},
        io::Reader,
        kind::ScalarType,
        layout::ResolvedField,
        registry::RecordTypeRef,
        value::{Record, Value},
    },
    tracing::trace,
};

/// Deserialize `bytes` into a new record of type `ty`.
///
/// `bytes` must be exactly as long as the record type's resolved size.
/// Signed integer fields produce [`Value::Int`], unsigned ones [`Value::UInt`].
/// A boolean is `true` only if its byte is `1`.
pub fn deserialize(ty: &RecordTypeRef, bytes: &[u8]) -> Result<Record> {
    let size = ty.size()?;
    if bytes.len() != size {
        return Err(size_mismatch(ty.name(), size, bytes.len()));
    }
    let record = read_record(ty, Reader::new(bytes))?;
    trace!(record = ty.name(), size, "deserialized record");
    Ok(record)
}

fn read_record(ty: &RecordTypeRef, reader: Reader) -> Result<Record> {
    let mut record = Record::new(ty);
    for field in ty.fields()? {
        // With duplicate names the later field overwrites the earlier one.
        record.set(field.name(), read_field(field, reader)?);
    }
    Ok(record)
}

fn read_field(field: &ResolvedField, reader: Reader) -> Result<Value> {
    let offset = field.offset();
    let endian = field.endian();
    Ok(match field.ty() {
        ScalarType::I8 => reader.read_i8(offset)?.into(),
        ScalarType::U8 => reader.read_u8(offset)?.into(),
        ScalarType::I16 => reader.read_i16(offset, endian)?.into(),
        ScalarType::U16 => reader.read_u16(offset, endian)?.into(),
        ScalarType::I32 => reader.read_i32(offset, endian)?.into(),
        ScalarType::U32 => reader.read_u32(offset, endian)?.into(),
        ScalarType::I64 => reader.read_i64(offset, endian)?.into(),
        ScalarType::U64 => reader.read_u64(offset, endian)?.into(),
        ScalarType::Bool => Value::Bool(reader.read_u8(offset)? == 1),
        ScalarType::Record => {
            let nested = field
                .nested()
                .ok_or_else(|| invalid_type("Record without a nested record type"))?;
            let sub = reader.sub(offset, field.size())?;
            Value::Record(read_record(nested, sub)?)
        }
    })
}
