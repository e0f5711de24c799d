use {
    proptest::prelude::*,
    wirestruct::{Endian, Error, Field, Record, RecordType, ScalarType, Schema, Value, ValueKind},
};

#[derive(Record, Debug, Clone, PartialEq, Eq)]
struct NestedLayout {
    i32: i32,
    u32: u32,
}

#[derive(Record, Debug, Clone, PartialEq, Eq)]
struct Layout {
    u8: u8,
    i8: i8,
    u16: u16,
    i16: i16,
    u32: u32,
    i32: i32,
    u64: u64,
    i64: i64,
    nested: NestedLayout,
    bool: bool,
}

#[test]
fn layout_wire_format() {
    let value = Layout {
        u8: 0xFF,
        i8: 0x7F,
        u16: 0xFFFF,
        i16: 0x7FFF,
        u32: 0xFFFF_FFFF,
        i32: 0x7FFF_FFFF,
        u64: u64::MAX,
        i64: i64::MAX,
        nested: NestedLayout { i32: 6, u32: 9 },
        bool: true,
    };

    #[rustfmt::skip]
    let expected: [u8; 39] = [
        255, 127, 255, 255, 127, 255, 255, 255, 255,
        255, 127, 255, 255, 255, 255, 255, 255, 255,
        255, 255, 255, 255, 127, 255, 255, 255, 255,
        255, 255, 255,   0,   0,   0,   6,   0,   0,
          0,   9,   1,
    ];

    let bytes = value.serialize().unwrap();
    assert_eq!(bytes, expected);
    assert_eq!(Layout::size().unwrap(), 39);
    assert_eq!(Layout::deserialize(&bytes).unwrap(), value);
}

#[test]
fn record_type_is_static() {
    let ty = Layout::record_type();
    assert!(std::ptr::eq(ty, Layout::record_type()));
    assert_eq!(ty.name(), "Layout");

    let names: Vec<_> = ty.fields().unwrap().iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        ["u8", "i8", "u16", "i16", "u32", "i32", "u64", "i64", "nested", "bool"]
    );

    let nested = ty.layout().unwrap().field("nested").unwrap();
    assert_eq!(nested.ty(), ScalarType::Record);
    assert_eq!((nested.offset(), nested.size()), (30, 8));
    assert!(std::sync::Arc::ptr_eq(
        nested.nested().unwrap(),
        NestedLayout::record_type()
    ));
}

#[derive(Record, Debug, PartialEq, Eq)]
#[wirestruct(little_endian)]
struct MyStruct {
    field1: i32,
    field2: i32,
}

#[test]
fn record_level_endianness() {
    let value = MyStruct {
        field1: 0x0102_0304,
        field2: -1,
    };
    assert_eq!(
        value.serialize().unwrap(),
        [4, 3, 2, 1, 0xFF, 0xFF, 0xFF, 0xFF]
    );
    assert_eq!(MyStruct::record_type().endian(), Some(Endian::Little));
}

#[derive(Record, Debug, PartialEq, Eq)]
#[wirestruct(name = "Header")]
struct FileHeader {
    #[wirestruct(offset = 4)]
    version: u16,
    #[wirestruct(offset = 0, little_endian)]
    magic: u32,
    #[wirestruct(offset = 6, rename = "compressed")]
    is_compressed: bool,
    #[wirestruct(offset = 7)]
    r#type: u8,
}

#[test]
fn explicit_offsets_and_attributes() {
    let ty = FileHeader::record_type();
    assert_eq!(ty.name(), "Header");
    assert!(ty.layout().unwrap().field("compressed").is_some());
    assert!(ty.layout().unwrap().field("type").is_some());

    let value = FileHeader {
        version: 0x0203,
        magic: 0x4D42_5346,
        is_compressed: true,
        r#type: 9,
    };
    let bytes = value.serialize().unwrap();
    assert_eq!(bytes, [0x46, 0x53, 0x42, 0x4D, 0x02, 0x03, 1, 9]);
    assert_eq!(FileHeader::deserialize(&bytes).unwrap(), value);
}

#[derive(Record, Debug, PartialEq, Eq)]
struct Sparse {
    #[wirestruct(offset = 0)]
    a: u8,
    #[wirestruct(offset = 4)]
    b: u8,
}

#[test]
fn explicit_offsets_keep_sum_size() {
    // Total size is the sum of field sizes even though `b` ends at 5.
    assert_eq!(Sparse::size().unwrap(), 2);
    assert!(matches!(
        Sparse { a: 1, b: 2 }.serialize(),
        Err(Error::Write(_))
    ));
    assert!(matches!(Sparse::deserialize(&[0, 0]), Err(Error::Read(_))));
}

#[derive(Record, Debug, PartialEq, Eq)]
struct Mixed {
    #[wirestruct(offset = 0)]
    a: u8,
    b: u8,
}

#[test]
fn mixed_offsets_are_rejected() {
    assert!(matches!(
        Mixed::size(),
        Err(Error::InconsistentOffsets(name)) if name == "Mixed"
    ));
}

#[test]
fn size_mismatch() {
    assert!(matches!(
        NestedLayout::deserialize(&[0; 7]),
        Err(Error::SizeMismatch { expected: 8, actual: 7, .. })
    ));
}

#[test]
fn dynamic_records_interoperate() {
    let ty = NestedLayout::record_type();
    let record = Record::new(ty).with("i32", -6i32).with("u32", 9u32);
    let bytes = record.serialize().unwrap();
    let typed = NestedLayout::deserialize(&bytes).unwrap();
    assert_eq!(typed, NestedLayout { i32: -6, u32: 9 });
    assert_eq!(typed.to_record(), record);

    // Text where an integer is expected.
    let record = Record::new(ty).with("i32", "six").with("u32", 9u32);
    assert!(matches!(
        record.serialize(),
        Err(Error::TypeMismatch { field, expected: ValueKind::Integer, actual: ValueKind::Text })
            if field == "i32"
    ));
}

#[test]
fn nested_field_from_value() {
    assert!(matches!(
        NestedLayout::from_value("nested", Some(Value::Bool(true))),
        Err(Error::TypeMismatch { expected: ValueKind::Record, actual: ValueKind::Boolean, .. })
    ));
    assert!(matches!(
        NestedLayout::from_value("nested", None),
        Err(Error::TypeMismatch { actual: ValueKind::Missing, .. })
    ));
}

#[test]
fn typed_and_dynamic_declarations_agree() {
    let manual = RecordType::builder("NestedLayout")
        .field("i32", ScalarType::I32)
        .field("u32", ScalarType::U32)
        .build();
    let value = NestedLayout { i32: 1, u32: 2 };
    let manual_record = Record::new(&manual).with("i32", 1i32).with("u32", 2u32);
    assert_eq!(value.serialize().unwrap(), manual_record.serialize().unwrap());
}

fn strat_layout() -> impl Strategy<Value = Layout> {
    (
        any::<(u8, i8, u16, i16, u32, i32)>(),
        any::<(u64, i64, i32, u32, bool)>(),
    )
        .prop_map(|((u8, i8, u16, i16, u32, i32), (u64, i64, ni32, nu32, bool))| Layout {
            u8,
            i8,
            u16,
            i16,
            u32,
            i32,
            u64,
            i64,
            nested: NestedLayout {
                i32: ni32,
                u32: nu32,
            },
            bool,
        })
}

proptest! {
    #[test]
    fn layout_round_trip(value in strat_layout()) {
        let bytes = value.serialize().unwrap();
        prop_assert_eq!(bytes.len(), 39);
        prop_assert_eq!(&bytes[..1], &[value.u8]);
        prop_assert_eq!(&bytes[22..30], &value.i64.to_be_bytes());
        prop_assert_eq!(Layout::deserialize(&bytes).unwrap(), value);
    }
}
