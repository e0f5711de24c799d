//! Declares a small little-endian record two ways and dumps its wire format.
use wirestruct::{Record, RecordType, ScalarType, Schema};

#[derive(Record, Debug, PartialEq)]
#[wirestruct(little_endian)]
struct MyStruct {
    field1: i32,
    field2: i32,
}

fn main() -> wirestruct::Result<()> {
    let value = MyStruct {
        field1: 6,
        field2: 9,
    };
    let bytes = value.serialize()?;
    println!("{value:?} -> {bytes:?}");

    for field in MyStruct::record_type().fields()? {
        println!(
            "  {:<8} {:<4} offset {:>2} size {} {}",
            field.name(),
            field.ty(),
            field.offset(),
            field.size(),
            field.endian()
        );
    }

    // The same layout, declared at runtime.
    let ty = RecordType::builder("MyStruct")
        .little_endian()
        .field("field1", ScalarType::I32)
        .field("field2", ScalarType::I32)
        .build();
    let record = ty.deserialize(&bytes)?;
    println!("{record:?}");
    assert_eq!(MyStruct::from_record(record.clone()).ok(), Some(value));

    let round_trip = Record::new(&ty)
        .with("field1", 6i32)
        .with("field2", 9i32)
        .serialize()?;
    assert_eq!(round_trip, bytes);
    Ok(())
}
