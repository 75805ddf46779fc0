use crate::{de::Source, Reader, Type};

mod text;
mod valid;

/**
Move to the next value, which must be of the given type.
*/
fn next(reader: &mut Reader<impl Source>, ty: Type) {
    assert!(reader.next(), "next returned false: {:?}", reader.err());
    assert_eq!(Some(ty), reader.ty());
}

fn symbol(reader: &mut Reader<impl Source>, expected: &str) {
    next(reader, Type::Symbol);
    assert_eq!(expected, reader.string_value().unwrap());
}

/**
Check there are no more values, and that's not because of an error.
*/
fn end(reader: &mut Reader<impl Source>) {
    assert!(!reader.next(), "next returned true");
    assert!(reader.err().is_none(), "{:?}", reader.err());
}

/**
Read every top-level value as JSON.
*/
fn to_json(input: &str) -> crate::Result<Vec<serde_json::Value>> {
    let mut reader = Reader::from_str(input);
    let mut values = Vec::new();

    while reader.next() {
        values.push(reader.to_json_value()?);
    }

    match reader.err() {
        Some(err) => Err(err.clone()),
        None => Ok(values),
    }
}
