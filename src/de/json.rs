/*!
Converting values to `serde_json`.

The conversion is lossy. JSON can't carry annotations, symbols, timestamps, lobs,
arbitrary precision numbers or non-finite floats, so they're mapped onto the closest
thing it does have.
*/

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Number, Value};

use super::{Reader, Source};

use crate::{
    error::{Error, Result},
    value::Type,
};

impl<S: Source> Reader<S> {
    /**
    Convert the current value, and anything inside it, into a JSON value.

    - Annotations are dropped.
    - Symbols and timestamps become strings.
    - Blobs become base64 strings and clobs become (lossy) UTF8 strings.
    - Ints that don't fit in an `i64` become strings.
    - Decimals become floats, and non-finite floats become `null`.

    Containers are stepped into and back out of, so afterwards the next call to
    [`Reader::next`] moves to the value following this one.
    */
    pub fn to_json_value(&mut self) -> Result<Value> {
        let ty = self.ty().ok_or(Error::NoValue)?;

        if self.is_null() {
            return Ok(Value::Null);
        }

        Ok(match ty {
            Type::Null => Value::Null,
            Type::Bool => Value::Bool(self.bool_value()?),
            Type::Int => match self.int64_value() {
                Ok(i) => Value::from(i),
                Err(_) => Value::String(self.big_int_value()?.to_string()),
            },
            Type::Float => float(self.float_value()?),
            Type::Decimal => float(self.decimal_value()?.to_f64()),
            Type::Timestamp => Value::String(self.timestamp_value()?.to_string()),
            Type::Symbol | Type::String => Value::String(self.string_value()?.to_owned()),
            Type::Clob => Value::String(String::from_utf8_lossy(self.byte_value()?).into_owned()),
            Type::Blob => Value::String(STANDARD.encode(self.byte_value()?)),
            Type::List | Type::Sexp => {
                let mut values = Vec::new();

                self.step_in()?;
                while self.next() {
                    values.push(self.to_json_value()?);
                }
                self.step_out()?;

                Value::Array(values)
            }
            Type::Struct => {
                let mut map = Map::new();

                self.step_in()?;
                while self.next() {
                    let name = self.field_name().unwrap_or_default().to_owned();
                    let value = self.to_json_value()?;

                    map.insert(name, value);
                }
                self.step_out()?;

                Value::Object(map)
            }
        })
    }
}

#[inline]
fn float(f: f64) -> Value {
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}
