/*!
# `ion-text`

A pull-based reader for the Ion text notation.

Ion text is a superset of JSON that adds symbols, arbitrary-precision integers and decimals,
timestamps with precision and offsets, `{{ }}` blob and clob literals, s-expressions and
`annotation::` prefixes on any value. This library reads it in a single pass from a byte source
without building a document tree.

There are two layers:

- a [`Tokenizer`] that turns bytes into tokens, only reading a token's payload when asked to,
- and a [`Reader`] that walks the values those tokens describe using an explicit container stack.

```
use ion_text::{Reader, Type};

let mut reader = Reader::from_str("{greeting: hello::\"world\"}");

assert!(reader.next());
assert_eq!(Some(Type::Struct), reader.ty());

reader.step_in()?;

assert!(reader.next());
assert_eq!(Some("greeting"), reader.field_name());
assert_eq!(&["hello".to_owned()], reader.type_annotations());
assert_eq!("world", reader.string_value()?);

reader.step_out()?;
assert!(!reader.next());
# Ok::<(), ion_text::Error>(())
```

## Errors

Lexical and structural errors are unrecoverable. Once one is hit the reader stops producing values
and keeps the error around in [`Reader::err`]. Type mismatches and range errors from the value
accessors don't affect the reader's position.
*/

#![forbid(unsafe_code)]
#![allow(clippy::should_implement_trait, clippy::upper_case_acronyms)]

#[macro_use]
mod macros;

mod std_ext;

mod error;
pub mod de;
pub mod text;
pub mod value;

pub use de::{Options, Reader, Token, Tokenizer};
pub use error::{Error, ErrorKind, Result, Unexpected};
pub use value::{Decimal, Precision, Timestamp, Type};

#[cfg(test)]
mod tests;
