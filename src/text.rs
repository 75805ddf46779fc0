/*!
Lexical rules shared between reading and writing Ion text.

The tokenizer uses the character classes and escape table here to decode text,
and writers use the quoting rules and escape encoding to produce text the tokenizer
can read back.
*/

mod chars;
mod escape;
mod symbol;

pub use chars::*;
pub use escape::*;
pub use symbol::*;
