/*!
This module has some "standard" extensions used by the tokenizer.

These extensions follow the same layout as Rust's standard library.
*/

pub(crate) mod char;
