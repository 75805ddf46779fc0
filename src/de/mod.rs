/*!
Reading Ion text.

Input flows through three layers:

- a [`Source`] that hands out bytes one at a time,
- a [`Tokenizer`] that turns those bytes into tokens with a bounded amount of pushback,
- and a [`Reader`] that walks the values described by those tokens.

Nothing here is recursive. Containers are tracked with explicit stacks, both when they're
stepped into by the reader and when they're skipped by the tokenizer. That means deeply
nested input can be skipped without risking the call stack, and the depth of containers
that are stepped into is limited by [`Options::max_depth`].

Payloads are read lazily. A value that's never asked for is still checked as it's skipped,
so malformed input fails the same way whether it's read or not.
*/

mod cursor;
mod reader;
mod source;
mod token;
mod tokenizer;

#[cfg(any(test, feature = "serde_json"))]
mod json;

pub use self::{
    reader::{Options, Reader},
    source::{ReadSource, SliceSource, Source},
    token::{Sign, Token},
    tokenizer::{Lob, Tokenizer},
};
