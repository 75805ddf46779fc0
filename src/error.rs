use std::{fmt, io, sync::Arc};

use thiserror::Error;

use crate::{de::Token, value::Type};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/**
An error encountered while reading Ion text.

Errors are cheap to clone so a reader can hand one out while keeping its own copy.
*/
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("unexpected {0}")]
    Unexpected(Unexpected),
    #[error("bad escape sequence '\\{0}'")]
    BadEscape(char),
    #[error("invalid literal `{literal}`: {reason}")]
    InvalidLiteral {
        literal: String,
        reason: &'static str,
    },
    #[error("unknown null type `null.{0}`")]
    UnknownNullType(String),
    #[error("unexpected token {0}")]
    UnexpectedToken(Token),
    #[error("cannot step into {0}")]
    StepIn(String),
    #[error("cannot step out of the top level")]
    StepOut,
    #[error("containers are nested deeper than the maximum of {0}")]
    DepthLimit(usize),
    #[error("the reader is not positioned on a value")]
    NoValue,
    #[error("expected {expected} but the current value is {found}")]
    TypeMismatch { expected: &'static str, found: Type },
    #[error("`{literal}` is out of range for {target}")]
    Range {
        literal: String,
        target: &'static str,
    },
    #[error("failed to read input: {0}")]
    Io(#[source] Arc<io::Error>),
}

/**
The broad category of an [`Error`].
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /**
    Malformed text: a bad literal, escape, timestamp field, radix digit or unterminated quote.
    */
    Lexical,
    /**
    The input or caller broke the container structure, like a missing `:` or stepping out of
    the top level.
    */
    Structural,
    /**
    An accessor didn't match the type of the current value.
    */
    TypeMismatch,
    /**
    A narrow integer accessor couldn't fit the value.
    */
    Range,
    /**
    The byte source failed.
    */
    Io,
}

/**
The offending input for an [`Error::Unexpected`].
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unexpected {
    Char(u8),
    Eof,
}

impl fmt::Display for Unexpected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Unexpected::Char(c) => write!(f, "char {:?}", *c as char),
            Unexpected::Eof => f.write_str("EOF"),
        }
    }
}

impl Error {
    #[cold]
    pub(crate) fn unexpected(c: Option<u8>) -> Self {
        Error::Unexpected(match c {
            Some(c) => Unexpected::Char(c),
            None => Unexpected::Eof,
        })
    }

    #[cold]
    pub(crate) fn invalid_literal(literal: impl Into<String>, reason: &'static str) -> Self {
        Error::InvalidLiteral {
            literal: literal.into(),
            reason,
        }
    }

    /**
    The category this error belongs to.
    */
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Unexpected(_)
            | Error::BadEscape(_)
            | Error::InvalidLiteral { .. }
            | Error::UnknownNullType(_) => ErrorKind::Lexical,
            Error::UnexpectedToken(_)
            | Error::StepIn(_)
            | Error::StepOut
            | Error::DepthLimit(_)
            | Error::NoValue => ErrorKind::Structural,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::Range { .. } => ErrorKind::Range,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(Arc::new(err))
    }
}
