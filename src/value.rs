/*!
The kinds of values in an Ion text document, and the scalar types that don't have
a natural equivalent in the standard library.
*/

use std::fmt;

mod decimal;
mod timestamp;

pub use decimal::*;
pub use timestamp::*;

/**
The type of a value.

A `null.<type>` value has that type, a bare `null` has the type [`Type::Null`].
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Null,
    Bool,
    Int,
    Float,
    Decimal,
    Timestamp,
    Symbol,
    String,
    Clob,
    Blob,
    List,
    Sexp,
    Struct,
}

impl Type {
    /**
    The type named by a typed null like `null.struct`.
    */
    pub fn from_null_name(name: &str) -> Option<Self> {
        Some(match name {
            "null" => Type::Null,
            "bool" => Type::Bool,
            "int" => Type::Int,
            "float" => Type::Float,
            "decimal" => Type::Decimal,
            "timestamp" => Type::Timestamp,
            "symbol" => Type::Symbol,
            "string" => Type::String,
            "clob" => Type::Clob,
            "blob" => Type::Blob,
            "list" => Type::List,
            "sexp" => Type::Sexp,
            "struct" => Type::Struct,
            _ => return None,
        })
    }

    /**
    Whether values of this type can be stepped into.
    */
    pub fn is_container(&self) -> bool {
        matches!(self, Type::List | Type::Sexp | Type::Struct)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Type::Null => "null",
            Type::Bool => "bool",
            Type::Int => "int",
            Type::Float => "float",
            Type::Decimal => "decimal",
            Type::Timestamp => "timestamp",
            Type::Symbol => "symbol",
            Type::String => "string",
            Type::Clob => "clob",
            Type::Blob => "blob",
            Type::List => "list",
            Type::Sexp => "sexp",
            Type::Struct => "struct",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
