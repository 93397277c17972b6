//! Resolved types as computed by the upstream type checker

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PrintError;

/// The type a declaration resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    /// `int`
    Int,
    /// `string`
    String,
    /// No value
    Void,
    /// Not resolved yet
    #[default]
    Undefined,
}

impl Type {
    /// Whether the type has a name that can appear in source text.
    pub fn is_printable(self) -> bool {
        matches!(self, Type::Int | Type::String)
    }

    /// The source-level name of the type.
    ///
    /// `Void` and `Undefined` have no source form; asking for one means the
    /// tree reached the printer before type resolution finished.
    pub fn display_name(self) -> Result<&'static str, PrintError> {
        match self {
            Type::Int => Ok("int"),
            Type::String => Ok("string"),
            Type::Void | Type::Undefined => Err(PrintError::InternalType { ty: self }),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => f.write_str("int"),
            Type::String => f.write_str("string"),
            Type::Void => f.write_str("void"),
            Type::Undefined => f.write_str("undefined"),
        }
    }
}
