//! Declared data types of the surface language.
//!
//! The five keywords double as the lexer's data-type keyword set and as
//! the semantic checker's type-match table, so both stages read them from
//! here.

use core::fmt;

use serde::Serialize;

use crate::lexer::TokenKind;

/// A data-type keyword that may open a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataType {
    Int,
    Double,
    Char,
    String,
    Boolean,
}

impl DataType {
    pub const ALL: [DataType; 5] = [
        DataType::Int,
        DataType::Double,
        DataType::Char,
        DataType::String,
        DataType::Boolean,
    ];

    /// Exact, case-sensitive keyword lookup (`String` is capitalized, the
    /// rest are not).
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "int" => Some(DataType::Int),
            "double" => Some(DataType::Double),
            "char" => Some(DataType::Char),
            "String" => Some(DataType::String),
            "boolean" => Some(DataType::Boolean),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Double => "double",
            DataType::Char => "char",
            DataType::String => "String",
            DataType::Boolean => "boolean",
        }
    }

    /// The only literal kind a value of this type may be initialized with.
    ///
    /// There is no widening: `double` accepts `DoubleLiteral` only, and the
    /// lexer never classifies `5` as a double.
    pub fn literal_kind(self) -> TokenKind {
        match self {
            DataType::Int => TokenKind::IntegerLiteral,
            DataType::Double => TokenKind::DoubleLiteral,
            DataType::Char => TokenKind::CharLiteral,
            DataType::String => TokenKind::StringLiteral,
            DataType::Boolean => TokenKind::BooleanLiteral,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
