//! Bound parameters.

use crate::value::{SqlType, Value};
use std::fmt;

/// One positional parameter of a built statement.
///
/// WHERE-clause parameters are always [`Param::Value`]; INSERT/UPDATE columns
/// written without a value become [`Param::Null`] carrying the column's
/// declared type, so the connection can bind a typed null.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Value(Value),
    Null(SqlType),
}

impl Param {
    /// The bound value, or `None` for a null.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Param::Value(v) => Some(v),
            Param::Null(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Param::Null(_))
    }

    /// Declared type for a null, natural type for a value.
    pub fn sql_type(&self) -> SqlType {
        match self {
            Param::Value(v) => v.sql_type(),
            Param::Null(ty) => *ty,
        }
    }
}

impl From<Value> for Param {
    fn from(v: Value) -> Self {
        Param::Value(v)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Value(v) => write!(f, "{v}"),
            Param::Null(SqlType::Null) => f.write_str("NULL"),
            Param::Null(ty) => write!(f, "NULL::{ty}"),
        }
    }
}
