//! Bindable values and declared SQL types.
//!
//! [`Value`] is the runtime form of every `?` parameter a builder emits.
//! [`SqlType`] is the declared type of a column, used when a null has to be
//! bound with an explicit target type. [`FromValue`] decodes a fetched column
//! back into a Rust type.

use crate::error::{SqlError, SqlResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Declared SQL type of a column.
///
/// `Null` means "no type known" and binds an untyped null. Backends that
/// reject untyped nulls need the column to be declared with a concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SqlType {
    /// Untyped.
    #[default]
    Null,
    Boolean,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Decimal,
    Char,
    Varchar,
    Text,
    Date,
    Time,
    Timestamp,
    Blob,
    Uuid,
    Json,
}

impl SqlType {
    /// SQL spelling of the type.
    pub fn name(self) -> &'static str {
        match self {
            SqlType::Null => "NULL",
            SqlType::Boolean => "BOOLEAN",
            SqlType::SmallInt => "SMALLINT",
            SqlType::Integer => "INTEGER",
            SqlType::BigInt => "BIGINT",
            SqlType::Real => "REAL",
            SqlType::Double => "DOUBLE",
            SqlType::Decimal => "DECIMAL",
            SqlType::Char => "CHAR",
            SqlType::Varchar => "VARCHAR",
            SqlType::Text => "TEXT",
            SqlType::Date => "DATE",
            SqlType::Time => "TIME",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::Blob => "BLOB",
            SqlType::Uuid => "UUID",
            SqlType::Json => "JSON",
        }
    }

    /// Whether this is the untyped tag.
    pub fn is_untyped(self) -> bool {
        self == SqlType::Null
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A non-null value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Uuid(Uuid),
    Json(serde_json::Value),
}

impl Value {
    /// The SQL type this value naturally binds as.
    pub fn sql_type(&self) -> SqlType {
        match self {
            Value::Bool(_) => SqlType::Boolean,
            Value::Int(_) => SqlType::BigInt,
            Value::Real(_) => SqlType::Double,
            Value::Text(_) => SqlType::Varchar,
            Value::Blob(_) => SqlType::Blob,
            Value::Date(_) => SqlType::Date,
            Value::Time(_) => SqlType::Time,
            Value::Timestamp(_) => SqlType::Timestamp,
            Value::Uuid(_) => SqlType::Uuid,
            Value::Json(_) => SqlType::Json,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::Timestamp(_) => "timestamp",
            Value::Uuid(_) => "uuid",
            Value::Json(_) => "json",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Blob(v) => write!(f, "<{} bytes>", v.len()),
            Value::Date(v) => write!(f, "{}", v.format(DATE_FORMAT)),
            Value::Time(v) => write!(f, "{}", v.format(TIME_FORMAT)),
            Value::Timestamp(v) => write!(f, "{}", v.format(TIMESTAMP_FORMAT)),
            Value::Uuid(v) => write!(f, "{v}"),
            Value::Json(v) => write!(f, "{v}"),
        }
    }
}

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const TIME_FORMAT: &str = "%H:%M:%S%.f";
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

macro_rules! impl_from_for_value {
    ($($ty:ty => $variant:ident $(as $cast:ty)?),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v $(as $cast)?)
                }
            }
        )*
    };
}

impl_from_for_value! {
    bool => Bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int,
    u8 => Int as i64,
    u16 => Int as i64,
    u32 => Int as i64,
    f32 => Real as f64,
    f64 => Real,
    String => Text,
    Vec<u8> => Blob,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => Timestamp,
    Uuid => Uuid,
    serde_json::Value => Json,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

/// Decode a fetched column into a Rust type.
///
/// `None` is SQL `NULL`; only `Option<T>` accepts it.
pub trait FromValue: Sized {
    fn from_value(column: &str, value: Option<Value>) -> SqlResult<Self>;
}

fn mismatch(column: &str, expected: &str, got: &Value) -> SqlError {
    SqlError::decode(column, format!("expected {expected}, got {}", got.kind()))
}

fn require(column: &str, value: Option<Value>) -> SqlResult<Value> {
    value.ok_or_else(|| SqlError::decode(column, "unexpected NULL"))
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(column: &str, value: Option<Value>) -> SqlResult<Self> {
        match value {
            None => Ok(None),
            some => T::from_value(column, some).map(Some),
        }
    }
}

impl FromValue for Value {
    fn from_value(column: &str, value: Option<Value>) -> SqlResult<Self> {
        require(column, value)
    }
}

impl FromValue for String {
    fn from_value(column: &str, value: Option<Value>) -> SqlResult<Self> {
        match require(column, value)? {
            Value::Text(s) => Ok(s),
            other => Err(mismatch(column, "text", &other)),
        }
    }
}

impl FromValue for i64 {
    fn from_value(column: &str, value: Option<Value>) -> SqlResult<Self> {
        match require(column, value)? {
            Value::Int(v) => Ok(v),
            Value::Bool(v) => Ok(v as i64),
            other => Err(mismatch(column, "integer", &other)),
        }
    }
}

macro_rules! impl_from_value_narrow_int {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(column: &str, value: Option<Value>) -> SqlResult<Self> {
                    let wide = i64::from_value(column, value)?;
                    <$ty>::try_from(wide).map_err(|_| {
                        SqlError::decode(column, format!("{wide} out of range for {}", stringify!($ty)))
                    })
                }
            }
        )*
    };
}

impl_from_value_narrow_int!(i8, i16, i32, u8, u16, u32, u64);

impl FromValue for f64 {
    fn from_value(column: &str, value: Option<Value>) -> SqlResult<Self> {
        match require(column, value)? {
            Value::Real(v) => Ok(v),
            Value::Int(v) => Ok(v as f64),
            other => Err(mismatch(column, "real", &other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(column: &str, value: Option<Value>) -> SqlResult<Self> {
        f64::from_value(column, value).map(|v| v as f32)
    }
}

impl FromValue for bool {
    fn from_value(column: &str, value: Option<Value>) -> SqlResult<Self> {
        match require(column, value)? {
            Value::Bool(v) => Ok(v),
            Value::Int(v) => Ok(v != 0),
            other => Err(mismatch(column, "bool", &other)),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(column: &str, value: Option<Value>) -> SqlResult<Self> {
        match require(column, value)? {
            Value::Blob(v) => Ok(v),
            Value::Text(s) => Ok(s.into_bytes()),
            other => Err(mismatch(column, "blob", &other)),
        }
    }
}

// Backends without native temporal types (SQLite) hand these back as text.

impl FromValue for NaiveDate {
    fn from_value(column: &str, value: Option<Value>) -> SqlResult<Self> {
        match require(column, value)? {
            Value::Date(v) => Ok(v),
            Value::Timestamp(v) => Ok(v.date()),
            Value::Text(s) => NaiveDate::parse_from_str(&s, DATE_FORMAT)
                .map_err(|e| SqlError::decode(column, e.to_string())),
            other => Err(mismatch(column, "date", &other)),
        }
    }
}

impl FromValue for NaiveTime {
    fn from_value(column: &str, value: Option<Value>) -> SqlResult<Self> {
        match require(column, value)? {
            Value::Time(v) => Ok(v),
            Value::Text(s) => NaiveTime::parse_from_str(&s, TIME_FORMAT)
                .map_err(|e| SqlError::decode(column, e.to_string())),
            other => Err(mismatch(column, "time", &other)),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(column: &str, value: Option<Value>) -> SqlResult<Self> {
        match require(column, value)? {
            Value::Timestamp(v) => Ok(v),
            Value::Text(s) => NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f"))
                .map_err(|e| SqlError::decode(column, e.to_string())),
            other => Err(mismatch(column, "timestamp", &other)),
        }
    }
}

impl FromValue for Uuid {
    fn from_value(column: &str, value: Option<Value>) -> SqlResult<Self> {
        match require(column, value)? {
            Value::Uuid(v) => Ok(v),
            Value::Text(s) => Uuid::parse_str(&s).map_err(|e| SqlError::decode(column, e.to_string())),
            Value::Blob(b) => Uuid::from_slice(&b).map_err(|e| SqlError::decode(column, e.to_string())),
            other => Err(mismatch(column, "uuid", &other)),
        }
    }
}

impl FromValue for serde_json::Value {
    fn from_value(column: &str, value: Option<Value>) -> SqlResult<Self> {
        match require(column, value)? {
            Value::Json(v) => Ok(v),
            Value::Text(s) => {
                serde_json::from_str(&s).map_err(|e| SqlError::decode(column, e.to_string()))
            }
            other => Err(mismatch(column, "json", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_conversions() {
        assert_eq!(Value::from(7i32), Value::Int(7));
        assert_eq!(Value::from(2.5f64), Value::Real(2.5));
        assert_eq!(Value::from("x"), Value::Text("x".to_string()));
        assert_eq!(Value::from(true).sql_type(), SqlType::Boolean);
    }

    #[test]
    fn decode_null_requires_option() {
        assert_eq!(Option::<i64>::from_value("c", None).unwrap(), None);
        let err = i64::from_value("c", None).unwrap_err();
        assert!(matches!(err, SqlError::Decode { ref column, .. } if column == "c"));
    }

    #[test]
    fn decode_dates_from_text() {
        let d = NaiveDate::from_value("d", Some(Value::Text("2025-01-04".into()))).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 1, 4).unwrap());

        let t = NaiveTime::from_value("t", Some(Value::Text("01:01:05".into()))).unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(1, 1, 5).unwrap());

        let ts =
            NaiveDateTime::from_value("ts", Some(Value::Text("2025-01-06 01:01:06".into()))).unwrap();
        assert_eq!(ts.to_string(), "2025-01-06 01:01:06");
    }

    #[test]
    fn narrow_int_out_of_range() {
        let err = i8::from_value("c", Some(Value::Int(1000))).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn untyped_is_default() {
        assert_eq!(SqlType::default(), SqlType::Null);
        assert!(SqlType::Null.is_untyped());
        assert_eq!(SqlType::Double.to_string(), "DOUBLE");
    }
}
