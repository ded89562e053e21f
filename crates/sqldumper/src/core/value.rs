//! Column value types and SQL literal coercion.
//!
//! Source readers produce dynamically-typed column values; this module pins
//! them down to a closed sum type so literal rendering is an exhaustive match
//! instead of runtime type sniffing.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::{DumpError, Result};

/// One record's worth of column-name to value data from a source table.
pub type Row = HashMap<String, Value>;

/// Mapping from column name to its SQL-literal text, ready for statement
/// rendering. Transient: exists only while one insert statement is built.
pub type SqlColumnMap = HashMap<String, String>;

/// A single column value as produced by a source reader.
///
/// The set of kinds is closed: anything a reader cannot express with these
/// variants has no text-dump representation and must be rejected before it
/// reaches the output.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,

    /// Boolean value.
    Bool(bool),

    /// 64-bit signed integer.
    Int(i64),

    /// 64-bit floating point.
    Float(f64),

    /// Text/string data, passed through untouched.
    Text(String),

    /// Raw byte sequence (treated as text when rendered).
    Bytes(Vec<u8>),

    /// Timestamp with UTC offset.
    Timestamp(DateTime<Utc>),

    /// Optional wrapper around another value; an absent box reads as NULL.
    Boxed(Option<Box<Value>>),

    /// Composite value (array/nested document). Readers may surface these,
    /// but the text dumper has no literal form for them.
    Array(Vec<Value>),
}

impl Value {
    /// Short kind name, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Timestamp(_) => "timestamp",
            Value::Boxed(_) => "boxed",
            Value::Array(_) => "array",
        }
    }

    /// Check if this value reads as NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null | Value::Boxed(None))
    }

    /// Render this value as SQL literal text.
    ///
    /// Numbers use their exact decimal form, booleans render as
    /// `true`/`false`, NULL (and an absent boxed value) renders as the
    /// literal `NULL`, and strings pass through unchanged — quoting is the
    /// statement builder's concern, not this layer's.
    ///
    /// Fails with [`DumpError::UnsupportedType`] for composite values; the
    /// caller must treat that as fatal for the whole row.
    pub fn to_sql_literal(&self) -> Result<String> {
        match self {
            Value::Null => Ok("NULL".to_string()),
            Value::Bool(v) => Ok(v.to_string()),
            Value::Int(v) => Ok(v.to_string()),
            Value::Float(v) => Ok(v.to_string()),
            Value::Text(v) => Ok(v.clone()),
            // TODO: binary-safe encoding (hex or base64) for BLOB columns
            Value::Bytes(v) => Ok(String::from_utf8_lossy(v).into_owned()),
            Value::Timestamp(v) => Ok(v.to_string()),
            Value::Boxed(None) => Ok("NULL".to_string()),
            Value::Boxed(Some(inner)) => inner.to_sql_literal(),
            Value::Array(_) => Err(DumpError::UnsupportedType {
                type_name: self.kind(),
            }),
        }
    }
}

// From implementations for common types
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        Value::Boxed(v.map(|inner| Box::new(inner.into())))
    }
}

/// Serialize a row into its SQL column map.
///
/// Coerces every cell with [`Value::to_sql_literal`]. The output map carries
/// exactly the input's key set; the first coercion failure aborts the whole
/// row and no partial map is produced.
pub fn serialize_row(row: Row) -> Result<SqlColumnMap> {
    let mut map = SqlColumnMap::with_capacity(row.len());

    for (column, value) in row {
        let literal = value.to_sql_literal()?;
        map.insert(column, literal);
    }

    Ok(map)
}
