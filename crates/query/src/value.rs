//! Typed, nullable column values
//!
//! The same representation carries decoded cells out of a row and bind
//! parameters into a statement, so NULLs are always typed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::{Query, QueryScalar};

use crate::metadata::ColumnType;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    BigInt(Option<i64>),
    Int(Option<i32>),
    Decimal(Option<Decimal>),
    Timestamp(Option<DateTime<Utc>>),
    Text(Option<String>),
}

impl Value {
    /// Typed NULL for a column of type `ty`
    pub fn null(ty: ColumnType) -> Self {
        match ty {
            ColumnType::BigInt => Value::BigInt(None),
            ColumnType::Int => Value::Int(None),
            ColumnType::Decimal => Value::Decimal(None),
            ColumnType::Timestamp => Value::Timestamp(None),
            ColumnType::Text | ColumnType::Enum(_) => Value::Text(None),
        }
    }

    /// Text value carrying an enumeration tag
    pub fn tag<E: EnumTag>(value: Option<E>) -> Self {
        Value::Text(value.map(|v| v.tag().to_string()))
    }

    pub fn is_null(&self) -> bool {
        match self {
            Value::BigInt(v) => v.is_none(),
            Value::Int(v) => v.is_none(),
            Value::Decimal(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
            Value::Text(v) => v.is_none(),
        }
    }

    /// Name of the storage kind, matching `ColumnType::name`
    pub fn kind(&self) -> &'static str {
        match self {
            Value::BigInt(_) => "bigint",
            Value::Int(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::Timestamp(_) => "timestamp",
            Value::Text(_) => "text",
        }
    }

    /// Whether this value can be stored in a column of type `ty`
    pub fn fits(&self, ty: ColumnType) -> bool {
        matches!(
            (self, ty),
            (Value::BigInt(_), ColumnType::BigInt)
                | (Value::Int(_), ColumnType::Int)
                | (Value::Decimal(_), ColumnType::Decimal)
                | (Value::Timestamp(_), ColumnType::Timestamp)
                | (Value::Text(_), ColumnType::Text)
                | (Value::Text(_), ColumnType::Enum(_))
        )
    }

    pub(crate) fn bind<'q>(
        self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        match self {
            Value::BigInt(v) => query.bind(v),
            Value::Int(v) => query.bind(v),
            Value::Decimal(v) => query.bind(v),
            Value::Timestamp(v) => query.bind(v),
            Value::Text(v) => query.bind(v),
        }
    }

    pub(crate) fn bind_scalar<'q, O>(
        self,
        query: QueryScalar<'q, Postgres, O, PgArguments>,
    ) -> QueryScalar<'q, Postgres, O, PgArguments> {
        match self {
            Value::BigInt(v) => query.bind(v),
            Value::Int(v) => query.bind(v),
            Value::Decimal(v) => query.bind(v),
            Value::Timestamp(v) => query.bind(v),
            Value::Text(v) => query.bind(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::BigInt(Some(v))
    }
}

impl From<Option<i64>> for Value {
    fn from(v: Option<i64>) -> Self {
        Value::BigInt(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(Some(v))
    }
}

impl From<Option<i32>> for Value {
    fn from(v: Option<i32>) -> Self {
        Value::Int(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(Some(v))
    }
}

impl From<Option<Decimal>> for Value {
    fn from(v: Option<Decimal>) -> Self {
        Value::Decimal(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(Some(v))
    }
}

impl From<Option<DateTime<Utc>>> for Value {
    fn from(v: Option<DateTime<Utc>>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(Some(v))
    }
}

impl From<Option<String>> for Value {
    fn from(v: Option<String>) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(Some(v.to_string()))
    }
}

/// Rust types a non-NULL `Value` can be read back into
pub trait FromValue: Sized {
    /// Storage kind this type is read from
    const KIND: &'static str;

    /// `None` when the value is NULL or of another kind
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for i64 {
    const KIND: &'static str = "bigint";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::BigInt(v) => *v,
            _ => None,
        }
    }
}

impl FromValue for i32 {
    const KIND: &'static str = "integer";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => *v,
            _ => None,
        }
    }
}

impl FromValue for Decimal {
    const KIND: &'static str = "decimal";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Decimal(v) => *v,
            _ => None,
        }
    }
}

impl FromValue for DateTime<Utc> {
    const KIND: &'static str = "timestamp";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Timestamp(v) => *v,
            _ => None,
        }
    }
}

impl FromValue for String {
    const KIND: &'static str = "text";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => v.clone(),
            _ => None,
        }
    }
}

/// Closed enumeration stored as one of a fixed set of text tags
pub trait EnumTag: Sized + Copy + 'static {
    /// Every valid tag, in declaration order
    const TAGS: &'static [&'static str];

    fn tag(&self) -> &'static str;

    fn from_tag(tag: &str) -> Option<Self>;
}
