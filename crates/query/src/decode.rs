//! Row decoding: one table's slice of a flat joined row into a `Record`
//!
//! Coercion is driven by the column types in `TableMeta`. NULL cells stay
//! absent; a NULL in a required column, a tag outside the closed set, or a
//! cell of the wrong storage type fails the row with a `DecodeError` naming
//! the offending alias.

use std::collections::HashMap;

use reportservice_common::DecodeError;

use crate::metadata::{ColumnType, TableMeta, ID_COLUMN};
use crate::projection::alias;
use crate::row::RawRow;
use crate::value::{EnumTag, FromValue, Value};

/// Decoded cells of one table, keyed by source column
#[derive(Debug, Clone)]
pub struct Record {
    meta: &'static TableMeta,
    prefix: String,
    values: HashMap<&'static str, Value>,
}

impl Record {
    pub fn meta(&self) -> &'static TableMeta {
        self.meta
    }

    /// Nullable cell as `T`
    pub fn get<T: FromValue>(&self, column: &'static str) -> Result<Option<T>, DecodeError> {
        let value = self.cell(column, T::KIND)?;
        if value.is_null() {
            return Ok(None);
        }
        T::from_value(value)
            .map(Some)
            .ok_or_else(|| self.mismatch(column, T::KIND))
    }

    /// Required cell as `T`
    pub fn require<T: FromValue>(&self, column: &'static str) -> Result<T, DecodeError> {
        self.get(column)?
            .ok_or_else(|| self.unexpected_null(column))
    }

    /// Nullable enumeration cell
    pub fn tag<E: EnumTag>(&self, column: &'static str) -> Result<Option<E>, DecodeError> {
        match self.get::<String>(column)? {
            None => Ok(None),
            Some(raw) => E::from_tag(&raw).map(Some).ok_or_else(|| {
                DecodeError::UnknownEnumValue {
                    entity: self.meta.entity,
                    column: alias(&self.prefix, column),
                    value: raw,
                }
            }),
        }
    }

    /// Required enumeration cell
    pub fn require_tag<E: EnumTag>(&self, column: &'static str) -> Result<E, DecodeError> {
        self.tag(column)?
            .ok_or_else(|| self.unexpected_null(column))
    }

    fn cell(&self, column: &'static str, expected: &'static str) -> Result<&Value, DecodeError> {
        let value = self
            .values
            .get(column)
            .ok_or_else(|| self.mismatch(column, expected))?;
        if value.kind() != expected {
            return Err(self.mismatch(column, expected));
        }
        Ok(value)
    }

    fn mismatch(&self, column: &str, expected: &'static str) -> DecodeError {
        DecodeError::TypeMismatch {
            entity: self.meta.entity,
            column: alias(&self.prefix, column),
            expected,
        }
    }

    fn unexpected_null(&self, column: &str) -> DecodeError {
        DecodeError::UnexpectedNull {
            entity: self.meta.entity,
            column: alias(&self.prefix, column),
        }
    }
}

/// Decode every column of `meta` projected under `prefix`
pub fn record<R: RawRow>(
    row: &R,
    meta: &'static TableMeta,
    prefix: &str,
) -> Result<Record, DecodeError> {
    let mut values = HashMap::with_capacity(meta.columns.len());

    for column in meta.columns {
        let alias = alias(prefix, column.name);
        let value = row
            .read(&alias, column.ty)
            .map_err(|source| DecodeError::Column {
                entity: meta.entity,
                column: alias.clone(),
                source,
            })?;

        if value.is_null() {
            if !column.nullable {
                return Err(DecodeError::UnexpectedNull {
                    entity: meta.entity,
                    column: alias,
                });
            }
        } else if let (ColumnType::Enum(tags), Value::Text(Some(raw))) = (column.ty, &value) {
            if !tags.contains(&raw.as_str()) {
                return Err(DecodeError::UnknownEnumValue {
                    entity: meta.entity,
                    column: alias,
                    value: raw.clone(),
                });
            }
        }

        values.insert(column.name, value);
    }

    Ok(Record {
        meta,
        prefix: prefix.to_string(),
        values,
    })
}

/// Decode `meta` under `prefix`, or `None` when its identity cell is NULL
/// (the outer join found no matching row)
pub fn optional_record<R: RawRow>(
    row: &R,
    meta: &'static TableMeta,
    prefix: &str,
) -> Result<Option<Record>, DecodeError> {
    let id_alias = alias(prefix, ID_COLUMN);
    let id = row
        .read(&id_alias, ColumnType::BigInt)
        .map_err(|source| DecodeError::Column {
            entity: meta.entity,
            column: id_alias,
            source,
        })?;

    if id.is_null() {
        return Ok(None);
    }

    record(row, meta, prefix).map(Some)
}
