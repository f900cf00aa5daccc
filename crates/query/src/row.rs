//! Raw row access by column alias

use std::collections::HashMap;

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::metadata::ColumnType;
use crate::value::Value;

/// A fetched row whose cells can be read by alias as typed, nullable values
pub trait RawRow {
    fn read(&self, alias: &str, ty: ColumnType) -> Result<Value, sqlx::Error>;
}

impl RawRow for PgRow {
    fn read(&self, alias: &str, ty: ColumnType) -> Result<Value, sqlx::Error> {
        let value = match ty {
            ColumnType::BigInt => Value::BigInt(self.try_get(alias)?),
            ColumnType::Int => Value::Int(self.try_get(alias)?),
            ColumnType::Decimal => Value::Decimal(self.try_get(alias)?),
            ColumnType::Timestamp => Value::Timestamp(self.try_get(alias)?),
            ColumnType::Text | ColumnType::Enum(_) => Value::Text(self.try_get(alias)?),
        };
        Ok(value)
    }
}

/// A row assembled from values already in hand, keyed by alias
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueRow {
    cells: HashMap<String, Value>,
}

impl ValueRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, alias: impl Into<String>, value: impl Into<Value>) {
        self.cells.insert(alias.into(), value.into());
    }
}

impl RawRow for ValueRow {
    fn read(&self, alias: &str, ty: ColumnType) -> Result<Value, sqlx::Error> {
        let value = self
            .cells
            .get(alias)
            .ok_or_else(|| sqlx::Error::ColumnNotFound(alias.to_string()))?;

        if !value.fits(ty) {
            return Err(sqlx::Error::ColumnDecode {
                index: alias.to_string(),
                source: format!("cannot read {} value as {}", value.kind(), ty.name()).into(),
            });
        }

        Ok(value.clone())
    }
}
