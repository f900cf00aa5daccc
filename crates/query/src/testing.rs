//! In-memory rows for exercising decoders without a database

use crate::entity::Entity;
use crate::metadata::{ColumnType, TableMeta, ID_COLUMN};
use crate::projection::alias;
use crate::row::{RawRow, ValueRow};
use crate::value::Value;

/// A row held in memory, keyed by alias
#[derive(Debug, Clone, Default)]
pub struct MapRow {
    cells: ValueRow,
}

impl MapRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, alias: impl Into<String>, value: impl Into<Value>) -> Self {
        self.cells.set(alias, value);
        self
    }

    pub fn set(&mut self, alias: impl Into<String>, value: impl Into<Value>) {
        self.cells.set(alias, value);
    }

    /// Store every column of `entity` under `prefix`, as a joined select would
    pub fn with_entity<E: Entity>(mut self, prefix: &str, entity: &E) -> Self {
        self.set(alias(prefix, ID_COLUMN), entity.id());
        for (column, value) in entity.values() {
            self.set(alias(prefix, column), value);
        }
        self
    }

    /// Store typed NULLs for every column of `meta` under `prefix`, as the
    /// outer join produces when no parent row matches
    pub fn with_nulls(mut self, prefix: &str, meta: &TableMeta) -> Self {
        for column in meta.columns {
            self.set(alias(prefix, column.name), Value::null(column.ty));
        }
        self
    }
}

impl RawRow for MapRow {
    fn read(&self, alias: &str, ty: ColumnType) -> Result<Value, sqlx::Error> {
        self.cells.read(alias, ty)
    }
}
