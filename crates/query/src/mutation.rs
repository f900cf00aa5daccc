//! Single-table writes
//!
//! Writes never touch the parent table. A save without an identity inserts
//! and lets the database assign one; a save with an identity updates that
//! row. Both read the stored row back through `RETURNING` under the `e`
//! prefix, so the regular decoder builds the result.
//!
//! A partial update loads the stored row, overlays the non-NULL entries of a
//! `Patch` and saves the merged entity.

use reportservice_common::{Error, RepositoryError};
use sqlx::postgres::PgRow;

use crate::entity::{decode, Entity};
use crate::executor::QueryExecutor;
use crate::metadata::{TableMeta, ENTITY_ALIAS, ID_COLUMN};
use crate::projection::{self, alias};
use crate::row::ValueRow;
use crate::select::{Filter, SelectStatement};
use crate::value::Value;

/// Column changes for a partial update. NULL entries leave the stored value as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    changes: Vec<(String, Value)>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.changes.push((column.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Rendered write plus its positional bind values
#[derive(Debug, Clone, PartialEq)]
pub struct WriteStatement {
    pub entity: &'static str,
    pub sql: String,
    pub binds: Vec<Value>,
}

impl WriteStatement {
    /// `INSERT INTO <table> (...) VALUES (...) RETURNING ...`
    pub fn insert<E: Entity>(entity: &E) -> Result<Self, RepositoryError> {
        let meta = E::META;
        let (columns, binds) = checked_values(meta, entity.values())?;

        let placeholders = (1..=binds.len())
            .map(|n| format!("${}", n))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            meta.table,
            columns.join(", "),
            placeholders,
            projection::render_unqualified(meta, ENTITY_ALIAS)
        );

        Ok(Self {
            entity: meta.entity,
            sql,
            binds,
        })
    }

    /// `UPDATE <table> SET ... WHERE id = $n RETURNING ...`
    pub fn update<E: Entity>(entity: &E, id: i64) -> Result<Self, RepositoryError> {
        let meta = E::META;
        let (columns, mut binds) = checked_values(meta, entity.values())?;

        let assignments = columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ${}", column, i + 1))
            .collect::<Vec<_>>()
            .join(", ");

        binds.push(Value::from(id));
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
            meta.table,
            assignments,
            ID_COLUMN,
            binds.len(),
            projection::render_unqualified(meta, ENTITY_ALIAS)
        );

        Ok(Self {
            entity: meta.entity,
            sql,
            binds,
        })
    }

    /// `DELETE FROM <table> WHERE id = $1`
    pub fn delete(meta: &'static TableMeta, id: i64) -> Self {
        Self {
            entity: meta.entity,
            sql: format!("DELETE FROM {} WHERE {} = $1", meta.table, ID_COLUMN),
            binds: vec![Value::from(id)],
        }
    }
}

/// Every written column must exist, be written once, and hold a value of its type
fn checked_values(
    meta: &TableMeta,
    values: Vec<(&'static str, Value)>,
) -> Result<(Vec<&'static str>, Vec<Value>), RepositoryError> {
    let mut columns = Vec::with_capacity(values.len());
    let mut binds = Vec::with_capacity(values.len());

    for (name, value) in values {
        let column = meta
            .column(name)
            .filter(|c| c.name != ID_COLUMN)
            .ok_or_else(|| {
                RepositoryError::InvalidQuery(format!(
                    "{} has no writable column '{}'",
                    meta.entity, name
                ))
            })?;
        if columns.contains(&column.name) {
            return Err(RepositoryError::InvalidQuery(format!(
                "{}.{} is written twice",
                meta.entity, column.name
            )));
        }
        if !value.fits(column.ty) {
            return Err(RepositoryError::InvalidQuery(format!(
                "{}.{} is a {} column, got a {} value",
                meta.entity,
                column.name,
                column.ty.name(),
                value.kind()
            )));
        }
        columns.push(column.name);
        binds.push(value);
    }

    if columns.is_empty() {
        return Err(RepositoryError::InvalidQuery(format!(
            "{} has nothing to write",
            meta.entity
        )));
    }

    Ok((columns, binds))
}

/// Insert or update `entity` and return the stored row
pub async fn save<E: Entity>(executor: &QueryExecutor, entity: &E) -> Result<E, RepositoryError> {
    entity.validate().map_err(|e| match e {
        Error::Validation(msg) => RepositoryError::InvalidData(msg),
        other => RepositoryError::InvalidData(other.to_string()),
    })?;

    let statement = match entity.id() {
        None => WriteStatement::insert(entity)?,
        Some(id) => WriteStatement::update(entity, id)?,
    };
    let WriteStatement { entity: kind, sql, binds } = statement;

    let row = executor.fetch_returning(kind, &sql, binds).await?;
    let row = match (row, entity.id()) {
        (Some(row), _) => row,
        (None, Some(id)) => return Err(RepositoryError::NotFound { entity: kind, id }),
        (None, None) => {
            return Err(RepositoryError::InvalidQuery(format!(
                "Insert into {} returned no row",
                E::META.table
            )))
        }
    };

    let stored = decode::<E, _>(&row)?;
    tracing::debug!(entity = kind, id = ?stored.id(), "Saved");
    Ok(stored)
}

/// Overlay `patch` on the row with identity `id` and save the result;
/// `None` when there is no such row
pub async fn partial_update<E: Entity>(
    executor: &QueryExecutor,
    id: i64,
    patch: &Patch,
) -> Result<Option<E>, RepositoryError> {
    let statement = SelectStatement::build(E::META, Some(Filter::by_id(id)), None)?;
    let current = executor
        .fetch_optional(statement, decode::<E, PgRow>)
        .await?;

    match current {
        Some(current) => {
            let merged = merge(&current, patch)?;
            save(executor, &merged).await.map(Some)
        }
        None => Ok(None),
    }
}

/// Stored values of `current` with the non-NULL entries of `patch` laid over them
fn merge<E: Entity>(current: &E, patch: &Patch) -> Result<E, RepositoryError> {
    let meta = E::META;
    let mut row = ValueRow::new();
    row.set(alias(ENTITY_ALIAS, ID_COLUMN), current.id());
    for (column, value) in current.values() {
        row.set(alias(ENTITY_ALIAS, column), value);
    }

    for (name, value) in &patch.changes {
        let column = meta
            .column(name)
            .filter(|c| c.name != ID_COLUMN)
            .ok_or_else(|| {
                RepositoryError::InvalidQuery(format!(
                    "{} has no writable column '{}'",
                    meta.entity, name
                ))
            })?;
        if !value.fits(column.ty) {
            return Err(RepositoryError::InvalidQuery(format!(
                "{}.{} is a {} column, got a {} value",
                meta.entity,
                column.name,
                column.ty.name(),
                value.kind()
            )));
        }
        if !value.is_null() {
            row.set(alias(ENTITY_ALIAS, column.name), value.clone());
        }
    }

    decode::<E, _>(&row).map_err(|e| RepositoryError::InvalidData(e.to_string()))
}

/// Delete the row with identity `id`; `false` when there was none
pub async fn delete_by_id(
    executor: &QueryExecutor,
    meta: &'static TableMeta,
    id: i64,
) -> Result<bool, RepositoryError> {
    let WriteStatement { entity, sql, binds } = WriteStatement::delete(meta, id);
    let affected = executor.execute(entity, &sql, binds).await?;
    Ok(affected > 0)
}
