//! Assembly of child-to-parent join queries
//!
//! The only caller-supplied scalars are the filter value and the page window,
//! and both are bound as `$n` parameters. Column names in filters and sort
//! keys are checked against the table metadata before they reach the SQL.

use reportservice_common::{PageRequest, RepositoryError};

use crate::metadata::{TableMeta, ENTITY_ALIAS, ID_COLUMN};
use crate::projection;
use crate::value::Value;

/// Single-column predicate on the entity under query
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `e.<column> = $n`
    Eq { column: String, value: Value },
    /// `e.<column> IS NULL`
    IsNull { column: String },
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn by_id(id: i64) -> Self {
        Filter::eq(ID_COLUMN, id)
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Filter::IsNull {
            column: column.into(),
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Filter::Eq { column, .. } | Filter::IsNull { column } => column,
        }
    }
}

/// Rendered SQL plus its positional bind values
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub entity: &'static str,
    pub sql: String,
    pub binds: Vec<Value>,
}

impl SelectStatement {
    /// Select every column of `meta` (prefix `e`) left-joined with its parent
    /// (prefix = parent alias), optionally filtered and paged.
    pub fn build(
        meta: &'static TableMeta,
        filter: Option<Filter>,
        page: Option<&PageRequest>,
    ) -> Result<Self, RepositoryError> {
        let mut sql = format!(
            "SELECT {}",
            projection::render(meta, ENTITY_ALIAS, ENTITY_ALIAS)
        );

        if let Some(relation) = meta.parent {
            let parent = relation.table;
            sql.push_str(", ");
            sql.push_str(&projection::render(parent, parent.alias, parent.alias));
            sql.push_str(&format!(
                " FROM {} {} LEFT OUTER JOIN {} {} ON {}.{} = {}.{}",
                meta.table,
                ENTITY_ALIAS,
                parent.table,
                parent.alias,
                ENTITY_ALIAS,
                relation.foreign_key,
                parent.alias,
                ID_COLUMN
            ));
        } else {
            sql.push_str(&format!(" FROM {} {}", meta.table, ENTITY_ALIAS));
        }

        let mut binds = Vec::new();
        if let Some(filter) = filter {
            push_where(&mut sql, &mut binds, meta, filter)?;
        }

        if let Some(page) = page {
            page.validate().map_err(RepositoryError::InvalidQuery)?;
            push_order(&mut sql, meta, page)?;
            binds.push(Value::from(page.limit));
            sql.push_str(&format!(" LIMIT ${}", binds.len()));
            binds.push(Value::from(page.offset));
            sql.push_str(&format!(" OFFSET ${}", binds.len()));
        }

        Ok(Self {
            entity: meta.entity,
            sql,
            binds,
        })
    }

    /// `SELECT COUNT(*)` over `meta`'s table with the same filter rules
    pub fn count(
        meta: &'static TableMeta,
        filter: Option<Filter>,
    ) -> Result<Self, RepositoryError> {
        let mut sql = format!("SELECT COUNT(*) FROM {} {}", meta.table, ENTITY_ALIAS);
        let mut binds = Vec::new();
        if let Some(filter) = filter {
            push_where(&mut sql, &mut binds, meta, filter)?;
        }

        Ok(Self {
            entity: meta.entity,
            sql,
            binds,
        })
    }
}

fn push_where(
    sql: &mut String,
    binds: &mut Vec<Value>,
    meta: &TableMeta,
    filter: Filter,
) -> Result<(), RepositoryError> {
    let column = meta.column(filter.column()).ok_or_else(|| {
        RepositoryError::InvalidQuery(format!(
            "{} has no column '{}' to filter on",
            meta.entity,
            filter.column()
        ))
    })?;

    match filter {
        Filter::Eq { value, .. } => {
            if value.is_null() {
                return Err(RepositoryError::InvalidQuery(format!(
                    "Equality filter on {}.{} needs a value; use an IS NULL filter instead",
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
            binds.push(value);
            sql.push_str(&format!(
                " WHERE {}.{} = ${}",
                ENTITY_ALIAS,
                column.name,
                binds.len()
            ));
        }
        Filter::IsNull { .. } => {
            sql.push_str(&format!(" WHERE {}.{} IS NULL", ENTITY_ALIAS, column.name));
        }
    }

    Ok(())
}

fn push_order(
    sql: &mut String,
    meta: &TableMeta,
    page: &PageRequest,
) -> Result<(), RepositoryError> {
    if page.sort.is_empty() {
        sql.push_str(&format!(" ORDER BY {}.{} ASC", ENTITY_ALIAS, ID_COLUMN));
        return Ok(());
    }

    let mut keys = Vec::with_capacity(page.sort.len());
    for key in &page.sort {
        let column = meta.column(&key.column).ok_or_else(|| {
            RepositoryError::InvalidQuery(format!(
                "{} has no column '{}' to sort on",
                meta.entity, key.column
            ))
        })?;
        keys.push(format!(
            "{}.{} {}",
            ENTITY_ALIAS,
            column.name,
            key.direction.as_sql()
        ));
    }
    sql.push_str(" ORDER BY ");
    sql.push_str(&keys.join(", "));

    Ok(())
}
