//! Non-blocking execution of rendered statements
//!
//! `fetch` returns a lazy stream: nothing is sent to the database until the
//! stream is first polled, and dropping it mid-way returns the connection
//! to the pool. Each call issues a fresh round trip.

use std::pin::Pin;

use async_stream::stream;
use futures_core::Stream;
use reportservice_common::{DecodeError, RepositoryError};
use sqlx::postgres::{PgArguments, PgPool, PgRow, Postgres};
use sqlx::query::Query;
use tokio_stream::StreamExt;

use crate::metadata::TableMeta;
use crate::select::{Filter, SelectStatement};
use crate::value::Value;

/// Raw rows of one select, in driver order
pub type RowStream = Pin<Box<dyn Stream<Item = Result<PgRow, RepositoryError>> + Send>>;

/// Decoded entities of one select, in driver order
pub type EntityStream<T> = Pin<Box<dyn Stream<Item = Result<T, RepositoryError>> + Send>>;

#[derive(Debug, Clone)]
pub struct QueryExecutor {
    pool: PgPool,
}

impl QueryExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Lazily stream every row the statement produces
    pub fn fetch(&self, statement: SelectStatement) -> RowStream {
        let pool = self.pool.clone();

        Box::pin(stream! {
            let SelectStatement { entity, sql, binds } = statement;
            tracing::debug!(entity, sql = %sql, binds = binds.len(), "Executing select");

            let mut rows = bind_all(&sql, binds).fetch(&pool);
            let mut delivered = 0usize;
            while let Some(row) = rows.next().await {
                match row {
                    Ok(row) => {
                        delivered += 1;
                        yield Ok(row);
                    }
                    Err(e) => {
                        yield Err(RepositoryError::from_sqlx(entity, e));
                        return;
                    }
                }
            }

            tracing::debug!(entity, rows = delivered, "Select finished");
        })
    }

    /// Stream rows decoded with `decode`. A decode failure is yielded once
    /// and ends the stream; rows yielded before it stay valid.
    pub fn fetch_as<T, F>(&self, statement: SelectStatement, decode: F) -> EntityStream<T>
    where
        T: Send + 'static,
        F: Fn(&PgRow) -> Result<T, DecodeError> + Send + 'static,
    {
        let entity = statement.entity;
        let mut rows = self.fetch(statement);

        Box::pin(stream! {
            while let Some(row) = rows.next().await {
                let decoded = row.and_then(|row| {
                    decode(&row).map_err(|e| {
                        tracing::warn!(entity, column = e.column(), error = %e, "Row decode failed");
                        RepositoryError::Decode(e)
                    })
                });
                let failed = decoded.is_err();
                yield decoded;
                if failed {
                    return;
                }
            }
        })
    }

    /// At most one decoded row; a second row is `TooManyRows`
    pub async fn fetch_optional<T, F>(
        &self,
        statement: SelectStatement,
        decode: F,
    ) -> Result<Option<T>, RepositoryError>
    where
        T: Send + 'static,
        F: Fn(&PgRow) -> Result<T, DecodeError> + Send + 'static,
    {
        let entity = statement.entity;
        single_row(self.fetch_as(statement, decode), entity).await
    }

    /// `COUNT(*)` over `meta`'s table
    pub async fn count(
        &self,
        meta: &'static TableMeta,
        filter: Option<Filter>,
    ) -> Result<i64, RepositoryError> {
        let SelectStatement { entity, sql, binds } = SelectStatement::count(meta, filter)?;
        tracing::debug!(entity, sql = %sql, "Executing count");

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for value in binds {
            query = value.bind_scalar(query);
        }

        query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(entity, e))
    }

    /// Run a write with a `RETURNING` clause; `None` when no row was touched
    pub(crate) async fn fetch_returning(
        &self,
        entity: &'static str,
        sql: &str,
        binds: Vec<Value>,
    ) -> Result<Option<PgRow>, RepositoryError> {
        tracing::debug!(entity, sql = %sql, binds = binds.len(), "Executing write");

        bind_all(sql, binds)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(entity, e))
    }

    /// Run a write and report the number of affected rows
    pub(crate) async fn execute(
        &self,
        entity: &'static str,
        sql: &str,
        binds: Vec<Value>,
    ) -> Result<u64, RepositoryError> {
        tracing::debug!(entity, sql = %sql, binds = binds.len(), "Executing write");

        let result = bind_all(sql, binds)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(entity, e))?;

        Ok(result.rows_affected())
    }
}

fn bind_all(sql: &str, binds: Vec<Value>) -> Query<'_, Postgres, PgArguments> {
    let mut query = sqlx::query(sql);
    for value in binds {
        query = value.bind(query);
    }
    query
}

/// Take the only item of `stream`.
///
/// Identity lookups must match one row at most; if a second row shows up the
/// lookup fails rather than returning an arbitrary one.
pub async fn single_row<S, T>(
    mut stream: S,
    entity: &'static str,
) -> Result<Option<T>, RepositoryError>
where
    S: Stream<Item = Result<T, RepositoryError>> + Unpin,
{
    let first = match stream.next().await {
        Some(item) => item?,
        None => return Ok(None),
    };

    if let Some(extra) = stream.next().await {
        extra?;
        tracing::warn!(entity, "Identity lookup returned more than one row");
        return Err(RepositoryError::TooManyRows { entity });
    }

    Ok(Some(first))
}
