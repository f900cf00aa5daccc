//! Generic read/write surface for one entity kind
//!
//! `JoinedRepository` serves kinds with a parent and always reads through
//! the left outer join, so every returned child carries its parent snapshot
//! when one exists. `TableRepository` serves root kinds with no parent.

use std::marker::PhantomData;

use reportservice_common::{DecodeError, Page, PageRequest, RepositoryError};
use sqlx::postgres::{PgPool, PgRow};
use tokio_stream::StreamExt;

use crate::entity::{decode, decode_graph, Child, Entity};
use crate::executor::{EntityStream, QueryExecutor};
use crate::metadata::TableMeta;
use crate::mutation::{self, Patch};
use crate::select::{Filter, SelectStatement};

type Decoder<T> = fn(&PgRow) -> Result<T, DecodeError>;

/// Repository for a kind read together with its parent
pub struct JoinedRepository<C> {
    executor: QueryExecutor,
    _kind: PhantomData<fn() -> C>,
}

impl<C> Clone for JoinedRepository<C> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            _kind: PhantomData,
        }
    }
}

impl<C: Child> JoinedRepository<C> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            executor: QueryExecutor::new(pool),
            _kind: PhantomData,
        }
    }

    pub fn meta(&self) -> &'static TableMeta {
        C::META
    }

    /// Every row, unordered
    pub fn find_all(&self) -> EntityStream<C> {
        self.find_all_by_filter(None, None)
    }

    /// One page of rows in the page's sort order
    pub fn find_all_by(&self, page: &PageRequest) -> EntityStream<C> {
        self.find_all_by_filter(None, Some(page))
    }

    pub fn find_all_by_filter(
        &self,
        filter: Option<Filter>,
        page: Option<&PageRequest>,
    ) -> EntityStream<C> {
        select(&self.executor, C::META, filter, page, decode_graph::<C, PgRow>)
    }

    /// One page plus the total row count
    pub async fn find_page(&self, page: &PageRequest) -> Result<Page<C>, RepositoryError> {
        collect_page(&self.executor, self.find_all_by(page), C::META, page).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<C>, RepositoryError> {
        let statement = SelectStatement::build(C::META, Some(Filter::by_id(id)), None)?;
        self.executor
            .fetch_optional(statement, decode_graph::<C, PgRow>)
            .await
    }

    /// Children whose foreign key equals `parent_id`
    pub fn find_by_parent(&self, parent_id: i64) -> EntityStream<C> {
        match C::META.parent {
            Some(relation) => {
                self.find_all_by_filter(Some(Filter::eq(relation.foreign_key, parent_id)), None)
            }
            None => failed(no_parent(C::META)),
        }
    }

    /// Children with no parent reference
    pub fn find_all_where_parent_is_null(&self) -> EntityStream<C> {
        match C::META.parent {
            Some(relation) => {
                self.find_all_by_filter(Some(Filter::is_null(relation.foreign_key)), None)
            }
            None => failed(no_parent(C::META)),
        }
    }

    pub async fn count(&self) -> Result<i64, RepositoryError> {
        self.executor.count(C::META, None).await
    }

    /// Insert or update the child's own row; the embedded parent is not written
    pub async fn save(&self, entity: &C) -> Result<C, RepositoryError> {
        mutation::save(&self.executor, entity).await
    }

    /// Overlay the non-NULL entries of `patch` on the stored row. The returned
    /// child carries no parent.
    pub async fn partial_update(
        &self,
        id: i64,
        patch: &Patch,
    ) -> Result<Option<C>, RepositoryError> {
        mutation::partial_update(&self.executor, id, patch).await
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        mutation::delete_by_id(&self.executor, C::META, id).await
    }
}

/// Repository for a kind read from its own table only
pub struct TableRepository<E> {
    executor: QueryExecutor,
    _kind: PhantomData<fn() -> E>,
}

impl<E> Clone for TableRepository<E> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            _kind: PhantomData,
        }
    }
}

impl<E: Entity> TableRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            executor: QueryExecutor::new(pool),
            _kind: PhantomData,
        }
    }

    pub fn meta(&self) -> &'static TableMeta {
        E::META
    }

    pub fn find_all(&self) -> EntityStream<E> {
        self.find_all_by_filter(None, None)
    }

    pub fn find_all_by(&self, page: &PageRequest) -> EntityStream<E> {
        self.find_all_by_filter(None, Some(page))
    }

    pub fn find_all_by_filter(
        &self,
        filter: Option<Filter>,
        page: Option<&PageRequest>,
    ) -> EntityStream<E> {
        select(&self.executor, E::META, filter, page, decode::<E, PgRow>)
    }

    pub async fn find_page(&self, page: &PageRequest) -> Result<Page<E>, RepositoryError> {
        collect_page(&self.executor, self.find_all_by(page), E::META, page).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<E>, RepositoryError> {
        let statement = SelectStatement::build(E::META, Some(Filter::by_id(id)), None)?;
        self.executor.fetch_optional(statement, decode::<E, PgRow>).await
    }

    pub async fn count(&self) -> Result<i64, RepositoryError> {
        self.executor.count(E::META, None).await
    }

    pub async fn save(&self, entity: &E) -> Result<E, RepositoryError> {
        mutation::save(&self.executor, entity).await
    }

    pub async fn partial_update(
        &self,
        id: i64,
        patch: &Patch,
    ) -> Result<Option<E>, RepositoryError> {
        mutation::partial_update(&self.executor, id, patch).await
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        mutation::delete_by_id(&self.executor, E::META, id).await
    }
}

fn select<T: Send + 'static>(
    executor: &QueryExecutor,
    meta: &'static TableMeta,
    filter: Option<Filter>,
    page: Option<&PageRequest>,
    decoder: Decoder<T>,
) -> EntityStream<T> {
    match SelectStatement::build(meta, filter, page) {
        Ok(statement) => executor.fetch_as(statement, decoder),
        Err(e) => failed(e),
    }
}

async fn collect_page<T>(
    executor: &QueryExecutor,
    rows: EntityStream<T>,
    meta: &'static TableMeta,
    page: &PageRequest,
) -> Result<Page<T>, RepositoryError> {
    let content = rows.collect::<Result<Vec<T>, RepositoryError>>().await?;
    let total = executor.count(meta, None).await?;
    Ok(Page::new(content, total, page))
}

/// A stream yielding only `err`, for requests rejected before execution
fn failed<T: Send + 'static>(err: RepositoryError) -> EntityStream<T> {
    Box::pin(tokio_stream::once(Err(err)))
}

fn no_parent(meta: &TableMeta) -> RepositoryError {
    RepositoryError::InvalidQuery(format!("{} has no parent relation", meta.entity))
}
