//! Metadata-driven entity-graph query engine
//!
//! Reads one entity kind together with its parent through a single left
//! outer join, decodes each flat row into the typed child with the parent
//! snapshot embedded, and streams the results without blocking. The flow is:
//!
//! - `metadata`: static `TableMeta` per kind (table, columns, parent relation)
//! - `projection`: `<prefix>_<column>` aliases for each side of the join
//! - `select`: join query assembly with bound filter and page parameters
//! - `executor`: lazy row streams over a `PgPool`
//! - `decode` / `entity`: per-column coercion and graph assembly
//! - `mutation`: single-table insert/update/delete and partial updates
//! - `repository`: the per-kind surface built from the above

pub mod decode;
pub mod entity;
pub mod executor;
pub mod metadata;
pub mod mutation;
pub mod projection;
pub mod repository;
pub mod row;
pub mod select;
pub mod value;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use decode::Record;
pub use entity::{Child, Entity};
pub use executor::{EntityStream, QueryExecutor, RowStream};
pub use metadata::{ColumnDef, ColumnType, ParentRelation, TableMeta};
pub use mutation::Patch;
pub use repository::{JoinedRepository, TableRepository};
pub use select::{Filter, SelectStatement};
pub use value::{EnumTag, FromValue, Value};
