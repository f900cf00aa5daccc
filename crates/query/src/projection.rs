//! Aliased column projections
//!
//! Every projected column is renamed to `<prefix>_<column>`. Decoding looks
//! columns up by that alias, never by position, so the child and parent
//! tables of a join can share column names without colliding.

use crate::metadata::TableMeta;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub source: &'static str,
    pub alias: String,
}

impl Projection {
    /// `<table_alias>.<source> AS <alias>`
    pub fn qualified(&self, table_alias: &str) -> String {
        format!("{}.{} AS {}", table_alias, self.source, self.alias)
    }

    /// `<source> AS <alias>`, for `RETURNING` clauses
    pub fn unqualified(&self) -> String {
        format!("{} AS {}", self.source, self.alias)
    }
}

/// Alias under which `column` is projected with `prefix`
pub fn alias(prefix: &str, column: &str) -> String {
    format!("{}_{}", prefix, column)
}

/// Ordered projection of every column of `meta` under `prefix`
pub fn columns(meta: &TableMeta, prefix: &str) -> Vec<Projection> {
    meta.columns
        .iter()
        .map(|c| Projection {
            source: c.name,
            alias: alias(prefix, c.name),
        })
        .collect()
}

/// Comma-separated select list for `meta`, qualified by `table_alias`
pub fn render(meta: &TableMeta, table_alias: &str, prefix: &str) -> String {
    columns(meta, prefix)
        .iter()
        .map(|p| p.qualified(table_alias))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comma-separated unqualified select list, for `RETURNING`
pub fn render_unqualified(meta: &TableMeta, prefix: &str) -> String {
    columns(meta, prefix)
        .iter()
        .map(Projection::unqualified)
        .collect::<Vec<_>>()
        .join(", ")
}
