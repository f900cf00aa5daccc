//! Static per-table descriptions driving projection, select assembly and decoding
//!
//! A `TableMeta` is declared once per entity kind as a `const` and never
//! mutated, so it can be shared freely between concurrent queries.

/// Name of the identity column every table carries
pub const ID_COLUMN: &str = "id";

/// Table alias used for the entity under query
pub const ENTITY_ALIAS: &str = "e";

/// Storage type of a column and the coercion applied when decoding it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// 64-bit integer: identities, foreign keys, external ids
    BigInt,
    /// 32-bit integer
    Int,
    /// Arbitrary-precision decimal
    Decimal,
    /// Instant in time (`timestamptz`)
    Timestamp,
    /// Free text
    Text,
    /// Text restricted to a closed set of symbolic tags
    Enum(&'static [&'static str]),
}

impl ColumnType {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::BigInt => "bigint",
            ColumnType::Int => "integer",
            ColumnType::Decimal => "decimal",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Text => "text",
            ColumnType::Enum(_) => "enum",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
}

impl ColumnDef {
    /// Nullable column of the given type
    pub const fn new(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            nullable: true,
        }
    }

    pub const fn id() -> Self {
        Self::new(ID_COLUMN, ColumnType::BigInt).required()
    }

    pub const fn big_int(name: &'static str) -> Self {
        Self::new(name, ColumnType::BigInt)
    }

    pub const fn int(name: &'static str) -> Self {
        Self::new(name, ColumnType::Int)
    }

    pub const fn decimal(name: &'static str) -> Self {
        Self::new(name, ColumnType::Decimal)
    }

    pub const fn timestamp(name: &'static str) -> Self {
        Self::new(name, ColumnType::Timestamp)
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, ColumnType::Text)
    }

    pub const fn tag(name: &'static str, tags: &'static [&'static str]) -> Self {
        Self::new(name, ColumnType::Enum(tags))
    }

    /// Mark the column NOT NULL; a NULL cell then fails decoding
    pub const fn required(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Many-to-one link from a child table to its parent's identity column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentRelation {
    pub table: &'static TableMeta,
    pub foreign_key: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableMeta {
    /// Entity kind name, used in error context and logs
    pub entity: &'static str,
    /// Physical table name
    pub table: &'static str,
    /// Table alias and column prefix when this table is joined as a parent
    pub alias: &'static str,
    /// Columns in projection order; the identity column comes first
    pub columns: &'static [ColumnDef],
    pub parent: Option<ParentRelation>,
}

impl TableMeta {
    pub fn column(&self, name: &str) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Every column except the identity, in declaration order
    pub fn data_columns(&self) -> impl Iterator<Item = &'static ColumnDef> {
        self.columns.iter().filter(|c| c.name != ID_COLUMN)
    }
}
