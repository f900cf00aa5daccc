//! Per-kind decode glue
//!
//! Each entity kind implements `Entity` once: where its table is described,
//! how a `Record` becomes the typed value, and which values it writes back.
//! Kinds that hang off a parent also implement `Child`, which is all the
//! join path needs to embed the parent snapshot.

use reportservice_common::DecodeError;

use crate::decode::{optional_record, record, Record};
use crate::metadata::{TableMeta, ENTITY_ALIAS};
use crate::row::RawRow;
use crate::value::Value;

pub trait Entity: Sized + Send + Unpin + 'static {
    /// Table description for this kind
    const META: &'static TableMeta;

    fn from_record(record: &Record) -> Result<Self, DecodeError>;

    /// Assigned identity, `None` before the first save
    fn id(&self) -> Option<i64>;

    /// Column values to write, excluding the identity column
    fn values(&self) -> Vec<(&'static str, Value)>;

    /// Field-level checks run before any write
    fn validate(&self) -> reportservice_common::Result<()> {
        Ok(())
    }
}

/// An entity holding an optional embedded snapshot of its parent
pub trait Child: Entity {
    type Parent: Entity;

    fn set_parent(&mut self, parent: Option<Self::Parent>);
}

/// Decode `E` from the entity-under-query slice of a row
pub fn decode<E: Entity, R: RawRow>(row: &R) -> Result<E, DecodeError> {
    E::from_record(&record(row, E::META, ENTITY_ALIAS)?)
}

/// Decode `C` and, when the join matched a parent row, embed the parent
pub fn decode_graph<C: Child, R: RawRow>(row: &R) -> Result<C, DecodeError> {
    let mut child = decode::<C, R>(row)?;
    let parent_meta = <C::Parent as Entity>::META;

    let parent = optional_record(row, parent_meta, parent_meta.alias)?
        .map(|record| C::Parent::from_record(&record))
        .transpose()?;
    child.set_parent(parent);

    Ok(child)
}
