//! Shared database types for the report service
//!
//! This module provides the error taxonomy used by the query engine and the
//! domain repositories built on top of it.

use crate::error::Error;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Failure to turn one column of a fetched row into a typed value.
///
/// `column` is the rendered alias (`e_condition_level`, `report_id`, ...) so
/// the offending cell can be located in the joined row.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("{entity}: column '{column}' holds unknown enum value '{value}'")]
    UnknownEnumValue {
        entity: &'static str,
        column: String,
        value: String,
    },

    #[error("{entity}: column '{column}' is NULL but the field is required")]
    UnexpectedNull { entity: &'static str, column: String },

    #[error("{entity}: column '{column}' does not hold a {expected} value")]
    TypeMismatch {
        entity: &'static str,
        column: String,
        expected: &'static str,
    },

    #[error("{entity}: column '{column}' could not be read: {source}")]
    Column {
        entity: &'static str,
        column: String,
        #[source]
        source: sqlx::Error,
    },
}

impl DecodeError {
    /// Name of the entity kind whose row failed to decode
    pub fn entity(&self) -> &'static str {
        match self {
            DecodeError::UnknownEnumValue { entity, .. }
            | DecodeError::UnexpectedNull { entity, .. }
            | DecodeError::TypeMismatch { entity, .. }
            | DecodeError::Column { entity, .. } => entity,
        }
    }

    /// Alias of the offending column
    pub fn column(&self) -> &str {
        match self {
            DecodeError::UnknownEnumValue { column, .. }
            | DecodeError::UnexpectedNull { column, .. }
            | DecodeError::TypeMismatch { column, .. }
            | DecodeError::Column { column, .. } => column,
        }
    }
}

/// Database-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Database connection error: {0}")]
    Connectivity(#[from] sqlx::Error),

    #[error("Database rejected statement on {entity}: {source}")]
    Database {
        entity: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Row decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Constraint violation on {entity}: {source}")]
    ConstraintViolation {
        entity: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Identity lookup on {entity} returned more than one row")]
    TooManyRows { entity: &'static str },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Classify a driver error raised while touching `entity`'s table.
    ///
    /// Integrity violations become `ConstraintViolation`. Failures to reach
    /// the database (I/O, TLS, pool exhaustion or shutdown, protocol) become
    /// `Connectivity`. Anything else the server or driver rejected, such as
    /// a missing table or an out-of-range value, is `Database`.
    pub fn from_sqlx(entity: &'static str, err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => RepositoryError::ConstraintViolation {
                    entity,
                    source: err,
                },
                _ => RepositoryError::Database {
                    entity,
                    source: err,
                },
            },
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => RepositoryError::Connectivity(err),
            _ => RepositoryError::Database {
                entity,
                source: err,
            },
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => Error::NotFound(err.to_string()),
            RepositoryError::Connectivity(e) => Error::Database(e),
            RepositoryError::Database { source, .. } => Error::Database(source),
            RepositoryError::Decode(e) => Error::Internal(e.to_string()),
            RepositoryError::ConstraintViolation { .. } => Error::Conflict(err.to_string()),
            RepositoryError::TooManyRows { .. } => Error::Internal(err.to_string()),
            RepositoryError::InvalidQuery(msg) => Error::Validation(msg),
            RepositoryError::InvalidData(msg) => Error::Validation(msg),
        }
    }
}
