//! Shared utilities, configuration, and error handling for the report service
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration management following 12-factor principles
//! - Error types and the repository error taxonomy
//! - Pagination and sorting types

pub mod config;
pub mod db;
pub mod error;
pub mod pagination;

pub use db::{DecodeError, RepositoryError};
pub use error::{Error, Result};
pub use pagination::{Direction, Page, PageRequest, SortKey};
