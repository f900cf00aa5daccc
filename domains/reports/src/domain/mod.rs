//! Domain types for the Reports domain

pub mod entities;
pub mod enums;
