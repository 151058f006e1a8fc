//! In-memory analytics catalog
//!
//! This crate owns the identifier -> record table served by the lookup mock
//! and the single filter operation over it.

pub mod fixtures;
pub mod storage;

pub use fixtures::CatalogVariant;
pub use storage::{Catalog, CatalogError, CatalogSource};

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
