//! # Estante Core
//!
//! Catalog consistency layer for the Estante book catalog: the repositories
//! persisting authors and books, the dynamic query-predicate builder, and
//! the relationship-synchronization workflows keeping the `book_author`
//! join table consistent across compound writes.
//!
//! ## Architecture
//!
//! - [`database::ports`]: repository interfaces consumed by the adapter layer
//! - [`database::repositories`]: the Postgres implementations
//! - [`query`]: composed lookup predicates over the book table
//! - [`catalog`]: transactional multi-entity workflows
//! - [`application`]: unit-of-work composition for callers
//!
//! The HTTP adapter, request validation, and process bootstrap live outside
//! this crate; everything here receives already-validated domain values.

/// Application-level composition utilities (unit of work)
pub mod application;

/// Transactional workflows spanning the book and relationship stores
pub mod catalog;

/// Database abstraction layer and Postgres implementation
pub mod database;

/// Error types for the catalog stores and workflows
pub mod error;

/// Book lookup predicate composition
pub mod query;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use catalog::CatalogService;
pub use database::PostgresDatabase;
pub use error::{AuthorError, BookError, CatalogError, RelationshipError};
pub use query::BookQuery;
