//! # Estante Model
//!
//! Shared domain types for the Estante book catalog: strongly typed
//! identifiers plus the `Author` and `Book` payloads exchanged between the
//! storage layer and its callers. The book↔author relationship itself has
//! no value type here; it is identified by its `(BookID, AuthorID)` pair.
//!
//! ## Feature Flags
//!
//! - `serde`: derive `Serialize`/`Deserialize` on all domain types

pub mod author;
pub mod book;
pub mod ids;

pub use author::Author;
pub use book::{BookUpdate, BookWithAuthors, NewBook};
pub use ids::{AuthorID, BookID};
