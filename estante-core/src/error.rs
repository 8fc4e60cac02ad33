use thiserror::Error;

/// Failures surfaced by the author store. Constraint violations are
/// classified at the point of failure; anything unclassified stays a
/// `Storage` error carrying the driver error.
#[derive(Debug, Error)]
pub enum AuthorError {
    #[error("author already exists")]
    AlreadyExists,

    #[error("author not found")]
    NotFound,

    #[error("author storage error: {0}")]
    Storage(#[source] sqlx::Error),
}

/// Failures surfaced by the book store.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("book already exists")]
    AlreadyExists,

    #[error("book not found")]
    NotFound,

    #[error("nothing to update")]
    NothingToUpdate,

    #[error("book storage error: {0}")]
    Storage(#[source] sqlx::Error),
}

/// Failures surfaced by the book-author relationship store.
#[derive(Debug, Error)]
pub enum RelationshipError {
    #[error("relationship already exists")]
    AlreadyExists,

    #[error("relationship storage error: {0}")]
    Storage(#[source] sqlx::Error),
}

/// Failures surfaced by the compound catalog workflows. The first failing
/// store's error is carried unchanged; `Storage` covers the transaction
/// machinery itself (begin/commit).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Book(#[from] BookError),

    #[error(transparent)]
    Relationship(#[from] RelationshipError),

    #[error("catalog storage error: {0}")]
    Storage(#[from] sqlx::Error),
}
