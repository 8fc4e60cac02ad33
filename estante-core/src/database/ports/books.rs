use async_trait::async_trait;

use crate::error::BookError;
use crate::query::BookQuery;
use estante_model::{AuthorID, BookID, BookUpdate, BookWithAuthors, NewBook};

#[async_trait]
pub trait BooksRepository: Send + Sync {
    /// Find-or-create by the natural key `(title, edition,
    /// publication_year)`: a single conditional insert that reports
    /// [`BookError::AlreadyExists`] instead of inserting a duplicate row.
    async fn create(&self, book: &NewBook) -> Result<BookID, BookError>;

    /// Every book, enriched with its aggregated author names. Books without
    /// relationship rows appear with an empty list.
    async fn get_all(&self) -> Result<Vec<BookWithAuthors>, BookError>;

    /// Filtered variant of [`get_all`](Self::get_all); an empty query is
    /// equivalent to it.
    async fn get_by_query(&self, query: &BookQuery) -> Result<Vec<BookWithAuthors>, BookError>;

    async fn get_by_id(&self, id: BookID) -> Result<BookWithAuthors, BookError>;

    /// All books related to the given author. An empty result is not an
    /// error.
    async fn get_by_author(&self, author_id: AuthorID) -> Result<Vec<BookWithAuthors>, BookError>;

    /// Apply the supplied scalar fields only. Fails with
    /// [`BookError::NothingToUpdate`] when the write affects zero rows.
    async fn update(&self, id: BookID, update: &BookUpdate) -> Result<(), BookError>;

    async fn delete(&self, id: BookID) -> Result<(), BookError>;
}
