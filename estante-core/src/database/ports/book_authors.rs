use async_trait::async_trait;

use crate::error::RelationshipError;
use estante_model::{AuthorID, BookID};

#[async_trait]
pub trait BookAuthorsRepository: Send + Sync {
    /// Insert one relationship row. Fails with
    /// [`RelationshipError::AlreadyExists`] on a duplicate pair.
    async fn create(&self, book_id: BookID, author_id: AuthorID) -> Result<(), RelationshipError>;

    /// Remove every relationship row for the given book. Zero rows removed
    /// is not an error.
    async fn delete_for_book(&self, book_id: BookID) -> Result<(), RelationshipError>;
}
