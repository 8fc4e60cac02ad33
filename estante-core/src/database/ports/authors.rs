use async_trait::async_trait;

use crate::error::AuthorError;
use estante_model::{Author, AuthorID};

#[async_trait]
pub trait AuthorsRepository: Send + Sync {
    /// Insert a single author. Fails with [`AuthorError::AlreadyExists`]
    /// when the name collides with an existing row.
    async fn create(&self, name: &str) -> Result<AuthorID, AuthorError>;

    /// Insert a batch of authors atomically: either every name is inserted
    /// or none is. Returned ids are in input order.
    async fn create_many(&self, names: &[String]) -> Result<Vec<AuthorID>, AuthorError>;

    async fn get_all(&self) -> Result<Vec<Author>, AuthorError>;

    async fn get_by_id(&self, id: AuthorID) -> Result<Author, AuthorError>;

    /// Case-insensitive substring match on the author name. An empty result
    /// is not an error.
    async fn get_by_name(&self, name: &str) -> Result<Vec<Author>, AuthorError>;

    async fn delete(&self, id: AuthorID) -> Result<(), AuthorError>;
}
