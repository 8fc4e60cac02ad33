use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::debug;

use crate::database::ports::book_authors::BookAuthorsRepository;
use crate::error::RelationshipError;
use estante_model::{AuthorID, BookID};

const PAIR_CONSTRAINT: &str = "book_author_pkey";

/// PostgreSQL-backed implementation of the `BookAuthorsRepository` port,
/// with connection-level helpers for transactional composition.
#[derive(Clone, Debug)]
pub struct PostgresBookAuthorsRepository {
    pool: PgPool,
}

impl PostgresBookAuthorsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn classify_insert(err: sqlx::Error) -> RelationshipError {
        if let Some(db_err) = err.as_database_error()
            && db_err.constraint() == Some(PAIR_CONSTRAINT)
        {
            return RelationshipError::AlreadyExists;
        }
        RelationshipError::Storage(err)
    }

    pub(crate) async fn insert_on(
        conn: &mut PgConnection,
        book_id: BookID,
        author_id: AuthorID,
    ) -> Result<(), RelationshipError> {
        sqlx::query("INSERT INTO book_author (book_id, author_id) VALUES ($1, $2)")
            .bind(book_id.as_uuid())
            .bind(author_id.as_uuid())
            .execute(conn)
            .await
            .map_err(Self::classify_insert)?;

        debug!("Related book {} to author {}", book_id, author_id);
        Ok(())
    }

    pub(crate) async fn delete_for_book_on(
        conn: &mut PgConnection,
        book_id: BookID,
    ) -> Result<u64, RelationshipError> {
        let result = sqlx::query("DELETE FROM book_author WHERE book_id = $1")
            .bind(book_id.as_uuid())
            .execute(conn)
            .await
            .map_err(RelationshipError::Storage)?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl BookAuthorsRepository for PostgresBookAuthorsRepository {
    async fn create(&self, book_id: BookID, author_id: AuthorID) -> Result<(), RelationshipError> {
        let mut conn = self
            .pool()
            .acquire()
            .await
            .map_err(RelationshipError::Storage)?;
        Self::insert_on(&mut conn, book_id, author_id).await
    }

    async fn delete_for_book(&self, book_id: BookID) -> Result<(), RelationshipError> {
        let mut conn = self
            .pool()
            .acquire()
            .await
            .map_err(RelationshipError::Storage)?;
        let removed = Self::delete_for_book_on(&mut conn, book_id).await?;

        debug!("Removed {} relationship rows for book {}", removed, book_id);
        Ok(())
    }
}
