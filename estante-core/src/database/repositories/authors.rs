use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::database::ports::authors::AuthorsRepository;
use crate::error::AuthorError;
use estante_model::{Author, AuthorID};

const NAME_UNIQUE_CONSTRAINT: &str = "authors_name_key";

/// PostgreSQL-backed implementation of the `AuthorsRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresAuthorsRepository {
    pool: PgPool,
}

impl PostgresAuthorsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn classify_insert(err: sqlx::Error) -> AuthorError {
        if let Some(db_err) = err.as_database_error()
            && db_err.constraint() == Some(NAME_UNIQUE_CONSTRAINT)
        {
            return AuthorError::AlreadyExists;
        }
        AuthorError::Storage(err)
    }
}

#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: Uuid,
    name: String,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author {
            id: AuthorID(row.id),
            name: row.name,
        }
    }
}

#[async_trait]
impl AuthorsRepository for PostgresAuthorsRepository {
    async fn create(&self, name: &str) -> Result<AuthorID, AuthorError> {
        let id: Uuid = sqlx::query_scalar("INSERT INTO authors (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(self.pool())
            .await
            .map_err(Self::classify_insert)?;

        info!("Created author: {} ({})", name, id);
        Ok(AuthorID(id))
    }

    async fn create_many(&self, names: &[String]) -> Result<Vec<AuthorID>, AuthorError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        // One multi-row INSERT: either the whole batch lands or none of it.
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("INSERT INTO authors (name) ");
        qb.push_values(names, |mut row, name| {
            row.push_bind(name.clone());
        });
        qb.push(" RETURNING id");

        let ids: Vec<Uuid> = qb
            .build_query_scalar()
            .fetch_all(self.pool())
            .await
            .map_err(Self::classify_insert)?;

        info!("Created {} authors", ids.len());
        Ok(ids.into_iter().map(AuthorID).collect())
    }

    async fn get_all(&self) -> Result<Vec<Author>, AuthorError> {
        let rows: Vec<AuthorRow> =
            sqlx::query_as("SELECT id, name FROM authors ORDER BY name")
                .fetch_all(self.pool())
                .await
                .map_err(AuthorError::Storage)?;

        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn get_by_id(&self, id: AuthorID) -> Result<Author, AuthorError> {
        let row: Option<AuthorRow> =
            sqlx::query_as("SELECT id, name FROM authors WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(self.pool())
                .await
                .map_err(AuthorError::Storage)?;

        row.map(Author::from).ok_or(AuthorError::NotFound)
    }

    async fn get_by_name(&self, name: &str) -> Result<Vec<Author>, AuthorError> {
        let like = format!("%{}%", name);
        let rows: Vec<AuthorRow> =
            sqlx::query_as("SELECT id, name FROM authors WHERE name ILIKE $1 ORDER BY name")
                .bind(like)
                .fetch_all(self.pool())
                .await
                .map_err(AuthorError::Storage)?;

        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn delete(&self, id: AuthorID) -> Result<(), AuthorError> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool())
            .await
            .map_err(AuthorError::Storage)?;

        if result.rows_affected() == 0 {
            return Err(AuthorError::NotFound);
        }

        info!("Deleted author {}", id);
        Ok(())
    }
}
