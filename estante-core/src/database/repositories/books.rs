use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::database::ports::books::BooksRepository;
use crate::error::BookError;
use crate::query::BookQuery;
use estante_model::{AuthorID, BookID, BookUpdate, BookWithAuthors, NewBook};

const NATURAL_KEY_CONSTRAINT: &str = "books_natural_key";

/// Aggregate projection shared by every book read: each row is one book
/// with its author names collected into an array. LEFT JOINs keep books
/// without any relationship rows in the result.
const BOOK_WITH_AUTHORS_SELECT: &str = "SELECT b.id, b.title, b.edition, b.publication_year, \
     COALESCE(array_agg(a.name ORDER BY a.name) FILTER (WHERE a.name IS NOT NULL), '{}') AS authors \
     FROM books b \
     LEFT JOIN book_author ba ON ba.book_id = b.id \
     LEFT JOIN authors a ON a.id = ba.author_id";

const BOOK_GROUP_BY: &str = " GROUP BY b.id, b.title, b.edition, b.publication_year";

/// PostgreSQL-backed implementation of the `BooksRepository` port.
///
/// The write paths are also exposed as connection-level helpers
/// ([`insert_on`](Self::insert_on), [`update_on`](Self::update_on)) so the
/// catalog workflow can sequence them inside one transaction.
#[derive(Clone, Debug)]
pub struct PostgresBooksRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct BookWithAuthorsRow {
    id: Uuid,
    title: String,
    edition: i16,
    publication_year: i32,
    authors: Vec<String>,
}

impl From<BookWithAuthorsRow> for BookWithAuthors {
    fn from(row: BookWithAuthorsRow) -> Self {
        BookWithAuthors {
            id: BookID(row.id),
            title: row.title,
            edition: row.edition as u16,
            publication_year: row.publication_year as u16,
            authors: row.authors,
        }
    }
}

impl PostgresBooksRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn classify_write(err: sqlx::Error) -> BookError {
        if let Some(db_err) = err.as_database_error()
            && db_err.constraint() == Some(NATURAL_KEY_CONSTRAINT)
        {
            return BookError::AlreadyExists;
        }
        BookError::Storage(err)
    }

    /// Single conditional insert guarded by the natural-key constraint: no
    /// row comes back exactly when the triple already exists. There is no
    /// separate existence check, so concurrent creators cannot race past it.
    pub(crate) async fn insert_on(
        conn: &mut PgConnection,
        book: &NewBook,
    ) -> Result<BookID, BookError> {
        let id: Option<Uuid> = sqlx::query_scalar(
            "INSERT INTO books (title, edition, publication_year) VALUES ($1, $2, $3) \
             ON CONFLICT (title, edition, publication_year) DO NOTHING \
             RETURNING id",
        )
        .bind(&book.title)
        .bind(book.edition as i16)
        .bind(book.publication_year as i32)
        .fetch_optional(conn)
        .await
        .map_err(Self::classify_write)?;

        match id {
            Some(id) => {
                info!("Created book: {} ({})", book.title, id);
                Ok(BookID(id))
            }
            None => Err(BookError::AlreadyExists),
        }
    }

    /// Apply only the supplied scalar fields. An empty update never reaches
    /// the database.
    pub(crate) async fn update_on(
        conn: &mut PgConnection,
        id: BookID,
        update: &BookUpdate,
    ) -> Result<(), BookError> {
        if update.is_empty() {
            return Ok(());
        }

        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE books SET ");
        let mut fields = qb.separated(", ");

        if let Some(title) = &update.title {
            fields.push("title = ").push_bind_unseparated(title.clone());
        }
        if let Some(edition) = update.edition {
            fields
                .push("edition = ")
                .push_bind_unseparated(edition as i16);
        }
        if let Some(year) = update.publication_year {
            fields
                .push("publication_year = ")
                .push_bind_unseparated(year as i32);
        }

        qb.push(" WHERE id = ").push_bind(id.to_uuid());

        let result = qb
            .build()
            .execute(conn)
            .await
            .map_err(Self::classify_write)?;

        if result.rows_affected() == 0 {
            return Err(BookError::NothingToUpdate);
        }

        Ok(())
    }

    async fn fetch_books(
        &self,
        mut qb: QueryBuilder<'_, Postgres>,
    ) -> Result<Vec<BookWithAuthors>, BookError> {
        let rows: Vec<BookWithAuthorsRow> = qb
            .build_query_as()
            .fetch_all(self.pool())
            .await
            .map_err(BookError::Storage)?;

        Ok(rows.into_iter().map(BookWithAuthors::from).collect())
    }
}

#[async_trait]
impl BooksRepository for PostgresBooksRepository {
    async fn create(&self, book: &NewBook) -> Result<BookID, BookError> {
        let mut conn = self.pool().acquire().await.map_err(BookError::Storage)?;
        Self::insert_on(&mut conn, book).await
    }

    async fn get_all(&self) -> Result<Vec<BookWithAuthors>, BookError> {
        self.get_by_query(&BookQuery::default()).await
    }

    async fn get_by_query(&self, query: &BookQuery) -> Result<Vec<BookWithAuthors>, BookError> {
        let mut qb = QueryBuilder::new(BOOK_WITH_AUTHORS_SELECT);
        query.push_predicate(&mut qb);
        qb.push(BOOK_GROUP_BY);
        qb.push(" ORDER BY b.id");

        self.fetch_books(qb).await
    }

    async fn get_by_id(&self, id: BookID) -> Result<BookWithAuthors, BookError> {
        let mut qb = QueryBuilder::new(BOOK_WITH_AUTHORS_SELECT);
        qb.push(" WHERE b.id = ").push_bind(id.to_uuid());
        qb.push(BOOK_GROUP_BY);

        let row: Option<BookWithAuthorsRow> = qb
            .build_query_as()
            .fetch_optional(self.pool())
            .await
            .map_err(BookError::Storage)?;

        row.map(BookWithAuthors::from).ok_or(BookError::NotFound)
    }

    async fn get_by_author(&self, author_id: AuthorID) -> Result<Vec<BookWithAuthors>, BookError> {
        let mut qb = QueryBuilder::new(BOOK_WITH_AUTHORS_SELECT);
        qb.push(
            " WHERE EXISTS (SELECT 1 FROM book_author rel \
              WHERE rel.book_id = b.id AND rel.author_id = ",
        )
        .push_bind(author_id.to_uuid())
        .push(")");
        qb.push(BOOK_GROUP_BY);
        qb.push(" ORDER BY b.id");

        self.fetch_books(qb).await
    }

    async fn update(&self, id: BookID, update: &BookUpdate) -> Result<(), BookError> {
        if update.is_empty() {
            return Ok(());
        }

        let mut conn = self.pool().acquire().await.map_err(BookError::Storage)?;
        Self::update_on(&mut conn, id, update).await
    }

    async fn delete(&self, id: BookID) -> Result<(), BookError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool())
            .await
            .map_err(BookError::Storage)?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound);
        }

        info!("Deleted book {}", id);
        Ok(())
    }
}
