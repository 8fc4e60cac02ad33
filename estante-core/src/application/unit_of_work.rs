use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use crate::database::ports::{AuthorsRepository, BookAuthorsRepository, BooksRepository};
use crate::database::postgres::PostgresDatabase;

/// Aggregates the catalog's repository ports for application callers.
///
/// The adapter layer talks to the stores through this facade instead of the
/// concrete Postgres types, which keeps construction and testing
/// straightforward.
#[derive(Clone)]
pub struct CatalogUnitOfWork {
    pub authors: Arc<dyn AuthorsRepository>,
    pub books: Arc<dyn BooksRepository>,
    pub book_authors: Arc<dyn BookAuthorsRepository>,
}

impl fmt::Debug for CatalogUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogUnitOfWork")
            .field("authors", &type_name_of_val(self.authors.as_ref()))
            .field("books", &type_name_of_val(self.books.as_ref()))
            .field(
                "book_authors",
                &type_name_of_val(self.book_authors.as_ref()),
            )
            .finish()
    }
}

impl CatalogUnitOfWork {
    /// Compose all Postgres-backed repositories into a unit of work.
    pub fn from_postgres(db: &PostgresDatabase) -> Self {
        CatalogUnitOfWork {
            authors: Arc::new(db.authors().clone()),
            books: Arc::new(db.books().clone()),
            book_authors: Arc::new(db.book_authors().clone()),
        }
    }
}

#[derive(Default)]
pub struct CatalogUnitOfWorkBuilder {
    authors: Option<Arc<dyn AuthorsRepository>>,
    books: Option<Arc<dyn BooksRepository>>,
    book_authors: Option<Arc<dyn BookAuthorsRepository>>,
}

impl fmt::Debug for CatalogUnitOfWorkBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogUnitOfWorkBuilder")
            .field("authors", &self.authors.is_some())
            .field("books", &self.books.is_some())
            .field("book_authors", &self.book_authors.is_some())
            .finish()
    }
}

impl CatalogUnitOfWorkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_authors(mut self, repo: Arc<dyn AuthorsRepository>) -> Self {
        self.authors = Some(repo);
        self
    }

    pub fn with_books(mut self, repo: Arc<dyn BooksRepository>) -> Self {
        self.books = Some(repo);
        self
    }

    pub fn with_book_authors(mut self, repo: Arc<dyn BookAuthorsRepository>) -> Self {
        self.book_authors = Some(repo);
        self
    }

    /// Build a validated unit of work. Keep errors simple for ease of use
    /// at call sites.
    pub fn build(self) -> Result<CatalogUnitOfWork, String> {
        Ok(CatalogUnitOfWork {
            authors: self
                .authors
                .ok_or_else(|| "missing AuthorsRepository".to_string())?,
            books: self
                .books
                .ok_or_else(|| "missing BooksRepository".to_string())?,
            book_authors: self
                .book_authors
                .ok_or_else(|| "missing BookAuthorsRepository".to_string())?,
        })
    }
}
