//! Compound catalog workflows spanning the book and relationship stores.
//!
//! Each workflow runs inside a single Postgres transaction: a failure at any
//! step rolls back every prior step, so a book row never outlives a failed
//! author set and an author-set replacement is all-or-nothing.

use sqlx::PgPool;
use tracing::info;

use crate::database::repositories::{PostgresBookAuthorsRepository, PostgresBooksRepository};
use crate::error::CatalogError;
use estante_model::{AuthorID, BookID, BookUpdate, NewBook};

/// Orchestrates multi-entity writes over books and their author
/// relationships.
#[derive(Clone, Debug)]
pub struct CatalogService {
    pool: PgPool,
}

impl CatalogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a book and relate it to each supplied author, in input order.
    ///
    /// The book insert and every relationship insert commit together; the
    /// first failing store's error surfaces unchanged and undoes the whole
    /// operation.
    pub async fn create_book(
        &self,
        book: &NewBook,
        authors: &[AuthorID],
    ) -> Result<BookID, CatalogError> {
        let mut tx = self.pool.begin().await?;

        let book_id = PostgresBooksRepository::insert_on(&mut tx, book).await?;

        for author_id in authors {
            PostgresBookAuthorsRepository::insert_on(&mut tx, book_id, *author_id).await?;
        }

        tx.commit().await?;

        info!(
            "Created book {} with {} associated authors",
            book_id,
            authors.len()
        );
        Ok(book_id)
    }

    /// Update a book's scalar fields and/or replace its author set.
    ///
    /// A non-empty `authors` list fully replaces the existing set:
    /// delete-all-for-book, then recreate one row per id in input order,
    /// never a merge. With an empty update and an empty author list the
    /// store is not contacted at all.
    pub async fn update_book(
        &self,
        id: BookID,
        update: &BookUpdate,
        authors: &[AuthorID],
    ) -> Result<(), CatalogError> {
        if update.is_empty() && authors.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        if !update.is_empty() {
            PostgresBooksRepository::update_on(&mut tx, id, update).await?;
        }

        if !authors.is_empty() {
            PostgresBookAuthorsRepository::delete_for_book_on(&mut tx, id).await?;
            for author_id in authors {
                PostgresBookAuthorsRepository::insert_on(&mut tx, id, *author_id).await?;
            }
        }

        tx.commit().await?;

        info!("Updated book {}", id);
        Ok(())
    }
}
