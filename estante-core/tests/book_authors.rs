use anyhow::Result;
use sqlx::PgPool;

use estante_core::database::ports::{AuthorsRepository, BookAuthorsRepository, BooksRepository};
use estante_core::database::repositories::{
    PostgresAuthorsRepository, PostgresBookAuthorsRepository, PostgresBooksRepository,
};
use estante_core::error::RelationshipError;
use estante_model::{AuthorID, BookID, NewBook};

async fn seed_pair(pool: &PgPool) -> Result<(BookID, AuthorID)> {
    let authors = PostgresAuthorsRepository::new(pool.clone());
    let books = PostgresBooksRepository::new(pool.clone());

    let author_id = authors.create("Luciano Ramalho").await?;
    let book_id = books
        .create(&NewBook {
            title: "Python Fluente".into(),
            edition: 1,
            publication_year: 2015,
        })
        .await?;

    Ok((book_id, author_id))
}

async fn relationship_count(pool: &PgPool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM book_author")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn duplicate_pair_reports_already_exists(pool: PgPool) -> Result<()> {
    let (book_id, author_id) = seed_pair(&pool).await?;
    let repo = PostgresBookAuthorsRepository::new(pool.clone());

    repo.create(book_id, author_id).await?;
    let err = repo.create(book_id, author_id).await.unwrap_err();
    assert!(matches!(err, RelationshipError::AlreadyExists));

    assert_eq!(relationship_count(&pool).await?, 1);

    Ok(())
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn delete_for_book_without_rows_is_not_an_error(pool: PgPool) -> Result<()> {
    let repo = PostgresBookAuthorsRepository::new(pool);

    repo.delete_for_book(BookID::new()).await?;

    Ok(())
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn delete_for_book_removes_every_row_for_that_book(pool: PgPool) -> Result<()> {
    let (book_id, author_id) = seed_pair(&pool).await?;
    let authors = PostgresAuthorsRepository::new(pool.clone());
    let repo = PostgresBookAuthorsRepository::new(pool.clone());

    let second_author = authors.create("David Beazley").await?;
    repo.create(book_id, author_id).await?;
    repo.create(book_id, second_author).await?;

    repo.delete_for_book(book_id).await?;
    assert_eq!(relationship_count(&pool).await?, 0);

    Ok(())
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn relating_an_unknown_author_is_a_storage_error(pool: PgPool) -> Result<()> {
    let (book_id, _) = seed_pair(&pool).await?;
    let repo = PostgresBookAuthorsRepository::new(pool);

    let err = repo.create(book_id, AuthorID::new()).await.unwrap_err();
    assert!(matches!(err, RelationshipError::Storage(_)));

    Ok(())
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn deleting_the_book_cascades_to_its_relationships(pool: PgPool) -> Result<()> {
    let (book_id, author_id) = seed_pair(&pool).await?;
    let books = PostgresBooksRepository::new(pool.clone());
    let authors = PostgresAuthorsRepository::new(pool.clone());
    let repo = PostgresBookAuthorsRepository::new(pool.clone());

    repo.create(book_id, author_id).await?;
    books.delete(book_id).await?;

    assert_eq!(relationship_count(&pool).await?, 0);
    // The author itself is untouched by the cascade.
    assert_eq!(authors.get_all().await?.len(), 1);

    Ok(())
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn deleting_the_author_cascades_to_its_relationships(pool: PgPool) -> Result<()> {
    let (book_id, author_id) = seed_pair(&pool).await?;
    let books = PostgresBooksRepository::new(pool.clone());
    let authors = PostgresAuthorsRepository::new(pool.clone());
    let repo = PostgresBookAuthorsRepository::new(pool.clone());

    repo.create(book_id, author_id).await?;
    authors.delete(author_id).await?;

    assert_eq!(relationship_count(&pool).await?, 0);

    let book = books.get_by_id(book_id).await?;
    assert!(book.authors.is_empty());

    Ok(())
}
