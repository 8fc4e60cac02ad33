use anyhow::Result;
use sqlx::PgPool;

use estante_core::database::ports::{AuthorsRepository, BookAuthorsRepository, BooksRepository};
use estante_core::database::repositories::{
    PostgresAuthorsRepository, PostgresBookAuthorsRepository, PostgresBooksRepository,
};
use estante_core::error::BookError;
use estante_core::query::BookQuery;
use estante_model::{BookID, BookUpdate, NewBook};

fn new_book(title: &str, edition: u16, publication_year: u16) -> NewBook {
    NewBook {
        title: title.to_string(),
        edition,
        publication_year,
    }
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn natural_key_creation_is_idempotent(pool: PgPool) -> Result<()> {
    let repo = PostgresBooksRepository::new(pool.clone());

    let book = new_book("Python Fluente", 1, 2015);
    repo.create(&book).await?;

    let err = repo.create(&book).await.unwrap_err();
    assert!(matches!(err, BookError::AlreadyExists));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 1);

    Ok(())
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn same_title_with_different_edition_is_a_new_book(pool: PgPool) -> Result<()> {
    let repo = PostgresBooksRepository::new(pool);

    repo.create(&new_book("Python Fluente", 1, 2015)).await?;
    repo.create(&new_book("Python Fluente", 2, 2015)).await?;

    assert_eq!(repo.get_all().await?.len(), 2);

    Ok(())
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn book_without_relationships_has_an_empty_author_list(pool: PgPool) -> Result<()> {
    let repo = PostgresBooksRepository::new(pool);

    let id = repo.create(&new_book("Dom Casmurro", 1, 1899)).await?;

    let book = repo.get_by_id(id).await?;
    assert!(book.authors.is_empty());

    let all = repo.get_all().await?;
    assert_eq!(all.len(), 1);
    assert!(all[0].authors.is_empty());

    Ok(())
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn get_by_id_aggregates_author_names(pool: PgPool) -> Result<()> {
    let authors = PostgresAuthorsRepository::new(pool.clone());
    let books = PostgresBooksRepository::new(pool.clone());
    let relationships = PostgresBookAuthorsRepository::new(pool);

    let author_id = authors.create("Luciano Ramalho").await?;
    let book_id = books.create(&new_book("Python Fluente", 1, 2015)).await?;
    relationships.create(book_id, author_id).await?;

    let book = books.get_by_id(book_id).await?;
    assert_eq!(book.title, "Python Fluente");
    assert_eq!(book.authors, vec!["Luciano Ramalho".to_string()]);

    Ok(())
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn get_by_id_of_unknown_book_is_not_found(pool: PgPool) -> Result<()> {
    let repo = PostgresBooksRepository::new(pool);

    let err = repo.get_by_id(BookID::new()).await.unwrap_err();
    assert!(matches!(err, BookError::NotFound));

    Ok(())
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn query_composes_equality_over_present_fields(pool: PgPool) -> Result<()> {
    let repo = PostgresBooksRepository::new(pool);

    repo.create(&new_book("Python Fluente", 1, 2015)).await?;
    repo.create(&new_book("Python Fluente", 2, 2015)).await?;
    repo.create(&new_book("Vidas Secas", 2, 2015)).await?;
    repo.create(&new_book("the Rust Programming Language", 1, 2018))
        .await?;

    let query = BookQuery {
        edition: Some(2),
        publication_year: Some(2015),
        ..Default::default()
    };
    let hits = repo.get_by_query(&query).await?;
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|b| b.edition == 2 && b.publication_year == 2015));

    let query = BookQuery {
        title: Some("Python Fluente".into()),
        ..Default::default()
    };
    assert_eq!(repo.get_by_query(&query).await?.len(), 2);

    Ok(())
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn empty_query_is_equivalent_to_get_all(pool: PgPool) -> Result<()> {
    let repo = PostgresBooksRepository::new(pool);

    repo.create(&new_book("Python Fluente", 1, 2015)).await?;
    repo.create(&new_book("Dom Casmurro", 1, 1899)).await?;

    let all = repo.get_all().await?;
    let queried = repo.get_by_query(&BookQuery::default()).await?;
    assert_eq!(all, queried);
    assert_eq!(all.len(), 2);

    Ok(())
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn get_by_author_keeps_each_books_full_author_list(pool: PgPool) -> Result<()> {
    let authors = PostgresAuthorsRepository::new(pool.clone());
    let books = PostgresBooksRepository::new(pool.clone());
    let relationships = PostgresBookAuthorsRepository::new(pool);

    let first = authors.create("Ana Author").await?;
    let second = authors.create("Bruno Author").await?;

    let shared = books.create(&new_book("Co-written", 1, 2020)).await?;
    relationships.create(shared, first).await?;
    relationships.create(shared, second).await?;

    let solo = books.create(&new_book("Solo Work", 1, 2021)).await?;
    relationships.create(solo, second).await?;

    books.create(&new_book("Orphan Book", 1, 2022)).await?;

    let hits = books.get_by_author(first).await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(
        hits[0].authors,
        vec!["Ana Author".to_string(), "Bruno Author".to_string()]
    );

    let hits = books.get_by_author(second).await?;
    assert_eq!(hits.len(), 2);

    Ok(())
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn partial_update_touches_only_supplied_fields(pool: PgPool) -> Result<()> {
    let repo = PostgresBooksRepository::new(pool);

    let id = repo.create(&new_book("Python Fluente", 1, 2015)).await?;

    let update = BookUpdate {
        edition: Some(2),
        publication_year: Some(2023),
        ..Default::default()
    };
    repo.update(id, &update).await?;

    let book = repo.get_by_id(id).await?;
    assert_eq!(book.title, "Python Fluente");
    assert_eq!(book.edition, 2);
    assert_eq!(book.publication_year, 2023);

    Ok(())
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn update_of_unknown_book_reports_nothing_to_update(pool: PgPool) -> Result<()> {
    let repo = PostgresBooksRepository::new(pool);

    let update = BookUpdate {
        edition: Some(2),
        ..Default::default()
    };
    let err = repo.update(BookID::new(), &update).await.unwrap_err();
    assert!(matches!(err, BookError::NothingToUpdate));

    Ok(())
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn update_onto_an_existing_natural_key_reports_already_exists(pool: PgPool) -> Result<()> {
    let repo = PostgresBooksRepository::new(pool);

    repo.create(&new_book("Python Fluente", 1, 2015)).await?;
    let id = repo.create(&new_book("Python Fluente", 2, 2015)).await?;

    let update = BookUpdate {
        edition: Some(1),
        ..Default::default()
    };
    let err = repo.update(id, &update).await.unwrap_err();
    assert!(matches!(err, BookError::AlreadyExists));

    Ok(())
}

#[sqlx::test(migrator = "estante_core::MIGRATOR")]
async fn delete_of_unknown_book_is_not_found(pool: PgPool) -> Result<()> {
    let repo = PostgresBooksRepository::new(pool);

    let err = repo.delete(BookID::new()).await.unwrap_err();
    assert!(matches!(err, BookError::NotFound));

    Ok(())
}
