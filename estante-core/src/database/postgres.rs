use std::fmt;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::catalog::CatalogService;
use crate::database::repositories::{
    PostgresAuthorsRepository, PostgresBookAuthorsRepository, PostgresBooksRepository,
};
use crate::error::CatalogError;

/// Composition root for the Postgres-backed catalog: owns the pool and the
/// concrete repositories built on it.
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    authors: PostgresAuthorsRepository,
    books: PostgresBooksRepository,
    book_authors: PostgresBookAuthorsRepository,
    catalog: CatalogService,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn new(connection_string: &str) -> Result<Self, CatalogError> {
        // Get pool configuration from the environment or use defaults
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(10);

        let min_connections = std::env::var("DB_MIN_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(2);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .idle_timeout(std::time::Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(connection_string)
            .await
            .map_err(CatalogError::Storage)?;

        info!(
            "Database pool initialized with max_connections={}, min_connections={}",
            max_connections, min_connections
        );

        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool, e.g. one handed in by the test harness.
    pub fn from_pool(pool: PgPool) -> Self {
        let authors = PostgresAuthorsRepository::new(pool.clone());
        let books = PostgresBooksRepository::new(pool.clone());
        let book_authors = PostgresBookAuthorsRepository::new(pool.clone());
        let catalog = CatalogService::new(pool.clone());

        PostgresDatabase {
            pool,
            authors,
            books,
            book_authors,
            catalog,
        }
    }

    /// Apply all pending catalog migrations.
    pub async fn migrate(&self) -> Result<(), CatalogError> {
        crate::MIGRATOR
            .run(&self.pool)
            .await
            .map_err(sqlx::Error::from)
            .map_err(CatalogError::Storage)?;

        info!("Catalog migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn authors(&self) -> &PostgresAuthorsRepository {
        &self.authors
    }

    pub fn books(&self) -> &PostgresBooksRepository {
        &self.books
    }

    pub fn book_authors(&self) -> &PostgresBookAuthorsRepository {
        &self.book_authors
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }
}
