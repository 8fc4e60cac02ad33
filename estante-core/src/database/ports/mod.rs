//! Repository ports (interfaces) for the catalog stores. Implementations
//! live in the Postgres adapter under `database::repositories`.

pub mod authors;
pub mod book_authors;
pub mod books;

pub use authors::AuthorsRepository;
pub use book_authors::BookAuthorsRepository;
pub use books::BooksRepository;
