pub mod authors;
pub mod book_authors;
pub mod books;

pub use authors::PostgresAuthorsRepository;
pub use book_authors::PostgresBookAuthorsRepository;
pub use books::PostgresBooksRepository;
