//! Database abstraction for the catalog: ports, the Postgres adapter, and
//! the pool composition root.

pub mod ports;
pub mod postgres;
pub mod repositories;

pub use postgres::PostgresDatabase;
