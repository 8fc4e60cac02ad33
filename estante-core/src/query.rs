//! Dynamic lookup predicates over the book table.
//!
//! A [`BookQuery`] holds the caller's optional filter fields and composes
//! them into an `AND` of equality conditions, in the fixed order `title`,
//! `edition`, `publication_year`. Values are always bound as query
//! parameters; nothing caller-supplied is ever spliced into the SQL text.

use sqlx::{Postgres, QueryBuilder};

/// Optional equality filters over books. An absent field contributes no
/// condition; a fully absent query selects every book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub title: Option<String>,
    pub edition: Option<u16>,
    pub publication_year: Option<u16>,
}

impl BookQuery {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.edition.is_none() && self.publication_year.is_none()
    }

    /// Append the WHERE clause for the present fields onto `qb`. Appends
    /// nothing when the query is empty.
    pub fn push_predicate(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        let mut sep = " WHERE ";

        if let Some(title) = &self.title {
            qb.push(sep).push("b.title = ").push_bind(title.clone());
            sep = " AND ";
        }

        if let Some(edition) = self.edition {
            qb.push(sep).push("b.edition = ").push_bind(edition as i16);
            sep = " AND ";
        }

        if let Some(year) = self.publication_year {
            qb.push(sep)
                .push("b.publication_year = ")
                .push_bind(year as i32);
        }
    }
}
