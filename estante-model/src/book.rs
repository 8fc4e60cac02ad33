use crate::ids::BookID;

/// Creation payload for a book, already validated by the caller. The triple
/// `(title, edition, publication_year)` is the natural key: at most one row
/// exists per triple, independent of the generated id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewBook {
    pub title: String,
    pub edition: u16,
    pub publication_year: u16,
}

/// A book enriched with the names of its associated authors. A book with no
/// relationship rows carries an empty `authors` list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BookWithAuthors {
    pub id: BookID,
    pub title: String,
    pub edition: u16,
    pub publication_year: u16,
    pub authors: Vec<String>,
}

/// Partial update of a book's scalar fields. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BookUpdate {
    pub title: Option<String>,
    pub edition: Option<u16>,
    pub publication_year: Option<u16>,
}

impl BookUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.edition.is_none() && self.publication_year.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_is_empty_only_without_any_field() {
        assert!(BookUpdate::default().is_empty());

        let update = BookUpdate {
            edition: Some(2),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
