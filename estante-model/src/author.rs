use crate::ids::AuthorID;

/// A catalogued author. `name` is unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Author {
    pub id: AuthorID,
    pub name: String,
}
