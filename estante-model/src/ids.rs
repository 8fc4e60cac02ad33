use uuid::Uuid;

/// Strongly typed ID for authors
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuthorID(pub Uuid);

impl Default for AuthorID {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthorID {
    pub fn new() -> Self {
        AuthorID(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for AuthorID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for AuthorID {
    fn from(id: Uuid) -> Self {
        AuthorID(id)
    }
}

impl std::fmt::Display for AuthorID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for books
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BookID(pub Uuid);

impl Default for BookID {
    fn default() -> Self {
        Self::new()
    }
}

impl BookID {
    pub fn new() -> Self {
        BookID(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for BookID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for BookID {
    fn from(id: Uuid) -> Self {
        BookID(id)
    }
}

impl std::fmt::Display for BookID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
