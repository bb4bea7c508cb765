use std::fmt;

/// Failure modes for catalog lookups and equip attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No catalog entry exists for this id; the equip/lookup is refused and
    /// the caller's prior gear is left untouched.
    UnknownId(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::UnknownId(id) => write!(f, "unknown item id '{id}'"),
        }
    }
}

impl std::error::Error for CatalogError {}
