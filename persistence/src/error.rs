use std::fmt;

/// Failure modes for loading a save file:
/// refuse to apply, report to caller, leave game state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The file contents did not parse as JSON at all.
    InvalidJson(String),
    /// Parsed JSON, but a required top-level key is missing or malformed
    /// even after migration.
    SchemaValidation(String),
    /// The `version` field does not match any migration step this build
    /// knows how to apply.
    UnknownVersion(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::InvalidJson(msg) => write!(f, "save file is not valid JSON: {msg}"),
            LoadError::SchemaValidation(msg) => write!(f, "save file failed schema validation: {msg}"),
            LoadError::UnknownVersion(v) => write!(f, "save file has unrecognized schema version '{v}'"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Failure modes for writing a save file. Unlike [`LoadError`], these are
/// I/O-boundary failures rather than data-shape failures.
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "save file I/O error: {e}"),
            SaveError::Serialization(e) => write!(f, "failed to serialize save data: {e}"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            SaveError::Serialization(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Serialization(e)
    }
}
