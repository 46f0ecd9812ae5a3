// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised while reading or writing the signup database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The database file could not be opened.
    Connection(String),
    /// The database path is not valid UTF-8.
    InvalidPath(String),
    /// Applying the schema migrations failed.
    Migration(String),
    /// A statement failed to execute.
    Query(String),
    /// A settings value or team list could not be encoded or decoded.
    Serialization(String),
    /// A stored row holds a value the domain rejects.
    CorruptRecord {
        /// The table the row came from.
        table: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// No row matched.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(msg) => write!(f, "Could not open database: {msg}"),
            Self::InvalidPath(path) => write!(f, "Database path is not valid UTF-8: {path}"),
            Self::Migration(msg) => write!(f, "Schema migration failed: {msg}"),
            Self::Query(msg) => write!(f, "Query failed: {msg}"),
            Self::Serialization(msg) => write!(f, "Could not encode stored value: {msg}"),
            Self::CorruptRecord { table, reason } => {
                write!(f, "Corrupt record in {table}: {reason}")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        if matches!(err, diesel::result::Error::NotFound) {
            return Self::NotFound(String::from("no matching row"));
        }
        Self::Query(err.to_string())
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::Connection(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
