//! Fetch error types.

use std::fmt;
use std::time::Duration;

/// The remote a fetch was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependency {
    /// Product metadata.
    Catalog,
    /// Available units.
    Stock,
}

impl Dependency {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Stock => "stock",
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error type for fetch operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {path}")]
    Http { status: u16, path: String },

    #[error("{dependency} fetch timed out after {after:?}")]
    Timeout {
        dependency: Dependency,
        after: Duration,
    },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl FetchError {
    /// A 404 for `path`.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::Http {
            status: 404,
            path: path.into(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Deserialization(e.to_string())
    }
}
