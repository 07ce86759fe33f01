//! Error types for site-namespace

/// Result type for site-namespace operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in site-namespace operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No leaf or nested store exists at the path
    #[error("Path not found: {path}")]
    NotFound { path: String },

    /// A non-store leaf blocks traversal through an intermediate segment
    #[error("Cannot traverse scalar at `{segment}` in path `{path}`")]
    Conflict { path: String, segment: String },

    /// Empty path or empty path segment
    #[error("Invalid path: `{path}`")]
    InvalidPath { path: String },
}
