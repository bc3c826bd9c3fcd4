//! Error types for askdoc

use thiserror::Error;

/// Result type alias for askdoc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in askdoc operations
#[derive(Error, Debug)]
pub enum Error {
    /// No document bytes were supplied to ingest
    #[error("no file provided")]
    NoFileProvided,

    /// The source document could not be turned into text
    #[error("extraction error: {0}")]
    Extraction(String),

    /// A required request field was absent or blank
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    /// No document is registered under the given identifier
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// The completion endpoint failed or returned nothing usable
    #[error("completion error: {0}")]
    Completion(String),

    /// Failed to store or retrieve a document record
    #[error("store error: {0}")]
    Store(String),

    /// Invalid input provided
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
