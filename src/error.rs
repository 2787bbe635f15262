use thiserror::Error;

/// Main error type for kgexplain
#[derive(Error, Debug)]
pub enum KgexplainError {
    /// Malformed argument (concept, template, filter)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The batch execution engine failed; the query is aborted
    #[error("Execution error: {0}")]
    Execution(String),

    /// A result record does not agree with the provenance recorded at binding time
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// Relation-template index could not be built
    #[error("Meta-KG error: {0}")]
    MetaKg(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Convenient Result type using KgexplainError
pub type Result<T> = std::result::Result<T, KgexplainError>;
