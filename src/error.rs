use thiserror::Error;

/// Message shown in place of the tree when a batch cannot be parsed
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON format";

/// Errors raised while turning raw blobs into records
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A text blob was not valid JSON. The whole batch is rejected.
    #[error("blob {index} is not valid JSON: {source}")]
    Malformed {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl ExtractError {
    /// The single message surfaced to the end user for a rejected batch
    pub fn user_message(&self) -> &'static str {
        match self {
            ExtractError::Malformed { .. } => INVALID_JSON_MESSAGE,
        }
    }

    /// Position of the offending blob in the input batch
    pub fn blob_index(&self) -> usize {
        match self {
            ExtractError::Malformed { index, .. } => *index,
        }
    }
}

/// Errors raised while parsing a `RECORD:PATH` node address
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("expected RECORD:PATH, got '{0}'")]
    MissingSeparator(String),

    #[error("record number must be a positive integer, got '{0}'")]
    InvalidRecord(String),

    #[error("node path is empty")]
    Empty,
}
