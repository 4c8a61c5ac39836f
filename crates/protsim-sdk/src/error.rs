//! Error types for the protsim SDK

use protsim::{GraphError, PipelineError};
use thiserror::Error;

/// Errors that can occur when talking to the graph store
#[derive(Error, Debug)]
pub enum SdkError {
    /// Store unreachable or unhealthy; fatal for a batch
    #[error("Connection error: {0}")]
    Connection(String),

    /// A single node/relationship upsert failed
    #[error("Write failed for {target}: {reason}")]
    Write { target: String, reason: String },

    /// Query rejected by the server
    #[error("Query error: {0}")]
    Query(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Embedded store rejected an operation
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Table preparation failed
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl SdkError {
    pub fn write(target: impl Into<String>, reason: impl ToString) -> Self {
        SdkError::Write {
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the store itself is gone, as opposed to one bad operation
    pub fn is_connection(&self) -> bool {
        match self {
            SdkError::Connection(_) => true,
            SdkError::Http(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_message() {
        let err = SdkError::write("ABC1 -[SIMILARTO]- CDC28", "no matching endpoints");
        assert_eq!(
            err.to_string(),
            "Write failed for ABC1 -[SIMILARTO]- CDC28: no matching endpoints"
        );
        assert!(!err.is_connection());
        assert!(SdkError::Connection("refused".into()).is_connection());
    }

    #[test]
    fn test_pipeline_errors_pass_through() {
        let err: SdkError = PipelineError::Lookup { row: 4, name: "ABC1".into() }.into();
        assert_eq!(err.to_string(), "Lookup error at row 4: no systematic name for protein 'ABC1'");
    }
}
