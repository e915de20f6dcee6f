//! Dispatch error types

use thiserror::Error;

/// Errors returned by the dispatch adapters.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Validation, measuring or partitioning failed; nothing was sent.
    #[error(transparent)]
    Partition(#[from] jsonbatch_core::Error),

    /// The sink accepted the call but refused some entries of a batch.
    #[error("batch {batch} rejected by sink: {reason}")]
    Rejected { batch: usize, reason: String },

    /// Transmission failed; the sink's error is passed through unchanged.
    #[error(transparent)]
    Sink(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DispatchError::from(jsonbatch_core::Error::BatchTooSmall {
            start: 0,
            count: 5,
            min: 10,
        });
        assert!(err.to_string().contains("minimum is 10"));

        let err = DispatchError::Rejected {
            batch: 2,
            reason: "1: message too long".into(),
        };
        assert_eq!(err.to_string(), "batch 2 rejected by sink: 1: message too long");

        let err = DispatchError::from(anyhow::anyhow!("connection reset"));
        assert_eq!(err.to_string(), "connection reset");
    }
}
