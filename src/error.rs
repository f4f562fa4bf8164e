use thiserror::Error;

/// Errors returned by the clustering primitives.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("numeric conversion failed: {0}")]
    Conversion(&'static str),
}

pub type Result<T> = std::result::Result<T, ClusterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ClusterError::DimensionMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 2, got 3");

        let err = ClusterError::IndexOutOfRange { index: 5, len: 2 };
        assert_eq!(err.to_string(), "index 5 out of range for length 2");

        let err = ClusterError::InvalidInput("k must be greater than 0".into());
        assert_eq!(err.to_string(), "invalid input: k must be greater than 0");
    }
}
