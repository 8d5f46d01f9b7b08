//! Error types for network construction, inference and training

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    /// Topology or parameter tensors that cannot form a network
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A vector whose length disagrees with the declared width
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NetworkError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        NetworkError::Configuration(message.into())
    }

    /// Returns `Ok(())` when `actual == expected`
    pub(crate) fn check_dimension(context: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(NetworkError::DimensionMismatch {
                context,
                expected,
                actual,
            })
        }
    }
}

pub type Result<T> = std::result::Result<T, NetworkError>;
