use thiserror::Error;

/// Errors raised by the classifier, the evaluator and the search engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("classifier must be trained before prediction")]
    NotTrained,
    #[error("instance has {actual} features but the training data has {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("leave-one-out evaluation needs at least 2 instances, found {0}")]
    InsufficientData(usize),
}

impl SelectionError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SelectionError::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SelectionError>;
