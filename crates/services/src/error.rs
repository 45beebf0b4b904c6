//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuizSessionError;
use storage::StorageError;

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("no questions were selected (requested {choice} choice, {judge} judge)")]
    EmptySelection { choice: usize, judge: usize },
    #[error(transparent)]
    Session(#[from] QuizSessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl QuizServiceError {
    /// True for the one failure a user can retry from the error screen.
    #[must_use]
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, Self::EmptySelection { .. })
    }
}

/// Returned when parsing an unknown sampling strategy name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown sampling strategy: {0} (expected `stratified` or `uniform`)")]
pub struct UnknownStrategy(pub String);
