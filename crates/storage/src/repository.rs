use std::path::PathBuf;

use quiz_core::model::{Question, QuestionBank, QuestionError};
use thiserror::Error;

/// Errors surfaced by question bank sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("failed to read question bank {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed question bank: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid question at position {position}: {source}")]
    InvalidRecord {
        position: usize,
        #[source]
        source: QuestionError,
    },
}

/// Source of the read-only question bank, loaded once at start-up.
pub trait QuestionBankSource: Send + Sync {
    /// Short label for logs (a path, `embedded`, ...).
    fn describe(&self) -> String;

    /// Load and validate every question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bank cannot be read, parsed, or contains an
    /// invalid question.
    fn load(&self) -> Result<QuestionBank, StorageError>;
}

/// Bank held in memory, for tests and prototyping.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    questions: Vec<Question>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

impl QuestionBankSource for InMemorySource {
    fn describe(&self) -> String {
        format!("in-memory ({} questions)", self.questions.len())
    }

    fn load(&self) -> Result<QuestionBank, StorageError> {
        Ok(QuestionBank::new(self.questions.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionKind;

    #[test]
    fn in_memory_source_returns_its_questions() {
        let q = Question::new(
            "Servlets run inside a container.",
            QuestionKind::Judge,
            "T",
            vec!["正确".into(), "错误".into()],
        )
        .unwrap();
        let source = InMemorySource::new(vec![q.clone()]);

        let bank = source.load().unwrap();
        assert_eq!(bank.questions(), &[q]);
        assert_eq!(source.describe(), "in-memory (1 questions)");
    }
}
