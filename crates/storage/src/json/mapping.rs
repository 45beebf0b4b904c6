use quiz_core::model::{ModuleName, Question, QuestionBank, QuestionKind};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

/// On-disk shape of one bank entry.
///
/// Field names follow the bank files (`question`, `type`, `answer`), which
/// differ from the domain names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub answer: String,
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            question: question.text().to_owned(),
            kind: question.kind(),
            answer: question.correct_answer().as_str().to_owned(),
            options: question.options().to_vec(),
            explanation: question.explanation().map(str::to_owned),
            module: (!question.module().is_default()).then(|| question.module().to_string()),
        }
    }

    /// Validate the record into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidRecord` tagged with `position` when the
    /// record fails question validation.
    pub fn into_question(self, position: usize) -> Result<Question, StorageError> {
        let module = ModuleName::from_tag(self.module.as_deref());
        Question::new(self.question, self.kind, self.answer, self.options)
            .map(|q| q.with_explanation(self.explanation).with_module(module))
            .map_err(|source| StorageError::InvalidRecord { position, source })
    }
}

/// Parse a JSON array of records into a validated bank.
///
/// # Errors
///
/// Returns `StorageError::Parse` for malformed JSON and
/// `StorageError::InvalidRecord` for the first record that fails validation.
pub fn parse_bank(raw: &str) -> Result<QuestionBank, StorageError> {
    let records: Vec<QuestionRecord> = serde_json::from_str(raw)?;
    records
        .into_iter()
        .enumerate()
        .map(|(position, record)| record.into_question(position))
        .collect()
}
