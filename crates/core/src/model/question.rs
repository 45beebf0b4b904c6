use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::{answer::AnswerCode, ids::ModuleName};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question must offer at least one option")]
    NoOptions,

    #[error("option {position} has no recognisable answer label: {option:?}")]
    UnrecognizedOption { position: usize, option: String },

    #[error("options {first} and {second} both map to answer {code}")]
    DuplicateAnswerCode {
        first: usize,
        second: usize,
        code: AnswerCode,
    },

    #[error("correct answer {0} does not match any option")]
    AnswerNotInOptions(AnswerCode),
}

//
// ─── KIND ──────────────────────────────────────────────────────────────────────
//

/// The two question formats a practice exam draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Single-answer multiple choice.
    Choice,
    /// Binary true/false.
    Judge,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 2] = [QuestionKind::Choice, QuestionKind::Judge];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Choice => "choice",
            QuestionKind::Judge => "judge",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated, immutable question from the bank.
///
/// Every option carries a distinct answer code and the correct answer is one
/// of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    kind: QuestionKind,
    correct_answer: AnswerCode,
    options: Vec<String>,
    codes: Vec<AnswerCode>,
    explanation: Option<String>,
    module: ModuleName,
}

impl Question {
    /// Creates a question in the default module without an explanation.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the text is blank, no options are given,
    /// an option cannot be labelled, two options share a code, or the correct
    /// answer is not among the option codes.
    pub fn new(
        text: impl Into<String>,
        kind: QuestionKind,
        correct_answer: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }

        let mut codes = Vec::with_capacity(options.len());
        for (position, option) in options.iter().enumerate() {
            let code = AnswerCode::from_option(kind, option).ok_or_else(|| {
                QuestionError::UnrecognizedOption {
                    position,
                    option: option.clone(),
                }
            })?;
            if let Some(first) = codes.iter().position(|c| c == &code) {
                return Err(QuestionError::DuplicateAnswerCode {
                    first,
                    second: position,
                    code,
                });
            }
            codes.push(code);
        }

        let correct_answer = AnswerCode::new(correct_answer);
        if !codes.contains(&correct_answer) {
            return Err(QuestionError::AnswerNotInOptions(correct_answer));
        }

        Ok(Self {
            text,
            kind,
            correct_answer,
            options,
            codes,
            explanation: None,
            module: ModuleName::default(),
        })
    }

    /// Attach an explanation shown after submission. Blank text is dropped.
    #[must_use]
    pub fn with_explanation(mut self, explanation: Option<String>) -> Self {
        self.explanation = explanation.filter(|e| !e.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_module(mut self, module: ModuleName) -> Self {
        self.module = module;
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn correct_answer(&self) -> &AnswerCode {
        &self.correct_answer
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Answer codes in option order.
    #[must_use]
    pub fn codes(&self) -> &[AnswerCode] {
        &self.codes
    }

    /// Option text paired with the code it represents.
    pub fn labelled_options(&self) -> impl Iterator<Item = (&str, &AnswerCode)> {
        self.options
            .iter()
            .map(String::as_str)
            .zip(self.codes.iter())
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn module(&self) -> &ModuleName {
        &self.module
    }

    /// True when `code` is one of this question's options.
    #[must_use]
    pub fn offers(&self, code: &AnswerCode) -> bool {
        self.codes.contains(code)
    }

    #[must_use]
    pub fn is_correct(&self, code: &AnswerCode) -> bool {
        &self.correct_answer == code
    }
}
