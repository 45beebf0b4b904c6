use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::question::QuestionKind;

const TRUE_LABELS: &[&str] = &["正确", "对", "True"];
const FALSE_LABELS: &[&str] = &["错误", "错", "False"];

/// Canonical code a user selects for an option (`A`, `B`, `T`, `F`, ...).
///
/// Codes are compared with plain string equality; they are only normalised
/// when derived from option text.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerCode(String);

impl AnswerCode {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Code for the "true" option of a judge question.
    #[must_use]
    pub fn truth() -> Self {
        Self("T".to_owned())
    }

    /// Code for the "false" option of a judge question.
    #[must_use]
    pub fn falsehood() -> Self {
        Self("F".to_owned())
    }

    /// Derives the answer code represented by a displayed option.
    ///
    /// - Choice options are labelled by their leading character: `"b. Bean"` -> `B`.
    /// - Judge options use fixed texts that map to `T` / `F`.
    ///
    /// Returns `None` when the option carries no recognisable label.
    #[must_use]
    pub fn from_option(kind: QuestionKind, option: &str) -> Option<Self> {
        match kind {
            QuestionKind::Choice => {
                let first = option.trim_start().chars().next()?;
                if first.is_whitespace() {
                    return None;
                }
                Some(Self(first.to_uppercase().collect()))
            }
            QuestionKind::Judge => {
                let text = option.trim();
                if TRUE_LABELS.contains(&text) {
                    Some(Self::truth())
                } else if FALSE_LABELS.contains(&text) {
                    Some(Self::falsehood())
                } else {
                    None
                }
            }
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AnswerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnswerCode({:?})", self.0)
    }
}

impl fmt::Display for AnswerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnswerCode {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}
