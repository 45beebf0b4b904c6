use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::model::{
    answer::AnswerCode,
    ids::QuestionIndex,
    question::Question,
    score::ScoreReport,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSessionError {
    #[error("quiz session has no questions")]
    NoQuestions,

    #[error("quiz already submitted")]
    AlreadySubmitted,

    #[error("quiz has not been submitted yet")]
    NotSubmitted,

    #[error("question {index} is out of range (quiz has {len} questions)")]
    InvalidIndex { index: QuestionIndex, len: usize },

    #[error("answer {code} is not an option of question {index}")]
    UnknownOption {
        index: QuestionIndex,
        code: AnswerCode,
    },
}

//
// ─── STATES ────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a quiz. `Submitted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Active,
    Submitted { score: usize },
}

/// How an option should be presented for the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionState {
    Normal,
    Selected,
    Correct,
    CorrectSelected,
    Wrong,
}

impl OptionState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OptionState::Normal => "normal",
            OptionState::Selected => "selected",
            OptionState::Correct => "correct",
            OptionState::CorrectSelected => "correct-selected",
            OptionState::Wrong => "wrong",
        }
    }
}

impl fmt::Display for OptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answered/total counters for the progress header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub answered: usize,
    pub total: usize,
}

impl QuizProgress {
    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.total.saturating_sub(self.answered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Post-submission breakdown for one question. Unanswered counts as incorrect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview<'a> {
    pub index: QuestionIndex,
    pub verdict: Verdict,
    pub selected: Option<&'a AnswerCode>,
    pub correct_answer: &'a AnswerCode,
    pub explanation: Option<&'a str>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One sitting of a practice exam.
///
/// The question list is fixed at creation. Answers can be changed freely
/// while `Active`; `submit` scores them once and freezes the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<Question>,
    answers: BTreeMap<QuestionIndex, AnswerCode>,
    phase: QuizPhase,
}

impl QuizSession {
    /// # Errors
    ///
    /// Returns `QuizSessionError::NoQuestions` if `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizSessionError> {
        if questions.is_empty() {
            return Err(QuizSessionError::NoQuestions);
        }
        Ok(Self {
            questions,
            answers: BTreeMap::new(),
            phase: QuizPhase::Active,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: QuestionIndex) -> Option<&Question> {
        self.questions.get(index.value())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, QuizPhase::Submitted { .. })
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<QuestionIndex, AnswerCode> {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, index: QuestionIndex) -> Option<&AnswerCode> {
        self.answers.get(&index)
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            answered: self.answers.len(),
            total: self.questions.len(),
        }
    }

    /// Number of correct answers; only known once submitted.
    #[must_use]
    pub fn score(&self) -> Option<usize> {
        match self.phase {
            QuizPhase::Active => None,
            QuizPhase::Submitted { score } => Some(score),
        }
    }

    #[must_use]
    pub fn report(&self) -> Option<ScoreReport> {
        self.score()
            .map(|score| ScoreReport::new(score, self.questions.len()))
    }

    /// Record (or replace) the answer for a question.
    ///
    /// # Errors
    ///
    /// Returns `AlreadySubmitted` once the quiz is submitted, `InvalidIndex`
    /// for an index outside the quiz, and `UnknownOption` when the question
    /// does not offer `code`. The stored answers are unchanged on error.
    pub fn select_answer(
        &mut self,
        index: QuestionIndex,
        code: AnswerCode,
    ) -> Result<(), QuizSessionError> {
        if self.is_submitted() {
            return Err(QuizSessionError::AlreadySubmitted);
        }
        let question = self.checked_question(index)?;
        if !question.offers(&code) {
            return Err(QuizSessionError::UnknownOption { index, code });
        }
        self.answers.insert(index, code);
        Ok(())
    }

    /// Score the answers and move to `Submitted`. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns `AlreadySubmitted` if called twice.
    pub fn submit(&mut self) -> Result<ScoreReport, QuizSessionError> {
        if self.is_submitted() {
            return Err(QuizSessionError::AlreadySubmitted);
        }
        let score = self
            .answers
            .iter()
            .filter(|(index, code)| {
                self.questions
                    .get(index.value())
                    .is_some_and(|q| q.is_correct(code))
            })
            .count();
        self.phase = QuizPhase::Submitted { score };
        Ok(ScoreReport::new(score, self.questions.len()))
    }

    /// Display state of one option. Pure query.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIndex` for an index outside the quiz.
    pub fn option_state(
        &self,
        index: QuestionIndex,
        code: &AnswerCode,
    ) -> Result<OptionState, QuizSessionError> {
        let question = self.checked_question(index)?;
        let selected = self.answers.get(&index);
        let is_selected = selected == Some(code);

        let state = match self.phase {
            QuizPhase::Active if is_selected => OptionState::Selected,
            QuizPhase::Active => OptionState::Normal,
            QuizPhase::Submitted { .. } if question.is_correct(code) => {
                if is_selected {
                    OptionState::CorrectSelected
                } else {
                    OptionState::Correct
                }
            }
            QuizPhase::Submitted { .. } if is_selected => OptionState::Wrong,
            QuizPhase::Submitted { .. } => OptionState::Normal,
        };
        Ok(state)
    }

    /// Per-question verdicts in quiz order.
    ///
    /// # Errors
    ///
    /// Returns `NotSubmitted` while the quiz is still active.
    pub fn reviews(&self) -> Result<Vec<QuestionReview<'_>>, QuizSessionError> {
        if !self.is_submitted() {
            return Err(QuizSessionError::NotSubmitted);
        }
        Ok(self
            .questions
            .iter()
            .enumerate()
            .map(|(position, question)| {
                let index = QuestionIndex::new(position);
                let selected = self.answers.get(&index);
                let verdict = if selected.is_some_and(|code| question.is_correct(code)) {
                    Verdict::Correct
                } else {
                    Verdict::Incorrect
                };
                QuestionReview {
                    index,
                    verdict,
                    selected,
                    correct_answer: question.correct_answer(),
                    explanation: question.explanation(),
                }
            })
            .collect())
    }

    fn checked_question(&self, index: QuestionIndex) -> Result<&Question, QuizSessionError> {
        self.question(index).ok_or(QuizSessionError::InvalidIndex {
            index,
            len: self.questions.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionKind;

    fn choice(answer: &str) -> Question {
        Question::new(
            format!("choice {answer}"),
            QuestionKind::Choice,
            answer,
            vec!["A. first".into(), "B. second".into(), "C. third".into()],
        )
        .unwrap()
    }

    fn judge(answer: &str) -> Question {
        Question::new(
            format!("judge {answer}"),
            QuestionKind::Judge,
            answer,
            vec!["正确".into(), "错误".into()],
        )
        .unwrap()
        .with_explanation(Some("because".into()))
    }

    fn session() -> QuizSession {
        QuizSession::new(vec![choice("A"), choice("B"), judge("T")]).unwrap()
    }

    fn idx(i: usize) -> QuestionIndex {
        QuestionIndex::new(i)
    }

    #[test]
    fn empty_question_list_is_rejected() {
        assert_eq!(QuizSession::new(Vec::new()), Err(QuizSessionError::NoQuestions));
    }

    #[test]
    fn selecting_overwrites_previous_answer() {
        let mut s = session();
        s.select_answer(idx(0), "B".into()).unwrap();
        s.select_answer(idx(0), "A".into()).unwrap();
        assert_eq!(s.answer(idx(0)), Some(&AnswerCode::new("A")));
        assert_eq!(s.progress(), QuizProgress { answered: 1, total: 3 });
        assert_eq!(s.progress().unanswered(), 2);
    }

    #[test]
    fn rejects_out_of_range_index_and_foreign_code() {
        let mut s = session();
        assert_eq!(
            s.select_answer(idx(3), "A".into()),
            Err(QuizSessionError::InvalidIndex { index: idx(3), len: 3 })
        );
        assert_eq!(
            s.select_answer(idx(2), "A".into()),
            Err(QuizSessionError::UnknownOption {
                index: idx(2),
                code: "A".into(),
            })
        );
        assert!(s.answers().is_empty());
    }

    #[test]
    fn answers_are_frozen_after_submit() {
        let mut s = session();
        s.select_answer(idx(0), "A".into()).unwrap();
        s.submit().unwrap();

        let before = s.answers().clone();
        assert_eq!(
            s.select_answer(idx(0), "C".into()),
            Err(QuizSessionError::AlreadySubmitted)
        );
        assert_eq!(
            s.select_answer(idx(1), "B".into()),
            Err(QuizSessionError::AlreadySubmitted)
        );
        assert_eq!(s.answers(), &before);
        assert_eq!(s.submit(), Err(QuizSessionError::AlreadySubmitted));
    }

    #[test]
    fn submit_counts_matching_answers() {
        let mut s = session();
        assert_eq!(s.score(), None);
        s.select_answer(idx(0), "A".into()).unwrap();
        s.select_answer(idx(1), "C".into()).unwrap();
        s.select_answer(idx(2), "T".into()).unwrap();

        let report = s.submit().unwrap();
        assert_eq!(report.correct(), 2);
        assert_eq!(report.total(), 3);
        assert_eq!(report.percentage(), 67);
        assert_eq!(s.phase(), QuizPhase::Submitted { score: 2 });
        assert_eq!(s.report(), Some(report));
    }

    #[test]
    fn option_state_before_submit() {
        let mut s = session();
        s.select_answer(idx(0), "B".into()).unwrap();
        assert_eq!(s.option_state(idx(0), &"B".into()), Ok(OptionState::Selected));
        assert_eq!(s.option_state(idx(0), &"A".into()), Ok(OptionState::Normal));
        assert_eq!(s.option_state(idx(1), &"B".into()), Ok(OptionState::Normal));
    }

    #[test]
    fn option_state_after_submit() {
        let mut s = session();
        s.select_answer(idx(0), "B".into()).unwrap();
        s.select_answer(idx(1), "B".into()).unwrap();
        s.submit().unwrap();

        // wrong pick on question 0
        assert_eq!(s.option_state(idx(0), &"A".into()), Ok(OptionState::Correct));
        assert_eq!(s.option_state(idx(0), &"B".into()), Ok(OptionState::Wrong));
        assert_eq!(s.option_state(idx(0), &"C".into()), Ok(OptionState::Normal));
        // right pick on question 1
        assert_eq!(
            s.option_state(idx(1), &"B".into()),
            Ok(OptionState::CorrectSelected)
        );
        // unanswered question still reveals the correct option
        assert_eq!(s.option_state(idx(2), &"T".into()), Ok(OptionState::Correct));
        assert_eq!(s.option_state(idx(2), &"F".into()), Ok(OptionState::Normal));
        assert!(s.option_state(idx(9), &"A".into()).is_err());
    }

    #[test]
    fn reviews_require_submission_and_mark_unanswered_incorrect() {
        let mut s = session();
        assert_eq!(s.reviews(), Err(QuizSessionError::NotSubmitted));
        s.select_answer(idx(0), "A".into()).unwrap();
        s.submit().unwrap();

        let reviews = s.reviews().unwrap();
        assert_eq!(reviews.len(), 3);
        assert_eq!(reviews[0].verdict, Verdict::Correct);
        assert_eq!(reviews[1].verdict, Verdict::Incorrect);
        assert_eq!(reviews[1].selected, None);
        assert_eq!(reviews[2].correct_answer.as_str(), "T");
        assert_eq!(reviews[2].explanation, Some("because"));
    }
}
