use quiz_core::model::QuizProgress;

/// Prompt shown before a quiz is submitted.
pub const SUBMIT_PROMPT: &str = "Submit the exam? Answers cannot be changed afterwards.";

/// Yes/no confirmation asked before a quiz is submitted.
pub trait SubmissionGate {
    /// Returns true when the user agrees to submit.
    fn confirm(&mut self, progress: &QuizProgress) -> bool;
}

impl<F> SubmissionGate for F
where
    F: FnMut(&QuizProgress) -> bool,
{
    fn confirm(&mut self, progress: &QuizProgress) -> bool {
        self(progress)
    }
}

/// Gate that always agrees, for scripted runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl SubmissionGate for AutoConfirm {
    fn confirm(&mut self, _progress: &QuizProgress) -> bool {
        true
    }
}
