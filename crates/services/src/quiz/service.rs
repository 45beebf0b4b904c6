use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};

use quiz_core::model::{
    BankStats, QuestionBank, QuestionKind, QuizSession, QuizSessionError, ScoreReport,
};
use storage::QuestionBankSource;

use super::gate::SubmissionGate;
use super::request::QuizRequest;
use super::sampler::{Sampler, SamplingStrategy};
use crate::entropy::Entropy;
use crate::error::QuizServiceError;

/// Result of asking to submit a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted(ScoreReport),
    /// The confirmation was declined; the quiz is still active.
    Declined,
}

/// Builds quiz sessions from the question bank and submits them.
#[derive(Debug, Clone)]
pub struct QuizService {
    bank: Arc<QuestionBank>,
    sampler: Sampler,
    entropy: Entropy,
}

impl QuizService {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            bank,
            sampler: Sampler::default(),
            entropy: Entropy::default(),
        }
    }

    /// Load the bank once from `source`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the bank cannot be loaded.
    pub fn from_source(source: &dyn QuestionBankSource) -> Result<Self, QuizServiceError> {
        let bank = source.load()?;
        let stats = bank.stats();
        info!(
            source = %source.describe(),
            choice = stats.choice,
            judge = stats.judge,
            modules = stats.modules,
            "question bank loaded"
        );
        Ok(Self::new(Arc::new(bank)))
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: SamplingStrategy) -> Self {
        self.sampler = Sampler::new(strategy);
        self
    }

    #[must_use]
    pub fn with_entropy(mut self, entropy: Entropy) -> Self {
        self.entropy = entropy;
        self
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn stats(&self) -> BankStats {
        self.bank.stats()
    }

    #[must_use]
    pub fn strategy(&self) -> SamplingStrategy {
        self.sampler.strategy()
    }

    /// Sample a new quiz using the configured entropy.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::EmptySelection` if no question was selected.
    pub fn start(&self, request: QuizRequest) -> Result<QuizSession, QuizServiceError> {
        let mut rng = self.entropy.rng();
        self.start_with_rng(request, &mut rng)
    }

    /// Sample a new quiz with a caller-provided generator.
    ///
    /// Choice questions come first, then judge questions; each block is
    /// sampled from its own pool.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::EmptySelection` if no question was selected.
    pub fn start_with_rng<R: Rng + ?Sized>(
        &self,
        request: QuizRequest,
        rng: &mut R,
    ) -> Result<QuizSession, QuizServiceError> {
        let mut questions = Vec::new();
        for kind in QuestionKind::ALL {
            let pool = self.bank.pool(kind);
            let picked = self.sampler.sample(&pool, request.count(kind), rng);
            debug!(
                %kind,
                requested = request.count(kind),
                available = pool.len(),
                picked = picked.len(),
                "sampled pool"
            );
            questions.extend(picked);
        }

        if questions.is_empty() {
            warn!(
                choice = request.choice,
                judge = request.judge,
                bank = self.bank.len(),
                "no questions selected for quiz"
            );
            return Err(QuizServiceError::EmptySelection {
                choice: request.choice,
                judge: request.judge,
            });
        }

        let session = QuizSession::new(questions)?;
        info!(
            questions = session.len(),
            strategy = %self.sampler.strategy(),
            "quiz session started"
        );
        Ok(session)
    }

    /// Submit `session` once `gate` confirms.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` if the session was already submitted.
    pub fn submit(
        &self,
        session: &mut QuizSession,
        gate: &mut dyn SubmissionGate,
    ) -> Result<SubmitOutcome, QuizServiceError> {
        if session.is_submitted() {
            return Err(QuizSessionError::AlreadySubmitted.into());
        }

        let progress = session.progress();
        if !gate.confirm(&progress) {
            debug!(
                answered = progress.answered,
                total = progress.total,
                "submission declined"
            );
            return Ok(SubmitOutcome::Declined);
        }

        let report = session.submit()?;
        info!(
            correct = report.correct(),
            total = report.total(),
            percentage = report.percentage(),
            "quiz submitted"
        );
        Ok(SubmitOutcome::Submitted(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::gate::AutoConfirm;
    use quiz_core::model::{ModuleName, Question, QuestionIndex, QuizProgress};

    fn bank() -> Arc<QuestionBank> {
        let mut questions = Vec::new();
        for i in 0..6 {
            questions.push(
                Question::new(
                    format!("choice {i}"),
                    QuestionKind::Choice,
                    "A",
                    vec!["A. a".into(), "B. b".into()],
                )
                .unwrap()
                .with_module(ModuleName::new(if i % 2 == 0 { "even" } else { "odd" })),
            );
        }
        for i in 0..3 {
            questions.push(
                Question::new(
                    format!("judge {i}"),
                    QuestionKind::Judge,
                    "F",
                    vec!["正确".into(), "错误".into()],
                )
                .unwrap(),
            );
        }
        Arc::new(QuestionBank::new(questions))
    }

    #[test]
    fn choice_block_precedes_judge_block() {
        let service = QuizService::new(bank()).with_entropy(Entropy::seeded(11));
        let session = service.start(QuizRequest::new(4, 2)).unwrap();

        let kinds: Vec<QuestionKind> = session.questions().iter().map(Question::kind).collect();
        assert_eq!(
            kinds,
            vec![
                QuestionKind::Choice,
                QuestionKind::Choice,
                QuestionKind::Choice,
                QuestionKind::Choice,
                QuestionKind::Judge,
                QuestionKind::Judge,
            ]
        );
    }

    #[test]
    fn oversized_request_is_clamped() {
        let service = QuizService::new(bank());
        let session = service.start(QuizRequest::new(50, 50)).unwrap();
        assert_eq!(session.len(), 9);
    }

    #[test]
    fn empty_request_fails_with_empty_selection() {
        let service = QuizService::new(bank());
        let err = service.start(QuizRequest::new(0, 0)).unwrap_err();
        assert!(err.is_empty_selection());
    }

    #[test]
    fn empty_bank_fails_with_empty_selection() {
        let service = QuizService::new(Arc::new(QuestionBank::default()));
        let err = service.start(QuizRequest::default()).unwrap_err();
        assert!(matches!(
            err,
            QuizServiceError::EmptySelection { choice: 20, judge: 10 }
        ));
    }

    #[test]
    fn seeded_service_is_reproducible() {
        let service = QuizService::new(bank())
            .with_strategy(SamplingStrategy::Uniform)
            .with_entropy(Entropy::seeded(5));
        let a = service.start(QuizRequest::new(3, 1)).unwrap();
        let b = service.start(QuizRequest::new(3, 1)).unwrap();
        assert_eq!(a.questions(), b.questions());
        assert_eq!(service.strategy(), SamplingStrategy::Uniform);
    }

    #[test]
    fn declined_confirmation_keeps_session_active() {
        let service = QuizService::new(bank());
        let mut session = service.start(QuizRequest::new(1, 1)).unwrap();
        session
            .select_answer(QuestionIndex::new(0), "A".into())
            .unwrap();

        let mut seen = None;
        let mut decline = |progress: &QuizProgress| {
            seen = Some(*progress);
            false
        };
        let outcome = service.submit(&mut session, &mut decline).unwrap();

        assert_eq!(outcome, SubmitOutcome::Declined);
        assert!(!session.is_submitted());
        assert_eq!(seen, Some(QuizProgress { answered: 1, total: 2 }));
    }

    #[test]
    fn confirmed_submission_scores_once() {
        let service = QuizService::new(bank());
        let mut session = service.start(QuizRequest::new(1, 1)).unwrap();
        session
            .select_answer(QuestionIndex::new(0), "A".into())
            .unwrap();
        session
            .select_answer(QuestionIndex::new(1), "F".into())
            .unwrap();

        let outcome = service.submit(&mut session, &mut AutoConfirm).unwrap();
        assert_eq!(outcome, SubmitOutcome::Submitted(ScoreReport::new(2, 2)));

        let again = service.submit(&mut session, &mut AutoConfirm);
        assert!(matches!(
            again,
            Err(QuizServiceError::Session(QuizSessionError::AlreadySubmitted))
        ));
    }
}
