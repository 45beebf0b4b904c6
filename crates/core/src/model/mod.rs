mod answer;
mod bank;
mod ids;
mod question;
mod score;
mod session;

pub use answer::AnswerCode;
pub use bank::{BankStats, QuestionBank};
pub use ids::{DEFAULT_MODULE, ModuleName, QuestionIndex};
pub use question::{Question, QuestionError, QuestionKind};
pub use score::{ScoreReport, score_percentage};
pub use session::{
    OptionState, QuestionReview, QuizPhase, QuizProgress, QuizSession, QuizSessionError, Verdict,
};
