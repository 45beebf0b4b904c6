#![forbid(unsafe_code)]

pub mod model;

pub use model::{
    AnswerCode, BankStats, ModuleName, OptionState, Question, QuestionBank, QuestionError,
    QuestionIndex, QuestionKind, QuizPhase, QuizProgress, QuizSession, QuizSessionError,
    ScoreReport, Verdict,
};
