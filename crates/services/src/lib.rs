#![forbid(unsafe_code)]

pub mod entropy;
pub mod error;
pub mod quiz;

pub use entropy::Entropy;
pub use error::{QuizServiceError, UnknownStrategy};
pub use quiz::{
    AutoConfirm, QuizRequest, QuizService, Sampler, SamplingStrategy, SubmissionGate,
    SubmitOutcome, shuffled,
};
