mod gate;
mod request;
mod sampler;
mod service;

// Public API of the quiz subsystem.
pub use gate::{AutoConfirm, SUBMIT_PROMPT, SubmissionGate};
pub use request::{DEFAULT_CHOICE_COUNT, DEFAULT_JUDGE_COUNT, QuizRequest, parse_count};
pub use sampler::{Sampler, SamplingStrategy, shuffled};
pub use service::{QuizService, SubmitOutcome};
