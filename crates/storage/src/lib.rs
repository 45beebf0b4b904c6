#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::{EmbeddedBank, JsonFileSource, QuestionRecord, parse_bank};
pub use repository::{InMemorySource, QuestionBankSource, StorageError};
