use std::path::{Path, PathBuf};

use quiz_core::model::QuestionBank;

use crate::repository::{QuestionBankSource, StorageError};

mod mapping;

pub use mapping::{QuestionRecord, parse_bank};

const EMBEDDED_BANK: &str = include_str!("../../data/questions.json");

/// Bank stored as a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuestionBankSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<QuestionBank, StorageError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_bank(&raw)
    }
}

/// The practice bank compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedBank;

impl QuestionBankSource for EmbeddedBank {
    fn describe(&self) -> String {
        "embedded".to_owned()
    }

    fn load(&self) -> Result<QuestionBank, StorageError> {
        parse_bank(EMBEDDED_BANK)
    }
}
