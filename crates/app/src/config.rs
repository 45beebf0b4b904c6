use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use services::SamplingStrategy;
use services::quiz::{DEFAULT_CHOICE_COUNT, DEFAULT_JUDGE_COUNT};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
}

/// Settings layered from defaults, `quiz.toml`, an explicit `--config` file
/// and `QUIZ__*` environment variables (later sources win).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizSettings {
    /// JSON bank on disk; the embedded bank is used when unset.
    #[serde(default)]
    pub bank_path: Option<PathBuf>,
    pub choice_count: usize,
    pub judge_count: usize,
    pub strategy: SamplingStrategy,
    #[serde(default)]
    pub seed: Option<u64>,
}

pub fn load_settings(explicit: Option<&Path>) -> Result<QuizSettings, ConfigError> {
    let mut builder = Config::builder()
        .set_default("choice_count", DEFAULT_CHOICE_COUNT as u64)
        .and_then(|b| b.set_default("judge_count", DEFAULT_JUDGE_COUNT as u64))
        .and_then(|b| b.set_default("strategy", SamplingStrategy::default().as_str()))?
        .add_source(File::with_name("quiz").required(false));

    if let Some(path) = explicit {
        builder = builder.add_source(File::from(path).required(true));
    }

    let settings = builder
        .add_source(
            Environment::with_prefix("QUIZ")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
