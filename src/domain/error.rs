//! Configuration errors raised before any training step runs.

use thiserror::Error;

/// Rejected configuration values
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("sequence length must be positive")]
    EmptySequence,

    #[error("vocabulary size {0} leaves no content tokens besides the start token")]
    VocabularyTooSmall(usize),

    #[error("start token {start} is outside the vocabulary [0, {vocab_size})")]
    StartTokenOutOfRange { start: u32, vocab_size: usize },

    #[error("{0} must be positive")]
    ZeroDimension(&'static str),

    #[error("epoch size must be positive")]
    ZeroEpochSize,

    #[error("curriculum rate must be finite and non-negative, got {0}")]
    InvalidCurriculumRate(f64),

    #[error("learning rate must be finite and positive, got {0}")]
    InvalidLearningRate(f64),

    #[error("reward discount must lie in [0, 1], got {0}")]
    InvalidRewardGamma(f64),
}
