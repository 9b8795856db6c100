//! Error types for MoodQuiz.
//!
//! Inference itself never fails. The only hard failures are an unreadable
//! lexicon source and invalid configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the VAD lexicon.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// The lexicon file could not be opened or read.
    #[error("Failed to read lexicon source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV structure itself is unusable (e.g. header is missing a column).
    #[error("Malformed lexicon CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },
}

/// Faults inside an emotion classifier client.
///
/// These never reach callers of inference; the client turns them into an
/// unavailable outcome.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Connection, timeout, or client construction failure.
    #[error("Classifier transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Classifier returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body had an unexpected shape.
    #[error("Failed to decode classifier response: {0}")]
    Decode(String),

    /// The client settings are unusable.
    #[error("Invalid classifier configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised while building runtime settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    /// The classifier blend weight lies outside [0, 1].
    #[error("Classifier blend weight must be within [0, 1], got {0}")]
    InvalidBlendWeight(f64),
}

/// Errors wiring an inference engine from settings.
#[derive(Debug, Error)]
pub enum EngineBuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_io_error_mentions_path() {
        let err = LexiconError::Io {
            path: PathBuf::from("data/missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("data/missing.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidBlendWeight(1.5);
        assert_eq!(
            err.to_string(),
            "Classifier blend weight must be within [0, 1], got 1.5"
        );
    }
}
