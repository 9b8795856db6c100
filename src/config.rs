//! Runtime settings read from the environment.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `GITLAB_VAD_PATH` — lexicon CSV (default: `data/vad_gitlab.csv`)
//! - `EMOTION_CLASSIFIER` — `huggingface` (default) or `off`
//! - `EMOTION_MODEL` — HuggingFace model id
//! - `HF_INFERENCE_URL` — Inference API base URL
//! - `HF_API_TOKEN` — bearer token for the Inference API
//! - `CLASSIFIER_TIMEOUT_SECS` — bound on one classifier call (default: 10)
//! - `MOOD_CLASSIFIER_WEIGHT` — classifier share of a blend (default: 0.4)

use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::classifier::huggingface::{HuggingFaceConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::error::ConfigError;
use crate::mood::blender::{Blender, DEFAULT_CLASSIFIER_WEIGHT};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_VAD_PATH: &str = "data/vad_gitlab.csv";
pub const DEFAULT_CLASSIFIER_TIMEOUT_SECS: f64 = 10.0;

/// Which emotion classifier to wire in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierBackend {
    HuggingFace,
    Off,
}

impl FromStr for ClassifierBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "huggingface" | "hf" => Ok(ClassifierBackend::HuggingFace),
            "off" | "none" | "disabled" => Ok(ClassifierBackend::Off),
            _ => Err(()),
        }
    }
}

/// Settings for the server and the inference engine.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub port: u16,
    pub vad_path: PathBuf,
    pub classifier: ClassifierBackend,
    pub huggingface: HuggingFaceConfig,
    pub classifier_timeout_secs: f64,
    pub classifier_weight: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            vad_path: PathBuf::from(DEFAULT_VAD_PATH),
            classifier: ClassifierBackend::HuggingFace,
            huggingface: HuggingFaceConfig::default(),
            classifier_timeout_secs: DEFAULT_CLASSIFIER_TIMEOUT_SECS,
            classifier_weight: DEFAULT_CLASSIFIER_WEIGHT,
        }
    }
}

impl Settings {
    /// Read settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = parse_or(&get, "PORT", DEFAULT_PORT)?;
        let classifier_timeout_secs =
            parse_or(&get, "CLASSIFIER_TIMEOUT_SECS", DEFAULT_CLASSIFIER_TIMEOUT_SECS)?;
        if !(classifier_timeout_secs.is_finite() && classifier_timeout_secs > 0.0) {
            return Err(invalid("CLASSIFIER_TIMEOUT_SECS", &classifier_timeout_secs.to_string()));
        }
        let classifier_weight = parse_or(&get, "MOOD_CLASSIFIER_WEIGHT", DEFAULT_CLASSIFIER_WEIGHT)?;
        Blender::new(classifier_weight)?;

        let classifier = match get("EMOTION_CLASSIFIER") {
            Some(raw) => raw
                .parse::<ClassifierBackend>()
                .map_err(|_| invalid("EMOTION_CLASSIFIER", &raw))?,
            None => ClassifierBackend::HuggingFace,
        };

        let huggingface = HuggingFaceConfig {
            model: get("EMOTION_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: get("HF_INFERENCE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_token: get("HF_API_TOKEN"),
            timeout_secs: classifier_timeout_secs,
        };

        Ok(Self {
            port,
            vad_path: get("GITLAB_VAD_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_VAD_PATH)),
            classifier,
            huggingface,
            classifier_timeout_secs,
            classifier_weight,
        })
    }

    /// Blender configured with `classifier_weight`.
    pub fn blender(&self) -> Result<Blender, ConfigError> {
        Blender::new(self.classifier_weight)
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| invalid(key, &raw)),
        None => Ok(default),
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
