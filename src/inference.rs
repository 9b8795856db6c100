//! Request-scoped mood inference.
//!
//! [`MoodEngine::infer`] runs both signal paths for one text and blends them:
//!
//! 1. Blank text short-circuits to the neutral mood with source `default`.
//! 2. The classifier is asked for an emotion distribution, bounded by a
//!    timeout. Unavailability and an empty answer are treated the same.
//! 3. The text is scanned against the lexicon for a VAD aggregate.
//! 4. Each available signal is projected into mood space and blended.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::classifier::{
    ClassifierOutcome, DisabledClassifier, EmotionClassifier, EmotionDistribution,
    HuggingFaceClassifier,
};
use crate::config::{ClassifierBackend, Settings};
use crate::error::{ConfigError, EngineBuildError, LexiconError};
use crate::lexicon::{match_phrases, LexiconIndex, LexiconStore, Vad};
use crate::mood::{mood_from_emotions, mood_from_vad, Blender, MoodSource, MoodVector};
use crate::text::tokenize;

const DEFAULT_CLASSIFIER_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of one inference call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    /// Raw classifier distribution, empty when unavailable.
    pub emotions: EmotionDistribution,
    pub mood: MoodVector,
    /// Lexicon VAD aggregate, `None` when no phrase matched.
    pub vad: Option<Vad>,
    pub source: MoodSource,
}

impl InferenceResult {
    /// Result for input with no usable content.
    pub fn neutral() -> Self {
        Self {
            emotions: EmotionDistribution::new(),
            mood: MoodVector::neutral(),
            vad: None,
            source: MoodSource::Default,
        }
    }
}

/// Shared inference engine. Cheap to clone.
#[derive(Clone)]
pub struct MoodEngine {
    lexicon: LexiconStore,
    classifier: Arc<dyn EmotionClassifier>,
    blender: Blender,
    classifier_timeout: Duration,
}

impl std::fmt::Debug for MoodEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoodEngine")
            .field("lexicon", &self.lexicon)
            .field("classifier", &self.classifier.name())
            .field("blender", &self.blender)
            .field("classifier_timeout", &self.classifier_timeout)
            .finish()
    }
}

impl MoodEngine {
    /// Engine over `lexicon` and `classifier`.
    ///
    /// The lexicon is built on first use. Call [`MoodEngine::warm_up`] at
    /// startup to pay that cost before serving; otherwise the first `infer`
    /// builds it on the blocking pool.
    pub fn new(lexicon: LexiconStore, classifier: Arc<dyn EmotionClassifier>) -> Self {
        Self {
            lexicon,
            classifier,
            blender: Blender::default(),
            classifier_timeout: DEFAULT_CLASSIFIER_TIMEOUT,
        }
    }

    /// Engine wired from environment settings. The lexicon is not loaded yet.
    pub fn from_settings(settings: &Settings) -> Result<Self, EngineBuildError> {
        let classifier: Arc<dyn EmotionClassifier> = match settings.classifier {
            ClassifierBackend::HuggingFace => {
                Arc::new(HuggingFaceClassifier::new(settings.huggingface.clone())?)
            }
            ClassifierBackend::Off => Arc::new(DisabledClassifier),
        };

        let timeout = Duration::try_from_secs_f64(settings.classifier_timeout_secs).map_err(|_| {
            ConfigError::InvalidValue {
                key: "CLASSIFIER_TIMEOUT_SECS".to_string(),
                value: settings.classifier_timeout_secs.to_string(),
            }
        })?;

        Ok(Self::new(LexiconStore::from_path(&settings.vad_path), classifier)
            .with_blender(settings.blender()?)
            .with_classifier_timeout(timeout))
    }

    pub fn with_blender(mut self, blender: Blender) -> Self {
        self.blender = blender;
        self
    }

    pub fn with_classifier_timeout(mut self, timeout: Duration) -> Self {
        self.classifier_timeout = timeout;
        self
    }

    pub fn lexicon(&self) -> &LexiconStore {
        &self.lexicon
    }

    pub fn blender(&self) -> &Blender {
        &self.blender
    }

    /// Build the lexicon now instead of on the first request.
    pub fn warm_up(&self) -> Result<usize, LexiconError> {
        self.lexicon.get().map(|index| index.len())
    }

    /// Infer the mood of `text`.
    ///
    /// Only a lexicon that cannot be loaded produces an error; every text
    /// yields a well-formed result once the lexicon is available.
    pub async fn infer(&self, text: &str) -> Result<InferenceResult, LexiconError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(InferenceResult::neutral());
        }

        let emotions = self.classify(text).await;
        let mood_from_classifier = (!emotions.is_empty()).then(|| mood_from_emotions(&emotions));

        let index = self.lexicon_index().await?;
        let vad = match_phrases(&tokenize(text), &index).map(|agg| {
            tracing::debug!(
                matches = agg.total_matches(),
                distinct = agg.matches.len(),
                "Lexicon phrases matched"
            );
            agg.vad
        });
        let mood_from_lexicon = vad.as_ref().map(mood_from_vad);

        let (mood, source) = self.blender.blend(mood_from_lexicon, mood_from_classifier);
        tracing::debug!(%source, labels = emotions.len(), has_vad = vad.is_some(), "Mood inferred");

        Ok(InferenceResult {
            emotions,
            mood,
            vad,
            source,
        })
    }

    async fn lexicon_index(&self) -> Result<Arc<LexiconIndex>, LexiconError> {
        if let Some(index) = self.lexicon.loaded() {
            return Ok(index);
        }

        // The build does blocking file I/O.
        let store = self.lexicon.clone();
        match tokio::task::spawn_blocking(move || store.get()).await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => self.lexicon.get(),
        }
    }

    async fn classify(&self, text: &str) -> EmotionDistribution {
        match tokio::time::timeout(self.classifier_timeout, self.classifier.classify(text)).await {
            Ok(ClassifierOutcome::Distribution(dist)) => dist,
            Ok(ClassifierOutcome::Unavailable) => {
                tracing::debug!(classifier = self.classifier.name(), "Classifier unavailable");
                EmotionDistribution::new()
            }
            Err(_) => {
                tracing::warn!(
                    classifier = self.classifier.name(),
                    timeout = ?self.classifier_timeout,
                    "Classifier timed out"
                );
                EmotionDistribution::new()
            }
        }
    }
}
