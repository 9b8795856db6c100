//! Emotion classifier boundary.
//!
//! The classifier is an external collaborator. It either produces a label ->
//! probability distribution or is unavailable; a failure never propagates
//! past this boundary as an error.

pub mod huggingface;

use std::collections::BTreeMap;

use async_trait::async_trait;

pub use huggingface::{HuggingFaceClassifier, HuggingFaceConfig};

/// Emotion label -> probability. Probabilities need not sum to 1.
pub type EmotionDistribution = BTreeMap<String, f64>;

/// Result of asking the classifier about one text.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierOutcome {
    /// The classifier answered (possibly with an empty distribution).
    Distribution(EmotionDistribution),
    /// The classifier is absent or failed.
    Unavailable,
}

impl ClassifierOutcome {
    /// Build a distribution from `(label, score)` pairs, lowercasing labels.
    ///
    /// Repeated labels keep the last score.
    pub fn from_scores<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        ClassifierOutcome::Distribution(
            scores
                .into_iter()
                .map(|(label, score)| (label.as_ref().to_lowercase(), score))
                .collect(),
        )
    }

    /// The distribution, with unavailability collapsed to an empty one.
    pub fn into_distribution(self) -> EmotionDistribution {
        match self {
            ClassifierOutcome::Distribution(dist) => dist,
            ClassifierOutcome::Unavailable => EmotionDistribution::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ClassifierOutcome::Distribution(_))
    }
}

/// Something that can score text against emotion labels.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    /// Classify `text`. Implementations report faults as `Unavailable`.
    async fn classify(&self, text: &str) -> ClassifierOutcome;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// Classifier that is never available; leaves only the lexical path.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledClassifier;

#[async_trait]
impl EmotionClassifier for DisabledClassifier {
    async fn classify(&self, _text: &str) -> ClassifierOutcome {
        ClassifierOutcome::Unavailable
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
