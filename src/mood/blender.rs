//! Policy for merging the lexical and classifier mood signals.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mood::vector::MoodVector;
use crate::utilities::numeric::round4;

/// Default share of the classifier path in a blend; the lexicon gets the rest.
pub const DEFAULT_CLASSIFIER_WEIGHT: f64 = 0.4;

/// Which signal(s) produced the final mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodSource {
    Default,
    Lexicon,
    Classifier,
    Blend,
}

impl MoodSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodSource::Default => "default",
            MoodSource::Lexicon => "lexicon",
            MoodSource::Classifier => "classifier",
            MoodSource::Blend => "blend",
        }
    }
}

impl fmt::Display for MoodSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blend weights. `classifier_weight` is always within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Blender {
    classifier_weight: f64,
}

impl Default for Blender {
    fn default() -> Self {
        Self {
            classifier_weight: DEFAULT_CLASSIFIER_WEIGHT,
        }
    }
}

impl Blender {
    /// Create a blender giving `classifier_weight` to the classifier path.
    pub fn new(classifier_weight: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&classifier_weight) {
            return Err(ConfigError::InvalidBlendWeight(classifier_weight));
        }
        Ok(Self { classifier_weight })
    }

    pub fn classifier_weight(&self) -> f64 {
        self.classifier_weight
    }

    pub fn lexicon_weight(&self) -> f64 {
        1.0 - self.classifier_weight
    }

    /// Merge the two optional signals.
    ///
    /// | lexical | classifier | result                 | source       |
    /// |---------|------------|------------------------|--------------|
    /// | yes     | yes        | weighted per dimension | `Blend`      |
    /// | yes     | no         | lexical unchanged      | `Lexicon`    |
    /// | no      | yes        | classifier unchanged   | `Classifier` |
    /// | no      | no         | neutral                | `Default`    |
    pub fn blend(
        &self,
        lexical: Option<MoodVector>,
        classifier: Option<MoodVector>,
    ) -> (MoodVector, MoodSource) {
        match (lexical, classifier) {
            (Some(lex), Some(cls)) => {
                let wc = self.classifier_weight;
                let wl = self.lexicon_weight();
                let mood = MoodVector::from_fn(|dim| round4(cls.get(dim) * wc + lex.get(dim) * wl));
                (mood, MoodSource::Blend)
            }
            (Some(lex), None) => (lex, MoodSource::Lexicon),
            (None, Some(cls)) => (cls, MoodSource::Classifier),
            (None, None) => (MoodVector::neutral(), MoodSource::Default),
        }
    }
}
