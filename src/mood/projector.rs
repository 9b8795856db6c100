//! Projections from raw affect signals into mood space.
//!
//! Two independent mappings feed the blender: one from a lexicon VAD triple
//! and one from a classifier's emotion distribution.

use crate::classifier::EmotionDistribution;
use crate::lexicon::vad::Vad;
use crate::mood::vector::MoodVector;
use crate::utilities::numeric::{clamp01, round4};

/// Mood profile of each emotion label the classifier path recognizes.
pub const EMOTION_MOODS: [(&str, MoodVector); 12] = [
    ("joy", MoodVector::new(0.9, 0.7, 0.4, 0.7, 0.75)),
    ("love", MoodVector::new(0.85, 0.6, 0.5, 0.6, 0.65)),
    ("admiration", MoodVector::new(0.8, 0.6, 0.6, 0.5, 0.65)),
    ("surprise", MoodVector::new(0.7, 0.8, 0.4, 0.6, 0.8)),
    ("anger", MoodVector::new(0.1, 0.9, 0.3, 0.4, 0.85)),
    ("sadness", MoodVector::new(0.1, 0.2, 0.6, 0.3, 0.35)),
    ("fear", MoodVector::new(0.15, 0.6, 0.5, 0.3, 0.6)),
    ("disgust", MoodVector::new(0.2, 0.5, 0.4, 0.3, 0.55)),
    ("optimism", MoodVector::new(0.8, 0.6, 0.6, 0.6, 0.65)),
    ("curiosity", MoodVector::new(0.7, 0.5, 0.7, 0.5, 0.55)),
    ("nervous", MoodVector::new(0.24, 0.79, 0.38, 0.35, 0.65)),
    ("neutral", MoodVector::new(0.5, 0.5, 0.5, 0.5, 0.5)),
];

/// Mood profile for a known emotion label.
pub fn emotion_mood(label: &str) -> Option<MoodVector> {
    EMOTION_MOODS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, mood)| *mood)
}

/// Map a VAD triple to mood.
///
/// Arousal drives energy and tempo directly. Focus falls with arousal and
/// rises with dominance. Danceability rewards arousal and above-neutral
/// valence.
pub fn mood_from_vad(vad: &Vad) -> MoodVector {
    let (v, a, d) = (vad.valence, vad.arousal, vad.dominance);
    MoodVector {
        valence: v,
        energy: a,
        focus: clamp01((1.0 - 0.7 * a) + 0.2 * d),
        danceability: clamp01(0.35 + 0.45 * a + 0.20 * (v - 0.5).max(0.0)),
        tempo_pref: a,
    }
    .rounded()
}

/// Map an emotion distribution to mood.
///
/// Each dimension is the probability-weighted sum over recognized labels,
/// divided by the total probability of *all* labels. Unrecognized labels
/// dilute the result toward zero. An empty or zero-mass distribution gives
/// the neutral vector.
pub fn mood_from_emotions(emotions: &EmotionDistribution) -> MoodVector {
    let total: f64 = emotions.values().sum();
    if emotions.is_empty() || total == 0.0 {
        return MoodVector::neutral();
    }

    let mut acc = MoodVector::splat(0.0);
    for (label, prob) in emotions {
        let Some(profile) = emotion_mood(label) else {
            continue;
        };
        for (dim, value) in profile.iter() {
            acc.set(dim, acc.get(dim) + prob * value);
        }
    }

    MoodVector::from_fn(|dim| round4(acc.get(dim) / total))
}
