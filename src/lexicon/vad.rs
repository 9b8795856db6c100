//! Valence / arousal / dominance triples.

use serde::{Deserialize, Serialize};

use crate::utilities::numeric::clamp01;

/// Rescale a raw lexicon score from [-1, 1] into [0, 1].
///
/// Out-of-range inputs are clamped, so the result always lies in [0, 1].
pub fn norm01(x: f64) -> f64 {
    clamp01((x + 1.0) / 2.0)
}

/// A VAD triple with every component in [0, 1].
///
/// Serializes as a 3-element array `[valence, arousal, dominance]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vad {
    pub valence: f64,
    pub arousal: f64,
    pub dominance: f64,
}

impl Vad {
    pub fn new(valence: f64, arousal: f64, dominance: f64) -> Self {
        Self {
            valence,
            arousal,
            dominance,
        }
    }

    /// Build a triple from raw [-1, 1] scores.
    pub fn from_raw(valence: f64, arousal: f64, dominance: f64) -> Self {
        Self::new(norm01(valence), norm01(arousal), norm01(dominance))
    }
}

impl From<[f64; 3]> for Vad {
    fn from([v, a, d]: [f64; 3]) -> Self {
        Self::new(v, a, d)
    }
}

impl From<Vad> for [f64; 3] {
    fn from(vad: Vad) -> Self {
        [vad.valence, vad.arousal, vad.dominance]
    }
}
