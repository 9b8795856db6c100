//! # MoodQuiz
//!
//! Converts free-form text into a music mood vector (valence, energy, focus,
//! danceability, tempo preference).
//!
//! Two signals feed every inference:
//!
//! - a longest-match phrase scan against a valence/arousal/dominance (VAD)
//!   lexicon, projected into mood space;
//! - an external emotion classifier's label distribution, projected through
//!   a fixed emotion -> mood table.
//!
//! The [`mood::Blender`] merges whichever signals are present and reports
//! which one produced the answer.

pub mod classifier;
pub mod config;
pub mod error;
pub mod inference;
pub mod lexicon;
pub mod mood;
pub mod server;
pub mod text;
pub mod utilities;

pub use inference::{InferenceResult, MoodEngine};
pub use lexicon::{LexiconIndex, LexiconStore, Vad};
pub use mood::{Blender, MoodSource, MoodVector};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
