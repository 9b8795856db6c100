//! Mood space: the output vector, the projections into it, and the blend
//! policy that merges the two signal paths.

pub mod blender;
pub mod projector;
pub mod vector;

pub use blender::{Blender, MoodSource, DEFAULT_CLASSIFIER_WEIGHT};
pub use projector::{mood_from_emotions, mood_from_vad};
pub use vector::{MoodDimension, MoodVector};
