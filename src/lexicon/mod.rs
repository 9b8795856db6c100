//! VAD phrase lexicon: loading, indexing, and longest-match scanning.

pub mod index;
pub mod loader;
pub mod matcher;
pub mod store;
pub mod vad;

pub use index::{LexiconIndex, RawRecord, MAX_NGRAM};
pub use matcher::{match_phrases, vad_from_text, PhraseMatch, VadAggregate};
pub use store::LexiconStore;
pub use vad::{norm01, Vad};
