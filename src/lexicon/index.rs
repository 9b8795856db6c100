//! Immutable phrase index over the VAD lexicon.
//!
//! Phrases are grouped by their first token and then by length, so a scan
//! only probes the (at most four) lengths that can start at a given token.

use std::collections::HashMap;

use serde::Deserialize;

use crate::lexicon::vad::Vad;
use crate::text::tokenize;

/// Longest phrase, in tokens, that the scanner will try to match.
pub const MAX_NGRAM: usize = 4;

/// One raw lexicon row before validation.
///
/// Numeric fields stay as text until [`LexiconIndex::build`] parses them, so
/// malformed rows can be skipped instead of failing the whole load.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub valence: String,
    #[serde(default)]
    pub arousal: String,
    #[serde(default)]
    pub dominance: String,
}

impl RawRecord {
    pub fn new(
        term: impl Into<String>,
        valence: impl Into<String>,
        arousal: impl Into<String>,
        dominance: impl Into<String>,
    ) -> Self {
        Self {
            term: term.into(),
            valence: valence.into(),
            arousal: arousal.into(),
            dominance: dominance.into(),
        }
    }
}

type PhrasesByLength = HashMap<usize, HashMap<Vec<String>, Vad>>;

/// Lookup table from token sequences to normalized VAD triples.
#[derive(Debug, Clone, Default)]
pub struct LexiconIndex {
    /// first token -> phrase length -> exact token sequence -> VAD.
    by_first: HashMap<String, PhrasesByLength>,
    /// Space-joined phrase -> VAD, including phrases longer than `MAX_NGRAM`.
    terms: HashMap<String, Vad>,
    /// Rows rejected during the build.
    skipped: usize,
}

impl LexiconIndex {
    /// Build the index from raw rows.
    ///
    /// A row is skipped when its term yields no tokens or any score is not a
    /// float (`NaN` included). Infinite scores are clamped by normalization.
    /// Later rows for the same token sequence replace earlier ones.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut index = Self::default();
        for record in records {
            if !index.insert_record(&record) {
                index.skipped += 1;
            }
        }
        index
    }

    fn insert_record(&mut self, record: &RawRecord) -> bool {
        let tokens = tokenize(record.term.trim());
        if tokens.is_empty() {
            return false;
        }

        let (Some(v), Some(a), Some(d)) = (
            parse_score(&record.valence),
            parse_score(&record.arousal),
            parse_score(&record.dominance),
        ) else {
            return false;
        };

        let vad = Vad::from_raw(v, a, d);
        self.terms.insert(tokens.join(" "), vad);

        if tokens.len() <= MAX_NGRAM {
            let len = tokens.len();
            self.by_first
                .entry(tokens[0].clone())
                .or_default()
                .entry(len)
                .or_default()
                .insert(tokens, vad);
        }
        true
    }

    /// Whether any indexed phrase starts with `token`.
    pub fn has_first(&self, token: &str) -> bool {
        self.by_first.contains_key(token)
    }

    /// Exact lookup of an indexed phrase (1 to `MAX_NGRAM` tokens).
    pub fn lookup(&self, phrase: &[String]) -> Option<Vad> {
        let first = phrase.first()?;
        self.by_first
            .get(first.as_str())?
            .get(&phrase.len())?
            .get(phrase)
            .copied()
    }

    /// Direct lookup by phrase text, including phrases too long to be scanned.
    pub fn get(&self, phrase: &str) -> Option<Vad> {
        self.terms.get(&tokenize(phrase).join(" ")).copied()
    }

    /// Number of distinct phrases loaded.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of phrases reachable by the scanner.
    pub fn indexed_len(&self) -> usize {
        self.by_first
            .values()
            .flat_map(|by_len| by_len.values())
            .map(|phrases| phrases.len())
            .sum()
    }

    /// Number of rows rejected while building.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn max_ngram(&self) -> usize {
        MAX_NGRAM
    }
}

fn parse_score(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|x| !x.is_nan())
}
