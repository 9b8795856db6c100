//! Greedy longest-match phrase scanner.
//!
//! At each position the scanner tries the longest phrase first (up to
//! [`MAX_NGRAM`] tokens) and consumes whatever matches. Matches never overlap
//! and there is no backtracking, so a scan is at most `n * MAX_NGRAM` probes.

use serde::Serialize;

use crate::lexicon::index::{LexiconIndex, MAX_NGRAM};
use crate::lexicon::vad::Vad;
use crate::text::tokenize;
use crate::utilities::numeric::round4;

/// A distinct phrase found in the text and how often it occurred.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhraseMatch {
    pub phrase: String,
    pub vad: Vad,
    pub count: usize,
}

/// Count-weighted VAD over all matched phrases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VadAggregate {
    /// Weighted mean, each component rounded to 4 decimals.
    pub vad: Vad,
    /// Distinct matches in order of first occurrence.
    pub matches: Vec<PhraseMatch>,
}

impl VadAggregate {
    /// Total number of phrase occurrences.
    pub fn total_matches(&self) -> usize {
        self.matches.iter().map(|m| m.count).sum()
    }

    /// Count recorded for `phrase`, or 0.
    pub fn count_of(&self, phrase: &str) -> usize {
        self.matches
            .iter()
            .find(|m| m.phrase == phrase)
            .map(|m| m.count)
            .unwrap_or(0)
    }
}

/// Scan `tokens` against `index`.
///
/// Returns `None` when nothing matched. That is an absent signal, not a
/// neutral one, and callers must keep the distinction.
pub fn match_phrases(tokens: &[String], index: &LexiconIndex) -> Option<VadAggregate> {
    let n = tokens.len();
    let mut matches: Vec<PhraseMatch> = Vec::new();

    let mut i = 0;
    while i < n {
        let first = &tokens[i];
        if !index.has_first(first) {
            i += 1;
            continue;
        }

        let longest = MAX_NGRAM.min(n - i);
        let hit = (1..=longest).rev().find_map(|len| {
            let window = &tokens[i..i + len];
            index.lookup(window).map(|vad| (window, vad))
        });

        match hit {
            Some((window, vad)) => {
                let phrase = window.join(" ");
                match matches.iter_mut().find(|m| m.phrase == phrase) {
                    Some(existing) => existing.count += 1,
                    None => matches.push(PhraseMatch {
                        phrase,
                        vad,
                        count: 1,
                    }),
                }
                i += window.len();
            }
            None => i += 1,
        }
    }

    aggregate(matches)
}

fn aggregate(matches: Vec<PhraseMatch>) -> Option<VadAggregate> {
    if matches.is_empty() {
        return None;
    }

    let (mut sum_v, mut sum_a, mut sum_d, mut weight) = (0.0, 0.0, 0.0, 0usize);
    for m in &matches {
        let c = m.count as f64;
        sum_v += m.vad.valence * c;
        sum_a += m.vad.arousal * c;
        sum_d += m.vad.dominance * c;
        weight += m.count;
    }
    if weight == 0 {
        return None;
    }

    let w = weight as f64;
    Some(VadAggregate {
        vad: Vad::new(round4(sum_v / w), round4(sum_a / w), round4(sum_d / w)),
        matches,
    })
}

/// Tokenize `text` and return only the aggregated VAD, if any phrase matched.
pub fn vad_from_text(text: &str, index: &LexiconIndex) -> Option<Vad> {
    match_phrases(&tokenize(text), index).map(|agg| agg.vad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::index::RawRecord;

    /// Rows are given directly in [0, 1]; converted back to raw [-1, 1].
    fn index_of(entries: &[(&str, f64, f64, f64)]) -> LexiconIndex {
        let raw = |x: f64| format!("{}", x * 2.0 - 1.0);
        LexiconIndex::build(
            entries
                .iter()
                .map(|(term, v, a, d)| RawRecord::new(*term, raw(*v), raw(*a), raw(*d)))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_longest_match_wins() {
        let index = index_of(&[("not good", 0.2, 0.4, 0.3), ("good", 0.85, 0.5, 0.6)]);
        let agg = match_phrases(&tokenize("this is not good today"), &index).unwrap();

        assert_eq!(agg.matches.len(), 1);
        assert_eq!(agg.count_of("not good"), 1);
        assert_eq!(agg.count_of("good"), 0);
        assert_eq!(agg.vad, Vad::new(0.2, 0.4, 0.3));
    }

    #[test]
    fn test_scan_resumes_after_consumed_phrase() {
        let index = index_of(&[("not good", 0.2, 0.2, 0.2), ("good", 0.8, 0.8, 0.8)]);
        let agg = match_phrases(&tokenize("not good but good"), &index).unwrap();
        assert_eq!(agg.count_of("not good"), 1);
        assert_eq!(agg.count_of("good"), 1);
        assert_eq!(agg.total_matches(), 2);
    }

    #[test]
    fn test_weighted_aggregation() {
        let index = index_of(&[("gloomy", 0.2, 0.2, 0.2), ("sunny", 0.8, 0.8, 0.8)]);
        let agg = match_phrases(&tokenize("gloomy, gloomy and sunny"), &index).unwrap();

        assert_eq!(agg.count_of("gloomy"), 2);
        assert_eq!(agg.count_of("sunny"), 1);
        assert_eq!(agg.vad, Vad::new(0.4, 0.4, 0.4));
    }

    #[test]
    fn test_no_match_is_absent() {
        let index = index_of(&[("happy", 0.9, 0.6, 0.6)]);
        assert!(match_phrases(&tokenize("zebra quantum lettuce"), &index).is_none());
        assert!(vad_from_text("zebra quantum lettuce", &index).is_none());
        assert!(vad_from_text("", &index).is_none());
    }

    #[test]
    fn test_known_first_token_without_full_phrase() {
        let index = index_of(&[("feel like dancing", 0.8, 0.8, 0.5)]);
        assert!(vad_from_text("i feel like sleeping", &index).is_none());
        assert!(vad_from_text("i feel like dancing", &index).is_some());
    }

    #[test]
    fn test_phrase_at_end_of_text_is_matched() {
        let index = index_of(&[("over the moon", 0.95, 0.7, 0.6), ("moon", 0.6, 0.3, 0.5)]);
        let agg = match_phrases(&tokenize("she is over the moon"), &index).unwrap();
        assert_eq!(agg.count_of("over the moon"), 1);
        assert_eq!(agg.count_of("moon"), 0);
    }

    #[test]
    fn test_four_gram_preferred_over_shorter() {
        let index = index_of(&[
            ("on top of", 0.6, 0.5, 0.6),
            ("on top of everything", 0.9, 0.6, 0.8),
            ("on", 0.5, 0.5, 0.5),
        ]);
        let agg = match_phrases(&tokenize("on top of everything on"), &index).unwrap();
        assert_eq!(agg.count_of("on top of everything"), 1);
        assert_eq!(agg.count_of("on top of"), 0);
        assert_eq!(agg.count_of("on"), 1);
    }

    #[test]
    fn test_deterministic_repeat_runs() {
        let rows = || index_of(&[("calm", 0.7, 0.2, 0.6), ("calm down", 0.6, 0.3, 0.5)]);
        let text = "calm down, stay calm, calm down now";
        let first = match_phrases(&tokenize(text), &rows());
        let second = match_phrases(&tokenize(text), &rows());
        assert_eq!(first, second);
        let vad = first.unwrap().vad;
        let again = second.unwrap().vad;
        assert_eq!(vad.valence.to_bits(), again.valence.to_bits());
    }
}
