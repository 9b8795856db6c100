//! Word tokenizer shared by lexicon construction and text scanning.
//!
//! Tokens are maximal runs of lowercase ASCII letters and apostrophes, so
//! contractions survive intact (`I'm` becomes `i'm`).

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z']+").unwrap());

/// Split `text` into lowercase word tokens.
///
/// Every character outside `[a-z']` (after lowercasing) acts as a separator.
/// Empty input yields an empty vector; no token is ever empty.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_apostrophes() {
        assert_eq!(tokenize("I'm Happy!!"), vec!["i'm", "happy"]);
    }

    #[test]
    fn test_tokenize_empty_and_separator_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  123 -- !! 4.5 ").is_empty());
    }

    #[test]
    fn test_tokenize_splits_on_digits_and_punctuation() {
        assert_eq!(
            tokenize("rock'n'roll, 2night: LET's go"),
            vec!["rock'n'roll", "night", "let's", "go"]
        );
    }

    #[test]
    fn test_tokenize_drops_non_ascii_letters() {
        assert_eq!(tokenize("café naïve"), vec!["caf", "na", "ve"]);
    }

    #[test]
    fn test_tokens_are_lowercase_and_non_empty() {
        let tokens = tokenize("THE Quick, BROWN fox; Jumped\tOVER\nthe lazy DOG's tail");
        assert!(!tokens.is_empty());
        for tok in &tokens {
            assert!(!tok.is_empty());
            assert_eq!(tok, &tok.to_lowercase());
        }
    }

    #[test]
    fn test_tokenize_is_idempotent() {
        let inputs = [
            "I'm Happy!!",
            "  don't   stop -- believing ",
            "Mixed CASE & symbols #1 'quoted'",
        ];
        for input in inputs {
            let once = tokenize(input);
            let twice = tokenize(&once.join(" "));
            assert_eq!(once, twice, "re-tokenizing changed output for {:?}", input);
        }
    }
}
