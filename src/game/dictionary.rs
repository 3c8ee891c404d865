//! Word lookup and scoring.
//!
//! Embeds a common-English wordlist at build time and answers membership
//! queries with O(1) case-insensitive hash set lookups. Embedders with their
//! own dictionary can supply a custom corpus instead.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Minimum length for a submittable word.
pub const MIN_WORD_LENGTH: usize = 3;

/// Embedded wordlist: lowercase, alphabetic only, one per line.
static WORDS_DATA: &str = include_str!("../../data/words.txt");

/// Pre-built hash set for O(1) lookup against the embedded list.
static EMBEDDED: Lazy<HashSet<&'static str>> = Lazy::new(|| WORDS_DATA.lines().collect());

/// Word-validity lookup backed by the embedded corpus or one supplied at
/// construction.
#[derive(Debug, Clone)]
pub struct Lexicon {
    corpus: Corpus,
}

#[derive(Debug, Clone)]
enum Corpus {
    Embedded,
    Custom(HashSet<String>),
}

impl Lexicon {
    /// The built-in wordlist.
    pub fn embedded() -> Self {
        Self {
            corpus: Corpus::Embedded,
        }
    }

    /// A caller-supplied corpus. Words are matched case-insensitively.
    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            corpus: Corpus::Custom(
                words
                    .into_iter()
                    .map(|w| w.as_ref().to_lowercase())
                    .collect(),
            ),
        }
    }

    /// Case-insensitive membership, with no length rule applied.
    pub fn contains(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        match &self.corpus {
            Corpus::Embedded => EMBEDDED.contains(lower.as_str()),
            Corpus::Custom(words) => words.contains(&lower),
        }
    }

    /// False for anything under [`MIN_WORD_LENGTH`]; membership otherwise.
    pub fn is_valid(&self, word: &str) -> bool {
        word.len() >= MIN_WORD_LENGTH && self.contains(word)
    }

    /// Number of words in the corpus.
    pub fn word_count(&self) -> usize {
        match &self.corpus {
            Corpus::Embedded => EMBEDDED.len(),
            Corpus::Custom(words) => words.len(),
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::embedded()
    }
}

/// Length-based score for an accepted word, strictly increasing with length.
/// Callers length-check first; empty input is out of contract.
pub fn word_score(word: &str) -> u32 {
    debug_assert!(!word.is_empty(), "scored words are length-checked first");
    match word.len() {
        0..=3 => 1,
        4 => 2,
        5 => 4,
        6 => 6,
        7 => 9,
        _ => 12,
    }
}
