//! Deterministic word-list sentiment classifier.
#![forbid(unsafe_code)]

use std::collections::HashSet;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;
use thiserror::Error;
use tripscore_core::SentimentScorer;
use tripscore_fs::read_utf8_file;

const DEFAULT_POSITIVE: &[&str] = &[
    "amazing",
    "awesome",
    "beautiful",
    "best",
    "breathtaking",
    "calm",
    "charming",
    "clean",
    "delicious",
    "delightful",
    "enjoy",
    "enjoyed",
    "excellent",
    "fantastic",
    "friendly",
    "fun",
    "gorgeous",
    "great",
    "helpful",
    "impressive",
    "interesting",
    "love",
    "loved",
    "lovely",
    "magnificent",
    "memorable",
    "nice",
    "peaceful",
    "perfect",
    "pleasant",
    "recommend",
    "recommended",
    "relaxing",
    "serene",
    "spectacular",
    "stunning",
    "superb",
    "worth",
    "wonderful",
];

const DEFAULT_NEGATIVE: &[&str] = &[
    "awful",
    "bad",
    "boring",
    "crowded",
    "dirty",
    "disappointed",
    "disappointing",
    "expensive",
    "hate",
    "horrible",
    "noisy",
    "overpriced",
    "poor",
    "rude",
    "scam",
    "smelly",
    "terrible",
    "touristy",
    "ugly",
    "unfriendly",
    "waste",
    "worst",
];

const DEFAULT_NEGATIONS: &[&str] = &[
    "never", "no", "not", "don't", "didn't", "isn't", "wasn't", "won't", "hardly",
];

/// Word lists driving [`LexiconSentimentScorer`].
///
/// Words are matched case-insensitively against whole word tokens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SentimentLexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    #[serde(default)]
    negations: HashSet<String>,
}

impl SentimentLexicon {
    /// Build a lexicon from explicit word lists.
    #[must_use]
    pub fn new<I, J, K>(positive: I, negative: J, negations: K) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        J: IntoIterator,
        J::Item: AsRef<str>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        Self {
            positive: lowercase_set(positive),
            negative: lowercase_set(negative),
            negations: lowercase_set(negations),
        }
    }

    /// Load a lexicon from a JSON file of the form
    /// `{"positive": [...], "negative": [...], "negations": [...]}`.
    ///
    /// # Errors
    /// Returns [`LexiconError`] when the file cannot be read or parsed, or
    /// when it defines no sentiment words at all.
    pub fn from_path(path: &Utf8Path) -> Result<Self, LexiconError> {
        let contents = read_utf8_file(path).map_err(|source| LexiconError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: Self = serde_json::from_str(&contents).map_err(|source| LexiconError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if parsed.positive.is_empty() && parsed.negative.is_empty() {
            return Err(LexiconError::Empty {
                path: path.to_path_buf(),
            });
        }
        let lexicon = Self::new(parsed.positive, parsed.negative, parsed.negations);
        debug!(
            "loaded lexicon from {path}: {} positive, {} negative, {} negations",
            lexicon.positive.len(),
            lexicon.negative.len(),
            lexicon.negations.len()
        );
        Ok(lexicon)
    }

    fn polarity(&self, word: &str) -> Option<bool> {
        if self.positive.contains(word) {
            Some(true)
        } else if self.negative.contains(word) {
            Some(false)
        } else {
            None
        }
    }
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self::new(DEFAULT_POSITIVE, DEFAULT_NEGATIVE, DEFAULT_NEGATIONS)
    }
}

fn lowercase_set<I>(words: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    words
        .into_iter()
        .map(|word| word.as_ref().trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Errors raised while loading a [`SentimentLexicon`].
#[derive(Debug, Error)]
pub enum LexiconError {
    /// The lexicon file could not be read.
    #[error("failed to read lexicon from {path}")]
    Read {
        /// Requested lexicon path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The lexicon file is not valid JSON of the expected shape.
    #[error("failed to parse lexicon in {path}")]
    Parse {
        /// Requested lexicon path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The lexicon lists neither positive nor negative words.
    #[error("lexicon in {path} defines no sentiment words")]
    Empty {
        /// Requested lexicon path.
        path: Utf8PathBuf,
    },
}

/// Classify text by counting lexicon hits.
///
/// A negation word flips the polarity of the next sentiment word. With
/// `pos` positive and `neg` negative hits the positive probability is
/// `(pos + 1) / (pos + neg + 2)`, and the reported confidence is that of the
/// more likely label, so text without sentiment words scores `0.5`.
///
/// # Examples
/// ```
/// use tripscore_core::SentimentScorer;
/// use tripscore_scorer::LexiconSentimentScorer;
///
/// let scorer = LexiconSentimentScorer::default();
/// assert_eq!(scorer.confidence(""), 0.5);
/// assert!(scorer.confidence("Stunning views, friendly guides") > 0.7);
/// assert!(scorer.confidence("Dirty and overpriced") > 0.7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LexiconSentimentScorer {
    lexicon: SentimentLexicon,
}

impl LexiconSentimentScorer {
    /// Classify using `lexicon`.
    #[must_use]
    pub const fn new(lexicon: SentimentLexicon) -> Self {
        Self { lexicon }
    }

    fn counts(&self, text: &str) -> (u32, u32) {
        let mut positive = 0_u32;
        let mut negative = 0_u32;
        let mut negated = false;
        for word in words(text) {
            let lowered = word.to_lowercase();
            if self.lexicon.negations.contains(&lowered) {
                negated = !negated;
                continue;
            }
            if let Some(is_positive) = self.lexicon.polarity(&lowered) {
                if is_positive != negated {
                    positive = positive.saturating_add(1);
                } else {
                    negative = negative.saturating_add(1);
                }
                negated = false;
            }
        }
        (positive, negative)
    }
}

impl SentimentScorer for LexiconSentimentScorer {
    #[expect(
        clippy::float_arithmetic,
        reason = "Laplace-smoothed probability needs floating-point division"
    )]
    fn confidence(&self, text: &str) -> f64 {
        let (positive, negative) = self.counts(text);
        let hits = f64::from(positive) + f64::from(negative);
        let probability = (f64::from(positive) + 1.0) / (hits + 2.0);
        Self::sanitise(probability.max(1.0 - probability))
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '\'' || ch == '\u{2019}'
}

/// Split `text` into words, keeping apostrophes so contractions stay whole.
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|ch: char| !is_word_char(ch))
        .map(|word| word.trim_matches(|ch: char| !ch.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(|word| word.replace('\u{2019}', "'"))
}
