//! Budgeted classification of long text.
#![forbid(unsafe_code)]

use tripscore_core::{SentimentScorer, Tokenizer};

/// Wrap a [`SentimentScorer`] so every input is cut to a token budget first.
///
/// Two texts sharing their first `max_tokens` tokens reach the inner
/// classifier as the same string, so they always receive the same
/// confidence. Inputs of any length are accepted.
///
/// # Examples
/// ```
/// use tripscore_core::{SentimentScorer, WordTokenizer};
/// use tripscore_scorer::TruncatingScorer;
///
/// struct Length;
/// impl SentimentScorer for Length {
///     fn confidence(&self, text: &str) -> f64 {
///         if text.len() > 10 { 1.0 } else { 0.0 }
///     }
/// }
///
/// let scorer = TruncatingScorer::new(Length, WordTokenizer, 1);
/// assert_eq!(scorer.confidence("short but followed by many words"), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct TruncatingScorer<S, T> {
    inner: S,
    tokenizer: T,
    max_tokens: usize,
}

impl<S, T> TruncatingScorer<S, T> {
    /// Classify with `inner` after truncating to `max_tokens` tokens.
    #[must_use]
    pub const fn new(inner: S, tokenizer: T, max_tokens: usize) -> Self {
        Self {
            inner,
            tokenizer,
            max_tokens,
        }
    }

    /// Token budget applied before classification.
    #[must_use]
    pub const fn max_tokens(&self) -> usize {
        self.max_tokens
    }
}

impl<S, T> SentimentScorer for TruncatingScorer<S, T>
where
    S: SentimentScorer,
    T: Tokenizer,
{
    fn confidence(&self, text: &str) -> f64 {
        let truncated = self.tokenizer.truncate(text, self.max_tokens);
        self.inner.confidence(truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tripscore_core::{WordTokenizer, test_support::FixedSentiment};

    #[rstest]
    fn classifies_the_truncated_prefix() {
        let inner = FixedSentiment::constant(0.1).with_text("Stunning view", 0.9);
        let scorer = TruncatingScorer::new(inner, WordTokenizer, 2);

        assert_eq!(scorer.confidence("Stunning view of the bay at dusk"), 0.9);
        assert_eq!(scorer.confidence("Stunning view"), 0.9);
        assert_eq!(scorer.confidence("Stunning"), 0.1);
    }

    #[rstest]
    fn long_inputs_match_their_shared_prefix() {
        let inner = FixedSentiment::constant(0.2);
        let head: Vec<String> = (0..128).map(|i| format!("w{i}")).collect();
        let short = head.join(" ");
        let inner = inner.with_text(short.clone(), 0.75);
        let long = format!("{short} {}", vec!["more"; 872].join(" "));
        let scorer = TruncatingScorer::new(&inner, WordTokenizer, 128);

        assert_eq!(scorer.confidence(&long), scorer.confidence(&short));
        assert_eq!(scorer.confidence(&long), 0.75);
    }

    #[rstest]
    fn exposes_budget() {
        let scorer = TruncatingScorer::new(FixedSentiment::constant(0.5), WordTokenizer, 384);
        assert_eq!(scorer.max_tokens(), 384);
    }
}
