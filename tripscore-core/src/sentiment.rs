//! Seams for the external sentiment classifier.
//!
//! A [`SentimentScorer`] reports how confident a classifier is in whatever
//! label it predicted. The confidence is not signed by polarity: a
//! confidently negative review and a confidently positive one both score
//! close to `1.0`.
//!
//! Classifiers built on sub-word models accept a bounded number of tokens.
//! A [`Tokenizer`] truncates over-long text to a fixed [`TokenBudget`]
//! before classification, so inputs that share their first `n` tokens
//! always classify identically and long inputs never fail.

use thiserror::Error;

/// Maximum number of tokens a sentiment model accepts in one input.
pub const MAX_MODEL_TOKENS: usize = 512;

const DEFAULT_TITLE_TOKENS: usize = 128;
const DEFAULT_CONTENT_TOKENS: usize = 384;

/// Classify text and report the confidence of the predicted label.
///
/// Implementations must be thread-safe (`Send` + `Sync`) and infallible:
/// they return a value for every input, including empty text.
///
/// Implementations must:
/// - Produce finite (`f64::is_finite`) confidences.
/// - Return values in the range `0.0..=1.0`.
///
/// Use [`SentimentScorer::sanitise`] to apply these guards.
///
/// # Examples
///
/// ```rust
/// use tripscore_core::SentimentScorer;
///
/// struct Undecided;
///
/// impl SentimentScorer for Undecided {
///     fn confidence(&self, _text: &str) -> f64 {
///         0.5
///     }
/// }
///
/// assert_eq!(Undecided.confidence("Lovely views"), 0.5);
/// ```
pub trait SentimentScorer: Send + Sync {
    /// Return the classifier's confidence in its predicted label for `text`.
    fn confidence(&self, text: &str) -> f64;

    /// Clamp and validate a raw confidence.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=1.0`.
    #[must_use]
    fn sanitise(confidence: f64) -> f64
    where
        Self: Sized,
    {
        if !confidence.is_finite() {
            return 0.0;
        }
        confidence.clamp(0.0, 1.0)
    }
}

impl<S: SentimentScorer + ?Sized> SentimentScorer for &S {
    fn confidence(&self, text: &str) -> f64 {
        (**self).confidence(text)
    }
}

/// Split text into tokens and cut it down to a token budget.
pub trait Tokenizer: Send + Sync {
    /// Return the longest prefix of `text` holding at most `max_tokens`
    /// tokens.
    ///
    /// The prefix ends at the last byte of the final kept token, so
    /// trailing whitespace is dropped when truncation happens. Text within
    /// budget is returned unchanged.
    fn truncate<'a>(&self, text: &'a str, max_tokens: usize) -> &'a str;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn truncate<'a>(&self, text: &'a str, max_tokens: usize) -> &'a str {
        (**self).truncate(text, max_tokens)
    }
}

/// Word-level tokenizer mirroring the pre-tokenisation step of sub-word
/// models: whitespace separates words and every punctuation or symbol
/// character is a token of its own.
///
/// # Examples
/// ```
/// use tripscore_core::{Tokenizer, WordTokenizer};
///
/// let tokenizer = WordTokenizer;
/// assert_eq!(tokenizer.count("Great view, friendly staff!"), 6);
/// assert_eq!(tokenizer.truncate("Great view, friendly staff!", 3), "Great view,");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordTokenizer;

impl WordTokenizer {
    /// Count the tokens in `text`.
    #[must_use]
    pub fn count(self, text: &str) -> usize {
        token_ends(text).count()
    }
}

impl Tokenizer for WordTokenizer {
    fn truncate<'a>(&self, text: &'a str, max_tokens: usize) -> &'a str {
        if max_tokens == 0 {
            return "";
        }
        token_ends(text)
            .nth(max_tokens)
            .and_then(|_| token_ends(text).nth(max_tokens.saturating_sub(1)))
            .and_then(|end| text.get(..end))
            .unwrap_or(text)
    }
}

fn is_symbol(ch: char) -> bool {
    !ch.is_alphanumeric() && !ch.is_whitespace()
}

/// Yield the byte offset just past the end of each token.
fn token_ends(text: &str) -> impl Iterator<Item = usize> + '_ {
    let mut chars = text.char_indices().peekable();
    std::iter::from_fn(move || {
        while let Some((_, ch)) = chars.peek() {
            if ch.is_whitespace() {
                chars.next();
            } else {
                break;
            }
        }
        let (start, first) = chars.next()?;
        let mut end = start + first.len_utf8();
        if is_symbol(first) {
            return Some(end);
        }
        while let Some(&(offset, ch)) = chars.peek() {
            if ch.is_whitespace() || is_symbol(ch) {
                break;
            }
            end = offset + ch.len_utf8();
            chars.next();
        }
        Some(end)
    })
}

/// Token budgets applied to review titles and bodies before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudget {
    /// Tokens kept from the title.
    pub title: usize,
    /// Tokens kept from the body.
    pub content: usize,
}

impl TokenBudget {
    /// Validate the budget and return a copy.
    ///
    /// # Errors
    /// Returns [`TokenBudgetError`] when either budget is zero or one
    /// budget alone exceeds [`MAX_MODEL_TOKENS`].
    pub const fn validate(self) -> Result<Self, TokenBudgetError> {
        if self.title == 0 || self.content == 0 {
            return Err(TokenBudgetError::Empty);
        }
        if self.title > MAX_MODEL_TOKENS || self.content > MAX_MODEL_TOKENS {
            return Err(TokenBudgetError::ExceedsModel {
                title: self.title,
                content: self.content,
            });
        }
        Ok(self)
    }
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE_TOKENS,
            content: DEFAULT_CONTENT_TOKENS,
        }
    }
}

/// Errors raised when validating a [`TokenBudget`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TokenBudgetError {
    /// A budget of zero tokens would classify empty text.
    #[error("token budgets must be positive")]
    Empty,
    /// A budget is larger than the model accepts.
    #[error(
        "token budgets (title {title}, content {content}) must each fit within {max} tokens",
        max = MAX_MODEL_TOKENS
    )]
    ExceedsModel {
        /// Requested title budget.
        title: usize,
        /// Requested content budget.
        content: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 0)]
    #[case("   ", 0)]
    #[case("Amazing", 1)]
    #[case("Amazing trip", 2)]
    #[case("Amazing trip!!", 4)]
    #[case("don't", 3)]
    #[case("Vịnh Hạ Long đẹp", 4)]
    fn counts_tokens(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(WordTokenizer.count(text), expected);
    }

    #[rstest]
    #[case("one two three", 5, "one two three")]
    #[case("one two three", 3, "one two three")]
    #[case("one two three", 2, "one two")]
    #[case("one, two", 1, "one")]
    #[case("one, two", 2, "one,")]
    #[case("  padded  words  ", 1, "  padded")]
    #[case("anything", 0, "")]
    fn truncates_to_budget(#[case] text: &str, #[case] budget: usize, #[case] expected: &str) {
        assert_eq!(WordTokenizer.truncate(text, budget), expected);
    }

    #[rstest]
    fn truncation_keeps_shared_prefix() {
        let prefix: Vec<String> = (0..128).map(|i| format!("word{i}")).collect();
        let short = prefix.join(" ");
        let long = format!("{short} {}", vec!["tail"; 872].join(" "));

        assert_eq!(WordTokenizer.count(&long), 1000);
        assert_eq!(WordTokenizer.truncate(&long, 128), short);
        assert_eq!(WordTokenizer.truncate(&short, 128), short);
    }

    #[rstest]
    fn default_budget_fits_model() {
        let budget = TokenBudget::default();
        assert_eq!(budget.title, 128);
        assert_eq!(budget.content, 384);
        assert!(budget.title + budget.content <= MAX_MODEL_TOKENS);
        assert_eq!(budget.validate(), Ok(budget));
    }

    #[rstest]
    #[case(TokenBudget { title: 0, content: 10 }, TokenBudgetError::Empty)]
    #[case(
        TokenBudget { title: 600, content: 10 },
        TokenBudgetError::ExceedsModel { title: 600, content: 10 }
    )]
    fn rejects_unusable_budgets(#[case] budget: TokenBudget, #[case] expected: TokenBudgetError) {
        assert_eq!(budget.validate(), Err(expected));
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 0.0)]
    #[case(-0.2, 0.0)]
    #[case(1.7, 1.0)]
    #[case(0.42, 0.42)]
    fn sanitise_clamps_confidence(#[case] raw: f64, #[case] expected: f64) {
        struct Constant;
        impl SentimentScorer for Constant {
            fn confidence(&self, _text: &str) -> f64 {
                0.5
            }
        }
        assert_eq!(<Constant as SentimentScorer>::sanitise(raw), expected);
    }
}
