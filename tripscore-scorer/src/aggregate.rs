//! Scoring reviews and rolling them up per attraction.
#![forbid(unsafe_code)]

use log::{debug, info};
use serde::Serialize;
use thiserror::Error;
use tripscore_core::{
    Attraction, Rating, RatingError, Review, SentimentScorer, TokenBudget, TokenBudgetError,
    Tokenizer, WordTokenizer,
};

use crate::truncate::TruncatingScorer;
use crate::weight::{CoefficientError, WeightCoefficients, calculate_weight};

/// Scores reviews with a sentiment classifier and the weight formula.
///
/// Titles and bodies are truncated to the configured [`TokenBudget`]
/// before classification, and every confidence is sanitised into
/// `0.0..=1.0` before it reaches the formula.
///
/// # Examples
/// ```
/// use tripscore_core::{Attraction, Review};
/// use tripscore_scorer::{LexiconSentimentScorer, ReviewScorer};
///
/// let scorer = ReviewScorer::new(LexiconSentimentScorer::default());
/// let mut attraction = Attraction::new("Hoi An Ancient Town")
///     .with_reviews(vec![Review::new(5, "Lovely", "Lanterns everywhere")]);
///
/// let weight = scorer.score_attraction(&mut attraction).expect("valid ratings");
/// assert_eq!(attraction.weight, Some(weight));
/// assert!(weight > 70.0);
/// ```
#[derive(Debug, Clone)]
pub struct ReviewScorer<S, T = WordTokenizer> {
    sentiment: S,
    tokenizer: T,
    budget: TokenBudget,
    coefficients: WeightCoefficients,
}

impl<S> ReviewScorer<S> {
    /// Score with `sentiment`, the default tokenizer, budget and
    /// coefficients.
    #[must_use]
    pub fn new(sentiment: S) -> Self {
        Self {
            sentiment,
            tokenizer: WordTokenizer,
            budget: TokenBudget::default(),
            coefficients: WeightCoefficients::default(),
        }
    }
}

impl<S, T> ReviewScorer<S, T> {
    /// Replace the weight coefficients after validating them.
    ///
    /// # Errors
    /// Returns [`CoefficientError`] when the coefficients are unusable.
    pub fn with_coefficients(
        mut self,
        coefficients: WeightCoefficients,
    ) -> Result<Self, CoefficientError> {
        self.coefficients = coefficients.validate()?;
        Ok(self)
    }

    /// Replace the token budget after validating it.
    ///
    /// # Errors
    /// Returns [`TokenBudgetError`] when a budget is zero or exceeds the
    /// model limit.
    pub fn with_budget(mut self, budget: TokenBudget) -> Result<Self, TokenBudgetError> {
        self.budget = budget.validate()?;
        Ok(self)
    }

    /// Swap the tokenizer used for truncation.
    #[must_use]
    pub fn with_tokenizer<U>(self, tokenizer: U) -> ReviewScorer<S, U> {
        ReviewScorer {
            sentiment: self.sentiment,
            tokenizer,
            budget: self.budget,
            coefficients: self.coefficients,
        }
    }

    /// Coefficients applied by the weight formula.
    #[must_use]
    pub const fn coefficients(&self) -> &WeightCoefficients {
        &self.coefficients
    }

    /// Token budget applied before classification.
    #[must_use]
    pub const fn budget(&self) -> TokenBudget {
        self.budget
    }
}

impl<S, T> ReviewScorer<S, T>
where
    S: SentimentScorer,
    T: Tokenizer,
{
    /// Score one review on the `0.0..=100.0` scale.
    ///
    /// # Errors
    /// Returns [`RatingError`] when the review's rating is malformed.
    pub fn score_review(&self, review: &Review) -> Result<f64, RatingError> {
        let rating = review.rating()?;
        Ok(self.score_rated(rating, review))
    }

    /// Score every review of `attraction` and set its weight to the mean
    /// review score, or `0.0` when it has no reviews.
    ///
    /// All ratings are validated before anything is written, so on error
    /// the attraction is left exactly as it was.
    ///
    /// # Errors
    /// Returns [`ScoringError::InvalidRating`] naming the attraction and the
    /// position of the first malformed review.
    pub fn score_attraction(&self, attraction: &mut Attraction) -> Result<f64, ScoringError> {
        let ratings = attraction
            .reviews
            .iter()
            .enumerate()
            .map(|(index, review)| {
                review.rating().map_err(|source| ScoringError::InvalidRating {
                    attraction: attraction.name.clone(),
                    review: index,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let scores: Vec<f64> = ratings
            .into_iter()
            .zip(&attraction.reviews)
            .map(|(rating, review)| self.score_rated(rating, review))
            .collect();
        for (review, score) in attraction.reviews.iter_mut().zip(&scores) {
            review.score = Some(*score);
        }

        let weight = mean(&scores);
        attraction.weight = Some(weight);
        debug!(
            "scored {}: {} reviews, weight {weight:.2}",
            attraction.name,
            scores.len()
        );
        Ok(weight)
    }

    /// Score `attractions` in order.
    ///
    /// Processing stops at the first attraction holding a malformed rating;
    /// attractions before it keep their new scores and that attraction is
    /// left untouched.
    ///
    /// # Errors
    /// Returns the first [`ScoringError`] encountered.
    pub fn score_attractions(
        &self,
        attractions: &mut [Attraction],
    ) -> Result<ScoringSummary, ScoringError> {
        let mut summary = ScoringSummary::default();
        for attraction in attractions.iter_mut() {
            self.score_attraction(attraction)?;
            summary.record(attraction.reviews.len());
        }
        info!(
            "scored {} attractions ({} reviews, {} without reviews)",
            summary.attractions, summary.reviews, summary.unreviewed
        );
        Ok(summary)
    }

    fn score_rated(&self, rating: Rating, review: &Review) -> f64 {
        let title = TruncatingScorer::new(&self.sentiment, &self.tokenizer, self.budget.title);
        let content = TruncatingScorer::new(&self.sentiment, &self.tokenizer, self.budget.content);
        let title_sentiment = S::sanitise(title.confidence(&review.title));
        let content_sentiment = S::sanitise(content.confidence(&review.content));
        calculate_weight(
            rating,
            title_sentiment,
            content_sentiment,
            &self.coefficients,
        )
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "averaging review scores requires floating-point division"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "review counts are far below f64's exact integer range"
)]
fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Counts reported after scoring a batch of attractions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoringSummary {
    /// Attractions scored.
    pub attractions: usize,
    /// Reviews scored across all attractions.
    pub reviews: usize,
    /// Attractions that had no reviews and received weight `0.0`.
    pub unreviewed: usize,
}

impl ScoringSummary {
    const fn record(&mut self, reviews: usize) {
        self.attractions = self.attractions.saturating_add(1);
        self.reviews = self.reviews.saturating_add(reviews);
        if reviews == 0 {
            self.unreviewed = self.unreviewed.saturating_add(1);
        }
    }
}

/// An attraction's name paired with its weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAttraction {
    /// Attraction name.
    pub name: String,
    /// Mean review score; `0.0` when unscored.
    pub weight: f64,
}

/// Order attractions by descending weight.
///
/// Ties keep their input order. Attractions without a weight rank as `0.0`.
#[must_use]
pub fn rank(attractions: &[Attraction]) -> Vec<RankedAttraction> {
    let mut ranked: Vec<RankedAttraction> = attractions
        .iter()
        .map(|attraction| RankedAttraction {
            name: attraction.name.clone(),
            weight: attraction.weight.unwrap_or_default(),
        })
        .collect();
    ranked.sort_by(|left, right| right.weight.total_cmp(&left.weight));
    ranked
}

/// Errors raised while scoring attractions.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// A review carried a rating that is not an integer between 0 and 5.
    #[error("review {review} of {attraction} has an invalid rating")]
    InvalidRating {
        /// Name of the attraction holding the review.
        attraction: String,
        /// Zero-based position of the review within the attraction.
        review: usize,
        /// Why the rating was rejected.
        #[source]
        source: RatingError,
    },
}
