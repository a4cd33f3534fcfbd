//! The per-review weight formula.
//!
//! A review's score blends its normalised star rating with the sigmoid of
//! the classifier confidence for its title and body:
//!
//! ```text
//! blended = title_weight * sigmoid(title) + content_weight * sigmoid(content)
//! score   = SCORE_SCALE * (rating_weight * rating / 5 + sentiment_weight * blended)
//! ```
//!
//! The sigmoid is applied to the raw confidence, which is not signed by
//! polarity. Confident negative text therefore lifts a score just as much as
//! confident positive text. This mirrors the established scoring and is kept
//! until a calibration target says otherwise.

use thiserror::Error;
use tripscore_core::Rating;

/// Factor mapping the blended `0.0..=1.0` weight onto the score range.
pub const SCORE_SCALE: f64 = 100.0;

/// Tolerance applied when checking that paired coefficients sum to one.
const SUM_TOLERANCE: f64 = 1e-9;

/// Tunable coefficients of the weight formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightCoefficients {
    /// Share of the score driven by the star rating.
    pub rating_weight: f64,
    /// Share of the score driven by the blended text sentiment.
    pub sentiment_weight: f64,
    /// Share of the blended sentiment taken from the title.
    pub title_weight: f64,
    /// Share of the blended sentiment taken from the body.
    pub content_weight: f64,
}

impl WeightCoefficients {
    /// Validate the coefficients and return a copy.
    ///
    /// # Errors
    /// Returns [`CoefficientError`] when a value is negative or not finite,
    /// or when either pair (rating/sentiment, title/content) does not sum
    /// to one.
    pub fn validate(self) -> Result<Self, CoefficientError> {
        let values = [
            ("rating_weight", self.rating_weight),
            ("sentiment_weight", self.sentiment_weight),
            ("title_weight", self.title_weight),
            ("content_weight", self.content_weight),
        ];
        if let Some((name, value)) = values
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(CoefficientError::InvalidValue { name, value });
        }
        check_pair("rating_weight + sentiment_weight", self.rating_weight, self.sentiment_weight)?;
        check_pair("title_weight + content_weight", self.title_weight, self.content_weight)?;
        Ok(self)
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "pair validation sums two coefficients"
)]
const fn check_pair(pair: &'static str, first: f64, second: f64) -> Result<(), CoefficientError> {
    let sum = first + second;
    if (sum - 1.0).abs() > SUM_TOLERANCE {
        return Err(CoefficientError::UnbalancedPair { pair, sum });
    }
    Ok(())
}

impl Default for WeightCoefficients {
    fn default() -> Self {
        Self {
            rating_weight: 0.7,
            sentiment_weight: 0.3,
            title_weight: 0.6,
            content_weight: 0.4,
        }
    }
}

/// Errors raised when validating [`WeightCoefficients`].
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum CoefficientError {
    /// A coefficient is negative, NaN or infinite.
    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidValue {
        /// Name of the offending coefficient.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A pair of complementary coefficients does not sum to one.
    #[error("{pair} must sum to 1 (got {sum})")]
    UnbalancedPair {
        /// The pair being checked.
        pair: &'static str,
        /// The actual sum.
        sum: f64,
    },
}

/// Standard logistic function, `1 / (1 + e^-x)`.
///
/// # Examples
/// ```
/// use tripscore_scorer::sigmoid;
///
/// assert_eq!(sigmoid(0.0), 0.5);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the logistic function is floating-point by definition"
)]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Score a single review on the `0.0..=100.0` scale.
///
/// `title_sentiment` and `content_sentiment` are raw classifier
/// confidences; the sigmoid is applied here. Non-finite results map to
/// `0.0` and the output is clamped to the score range, so unvalidated
/// coefficients cannot break the range invariant.
///
/// # Examples
/// ```
/// use tripscore_core::Rating;
/// use tripscore_scorer::{WeightCoefficients, calculate_weight};
///
/// let rating = Rating::new(5).expect("valid rating");
/// let score = calculate_weight(rating, 0.0, 0.0, &WeightCoefficients::default());
/// assert!((score - 85.0).abs() < 1e-9);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "weight blending requires floating-point weighted sums"
)]
pub fn calculate_weight(
    rating: Rating,
    title_sentiment: f64,
    content_sentiment: f64,
    coefficients: &WeightCoefficients,
) -> f64 {
    let normalised_rating = rating.normalised();
    let normalised_title = sigmoid(title_sentiment);
    let normalised_content = sigmoid(content_sentiment);

    let blended_sentiment = coefficients.title_weight * normalised_title
        + coefficients.content_weight * normalised_content;
    let raw_weight = coefficients.rating_weight * normalised_rating
        + coefficients.sentiment_weight * blended_sentiment;

    sanitise_score(raw_weight * SCORE_SCALE)
}

const fn sanitise_score(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, SCORE_SCALE)
}

#[cfg(test)]
mod tests {
    //! Unit coverage for the weight formula.

    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    const EPSILON: f64 = 1e-9;

    fn rating(value: u8) -> Rating {
        Rating::new(value).expect("valid rating")
    }

    #[rstest]
    fn sigmoid_of_zero_is_one_half() {
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "tests compare floating point values"
    )]
    fn top_rating_with_neutral_sentiment_scores_85() {
        let score = calculate_weight(rating(5), 0.0, 0.0, &WeightCoefficients::default());
        assert!((score - 85.0).abs() < EPSILON, "got {score}");
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "tests compare floating point values"
    )]
    fn zero_rating_with_saturated_sentiment_scores_30() {
        let score = calculate_weight(rating(0), 1e6, 1e6, &WeightCoefficients::default());
        assert!((score - 30.0).abs() < EPSILON, "got {score}");
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "tests compare floating point values"
    )]
    fn title_outweighs_content() {
        let coefficients = WeightCoefficients::default();
        let confident_title = calculate_weight(rating(3), 1.0, 0.0, &coefficients);
        let confident_content = calculate_weight(rating(3), 0.0, 1.0, &coefficients);
        assert!(confident_title > confident_content);
        let expected_gap = 0.3 * 0.2 * (sigmoid(1.0) - 0.5) * SCORE_SCALE;
        assert!((confident_title - confident_content - expected_gap).abs() < EPSILON);
    }

    #[rstest]
    fn out_of_range_coefficients_are_clamped() {
        let coefficients = WeightCoefficients {
            rating_weight: 5.0,
            ..WeightCoefficients::default()
        };
        assert_eq!(calculate_weight(rating(5), 1.0, 1.0, &coefficients), 100.0);
    }

    #[rstest]
    fn defaults_validate() {
        let defaults = WeightCoefficients::default();
        assert_eq!(defaults.validate(), Ok(defaults));
    }

    #[rstest]
    #[case(WeightCoefficients { rating_weight: -0.1, sentiment_weight: 1.1, ..WeightCoefficients::default() }, "rating_weight")]
    #[case(WeightCoefficients { title_weight: f64::NAN, ..WeightCoefficients::default() }, "title_weight")]
    fn rejects_invalid_values(#[case] coefficients: WeightCoefficients, #[case] field: &str) {
        match coefficients.validate() {
            Err(CoefficientError::InvalidValue { name, .. }) => assert_eq!(name, field),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[rstest]
    #[case(WeightCoefficients { rating_weight: 0.8, ..WeightCoefficients::default() })]
    #[case(WeightCoefficients { content_weight: 0.5, ..WeightCoefficients::default() })]
    fn rejects_unbalanced_pairs(#[case] coefficients: WeightCoefficients) {
        assert!(matches!(
            coefficients.validate(),
            Err(CoefficientError::UnbalancedPair { .. })
        ));
    }

    proptest! {
        #[test]
        fn score_stays_within_range(
            stars in 0_u8..=5,
            title in -1e6_f64..1e6,
            content in -1e6_f64..1e6,
        ) {
            let score = calculate_weight(rating(stars), title, content, &WeightCoefficients::default());
            prop_assert!((0.0..=SCORE_SCALE).contains(&score), "score {} out of range", score);
        }

        #[test]
        fn score_is_monotonic_in_rating(
            stars in 0_u8..5,
            title in 0.0_f64..=1.0,
            content in 0.0_f64..=1.0,
        ) {
            let coefficients = WeightCoefficients::default();
            let lower = calculate_weight(rating(stars), title, content, &coefficients);
            let higher = calculate_weight(rating(stars + 1), title, content, &coefficients);
            prop_assert!(lower <= higher, "{} > {}", lower, higher);
        }
    }
}
