//! Star ratings as scraped and as validated.
//!
//! Scraped ratings are loosely typed: the listing pages yield integers,
//! but review markup is parsed from text and may arrive as `"4"` or
//! `"4.0"`. [`RawRating`] keeps whatever the payload held so records
//! round-trip unchanged; [`Rating`] is the validated `0..=5` value the
//! scorer works with.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validated star rating in the inclusive range `0..=5`.
///
/// # Examples
/// ```
/// use tripscore_core::Rating;
///
/// let rating = Rating::new(4).expect("valid rating");
/// assert_eq!(rating.get(), 4);
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Highest rating a reviewer can award.
    pub const MAX: u8 = 5;

    /// Validate and wrap a rating value.
    ///
    /// # Errors
    /// Returns [`RatingError::OutOfRange`] when `value` exceeds [`Rating::MAX`].
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if value > Self::MAX {
            return Err(RatingError::OutOfRange {
                raw: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Return the rating as an integer.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Return the rating scaled into `0.0..=1.0`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "normalising a rating divides by the maximum"
    )]
    pub fn normalised(self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX)
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rating exactly as it appeared in the JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRating {
    /// An integral JSON number.
    Integer(i64),
    /// A JSON number with a fractional part or exponent.
    Float(f64),
    /// A rating captured as text, such as `"4"` or `"4.0"`.
    Text(String),
}

impl RawRating {
    /// Validate the raw value into a [`Rating`].
    ///
    /// Integral floats and numeric strings are accepted because scraped
    /// ratings are extracted from text.
    ///
    /// # Errors
    /// Returns [`RatingError`] when the value is not numeric, not integral,
    /// not finite, or outside `0..=5`.
    ///
    /// # Examples
    /// ```
    /// use tripscore_core::RawRating;
    ///
    /// let rating = RawRating::Text(" 4.0 ".into()).validate().expect("numeric text");
    /// assert_eq!(rating.get(), 4);
    /// assert!(RawRating::Float(3.5).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<Rating, RatingError> {
        match self {
            Self::Integer(value) => integer_rating(*value),
            Self::Float(value) => float_rating(*value),
            Self::Text(text) => {
                let trimmed = text.trim();
                let value = trimmed
                    .parse::<f64>()
                    .map_err(|_| RatingError::NotANumber {
                        raw: text.clone(),
                    })?;
                float_rating(value)
            }
        }
    }
}

impl From<u8> for RawRating {
    fn from(value: u8) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<Rating> for RawRating {
    fn from(rating: Rating) -> Self {
        Self::from(rating.get())
    }
}

impl From<&str> for RawRating {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl fmt::Display for RawRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "{text:?}"),
        }
    }
}

fn integer_rating(value: i64) -> Result<Rating, RatingError> {
    u8::try_from(value)
        .map_err(|_| RatingError::OutOfRange {
            raw: value.to_string(),
        })
        .and_then(Rating::new)
}

#[expect(
    clippy::float_cmp,
    reason = "only exactly integral ratings are accepted"
)]
fn float_rating(value: f64) -> Result<Rating, RatingError> {
    if !value.is_finite() {
        return Err(RatingError::NotFinite);
    }
    if value.fract() != 0.0 {
        return Err(RatingError::Fractional { value });
    }
    (0..=Rating::MAX)
        .find(|candidate| f64::from(*candidate) == value)
        .map(Rating)
        .ok_or_else(|| RatingError::OutOfRange {
            raw: value.to_string(),
        })
}

/// Errors raised while validating a star rating.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RatingError {
    /// The value lies outside `0..=5`.
    #[error("rating {raw} is outside the range 0..=5")]
    OutOfRange {
        /// The offending value as text.
        raw: String,
    },
    /// The value has a fractional part.
    #[error("rating {value} is not a whole number of stars")]
    Fractional {
        /// The offending value.
        value: f64,
    },
    /// The value is NaN or infinite.
    #[error("rating is not a finite number")]
    NotFinite,
    /// Text that does not parse as a number.
    #[error("rating {raw:?} is not numeric")]
    NotANumber {
        /// The offending text.
        raw: String,
    },
}

#[cfg(test)]
mod tests {
    //! Unit coverage for rating validation.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RawRating::Integer(0), 0)]
    #[case(RawRating::Integer(5), 5)]
    #[case(RawRating::Float(3.0), 3)]
    #[case(RawRating::Text("4".into()), 4)]
    #[case(RawRating::Text("2.0".into()), 2)]
    #[case(RawRating::Text(" 1 ".into()), 1)]
    fn accepts_integral_ratings(#[case] raw: RawRating, #[case] expected: u8) {
        let rating = raw.validate().expect("rating should validate");
        assert_eq!(rating.get(), expected);
    }

    #[rstest]
    #[case(RawRating::Integer(6))]
    #[case(RawRating::Integer(-1))]
    #[case(RawRating::Float(5.5))]
    #[case(RawRating::Float(-0.5))]
    #[case(RawRating::Float(10.0))]
    #[case(RawRating::Text("five".into()))]
    #[case(RawRating::Text(String::new()))]
    #[case(RawRating::Text("NaN".into()))]
    fn rejects_malformed_ratings(#[case] raw: RawRating) {
        assert!(raw.validate().is_err(), "{raw} should be rejected");
    }

    #[rstest]
    fn non_numeric_text_reports_original_value() {
        let err = RawRating::Text("five stars".into())
            .validate()
            .expect_err("text should fail");
        assert_eq!(
            err,
            RatingError::NotANumber {
                raw: "five stars".into()
            }
        );
    }

    #[rstest]
    fn raw_ratings_round_trip_through_json() {
        let parsed: Vec<RawRating> =
            serde_json::from_str(r#"[5, 4.0, "3"]"#).expect("parse raw ratings");
        assert_eq!(
            parsed,
            vec![
                RawRating::Integer(5),
                RawRating::Float(4.0),
                RawRating::Text("3".into())
            ]
        );
        let encoded = serde_json::to_string(&parsed).expect("encode raw ratings");
        assert_eq!(encoded, r#"[5,4.0,"3"]"#);
    }

    #[rstest]
    fn normalised_rating_spans_unit_interval() {
        assert_eq!(Rating::new(0).expect("zero").normalised(), 0.0);
        assert_eq!(Rating::new(5).expect("five").normalised(), 1.0);
    }
}
