//! Attraction and review records as persisted in JSON.
//!
//! The scraped files carry more than the scorer needs (usernames, images,
//! per-star histograms). Anything not modelled here is captured in the
//! `extra` maps so a load/score/save cycle only adds `score` and `weight`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{RawRating, Rating, RatingError, ReviewDate, ReviewDateError};

/// Separator used by the listing pages to join multiple tags.
const TAG_SEPARATOR: &str = " and ";

/// One user-submitted review of an attraction.
///
/// # Examples
/// ```
/// use tripscore_core::Review;
///
/// let review = Review::new(5, "Amazing trip", "Would visit again").with_time("Jun 2023");
/// assert_eq!(review.rating().expect("valid rating").get(), 5);
/// assert!(review.score.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Display name of the reviewer, when scraped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Star rating exactly as scraped; see [`Review::rating`].
    pub rating: RawRating,
    /// Review headline.
    #[serde(default)]
    pub title: String,
    /// Review body.
    #[serde(default)]
    pub content: String,
    /// Month and year of the visit, e.g. `"Jun 2023"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Who the reviewer travelled with, e.g. `"Couples"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_trip: Option<String>,
    /// Computed score in `0.0..=100.0`, present once the review is scored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Fields not modelled above, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Review {
    /// Build an unscored review from its rating, title and body.
    #[must_use]
    pub fn new(
        rating: impl Into<RawRating>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            username: None,
            rating: rating.into(),
            title: title.into(),
            content: content.into(),
            time: None,
            type_trip: None,
            score: None,
            extra: Map::new(),
        }
    }

    /// Attach the visit month, e.g. `"Jun 2023"`.
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Attach the trip type, e.g. `"Family"`.
    #[must_use]
    pub fn with_trip_type(mut self, trip_type: impl Into<String>) -> Self {
        self.type_trip = Some(trip_type.into());
        self
    }

    /// Attach a previously computed score.
    #[must_use]
    pub const fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Validate the scraped rating.
    ///
    /// # Errors
    /// Returns [`RatingError`] when the rating is malformed.
    pub fn rating(&self) -> Result<Rating, RatingError> {
        self.rating.validate()
    }

    /// Parse the visit month.
    ///
    /// Returns `Ok(None)` when no date was scraped.
    ///
    /// # Errors
    /// Returns [`ReviewDateError`] when the text is present but unparseable.
    pub fn date(&self) -> Result<Option<ReviewDate>, ReviewDateError> {
        self.time
            .as_deref()
            .map_or(Ok(None), ReviewDate::parse)
    }

    /// Return the trip type as scraped, or an empty string when absent.
    #[must_use]
    pub fn trip_type(&self) -> &str {
        self.type_trip.as_deref().unwrap_or_default()
    }
}

/// A point of interest with its reviews.
///
/// # Examples
/// ```
/// use tripscore_core::{Attraction, Review};
///
/// let attraction = Attraction::new("Ha Long Bay")
///     .with_tag("Bodies of Water and Islands")
///     .with_reviews(vec![Review::new(5, "Stunning", "Go on a clear day")]);
/// assert_eq!(attraction.tags(), vec!["Bodies of Water", "Islands"]);
/// assert_eq!(attraction.reviews.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    /// Display name, used as the attraction's key in reports.
    pub name: String,
    /// Raw tag line as scraped, e.g. `"Parks and Gardens"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Tags split out of [`Attraction::tag`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_split: Vec<String>,
    /// Reviews in scrape order. A missing or `null` list means no reviews.
    #[serde(
        rename = "review",
        alias = "reviews",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub reviews: Vec<Review>,
    /// Mean review score, present once the attraction is scored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Fields not modelled above, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attraction {
    /// Build an attraction with no tags and no reviews.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: None,
            tag_split: Vec::new(),
            reviews: Vec::new(),
            weight: None,
            extra: Map::new(),
        }
    }

    /// Set the raw tag line.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the reviews.
    #[must_use]
    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = reviews;
        self
    }

    /// Return the attraction's tags.
    ///
    /// Uses `tag_split` when present, otherwise splits the raw tag line on
    /// `" and "`.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        if !self.tag_split.is_empty() {
            return self.tag_split.iter().map(String::as_str).collect();
        }
        self.tag
            .as_deref()
            .map(|line| {
                line.split(TAG_SEPARATOR)
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Review>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Review>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    //! Unit coverage for record (de)serialisation.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn scraped_record_round_trips_unknown_fields() {
        let raw = json!({
            "name": "Hoan Kiem Lake",
            "image": "https://example.invalid/lake.jpg",
            "state": "Ha Noi",
            "tag": "Bodies of Water",
            "review_score": {"5": 1},
            "review": [{
                "username": "traveller",
                "rating": "5",
                "title": "Lovely",
                "content": "Peaceful walk",
                "time": "Jun 2023",
                "type_trip": "Couples"
            }]
        });

        let attraction: Attraction = serde_json::from_value(raw.clone()).expect("parse record");
        assert_eq!(attraction.reviews.len(), 1);
        assert_eq!(attraction.extra.get("state"), Some(&json!("Ha Noi")));

        let encoded = serde_json::to_value(&attraction).expect("encode record");
        assert_eq!(encoded, raw);
    }

    #[rstest]
    fn unknown_fields_keep_their_scraped_order() {
        let raw = r#"{"name": "Temple", "state": "Hue", "image": "t.jpg", "area": "Central"}"#;

        let attraction: Attraction = serde_json::from_str(raw).expect("parse record");
        let keys: Vec<&str> = attraction.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, ["state", "image", "area"]);

        let encoded = serde_json::to_string(&attraction).expect("encode record");
        let state = encoded.find("\"state\"").expect("state written");
        let area = encoded.find("\"area\"").expect("area written");
        assert!(state < area, "scraped field order should survive: {encoded}");
    }

    #[rstest]
    #[case(json!({"name": "Temple"}))]
    #[case(json!({"name": "Temple", "review": null}))]
    #[case(json!({"name": "Temple", "reviews": []}))]
    fn missing_review_list_means_no_reviews(#[case] raw: Value) {
        let attraction: Attraction = serde_json::from_value(raw).expect("parse record");
        assert!(attraction.reviews.is_empty());
    }

    #[rstest]
    fn scored_fields_are_written_back() {
        let mut attraction =
            Attraction::new("Temple").with_reviews(vec![Review::new(4, "Nice", "Calm")]);
        attraction.weight = Some(80.0);
        if let Some(review) = attraction.reviews.first_mut() {
            review.score = Some(80.0);
        }

        let encoded = serde_json::to_value(&attraction).expect("encode record");

        assert_eq!(encoded["weight"], json!(80.0));
        assert_eq!(encoded["review"][0]["score"], json!(80.0));
    }

    #[rstest]
    fn explicit_tag_split_wins_over_tag_line() {
        let mut attraction = Attraction::new("Market").with_tag("Flea and Street Markets");
        attraction.tag_split = vec!["Markets".into()];
        assert_eq!(attraction.tags(), vec!["Markets"]);
    }

    #[rstest]
    fn missing_tags_yield_empty_list() {
        assert!(Attraction::new("Bridge").tags().is_empty());
    }

    #[rstest]
    fn blank_time_is_not_a_date() {
        let review = Review::new(3, "Fine", "Okay").with_time("   ");
        assert_eq!(review.date().expect("blank date"), None);
    }
}
