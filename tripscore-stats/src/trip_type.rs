//! Popularity totals grouped by trip type.
#![forbid(unsafe_code)]

use tripscore_core::Attraction;

use crate::dated::{accumulate, contributions, unique_tags};
use crate::{GroupedWeights, StatsError, WeightTable};

/// Total contributions per trip type and attraction across all years.
///
/// Only dated reviews count. The trip type is taken as scraped, so reviews
/// without one are grouped under the empty string.
///
/// # Errors
/// Returns [`StatsError::UnscoredReview`] when a dated review has no score.
pub fn trip_type_attraction_weights(
    attractions: &[Attraction],
    baseline: f64,
) -> Result<GroupedWeights, StatsError> {
    let mut weights = GroupedWeights::new();
    for attraction in attractions {
        for contribution in contributions(attraction, baseline)? {
            let group = weights
                .entry(contribution.trip_type.to_owned())
                .or_default();
            accumulate(
                group.entry(attraction.name.clone()).or_default(),
                contribution.weight,
            );
        }
    }
    Ok(weights)
}

/// Total contributions per trip type and tag for reviews dated in `year`.
///
/// # Errors
/// Returns [`StatsError::UnscoredReview`] when a dated review has no score.
pub fn trip_type_tag_weights(
    attractions: &[Attraction],
    year: i32,
    baseline: f64,
) -> Result<GroupedWeights, StatsError> {
    let mut weights = GroupedWeights::new();
    for attraction in attractions {
        let tags = unique_tags(attraction);
        for contribution in contributions(attraction, baseline)? {
            if contribution.date.year() != year {
                continue;
            }
            let group = weights
                .entry(contribution.trip_type.to_owned())
                .or_default();
            for tag in &tags {
                accumulate(group.entry((*tag).to_owned()).or_default(), contribution.weight);
            }
        }
    }
    Ok(weights)
}

/// Sum the raw scores of one attraction's reviews per trip type.
///
/// Trip types are trimmed and reviews without one are ignored. Dates play
/// no part and no baseline is applied.
///
/// # Errors
/// Returns [`StatsError::UnscoredReview`] when a counted review has no
/// score.
pub fn trip_type_score_totals(attraction: &Attraction) -> Result<WeightTable, StatsError> {
    let mut totals = WeightTable::new();
    for (index, review) in attraction.reviews.iter().enumerate() {
        let trip_type = review.trip_type().trim();
        if trip_type.is_empty() {
            continue;
        }
        let score = review.score.ok_or_else(|| StatsError::UnscoredReview {
            attraction: attraction.name.clone(),
            review: index,
        })?;
        accumulate(totals.entry(trip_type.to_owned()).or_default(), score);
    }
    Ok(totals)
}
