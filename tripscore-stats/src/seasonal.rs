//! Popularity totals per season of a single year.
#![forbid(unsafe_code)]

use tripscore_core::{Attraction, Season};

use crate::dated::{accumulate, contributions, unique_tags};
use crate::{SeasonalWeights, StatsError};

fn empty_seasons() -> SeasonalWeights {
    Season::ALL
        .into_iter()
        .map(|season| (season, Default::default()))
        .collect()
}

/// Total contributions per season and attraction for reviews dated in
/// `year`.
///
/// All four seasons are present; each lists only attractions reviewed in
/// that season.
///
/// # Errors
/// Returns [`StatsError::UnscoredReview`] when a dated review has no score.
pub fn seasonal_attraction_weights(
    attractions: &[Attraction],
    year: i32,
    baseline: f64,
) -> Result<SeasonalWeights, StatsError> {
    let mut weights = empty_seasons();
    for attraction in attractions {
        for contribution in contributions(attraction, baseline)? {
            if contribution.date.year() != year {
                continue;
            }
            let season = weights.entry(contribution.date.season()).or_default();
            accumulate(
                season.entry(attraction.name.clone()).or_default(),
                contribution.weight,
            );
        }
    }
    Ok(weights)
}

/// Total contributions per season and tag for reviews dated in `year`.
///
/// # Errors
/// Returns [`StatsError::UnscoredReview`] when a dated review has no score.
pub fn seasonal_tag_weights(
    attractions: &[Attraction],
    year: i32,
    baseline: f64,
) -> Result<SeasonalWeights, StatsError> {
    let mut weights = empty_seasons();
    for attraction in attractions {
        let dated = contributions(attraction, baseline)?;
        let tags = unique_tags(attraction);
        for contribution in dated.iter().filter(|c| c.date.year() == year) {
            let season = weights.entry(contribution.date.season()).or_default();
            for tag in &tags {
                accumulate(season.entry((*tag).to_owned()).or_default(), contribution.weight);
            }
        }
    }
    Ok(weights)
}
