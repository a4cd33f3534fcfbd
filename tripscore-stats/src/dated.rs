//! Extraction of dated review contributions.
#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use log::warn;
use tripscore_core::{Attraction, ReviewDate};

use crate::StatsError;

/// A review that carries a parseable date, reduced to what reports need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Contribution<'a> {
    pub(crate) date: ReviewDate,
    pub(crate) trip_type: &'a str,
    pub(crate) weight: f64,
}

/// Return the contribution `score - baseline` of every dated review.
///
/// Undated reviews are skipped silently; reviews whose date cannot be
/// parsed are skipped with a warning.
pub(crate) fn contributions(
    attraction: &Attraction,
    baseline: f64,
) -> Result<Vec<Contribution<'_>>, StatsError> {
    let mut dated = Vec::with_capacity(attraction.reviews.len());
    for (index, review) in attraction.reviews.iter().enumerate() {
        let date = match review.date() {
            Ok(Some(date)) => date,
            Ok(None) => continue,
            Err(err) => {
                warn!("skipping review {index} of {}: {err}", attraction.name);
                continue;
            }
        };
        let score = review.score.ok_or_else(|| StatsError::UnscoredReview {
            attraction: attraction.name.clone(),
            review: index,
        })?;
        dated.push(Contribution {
            date,
            trip_type: review.trip_type(),
            weight: offset(score, baseline),
        });
    }
    Ok(dated)
}

/// Distinct tags of `attraction` in name order.
pub(crate) fn unique_tags(attraction: &Attraction) -> BTreeSet<&str> {
    attraction.tags().into_iter().collect()
}

#[expect(
    clippy::float_arithmetic,
    reason = "contributions are scores shifted by the baseline"
)]
const fn offset(score: f64, baseline: f64) -> f64 {
    score - baseline
}

/// Add `weight` to a running total.
#[expect(clippy::float_arithmetic, reason = "totals accumulate f64 weights")]
pub(crate) const fn accumulate(total: &mut f64, weight: f64) {
    *total += weight;
}
