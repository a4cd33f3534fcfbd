//! Popularity totals per calendar year.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use tripscore_core::Attraction;

use crate::dated::{accumulate, contributions, unique_tags};
use crate::{StatsError, WeightEntry, WeightTable, YearRange, YearlyWeights};

fn zeroed_years(range: YearRange) -> BTreeMap<i32, f64> {
    range.years().map(|year| (year, 0.0)).collect()
}

/// Total each attraction's contributions per year of `range`.
///
/// Every attraction appears with every year of the window, zero-filled.
/// Attractions sharing a name are merged.
///
/// # Errors
/// Returns [`StatsError::UnscoredReview`] when a dated review has no score.
pub fn yearly_attraction_weights(
    attractions: &[Attraction],
    range: YearRange,
    baseline: f64,
) -> Result<YearlyWeights, StatsError> {
    let mut weights = YearlyWeights::new();
    for attraction in attractions {
        let years = weights
            .entry(attraction.name.clone())
            .or_insert_with(|| zeroed_years(range));
        add_in_range(years, attraction, range, baseline)?;
    }
    Ok(weights)
}

/// Total contributions per tag and year of `range`.
///
/// A review counts once towards each distinct tag of its attraction.
///
/// # Errors
/// Returns [`StatsError::UnscoredReview`] when a dated review has no score.
pub fn yearly_tag_weights(
    attractions: &[Attraction],
    range: YearRange,
    baseline: f64,
) -> Result<YearlyWeights, StatsError> {
    let mut weights = YearlyWeights::new();
    for attraction in attractions {
        for tag in unique_tags(attraction) {
            let years = weights
                .entry(tag.to_owned())
                .or_insert_with(|| zeroed_years(range));
            add_in_range(years, attraction, range, baseline)?;
        }
    }
    Ok(weights)
}

fn add_in_range(
    years: &mut BTreeMap<i32, f64>,
    attraction: &Attraction,
    range: YearRange,
    baseline: f64,
) -> Result<(), StatsError> {
    for contribution in contributions(attraction, baseline)? {
        let year = contribution.date.year();
        if range.contains(year) {
            accumulate(years.entry(year).or_default(), contribution.weight);
        }
    }
    Ok(())
}

/// Pick the key with the highest total for each year of `range`.
///
/// Ties go to the first key in name order. A year maps to `None` only when
/// `weights` is empty.
#[must_use]
pub fn yearly_leaders(
    weights: &YearlyWeights,
    range: YearRange,
) -> BTreeMap<i32, Option<WeightEntry>> {
    range
        .years()
        .map(|year| {
            let leader = weights
                .iter()
                .map(|(key, years)| (key, years.get(&year).copied().unwrap_or_default()))
                .fold(None::<(&String, f64)>, |best, candidate| match best {
                    Some((_, top)) if candidate.1 <= top => best,
                    _ => Some(candidate),
                })
                .map(|(key, total)| WeightEntry::new(key.clone(), total));
            (year, leader)
        })
        .collect()
}

/// Total contributions per attraction for reviews dated in `year`.
///
/// Only attractions with at least one review dated in `year` appear.
///
/// # Errors
/// Returns [`StatsError::UnscoredReview`] when a dated review has no score.
pub fn attraction_weights_for_year(
    attractions: &[Attraction],
    year: i32,
    baseline: f64,
) -> Result<WeightTable, StatsError> {
    let mut weights = WeightTable::new();
    for attraction in attractions {
        for contribution in contributions(attraction, baseline)? {
            if contribution.date.year() == year {
                accumulate(
                    weights.entry(attraction.name.clone()).or_default(),
                    contribution.weight,
                );
            }
        }
    }
    Ok(weights)
}

/// Total contributions per tag for reviews dated in `year`.
///
/// Every tag seen on any attraction appears, with `0.0` when none of its
/// reviews fall in `year`.
///
/// # Errors
/// Returns [`StatsError::UnscoredReview`] when a dated review has no score.
pub fn tag_weights_for_year(
    attractions: &[Attraction],
    year: i32,
    baseline: f64,
) -> Result<WeightTable, StatsError> {
    let mut weights = WeightTable::new();
    for attraction in attractions {
        let dated = contributions(attraction, baseline)?;
        for tag in unique_tags(attraction) {
            let total = weights.entry(tag.to_owned()).or_default();
            for contribution in dated.iter().filter(|c| c.date.year() == year) {
                accumulate(total, contribution.weight);
            }
        }
    }
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tripscore_core::Review;

    fn dated(time: &str, score: f64) -> Review {
        Review::new(5, "", "").with_time(time).with_score(score)
    }

    #[fixture]
    fn attractions() -> Vec<Attraction> {
        vec![
            Attraction::new("Golden Bridge")
                .with_tag("Bridges and Points of Interest")
                .with_reviews(vec![
                    dated("Jun 2019", 90.0),
                    dated("Jul 2019", 70.0),
                    dated("Jan 2009", 100.0),
                ]),
            Attraction::new("Hang Son Doong")
                .with_tag("Caves")
                .with_reviews(vec![dated("Mar 2020", 100.0), Review::new(4, "", "")]),
        ]
    }

    #[rstest]
    fn yearly_weights_are_zero_filled_and_windowed(attractions: Vec<Attraction>) {
        let range = YearRange::new(2019, 2020).expect("range");
        let weights = yearly_attraction_weights(&attractions, range, 50.0).expect("weights");

        assert_eq!(
            weights["Golden Bridge"],
            BTreeMap::from([(2019, 60.0), (2020, 0.0)])
        );
        assert_eq!(
            weights["Hang Son Doong"],
            BTreeMap::from([(2019, 0.0), (2020, 50.0)])
        );
    }

    #[rstest]
    fn yearly_tag_weights_split_tag_lines(attractions: Vec<Attraction>) {
        let range = YearRange::new(2019, 2019).expect("range");
        let weights = yearly_tag_weights(&attractions, range, 30.0).expect("weights");

        assert_eq!(weights.len(), 3);
        assert_eq!(weights["Bridges"][&2019], 100.0);
        assert_eq!(weights["Points of Interest"][&2019], 100.0);
        assert_eq!(weights["Caves"][&2019], 0.0);
    }

    #[rstest]
    fn leaders_prefer_first_name_on_ties() {
        let weights = YearlyWeights::from([
            ("Beta".to_owned(), BTreeMap::from([(2020, 5.0)])),
            ("Alpha".to_owned(), BTreeMap::from([(2020, 5.0)])),
            ("Gamma".to_owned(), BTreeMap::from([(2020, -1.0)])),
        ]);
        let range = YearRange::new(2020, 2020).expect("range");

        let leaders = yearly_leaders(&weights, range);

        assert_eq!(leaders[&2020], Some(WeightEntry::new("Alpha", 5.0)));
    }

    #[rstest]
    fn leaders_of_nothing_are_none() {
        let leaders = yearly_leaders(&YearlyWeights::new(), YearRange::default());
        assert_eq!(leaders.len(), 14);
        assert!(leaders.values().all(Option::is_none));
    }

    #[rstest]
    fn weights_for_year_are_sparse_for_attractions(attractions: Vec<Attraction>) {
        let weights = attraction_weights_for_year(&attractions, 2020, 50.0).expect("weights");
        assert_eq!(weights, WeightTable::from([("Hang Son Doong".to_owned(), 50.0)]));
    }

    #[rstest]
    fn weights_for_year_list_every_tag(attractions: Vec<Attraction>) {
        let weights = tag_weights_for_year(&attractions, 2020, 50.0).expect("weights");
        assert_eq!(
            weights,
            WeightTable::from([
                ("Bridges".to_owned(), 0.0),
                ("Caves".to_owned(), 50.0),
                ("Points of Interest".to_owned(), 0.0),
            ])
        );
    }
}
