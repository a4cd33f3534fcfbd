//! Popularity statistics over scored attractions.
//!
//! Every dated review contributes `score - baseline` to the totals of its
//! attraction, its attraction's tags, its season and its trip type. With the
//! default baseline of [`DEFAULT_BASELINE`] a review scoring below 50 pulls a
//! total down, so totals reward both volume and quality.
//!
//! Reviews without a date are ignored and reviews whose date cannot be
//! parsed are skipped with a warning. A dated review without a score is an
//! error: statistics only make sense over scored input.
//!
//! All functions are pure and return ordered maps, so reports are stable
//! across runs.
//!
//! # Examples
//!
//! ```
//! use tripscore_core::{Attraction, Review};
//! use tripscore_stats::{DEFAULT_BASELINE, attraction_weights_for_year, top_n};
//!
//! let attractions = vec![
//!     Attraction::new("Ha Long Bay")
//!         .with_reviews(vec![Review::new(5, "", "").with_time("Aug 2023").with_score(90.0)]),
//!     Attraction::new("Cat Ba")
//!         .with_reviews(vec![Review::new(3, "", "").with_time("Aug 2023").with_score(55.0)]),
//! ];
//!
//! let weights = attraction_weights_for_year(&attractions, 2023, DEFAULT_BASELINE)
//!     .expect("scored input");
//! let best = top_n(&weights, 1);
//! assert_eq!(best[0].name, "Ha Long Bay");
//! assert_eq!(best[0].total, 40.0);
//! ```

#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use tripscore_core::Season;

mod dated;
mod error;
mod range;
mod seasonal;
mod top;
mod trip_type;
mod yearly;

pub use error::StatsError;
pub use range::{MAX_YEAR_SPAN, YearRange};
pub use seasonal::{seasonal_attraction_weights, seasonal_tag_weights};
pub use top::{OTHER_LABEL, WeightEntry, top_n, top_n_with_other, top_per_group};
pub use trip_type::{trip_type_attraction_weights, trip_type_score_totals, trip_type_tag_weights};
pub use yearly::{
    attraction_weights_for_year, tag_weights_for_year, yearly_attraction_weights,
    yearly_leaders, yearly_tag_weights,
};

/// Score subtracted from each review before it is totalled.
pub const DEFAULT_BASELINE: f64 = 50.0;

/// Number of attractions shown in single-year rankings.
pub const DEFAULT_TOP_ATTRACTIONS: usize = 15;

/// Number of tags shown before the remainder is bucketed.
pub const DEFAULT_TOP_TAGS: usize = 10;

/// Totals keyed by attraction name, tag or trip type.
pub type WeightTable = BTreeMap<String, f64>;

/// Totals per key and calendar year.
pub type YearlyWeights = BTreeMap<String, BTreeMap<i32, f64>>;

/// Totals per season, then per key.
pub type SeasonalWeights = BTreeMap<Season, WeightTable>;

/// Totals per group (such as a trip type), then per key.
pub type GroupedWeights = BTreeMap<String, WeightTable>;
