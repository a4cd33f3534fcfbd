//! Facade crate for the tripscore review scoring pipeline.
//!
//! This crate re-exports the core review model and exposes the scorer,
//! statistics and JSON store behind feature flags.

#![forbid(unsafe_code)]

pub use tripscore_core::{
    Attraction, AttractionStore, RawRating, Rating, RatingError, Review, ReviewDate,
    ReviewDateError, Season, SentimentScorer, TokenBudget, TokenBudgetError, Tokenizer,
    WordTokenizer,
};

#[cfg(feature = "store-json")]
pub use tripscore_core::{JsonAttractionStore, StoreError};

#[cfg(feature = "scorer")]
pub use tripscore_scorer::{
    CoefficientError, LexiconSentimentScorer, RankedAttraction, ReviewScorer, ScoringError,
    ScoringSummary, SentimentLexicon, WeightCoefficients, rank,
};

#[cfg(feature = "stats")]
pub use tripscore_stats::{
    DEFAULT_BASELINE, StatsError, WeightEntry, YearRange, top_n, top_n_with_other,
};
