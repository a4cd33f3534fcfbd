//! Review scoring for scraped attractions.
//!
//! Each review receives a score on a `0.0..=100.0` scale blending its star
//! rating (70% by default) with the classifier's confidence in its title
//! and body (30%, split 60/40 between them). An attraction's weight is the
//! arithmetic mean of its review scores, or `0.0` when it has none.
//!
//! - [`calculate_weight`] is the pure per-review formula, tuned through
//!   [`WeightCoefficients`].
//! - [`ReviewScorer`] runs the formula over whole attractions, classifying
//!   text through any [`SentimentScorer`](tripscore_core::SentimentScorer)
//!   after truncating it to a [`TokenBudget`](tripscore_core::TokenBudget).
//! - [`LexiconSentimentScorer`] is a deterministic in-process classifier
//!   for use when no model-backed scorer is available.
//!
//! # Examples
//!
//! ```
//! use tripscore_core::{Attraction, Review};
//! use tripscore_scorer::{LexiconSentimentScorer, ReviewScorer, rank};
//!
//! let scorer = ReviewScorer::new(LexiconSentimentScorer::default());
//! let mut attractions = vec![
//!     Attraction::new("Ba Na Hills").with_reviews(vec![Review::new(3, "Crowded", "Long queues")]),
//!     Attraction::new("My Son").with_reviews(vec![Review::new(5, "Superb", "Peaceful ruins")]),
//! ];
//!
//! let summary = scorer.score_attractions(&mut attractions).expect("valid ratings");
//! assert_eq!(summary.reviews, 2);
//! assert_eq!(rank(&attractions)[0].name, "My Son");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregate;
mod lexicon;
mod truncate;
mod weight;

pub use aggregate::{RankedAttraction, ReviewScorer, ScoringError, ScoringSummary, rank};
pub use lexicon::{LexiconError, LexiconSentimentScorer, SentimentLexicon};
pub use truncate::TruncatingScorer;
pub use weight::{CoefficientError, SCORE_SCALE, WeightCoefficients, calculate_weight, sigmoid};
