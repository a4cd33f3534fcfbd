//! Core domain types for scoring attraction reviews.
//!
//! Records arrive as scraped JSON: an ordered list of attractions, each with
//! an ordered list of reviews carrying a star rating, a title and a body.
//! These models keep the scraped payload intact (unknown fields survive a
//! load/save round-trip) while exposing validated views such as
//! [`Review::rating`] and [`Review::date`] so malformed input fails fast at
//! the point of use.
//!
//! The crate also defines the seams the scorer plugs into:
//! [`SentimentScorer`] for the external text classifier, [`Tokenizer`] for
//! deterministic input truncation, and [`AttractionStore`] for persistence.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod date;
mod rating;
mod review;
mod sentiment;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use date::{ReviewDate, ReviewDateError, Season};
pub use rating::{RawRating, Rating, RatingError};
pub use review::{Attraction, Review};
pub use sentiment::{
    MAX_MODEL_TOKENS, SentimentScorer, TokenBudget, TokenBudgetError, Tokenizer, WordTokenizer,
};
pub use store::AttractionStore;

#[cfg(feature = "store-json")]
pub use store::{JsonAttractionStore, StoreError};
