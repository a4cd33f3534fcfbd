//! Error types raised while aggregating review statistics.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised while aggregating review statistics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatsError {
    /// A dated review has no score; the input has not been scored yet.
    #[error("review {review} of {attraction} has no score; run scoring first")]
    UnscoredReview {
        /// Name of the attraction holding the review.
        attraction: String,
        /// Zero-based position of the review within the attraction.
        review: usize,
    },
    /// A year window ends before it starts.
    #[error("year range {start}..={end} is empty")]
    EmptyRange {
        /// First year of the requested window.
        start: i32,
        /// Last year of the requested window.
        end: i32,
    },
    /// A year window spans more years than reports are built over.
    #[error("year range {start}..={end} spans more than {max} years")]
    RangeTooWide {
        /// First year of the requested window.
        start: i32,
        /// Last year of the requested window.
        end: i32,
        /// Widest span accepted.
        max: u32,
    },
}
