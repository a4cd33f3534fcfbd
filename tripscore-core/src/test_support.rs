//! Test-only helpers shared by unit and behaviour tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;

use crate::{Attraction, AttractionStore, SentimentScorer};

/// In-memory `AttractionStore` implementation used in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<Vec<Attraction>>,
}

impl MemoryStore {
    /// Create a store pre-populated with `attractions`.
    #[must_use]
    pub fn with_attractions(attractions: Vec<Attraction>) -> Self {
        Self {
            records: RefCell::new(attractions),
        }
    }
}

impl AttractionStore for MemoryStore {
    type Error = Infallible;

    fn load(&self) -> Result<Vec<Attraction>, Self::Error> {
        Ok(self.records.borrow().clone())
    }

    fn save(&self, attractions: &[Attraction]) -> Result<(), Self::Error> {
        *self.records.borrow_mut() = attractions.to_vec();
        Ok(())
    }
}

/// Sentiment scorer returning canned confidences keyed by exact text.
///
/// Unknown text yields the fallback confidence.
#[derive(Debug, Clone, Default)]
pub struct FixedSentiment {
    confidences: HashMap<String, f64>,
    fallback: f64,
}

impl FixedSentiment {
    /// Create a scorer that returns `fallback` for every input.
    #[must_use]
    pub fn constant(fallback: f64) -> Self {
        Self {
            confidences: HashMap::new(),
            fallback,
        }
    }

    /// Return `confidence` whenever the scorer sees exactly `text`.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>, confidence: f64) -> Self {
        self.confidences.insert(text.into(), confidence);
        self
    }
}

impl SentimentScorer for FixedSentiment {
    fn confidence(&self, text: &str) -> f64 {
        self.confidences.get(text).copied().unwrap_or(self.fallback)
    }
}
