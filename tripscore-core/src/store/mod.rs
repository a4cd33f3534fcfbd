//! Persistence for attraction records.
//!
//! The [`AttractionStore`] trait replaces ad hoc read/append/rewrite file
//! handling: a pipeline run loads the full record list once, enriches it in
//! memory, and saves it once.

use crate::Attraction;

#[cfg(feature = "store-json")]
mod json;

#[cfg(feature = "store-json")]
pub use json::{JsonAttractionStore, StoreError};

/// Load and save the complete list of attractions.
///
/// Implementations must preserve record order across a `save`/`load` pair.
///
/// # Examples
///
/// ```rust
/// use std::cell::RefCell;
/// use std::convert::Infallible;
/// use tripscore_core::{Attraction, AttractionStore};
///
/// #[derive(Default)]
/// struct MemoryStore {
///     records: RefCell<Vec<Attraction>>,
/// }
///
/// impl AttractionStore for MemoryStore {
///     type Error = Infallible;
///
///     fn load(&self) -> Result<Vec<Attraction>, Self::Error> {
///         Ok(self.records.borrow().clone())
///     }
///
///     fn save(&self, attractions: &[Attraction]) -> Result<(), Self::Error> {
///         *self.records.borrow_mut() = attractions.to_vec();
///         Ok(())
///     }
/// }
///
/// let store = MemoryStore::default();
/// store.save(&[Attraction::new("Ba Na Hills")]).unwrap();
/// assert_eq!(store.load().unwrap().len(), 1);
/// ```
pub trait AttractionStore {
    /// Error raised when records cannot be read or written.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return every stored attraction in order.
    ///
    /// # Errors
    /// Returns [`Self::Error`] when the backing storage is unreadable.
    fn load(&self) -> Result<Vec<Attraction>, Self::Error>;

    /// Replace the stored attractions with `attractions`.
    ///
    /// # Errors
    /// Returns [`Self::Error`] when the records cannot be persisted. A failed
    /// save must leave previously stored records intact.
    fn save(&self, attractions: &[Attraction]) -> Result<(), Self::Error>;
}
