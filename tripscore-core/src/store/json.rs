//! JSON file-backed attraction store.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use log::warn;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use thiserror::Error;
use tripscore_fs::{read_utf8_file, write_atomically};

use super::AttractionStore;
use crate::Attraction;

const INDENT: &[u8] = b"    ";

/// Stores attractions as a pretty-printed JSON array in a single file.
///
/// Loading a missing file yields an empty list. Saving rewrites the whole
/// file through a temporary sibling and an atomic rename, so a crash
/// mid-write never leaves a truncated file behind.
///
/// # Examples
///
/// ```no_run
/// use tripscore_core::{AttractionStore, JsonAttractionStore};
///
/// let store = JsonAttractionStore::new("final_attraction_detail.json");
/// let attractions = store.load().expect("load attractions");
/// store.save(&attractions).expect("save attractions");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonAttractionStore {
    path: Utf8PathBuf,
}

impl JsonAttractionStore {
    /// Create a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl AttractionStore for JsonAttractionStore {
    type Error = StoreError;

    fn load(&self) -> Result<Vec<Attraction>, StoreError> {
        let contents = match read_utf8_file(&self.path) {
            Ok(contents) => contents,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                warn!("no attraction file at {}; starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, attractions: &[Attraction]) -> Result<(), StoreError> {
        write_atomically(&self.path, |writer| write_pretty(writer, attractions)).map_err(
            |source| StoreError::Write {
                path: self.path.clone(),
                source,
            },
        )
    }
}

fn write_pretty(writer: &mut dyn Write, attractions: &[Attraction]) -> io::Result<()> {
    let mut serializer =
        Serializer::with_formatter(&mut *writer, PrettyFormatter::with_indent(INDENT));
    attractions
        .serialize(&mut serializer)
        .map_err(io::Error::from)?;
    writer.write_all(b"\n")
}

/// Errors raised by [`JsonAttractionStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file exists but could not be read.
    #[error("failed to read attractions from {path}")]
    Read {
        /// Backing file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: io::Error,
    },
    /// The backing file does not hold a JSON array of attractions.
    #[error("failed to parse attractions in {path}")]
    Parse {
        /// Backing file path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Writing the replacement file failed; the previous file is intact.
    #[error("failed to write attractions to {path}")]
    Write {
        /// Backing file path.
        path: Utf8PathBuf,
        /// Source error from std I/O or serialisation.
        #[source]
        source: io::Error,
    },
}
