//! Test helpers for writing attraction fixtures to disk.

use super::*;
use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;
use tripscore_core::Review;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write fixture");
}

pub(super) fn write_attractions(path: &Utf8Path, attractions: &[Attraction]) {
    let payload = serde_json::to_string_pretty(attractions).expect("serialise attractions");
    write_utf8(path, payload.as_bytes());
}

pub(super) fn read_attractions(path: &Utf8Path) -> Vec<Attraction> {
    JsonAttractionStore::new(path)
        .load()
        .expect("attractions should load")
}

/// Temporary directory addressed through UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

/// Raw scrape output: one glowing and one scathing attraction.
pub(super) fn scraped_attractions() -> Vec<Attraction> {
    vec![
        Attraction::new("Hue Citadel")
            .with_tag("Museums")
            .with_reviews(vec![
                Review::new(2, "Terrible and crowded", "Dirty, boring and overpriced.")
                    .with_time("Jan 2023"),
            ]),
        Attraction::new("Ha Long Bay")
            .with_tag("Bays and Beaches")
            .with_reviews(vec![
                Review::new(5, "Wonderful cruise", "Amazing views and friendly crew.")
                    .with_time("Aug 2023")
                    .with_trip_type("Family"),
            ]),
        Attraction::new("Cat Ba"),
    ]
}

/// Scored attractions with reviews spread over two years.
pub(super) fn scored_attractions() -> Vec<Attraction> {
    vec![
        Attraction::new("Ha Long Bay")
            .with_tag("Bays and Beaches")
            .with_reviews(vec![
                Review::new(5, "", "")
                    .with_time("Aug 2023")
                    .with_trip_type("Family")
                    .with_score(90.0),
                Review::new(4, "", "")
                    .with_time("Jul 2022")
                    .with_trip_type("Couples")
                    .with_score(80.0),
            ]),
        Attraction::new("Hue Citadel")
            .with_tag("Museums")
            .with_reviews(vec![
                Review::new(4, "", "")
                    .with_time("Aug 2023")
                    .with_trip_type("Family")
                    .with_score(60.0),
                Review::new(2, "", "")
                    .with_time("Jan 2023")
                    .with_trip_type("Solo")
                    .with_score(40.0),
            ]),
        Attraction::new("Cat Ba")
            .with_tag("Bays")
            .with_reviews(vec![Review::new(5, "", "").with_score(95.0)]),
    ]
}
