//! Snapshot literals bundled with the binary. They exist so a fresh install
//! has something to browse before the user pastes a transcript of their own;
//! `db::load_or_seed_records` inserts them when the table is empty. Because
//! they are ordinary snapshot files, anything the exporter produces can be
//! dropped into `seeds/` and listed here to become part of the catalog.

use crate::models::ViewRecord;
use crate::snapshot::{self, SnapshotError};

/// The bundled snapshot texts, in the order they are seeded.
const BUILT_IN: &[&str] = &[
    include_str!("../seeds/first_lesson.snapshot"),
    include_str!("../seeds/spanish_proverbs.snapshot"),
];

/// Parse every bundled snapshot. Each call mints fresh ids and timestamps,
/// which is exactly what seeding wants.
pub fn built_in_records() -> Result<Vec<ViewRecord>, SnapshotError> {
    BUILT_IN.iter().map(|text| snapshot::parse(text)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;

    #[test]
    fn every_bundled_snapshot_parses() {
        let records = built_in_records().unwrap();
        assert_eq!(records.len(), BUILT_IN.len());
        assert_eq!(records[0].title, "Première Leçon");
        assert_eq!(records[1].title, "Refranes Españoles");
    }

    #[test]
    fn bundled_combined_text_matches_the_aligner() {
        for record in built_in_records().unwrap() {
            let recomputed = align(&record.original_text, &record.translated_text).unwrap();
            assert_eq!(record.combined_text, recomputed, "{}", record.title);
        }
    }

    #[test]
    fn bundled_snapshots_round_trip_through_the_exporter() {
        for record in built_in_records().unwrap() {
            let reloaded = snapshot::parse(&snapshot::export(&record)).unwrap();
            assert_eq!(reloaded.combined_text, record.combined_text);
            assert_eq!(reloaded.link, record.link);
        }
    }
}
