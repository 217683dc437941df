//! Domain models for the notebook. Two shapes of the same record exist on
//! purpose: `PersistedRecord` mirrors the nullable SQLite columns and admits
//! any combination of missing fields (half-written legacy rows, other import
//! paths), while `ViewRecord` is the fully-populated form every screen and the
//! snapshot exporter consume. The explicit conversion between them lives in
//! `record::validate`, so no rendering path ever unwraps an option.

use chrono::{DateTime, Utc};

/// A record as it comes out of the store. Every field may be absent;
/// `record::validate` decides whether the row is complete enough to display.
#[derive(Debug, Clone, Default)]
pub struct PersistedRecord {
    /// Unique identifier assigned at creation.
    pub id: Option<String>,
    /// Display label for lists and the detail header.
    pub title: Option<String>,
    /// External reference. Optional even in a complete record, and stored as
    /// raw text; well-formedness is only checked when the record is validated.
    pub link: Option<String>,
    /// The pasted original-language text.
    pub original_text: Option<String>,
    /// The pasted translation.
    pub translated_text: Option<String>,
    /// The interleaved output of `align`, stored redundantly so browsing never
    /// recomputes it.
    pub combined_text: Option<String>,
    /// Creation time. Rows whose stored timestamp fails to parse surface here
    /// as `None` and are treated like any other missing field.
    pub created_at: Option<DateTime<Utc>>,
}

/// A record guaranteed safe for display and export: everything present except
/// the link, which stays optional metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRecord {
    pub id: String,
    pub title: String,
    pub link: Option<String>,
    pub original_text: String,
    pub translated_text: String,
    pub combined_text: String,
    pub created_at: DateTime<Utc>,
}

impl ViewRecord {
    /// `Title (YYYY-MM-DD)` string used by the list rows.
    pub fn list_label(&self) -> String {
        format!("{} ({})", self.title, self.created_at.format("%Y-%m-%d"))
    }

    /// Symbolic identifier derived from the title: every whitespace character
    /// becomes an underscore, everything else is kept. Used both inside
    /// snapshot literals and for export file names.
    pub fn symbolic_name(&self) -> String {
        self.title
            .chars()
            .map(|ch| if ch.is_whitespace() { '_' } else { ch })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> ViewRecord {
        ViewRecord {
            id: "abc".to_string(),
            title: "Morning Dialogue!".to_string(),
            link: None,
            original_text: String::new(),
            translated_text: String::new(),
            combined_text: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn symbolic_name_replaces_every_whitespace_character() {
        let mut record = sample();
        record.title = "Bring widgets\tto life".to_string();
        assert_eq!(record.symbolic_name(), "Bring_widgets_to_life");
    }

    #[test]
    fn symbolic_name_keeps_punctuation() {
        assert_eq!(sample().symbolic_name(), "Morning_Dialogue!");
    }

    #[test]
    fn list_label_contains_title_and_date() {
        assert_eq!(sample().list_label(), "Morning Dialogue! (2024-03-01)");
    }
}
