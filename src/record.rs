//! The adapter between persisted rows and validated records. Creation
//! (`materialize`) and the completeness check (`validate`) both live here so
//! the rule for "what makes a record displayable" has exactly one home. The
//! store itself stays in `db`; this module never touches SQLite.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::align::{align, MisalignedInputError};
use crate::models::{PersistedRecord, ViewRecord};

/// A persisted row lacks a field every complete record must carry. Recoverable
/// by design: listings skip the record instead of failing wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("record is missing required field `{field}`")]
pub struct IncompleteRecordError {
    /// Name of the first missing field, for status messages.
    pub field: &'static str,
}

/// Promote a persisted row to a [`ViewRecord`], or report which required field
/// is missing. Empty strings count as present; only absence fails. The link is
/// optional metadata, so a malformed stored link is downgraded to absent
/// rather than blocking an otherwise valid record.
pub fn validate(record: PersistedRecord) -> Result<ViewRecord, IncompleteRecordError> {
    fn require<T>(value: Option<T>, field: &'static str) -> Result<T, IncompleteRecordError> {
        value.ok_or(IncompleteRecordError { field })
    }

    Ok(ViewRecord {
        id: require(record.id, "id")?,
        title: require(record.title, "title")?,
        link: record.link.as_deref().and_then(parse_link),
        original_text: require(record.original_text, "original_text")?,
        translated_text: require(record.translated_text, "translated_text")?,
        combined_text: require(record.combined_text, "combined_text")?,
        created_at: require(record.created_at, "created_at")?,
    })
}

/// Build a brand-new record from form input: fresh UUID, current timestamp,
/// combined text computed by the Aligner. The link text is parsed leniently —
/// anything that does not look like a URL becomes an absent link, never an
/// error. The only way this fails is misaligned input texts, so no partial
/// record can be created through this path.
pub fn materialize(
    title: &str,
    link_text: &str,
    original_text: &str,
    translated_text: &str,
) -> Result<ViewRecord, MisalignedInputError> {
    let combined_text = align(original_text, translated_text)?;

    Ok(ViewRecord {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        link: parse_link(link_text),
        original_text: original_text.to_string(),
        translated_text: translated_text.to_string(),
        combined_text,
        created_at: Utc::now(),
    })
}

/// Accept a link only when it is a plausible web reference: an `http://` or
/// `https://` scheme followed by at least one non-whitespace character and no
/// embedded whitespace. Everything else (including the empty string) maps to
/// `None`.
pub fn parse_link(text: &str) -> Option<String> {
    let trimmed = text.trim();
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))?;

    if rest.is_empty() || rest.chars().any(char::is_whitespace) {
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_row() -> PersistedRecord {
        PersistedRecord {
            id: Some("id-1".to_string()),
            title: Some("Lesson".to_string()),
            link: Some("https://example.org/lesson".to_string()),
            original_text: Some("Hello".to_string()),
            translated_text: Some("Bonjour".to_string()),
            combined_text: Some("Hello\nBonjour\n\n".to_string()),
            created_at: Some(Utc::now()),
        }
    }

    #[test]
    fn validate_accepts_a_complete_row() {
        let view = validate(complete_row()).unwrap();
        assert_eq!(view.title, "Lesson");
        assert_eq!(view.link.as_deref(), Some("https://example.org/lesson"));
    }

    #[test]
    fn validate_reports_the_missing_field() {
        let mut row = complete_row();
        row.combined_text = None;
        let err = validate(row).unwrap_err();
        assert_eq!(err.field, "combined_text");
    }

    #[test]
    fn validate_allows_empty_strings() {
        let mut row = complete_row();
        row.original_text = Some(String::new());
        assert!(validate(row).is_ok());
    }

    #[test]
    fn validate_downgrades_a_malformed_link_to_absent() {
        let mut row = complete_row();
        row.link = Some("not a url".to_string());
        let view = validate(row).unwrap();
        assert_eq!(view.link, None);
    }

    #[test]
    fn validate_keeps_an_absent_link_absent() {
        let mut row = complete_row();
        row.link = None;
        assert_eq!(validate(row).unwrap().link, None);
    }

    #[test]
    fn materialize_populates_every_field() {
        let record = materialize("T", "https://example.org", "x", "y").unwrap();
        assert!(!record.id.is_empty());
        assert_eq!(record.title, "T");
        assert_eq!(record.link.as_deref(), Some("https://example.org"));
        assert_eq!(record.combined_text, "x\ny\n\n");
    }

    #[test]
    fn materialize_treats_a_bad_link_as_absent() {
        let record = materialize("T", "not a url", "x", "y").unwrap();
        assert_eq!(record.link, None);
        assert_eq!(record.combined_text, align("x", "y").unwrap());
    }

    #[test]
    fn materialize_assigns_distinct_ids() {
        let a = materialize("T", "", "x", "y").unwrap();
        let b = materialize("T", "", "x", "y").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn materialize_propagates_misaligned_input() {
        assert!(materialize("T", "", "a\nb", "a").is_err());
    }

    #[test]
    fn parse_link_requires_a_web_scheme() {
        assert_eq!(parse_link("ftp://example.org"), None);
        assert_eq!(parse_link("https://"), None);
        assert_eq!(parse_link("https://exa mple.org"), None);
        assert_eq!(
            parse_link("  https://example.org/x  ").as_deref(),
            Some("https://example.org/x")
        );
    }
}
