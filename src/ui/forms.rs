use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::ViewRecord;

/// Form state for creating a record. There is no edit form on purpose: the
/// record lifecycle has no in-place update, so "editing" is creating a new
/// record and deleting the old one.
#[derive(Default, Clone)]
pub(crate) struct RecordForm {
    pub(crate) title: String,
    pub(crate) link: String,
    pub(crate) original: String,
    pub(crate) translated: String,
    pub(crate) active: RecordField,
    pub(crate) error: Option<String>,
}

/// Enumerates the fields within the create form to drive focus management.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum RecordField {
    Title,
    Link,
    Original,
    Translated,
}

impl Default for RecordField {
    fn default() -> Self {
        RecordField::Title
    }
}

impl RecordField {
    /// The two paste areas accept newlines; title and link stay single-line.
    pub(crate) fn is_multiline(self) -> bool {
        matches!(self, RecordField::Original | RecordField::Translated)
    }
}

impl RecordForm {
    /// Move focus to the next field, wrapping around.
    pub(crate) fn focus_next(&mut self) {
        self.active = match self.active {
            RecordField::Title => RecordField::Link,
            RecordField::Link => RecordField::Original,
            RecordField::Original => RecordField::Translated,
            RecordField::Translated => RecordField::Title,
        };
    }

    /// Move focus to the previous field, wrapping around.
    pub(crate) fn focus_prev(&mut self) {
        self.active = match self.active {
            RecordField::Title => RecordField::Translated,
            RecordField::Link => RecordField::Title,
            RecordField::Original => RecordField::Link,
            RecordField::Translated => RecordField::Original,
        };
    }

    /// Append a character to the active field. Control characters are dropped;
    /// newlines go through `newline` so single-line fields never receive one.
    pub(crate) fn push_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        self.active_value_mut().push(ch);
    }

    /// Insert a line break into the active field if it is one of the paste
    /// areas. Returns whether anything was inserted so the caller can decide
    /// what Enter means elsewhere.
    pub(crate) fn newline(&mut self) -> bool {
        if self.active.is_multiline() {
            self.active_value_mut().push('\n');
            true
        } else {
            false
        }
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        self.active_value_mut().pop();
    }

    /// Validate the inputs and return values ready for `record::materialize`.
    /// The title is required and trimmed; the texts are passed through
    /// untouched because the Aligner cares about their exact lines, and the
    /// link text is handed over raw since materialization already treats
    /// unparseable links as absent.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String, String, String)> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(anyhow!("Title is required."));
        }

        Ok((
            title.to_string(),
            self.link.clone(),
            self.original.clone(),
            self.translated.clone(),
        ))
    }

    /// Render the single-line fields (title, link) for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: RecordField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            match field {
                RecordField::Title => "<required>".to_string(),
                _ => "<optional>".to_string(),
            }
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Title string for one of the paste areas, including a line count so the
    /// user can spot a mismatch before submitting.
    pub(crate) fn text_area_title(&self, field_name: &str, field: RecordField) -> String {
        let lines = self.value(field).lines().count();
        let marker = if self.active == field { "▶ " } else { "" };
        format!(" {marker}{field_name} ({lines} lines) ")
    }

    pub(crate) fn value(&self, field: RecordField) -> &str {
        match field {
            RecordField::Title => &self.title,
            RecordField::Link => &self.link,
            RecordField::Original => &self.original,
            RecordField::Translated => &self.translated,
        }
    }

    fn active_value_mut(&mut self) -> &mut String {
        match self.active {
            RecordField::Title => &mut self.title,
            RecordField::Link => &mut self.link,
            RecordField::Original => &mut self.original,
            RecordField::Translated => &mut self.translated,
        }
    }
}

/// Confirmation state for deleting a record.
#[derive(Clone)]
pub(crate) struct ConfirmRecordDelete {
    pub(crate) id: String,
    pub(crate) title: String,
}

impl ConfirmRecordDelete {
    /// Build the confirmation state from the record being considered.
    pub(crate) fn from(record: &ViewRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newline_only_lands_in_the_paste_areas() {
        let mut form = RecordForm::default();
        assert!(!form.newline());
        assert_eq!(form.title, "");

        form.active = RecordField::Original;
        assert!(form.newline());
        assert_eq!(form.original, "\n");
    }

    #[test]
    fn focus_cycles_through_all_fields_and_back() {
        let mut form = RecordForm::default();
        for _ in 0..4 {
            form.focus_next();
        }
        assert!(form.active == RecordField::Title);
        form.focus_prev();
        assert!(form.active == RecordField::Translated);
    }

    #[test]
    fn parse_inputs_requires_a_title_but_nothing_else() {
        let mut form = RecordForm::default();
        assert!(form.parse_inputs().is_err());

        form.title = "  Lesson  ".to_string();
        form.original = "a\nb".to_string();
        let (title, link, original, translated) = form.parse_inputs().unwrap();
        assert_eq!(title, "Lesson");
        assert_eq!(link, "");
        assert_eq!(original, "a\nb");
        assert_eq!(translated, "");
    }

    #[test]
    fn control_characters_are_dropped_from_typed_input() {
        let mut form = RecordForm::default();
        form.push_char('\t');
        form.push_char('a');
        assert_eq!(form.title, "a");
    }
}
