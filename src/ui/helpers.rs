use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Turn a record's symbolic name into something safe to use as a file stem.
/// The symbolic name only normalizes whitespace, so path separators and other
/// characters the filesystem dislikes still need flattening here.
pub(crate) fn export_file_stem(symbolic_name: &str) -> String {
    let stem: String = symbolic_name
        .chars()
        .map(|ch| {
            let ok = ch.is_alphanumeric() || ch == '_' || ch == '-' || ch == '.';
            if ok {
                ch
            } else {
                '_'
            }
        })
        .collect();

    let stem = stem.trim_matches('.').to_string();
    if stem.is_empty() {
        "record".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_flattens_path_separators() {
        assert_eq!(export_file_stem("a/b\\c"), "a_b_c");
    }

    #[test]
    fn file_stem_keeps_harmless_characters() {
        assert_eq!(export_file_stem("Première_Leçon"), "Première_Leçon");
    }

    #[test]
    fn file_stem_never_comes_back_empty() {
        assert_eq!(export_file_stem(""), "record");
        assert_eq!(export_file_stem(".."), "record");
    }
}
