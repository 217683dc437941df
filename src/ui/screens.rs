use crate::models::ViewRecord;

/// State for the detail view: one validated record plus a scroll offset into
/// its combined text. Only validated records reach this screen, so rendering
/// never has to reason about missing fields.
pub(crate) struct DetailScreen {
    pub(crate) record: ViewRecord,
    pub(crate) scroll: u16,
}

impl DetailScreen {
    pub(crate) fn new(record: ViewRecord) -> Self {
        Self { record, scroll: 0 }
    }

    /// Scroll the combined text, clamping to the top and to the last line so
    /// the view cannot run off past the content.
    pub(crate) fn scroll_by(&mut self, delta: i32) {
        let max = self.max_scroll();
        let next = i64::from(self.scroll) + i64::from(delta);
        self.scroll = next.clamp(0, i64::from(max)) as u16;
    }

    fn max_scroll(&self) -> u16 {
        let lines = self.record.combined_text.lines().count();
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::materialize;

    fn screen() -> DetailScreen {
        let record = materialize("T", "", "a\nb\nc", "x\ny\nz").unwrap();
        DetailScreen::new(record)
    }

    #[test]
    fn scrolling_clamps_at_both_ends() {
        let mut detail = screen();
        detail.scroll_by(-5);
        assert_eq!(detail.scroll, 0);

        detail.scroll_by(1000);
        // Nine emitted lines (three triplets), so the last index is eight.
        assert_eq!(detail.scroll, 8);
    }

    #[test]
    fn empty_record_never_scrolls() {
        let record = materialize("T", "", "", "").unwrap();
        let mut detail = DetailScreen::new(record);
        detail.scroll_by(3);
        assert_eq!(detail.scroll, 0);
    }
}
