use std::cmp::min;
use std::fs;
use std::mem;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::db::{self, create_record, delete_record, LoadedRecords};
use crate::models::ViewRecord;
use crate::record::materialize;
use crate::snapshot;

use super::forms::{ConfirmRecordDelete, RecordField, RecordForm};
use super::helpers::{centered_rect, export_file_stem, surface_error};
use super::screens::DetailScreen;

/// Footer space reserved for status messages and key hints.
const FOOTER_HEIGHT: u16 = 3;
/// Lines jumped by PageUp/PageDown in the detail view.
const PAGE_SCROLL: i32 = 10;

/// High-level navigation states. Keeping this explicit makes it easy to reason
/// about which rendering path runs and what keyboard shortcuts should do.
enum Screen {
    List,
    Detail(DetailScreen),
}

/// Fine-grained modes layered over the current screen.
enum Mode {
    Normal,
    Adding(RecordForm),
    ConfirmDelete(ConfirmRecordDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    conn: Connection,
    records: Vec<ViewRecord>,
    selected: usize,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Build the initial state from whatever the store produced. Rows that
    /// failed validation were skipped rather than fatal, and the count is
    /// surfaced once here so the user knows the listing is not the whole
    /// table.
    pub fn new(conn: Connection, loaded: LoadedRecords) -> Self {
        let status = if loaded.skipped > 0 {
            Some(StatusMessage {
                text: format!(
                    "Skipped {} incomplete record(s); create new ones to replace them.",
                    loaded.skipped
                ),
                kind: StatusKind::Error,
            })
        } else {
            None
        };

        Self {
            conn,
            records: loaded.records,
            selected: 0,
            screen: Screen::List,
            mode: Mode::Normal,
            status,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Adding(form) => self.handle_adding(code, form),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
        };

        self.mode = mode;
        Ok(exit)
    }

    /// Ctrl+S submits the create form; in every other mode it does nothing.
    pub fn handle_ctrl_s(&mut self) -> Result<()> {
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Adding(mut form) => match self.submit_form(&form) {
                Ok(title) => {
                    self.set_status(format!("Added {title}."), StatusKind::Info);
                    Mode::Normal
                }
                Err(err) => {
                    form.error = Some(surface_error(&err));
                    Mode::Adding(form)
                }
            },
            other => other,
        };

        Ok(())
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::List => {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        *exit = true;
                    }
                    KeyCode::Up => self.move_selection(-1),
                    KeyCode::Down => self.move_selection(1),
                    KeyCode::Home => self.selected = 0,
                    KeyCode::End => {
                        self.selected = self.records.len().saturating_sub(1);
                    }
                    KeyCode::Enter => {
                        if let Some(record) = self.current_record().cloned() {
                            self.clear_status();
                            self.screen = Screen::Detail(DetailScreen::new(record));
                        } else {
                            self.set_status("No record selected.", StatusKind::Error);
                        }
                    }
                    KeyCode::Char('+') => {
                        self.clear_status();
                        return Ok(Mode::Adding(RecordForm::default()));
                    }
                    KeyCode::Char('-') => {
                        if let Some(record) = self.current_record() {
                            let confirm = ConfirmRecordDelete::from(record);
                            self.clear_status();
                            return Ok(Mode::ConfirmDelete(confirm));
                        } else {
                            self.set_status("No record selected to delete.", StatusKind::Error);
                        }
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::Detail(ref mut detail) => {
                let mut status_to_set: Option<(String, StatusKind)> = None;
                let mut back_to_list = false;

                match code {
                    KeyCode::Char('q') => {
                        *exit = true;
                    }
                    KeyCode::Esc => {
                        back_to_list = true;
                    }
                    KeyCode::Up => detail.scroll_by(-1),
                    KeyCode::Down => detail.scroll_by(1),
                    KeyCode::PageUp => detail.scroll_by(-PAGE_SCROLL),
                    KeyCode::PageDown => detail.scroll_by(PAGE_SCROLL),
                    KeyCode::Home => detail.scroll = 0,
                    KeyCode::Char('o') | KeyCode::Char('O') => match &detail.record.link {
                        Some(link) => {
                            if let Err(err) = open_link(link) {
                                status_to_set = Some((
                                    format!("Failed to open link: {err}"),
                                    StatusKind::Error,
                                ));
                            } else {
                                status_to_set =
                                    Some((format!("Opened {link}."), StatusKind::Info));
                            }
                        }
                        None => {
                            status_to_set = Some((
                                "This record does not have a link.".to_string(),
                                StatusKind::Error,
                            ));
                        }
                    },
                    KeyCode::Char('x') | KeyCode::Char('X') => {
                        let record = detail.record.clone();
                        status_to_set = Some(match export_snapshot_file(&record) {
                            Ok(path) => (
                                format!("Snapshot written to {}.", path.display()),
                                StatusKind::Info,
                            ),
                            Err(err) => (
                                format!("Export failed: {}", surface_error(&err)),
                                StatusKind::Error,
                            ),
                        });
                    }
                    _ => {}
                }

                if back_to_list {
                    self.screen = Screen::List;
                    self.clear_status();
                } else if let Some((text, kind)) = status_to_set {
                    self.set_status(text, kind);
                }

                Ok(Mode::Normal)
            }
        }
    }

    fn handle_adding(&mut self, code: KeyCode, mut form: RecordForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.clear_status();
                return Mode::Normal;
            }
            KeyCode::Tab => form.focus_next(),
            KeyCode::BackTab => form.focus_prev(),
            // Enter types a newline inside the paste areas; on the single-line
            // fields it just advances focus.
            KeyCode::Enter => {
                if !form.newline() {
                    form.focus_next();
                }
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                form.error = None;
                form.push_char(ch);
            }
            _ => {}
        }
        Mode::Adding(form)
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmRecordDelete) -> Mode {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                match delete_record(&self.conn, &confirm.id) {
                    Ok(()) => {
                        self.records.retain(|record| record.id != confirm.id);
                        if !self.records.is_empty() {
                            self.selected = min(self.selected, self.records.len() - 1);
                        } else {
                            self.selected = 0;
                        }
                        if let Screen::Detail(detail) = &self.screen {
                            if detail.record.id == confirm.id {
                                self.screen = Screen::List;
                            }
                        }
                        self.set_status(format!("Deleted {}.", confirm.title), StatusKind::Info);
                    }
                    Err(err) => {
                        self.set_status(
                            format!("Failed to delete: {}", surface_error(&err)),
                            StatusKind::Error,
                        );
                    }
                }
                Mode::Normal
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Mode::Normal,
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    /// Run the whole create pipeline: form validation, materialization (which
    /// is where a misaligned paste surfaces), persistence, and the in-memory
    /// list update. Newest records go to the front, matching the query order.
    fn submit_form(&mut self, form: &RecordForm) -> Result<String> {
        let (title, link, original, translated) = form.parse_inputs()?;
        let record =
            materialize(&title, &link, &original, &translated).map_err(|err| anyhow!(err))?;
        create_record(&self.conn, &record)?;
        self.records.insert(0, record);
        self.selected = 0;
        Ok(title)
    }

    fn current_record(&self) -> Option<&ViewRecord> {
        self.records.get(self.selected)
    }

    fn move_selection(&mut self, delta: i32) {
        if self.records.is_empty() {
            return;
        }
        let last = self.records.len() - 1;
        let next = (self.selected as i64 + i64::from(delta)).clamp(0, last as i64);
        self.selected = next as usize;
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
            .split(frame.area());

        match &self.screen {
            Screen::List => self.draw_list(frame, chunks[0]),
            Screen::Detail(detail) => draw_detail(frame, chunks[0], detail),
        }

        self.draw_footer(frame, chunks[1]);

        match &self.mode {
            Mode::Normal => {}
            Mode::Adding(form) => draw_form(frame, frame.area(), form),
            Mode::ConfirmDelete(confirm) => draw_confirm(frame, frame.area(), confirm),
        }
    }

    fn draw_list(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Transcripts ");

        if self.records.is_empty() {
            let empty = Paragraph::new("No transcripts yet. Press + to add one.")
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .records
            .iter()
            .map(|record| ListItem::new(record.list_label()))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(status) = &self.status {
            Line::from(Span::styled(status.text.clone(), status.kind.style()))
        } else {
            let hint = match (&self.mode, &self.screen) {
                (Mode::Adding(_), _) => {
                    "Tab next field · Enter newline · Ctrl+S save · Esc cancel"
                }
                (Mode::ConfirmDelete(_), _) => "y confirm · n cancel",
                (Mode::Normal, Screen::List) => {
                    "↑/↓ select · Enter view · + add · - delete · q quit"
                }
                (Mode::Normal, Screen::Detail(_)) => {
                    "↑/↓ scroll · o open link · x export snapshot · Esc back · q quit"
                }
            };
            Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
        };

        let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
    }
}

/// Render the detail screen: link (if any) above the scrollable combined text.
fn draw_detail(frame: &mut Frame, area: Rect, detail: &DetailScreen) {
    let record = &detail.record;
    let title = format!(" {} ", record.list_label());

    let mut lines: Vec<Line> = Vec::new();
    match &record.link {
        Some(link) => lines.push(Line::from(Span::styled(
            link.clone(),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        ))),
        None => lines.push(Line::from(Span::styled(
            "(no link)",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    lines.push(Line::from(""));
    for text_line in record.combined_text.lines() {
        lines.push(Line::from(text_line.to_string()));
    }

    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((detail.scroll, 0));

    frame.render_widget(body, area);
}

/// Render the create form as a modal over whatever screen is behind it.
fn draw_form(frame: &mut Frame, area: Rect, form: &RecordForm) {
    let modal = centered_rect(85, 85, area);
    frame.render_widget(Clear, modal);

    let block = Block::default().borders(Borders::ALL).title(" New Record ");
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(form.build_line("Title", RecordField::Title)),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(form.build_line("Link", RecordField::Link)),
        rows[1],
    );

    if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            ))),
            rows[2],
        );
    }

    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[3]);

    draw_text_area(frame, areas[0], form, RecordField::Original, "Original");
    draw_text_area(frame, areas[1], form, RecordField::Translated, "Translated");
}

/// One of the two paste areas, scrolled so the tail (where typing happens)
/// stays visible.
fn draw_text_area(
    frame: &mut Frame,
    area: Rect,
    form: &RecordForm,
    field: RecordField,
    name: &str,
) {
    let value = form.value(field);
    let visible = area.height.saturating_sub(2);
    let total = value.split('\n').count() as u16;
    let scroll = total.saturating_sub(visible);

    let paragraph = Paragraph::new(value.to_string())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(form.text_area_title(name, field)),
        )
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Small yes/no modal for record deletion.
fn draw_confirm(frame: &mut Frame, area: Rect, confirm: &ConfirmRecordDelete) {
    let modal = centered_rect(60, 20, area);
    frame.render_widget(Clear, modal);

    let text = format!("Delete \"{}\"? (y/n)", confirm.title);
    let dialog = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Confirm "));

    frame.render_widget(dialog, modal);
}

/// Write the record's snapshot literal into the export directory and hand back
/// the path for the status footer. The exporter itself cannot fail; only the
/// filesystem can.
fn export_snapshot_file(record: &ViewRecord) -> Result<PathBuf> {
    let dir = db::export_dir()?;
    let path = dir.join(format!(
        "{}.snapshot",
        export_file_stem(&record.symbolic_name())
    ));
    fs::write(&path, snapshot::export(record)).context("failed to write snapshot file")?;
    Ok(path)
}
