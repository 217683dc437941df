//! Ratatui front end: a list of saved transcripts, a scrollable detail view,
//! a modal create form, and a delete confirmation. All of it is collaborator
//! plumbing around the core modules — every piece of actual logic it invokes
//! lives in `align`, `record`, `snapshot`, or `db`.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
