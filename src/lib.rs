//! Core library surface for the bilingual transcript notebook.
//!
//! The reusable pieces — the line Aligner, the record adapter, and the
//! snapshot exporter — are deliberately free of I/O and UI so the `bin`
//! target as well as external tooling can call them with plain data. The
//! `db` and `ui` modules are the collaborators that wire those pieces to
//! SQLite and the terminal.

pub mod align;
pub mod catalog;
pub mod db;
pub mod models;
pub mod record;
pub mod snapshot;
pub mod ui;

/// Convenience re-exports for the persistence layer, used by `main.rs` to
/// initialize the embedded SQLite store and preload data.
pub use db::{ensure_schema, load_or_seed_records};

/// The two shapes every other layer manipulates.
pub use models::{PersistedRecord, ViewRecord};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
