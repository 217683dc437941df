//! Binary entry point that glues the SQLite-backed record store to the TUI:
//! bring up the database, seed the bundled catalog on first launch, hydrate
//! the validated record list, and drive the Ratatui event loop until the user
//! exits.
use bilingual_notebook::{ensure_schema, load_or_seed_records, run_app, App};

/// Initialize persistence, load the displayable records, and launch the
/// event loop. Returning a `Result` bubbles fatal initialization problems
/// (an unwritable home directory, a corrupt database file) to the terminal
/// instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let conn = ensure_schema()?;
    let loaded = load_or_seed_records(&conn)?;

    let mut app = App::new(conn, loaded);
    run_app(&mut app)
}
