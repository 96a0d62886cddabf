//! Binary entry point that glues the SQLite-backed catalog to the TUI.
//! Summarizing the bootstrapping pipeline here keeps the intent obvious when
//! revisiting the code: we bring up the database, hydrate the initial app
//! state, and drive the Ratatui event loop until the user exits.
use book_library_manager::{run_app, App, CatalogStore};

/// Initialize persistence, load the catalog, and launch the Ratatui event
/// loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for example
/// an unwritable home directory) to the terminal instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let store = CatalogStore::open()?;
    let books = store.list_books()?;

    let mut app = App::new(store, books);
    run_app(&mut app)
}
